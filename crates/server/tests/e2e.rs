use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup;

struct TestApp {
    base_url: String,
    data_file: PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated storage file per test run
    let data_file = PathBuf::from(format!("target/test-data/{}/clientes.json", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.path = data_file.clone();

    let app = startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_client_lifecycle_persists_to_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/clientes", app.base_url))
        .json(&json!({
            "nome": "Carla",
            "endereço": "Rua Augusta, 500",
            "cep": "01305-000",
            "data_de_nascimento": "1979-11-03",
            "telefone": "11 95555-4444"
        }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let id = body["cliente"]["cliente_id"].as_u64().unwrap();
    assert_eq!(id, 1);

    // storage file holds the same record, 4-space indented
    let raw = tokio::fs::read_to_string(&app.data_file).await?;
    assert!(raw.contains("\n        \"nome\": \"Carla\""));
    let stored: Vec<Value> = serde_json::from_str(&raw)?;
    assert_eq!(stored, vec![body["cliente"].clone()]);

    let res = c.put(format!("{}/clientes/{}", app.base_url, id))
        .json(&json!({"cep": "01305-001"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/clientes/{}", app.base_url, id)).send().await?;
    let got = res.json::<Value>().await?;
    assert_eq!(got["cep"], "01305-001");
    assert_eq!(got["nome"], "Carla");

    let res = c.delete(format!("{}/clientes/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/clientes/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let stored: Vec<Value> = serde_json::from_str(&tokio::fs::read_to_string(&app.data_file).await?)?;
    assert!(stored.is_empty());

    if let Some(dir) = app.data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..10 {
        let c = c.clone();
        let url = format!("{}/clientes", app.base_url);
        handles.push(tokio::spawn(async move {
            c.post(url)
                .json(&json!({
                    "nome": format!("p{i}"),
                    "endereço": "x",
                    "cep": "y",
                    "data_de_nascimento": "z",
                    "telefone": "t"
                }))
                .send()
                .await
        }));
    }
    for h in handles {
        assert_eq!(h.await??.status(), HttpStatusCode::CREATED);
    }

    let list = c.get(format!("{}/clientes", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    let mut ids: Vec<u64> = list.iter().map(|v| v["cliente_id"].as_u64().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    if let Some(dir) = app.data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}
