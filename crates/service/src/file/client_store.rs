use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::domain::{next_id, Client, ClientInput, ClientPatch};
use crate::clients::repository::ClientRepository;
use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

/// File storage: the whole client collection lives in one JSON array.
#[derive(Clone)]
pub struct ClientStore {
    store: Arc<JsonListStore<Client>>,
}

impl ClientStore {
    /// Initialize the store, creating an empty file if it does not exist yet.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Client>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }

    /// Every record, in file order.
    pub async fn list(&self) -> Result<Vec<Client>, ServiceError> {
        self.store.load().await
    }

    /// First record with the given id.
    pub async fn get(&self, id: u64) -> Result<Client, ServiceError> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::not_found("cliente"))
    }

    /// Validate, assign the next id, append and persist.
    pub async fn create(&self, input: ClientInput) -> Result<Client, ServiceError> {
        let new_client = input.validate()?;
        let created = self
            .store
            .update_list(|clients| {
                let client = new_client.into_client(next_id(clients)?);
                clients.push(client.clone());
                Ok(client)
            })
            .await?;
        info!(cliente_id = created.id, "client created");
        Ok(created)
    }

    /// Shallow-merge `patch` over the first record with the given id and persist.
    pub async fn update(&self, id: u64, patch: ClientPatch) -> Result<Client, ServiceError> {
        let updated = self
            .store
            .update_list(|clients| {
                let existing = clients
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| ServiceError::not_found("cliente"))?;
                existing.merge(patch);
                Ok(existing.clone())
            })
            .await?;
        if updated.id != id {
            warn!(cliente_id = id, new_id = updated.id, "client id overwritten by update");
        }
        info!(cliente_id = updated.id, "client updated");
        Ok(updated)
    }

    /// Remove every record with the given id; `NotFound` if none matched.
    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let removed = self
            .store
            .update_list(|clients| {
                let before = clients.len();
                clients.retain(|c| c.id != id);
                if clients.len() == before {
                    return Err(ServiceError::not_found("cliente"));
                }
                Ok(before - clients.len())
            })
            .await?;
        info!(cliente_id = id, removed, "client deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ClientRepository for ClientStore {
    async fn list(&self) -> Result<Vec<Client>, ServiceError> { self.list().await }
    async fn get(&self, id: u64) -> Result<Client, ServiceError> { self.get(id).await }
    async fn create(&self, input: ClientInput) -> Result<Client, ServiceError> { self.create(input).await }
    async fn update(&self, id: u64, patch: ClientPatch) -> Result<Client, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: u64) -> Result<(), ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn setup_store() -> Result<(Arc<ClientStore>, std::path::PathBuf), ServiceError> {
        let tmp = std::env::temp_dir().join(format!("svc_clientes_{}.json", Uuid::new_v4()));
        let store = ClientStore::new(&tmp).await?;
        Ok((store, tmp))
    }

    fn input(name: &str) -> ClientInput {
        ClientInput {
            name: Some(name.into()),
            address: Some("Rua das Flores, 10".into()),
            postal_code: Some("01310-100".into()),
            birth_date: Some("1985-07-21".into()),
            phone: Some("11 98888-7777".into()),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_submitted_fields() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        let created = store.create(input("Maria")).await?;
        assert_eq!(created.id, 1);

        let found = store.get(created.id).await?;
        assert_eq!(found, created);
        assert_eq!(found.name, "Maria");
        assert_eq!(found.postal_code, "01310-100");
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn sequential_creates_get_consecutive_ids() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        for i in 0..5 {
            store.create(input(&format!("c{i}"))).await?;
        }
        let ids: Vec<u64> = store.list().await?.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_create_leaves_collection_unchanged() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        store.create(input("Ana")).await?;
        let bad = ClientInput { birth_date: None, ..input("Bia") };
        assert!(matches!(store.create(bad).await, Err(ServiceError::Validation(_))));
        let bad = ClientInput { name: Some(String::new()), ..input("") };
        assert!(matches!(store.create(bad).await, Err(ServiceError::Validation(_))));
        assert_eq!(store.list().await?.len(), 1);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_persists() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        let created = store.create(input("João")).await?;
        let patch = ClientPatch { phone: Some("X".into()), ..Default::default() };
        let updated = store.update(created.id, patch).await?;
        assert_eq!(updated.phone, "X");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.postal_code, created.postal_code);
        assert_eq!(updated.birth_date, created.birth_date);

        // reload from disk through a second handle
        let reopened = ClientStore::new(&tmp).await?;
        assert_eq!(reopened.get(created.id).await?.phone, "X");

        let missing = store.update(99, ClientPatch::default()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        let a = store.create(input("A")).await?;
        store.create(input("B")).await?;

        assert!(matches!(store.delete(42).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list().await?.len(), 2);

        store.delete(a.id).await?;
        assert_eq!(store.list().await?.len(), 1);
        assert!(matches!(store.get(a.id).await, Err(ServiceError::NotFound(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn external_edits_are_visible() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        store.create(input("A")).await?;
        tokio::fs::write(
            &tmp,
            r#"[{"cliente_id": 10, "nome": "Ext", "endereço": "e", "cep": "c",
                "data_de_nascimento": "d", "telefone": "t"}]"#,
        )
        .await?;
        let list = store.list().await?;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Ext");
        assert_eq!(store.create(input("B")).await?.id, 11);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_after_max_id_fails_without_writing() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        let raw = r#"[{"cliente_id": 18446744073709551615, "nome": "a"}]"#;
        tokio::fs::write(&tmp, raw).await?;
        assert!(matches!(store.create(input("B")).await, Err(ServiceError::Storage(_))));
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, raw);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_file() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        store.create(input("A")).await?;
        let before = tokio::fs::read_to_string(&tmp).await?;

        // a directory where the temp file should go makes the write fail
        let blocker = tmp.with_file_name(format!(
            "{}.tmp",
            tmp.file_name().unwrap().to_string_lossy()
        ));
        tokio::fs::create_dir(&blocker).await?;

        assert!(matches!(store.create(input("B")).await, Err(ServiceError::Storage(_))));
        assert!(matches!(store.delete(1).await, Err(ServiceError::Storage(_))));
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, before);
        assert_eq!(store.list().await?.len(), 1);

        let _ = tokio::fs::remove_dir(&blocker).await;
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupted_file_surfaces_storage_error() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        tokio::fs::write(&tmp, "[{").await?;
        assert!(matches!(store.list().await, Err(ServiceError::Storage(_))));
        assert!(matches!(store.create(input("A")).await, Err(ServiceError::Storage(_))));
        // the broken file is left as is
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "[{");
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn trait_object_dispatch() -> Result<(), anyhow::Error> {
        let (store, tmp) = setup_store().await?;
        let repo: Arc<dyn ClientRepository> = store;
        let c = repo.create(input("Dyn")).await?;
        assert_eq!(repo.get(c.id).await?.name, "Dyn");
        repo.delete(c.id).await?;
        assert!(repo.list().await?.is_empty());
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
