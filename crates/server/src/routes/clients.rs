use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::clients::{Client, ClientInput, ClientPatch};

use common::types::Mensagem;

use crate::errors::ApiError;
use crate::state::AppState;

pub const CREATED_MESSAGE: &str = "Cliente adicionado com sucesso";
pub const UPDATED_MESSAGE: &str = "Cliente atualizado com sucesso";
pub const DELETED_MESSAGE: &str = "Cliente removido com sucesso";

/// `{ "mensagem": ..., "cliente": {...} }`
#[derive(Serialize, Debug)]
pub struct ClienteResposta {
    pub mensagem: &'static str,
    pub cliente: Client,
}

/// Ids that are not integers cannot match any record.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim().parse::<u64>().map_err(|_| ApiError::not_found())
}

#[utoipa::path(get, path = "/clientes", tag = "clientes", responses((status = 200, description = "All clients", body = [crate::openapi::ClientDoc]), (status = 500, description = "Storage error", body = crate::openapi::MensagemDoc)))]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = state.clients.list().await?;
    Ok(Json(clients))
}

#[utoipa::path(get, path = "/clientes/{id}", tag = "clientes", params(("id" = u64, Path, description = "cliente_id")), responses((status = 200, description = "OK", body = crate::openapi::ClientDoc), (status = 404, description = "Not Found", body = crate::openapi::MensagemDoc)))]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let id = parse_id(&id)?;
    let client = state.clients.get(id).await?;
    Ok(Json(client))
}

#[utoipa::path(post, path = "/clientes", tag = "clientes", request_body = crate::openapi::ClientInputDoc, responses((status = 201, description = "Created", body = crate::openapi::ClienteRespostaDoc), (status = 400, description = "Missing field", body = crate::openapi::MensagemDoc)))]
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ClienteResposta>), ApiError> {
    let Json(input) = payload?;
    let cliente = state.clients.create(input).await?;
    Ok((StatusCode::CREATED, Json(ClienteResposta { mensagem: CREATED_MESSAGE, cliente })))
}

#[utoipa::path(put, path = "/clientes/{id}", tag = "clientes", params(("id" = u64, Path, description = "cliente_id")), request_body = crate::openapi::ClientPatchDoc, responses((status = 200, description = "Updated", body = crate::openapi::ClienteRespostaDoc), (status = 404, description = "Not Found", body = crate::openapi::MensagemDoc)))]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ClientPatch>, JsonRejection>,
) -> Result<Json<ClienteResposta>, ApiError> {
    // no JSON body at all is an empty patch
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(JsonRejection::MissingJsonContentType(_)) => ClientPatch::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let id = parse_id(&id)?;
    let cliente = state.clients.update(id, patch).await?;
    Ok(Json(ClienteResposta { mensagem: UPDATED_MESSAGE, cliente }))
}

#[utoipa::path(delete, path = "/clientes/{id}", tag = "clientes", params(("id" = u64, Path, description = "cliente_id")), responses((status = 200, description = "Deleted", body = crate::openapi::MensagemDoc), (status = 404, description = "Not Found", body = crate::openapi::MensagemDoc)))]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Mensagem>, ApiError> {
    let id = parse_id(&id)?;
    state.clients.delete(id).await?;
    Ok(Json(Mensagem::new(DELETED_MESSAGE)))
}
