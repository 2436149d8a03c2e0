use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const NOT_FOUND_MESSAGE: &str = "Cliente não encontrado";
pub const STORAGE_MESSAGE: &str = "Erro ao acessar o armazenamento de clientes";

/// Error body for the clientes routes: `{ "mensagem": ..., "erro"?: ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub mensagem: String,
    pub erro: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, mensagem: impl Into<String>, erro: Option<String>) -> Self {
        Self { status, mensagem: mensagem.into(), erro }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE, None)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg, None),
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Storage(detail) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, STORAGE_MESSAGE, Some(detail))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), error = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text(), None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, erro = ?self.erro, "request failed");
        }
        let body = match self.erro {
            Some(erro) => serde_json::json!({"mensagem": self.mensagem, "erro": erro}),
            None => serde_json::json!({"mensagem": self.mensagem}),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
