use async_trait::async_trait;

use crate::clients::domain::{Client, ClientInput, ClientPatch};
use crate::errors::ServiceError;

/// Storage-agnostic access to client records.
///
/// Lookups by an unknown id return `ServiceError::NotFound`; storage faults
/// return `ServiceError::Storage`.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Client>, ServiceError>;
    async fn get(&self, id: u64) -> Result<Client, ServiceError>;
    async fn create(&self, input: ClientInput) -> Result<Client, ServiceError>;
    async fn update(&self, id: u64, patch: ClientPatch) -> Result<Client, ServiceError>;
    async fn delete(&self, id: u64) -> Result<(), ServiceError>;
}
