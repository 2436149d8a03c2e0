use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Message returned when a create request lacks any required field.
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Erro: Todos os campos (nome, endereço, cep, data_de_nascimento, telefone) são obrigatórios.";

/// A stored client record.
///
/// Keys that are not part of the record (added by hand to the storage file or
/// sent in an update) are kept in `extra` and written back untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    #[serde(rename = "cliente_id")]
    pub id: u64,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "endereço", default)]
    pub address: String,
    #[serde(rename = "cep", default)]
    pub postal_code: String,
    #[serde(rename = "data_de_nascimento", default)]
    pub birth_date: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create payload. Every field is optional on the wire so that a missing one
/// becomes a validation error instead of a deserialization failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientInput {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "endereço", default)]
    pub address: Option<String>,
    #[serde(rename = "cep", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "data_de_nascimento", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

/// A create payload that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub birth_date: String,
    pub phone: String,
}

impl ClientInput {
    /// All five fields must be present and non-empty. Formats are not checked.
    pub fn validate(self) -> Result<NewClient, ServiceError> {
        fn required(v: Option<String>) -> Result<String, ServiceError> {
            v.filter(|s| !s.is_empty())
                .ok_or_else(|| ServiceError::Validation(REQUIRED_FIELDS_MESSAGE.into()))
        }
        Ok(NewClient {
            name: required(self.name)?,
            address: required(self.address)?,
            postal_code: required(self.postal_code)?,
            birth_date: required(self.birth_date)?,
            phone: required(self.phone)?,
        })
    }
}

impl NewClient {
    pub fn into_client(self, id: u64) -> Client {
        Client {
            id,
            name: self.name,
            address: self.address,
            postal_code: self.postal_code,
            birth_date: self.birth_date,
            phone: self.phone,
            extra: Map::new(),
        }
    }
}

/// Update payload for a shallow merge. Absent (or `null`) fields leave the
/// stored value alone; `cliente_id` is accepted and overwrites the id.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientPatch {
    #[serde(rename = "cliente_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "endereço", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "cep", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "data_de_nascimento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Client {
    pub fn merge(&mut self, patch: ClientPatch) {
        if let Some(id) = patch.id { self.id = id; }
        if let Some(v) = patch.name { self.name = v; }
        if let Some(v) = patch.address { self.address = v; }
        if let Some(v) = patch.postal_code { self.postal_code = v; }
        if let Some(v) = patch.birth_date { self.birth_date = v; }
        if let Some(v) = patch.phone { self.phone = v; }
        self.extra.extend(patch.extra);
    }
}

/// Next id for a new record: one past the largest id present, or 1.
/// Fails once a stored id sits at `u64::MAX`.
pub fn next_id(clients: &[Client]) -> Result<u64, ServiceError> {
    match clients.iter().map(|c| c.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| ServiceError::Storage(format!("cliente_id space exhausted (max id {max})"))),
    }
}
