//! Service layer for the clientes API.
//! - Domain types and validation for client records.
//! - File-backed persistence of the whole collection as JSON.
//! - A repository trait so the HTTP layer does not depend on the storage backend.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod clients;
pub mod file;
