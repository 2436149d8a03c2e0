//! JSON-file implementations of the service repositories.

pub mod client_store;
