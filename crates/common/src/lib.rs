//! Shared helpers for the clientes workspace: tracing setup, runtime
//! directory checks and small response types used by the HTTP layer.

pub mod types;
pub mod utils;
pub mod env;
