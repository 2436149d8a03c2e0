//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can call
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the storage file's directory exists before the store opens it.
pub async fn ensure_env(storage_path: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(storage_path).await
}
