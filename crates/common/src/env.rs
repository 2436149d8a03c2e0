//! Environment/runtime helpers
//!
//! Sanity checks to ensure the storage location exists at startup.

use std::path::Path;
use tracing::{info, warn};

/// Ensure the parent directory of the storage file exists.
pub async fn ensure_env(storage_path: &Path) -> anyhow::Result<()> {
    let Some(dir) = storage_path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(path = %storage_path.display(), "storage location ready");
    Ok(())
}
