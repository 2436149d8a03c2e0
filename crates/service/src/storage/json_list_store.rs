use std::{io::ErrorKind, marker::PhantomData, path::{Path, PathBuf}, sync::Arc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// Persists a `Vec<T>` as a pretty-printed JSON array. Nothing is cached:
/// every `load` reads the whole file and every mutation rewrites it, so edits
/// made to the file by other tools show up on the next call.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Initialize the store from a path. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        if fs::metadata(&file_path).await.is_err() {
            fs::write(&file_path, b"[]").await.map_err(|e| {
                error!(path = %file_path.display(), error = %e, "cannot create storage file");
                ServiceError::storage(e)
            })?;
        }

        Ok(Arc::new(Self { file_path, write_lock: Mutex::new(()), _marker: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the whole collection. A missing or blank file is an empty collection;
    /// unreadable or malformed content is an error.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                error!(path = %self.file_path.display(), error = %e, "failed to read storage file");
                return Err(ServiceError::storage(e));
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "failed to parse storage file");
            ServiceError::storage(e)
        })
    }

    /// Rewrite the whole collection. Data goes to a sibling temp file first and
    /// is renamed over the target.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = to_pretty_json(items).map_err(ServiceError::storage)?;
        let tmp = self.tmp_path();
        if let Err(e) = write_then_rename(&tmp, &self.file_path, &data).await {
            error!(path = %self.file_path.display(), error = %e, "failed to write storage file");
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(e));
        }
        debug!(path = %self.file_path.display(), items = items.len(), bytes = data.len(), "collection saved");
        Ok(())
    }

    /// Load, apply a mutation and persist, holding the store's write lock for the
    /// whole sequence. Nothing is written when `f` returns an error.
    pub async fn update_list<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

async fn write_then_rename(tmp: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(tmp, data).await?;
    fs::rename(tmp, target).await
}

/// JSON with a 4-space indent, the layout the storage file has always used.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
