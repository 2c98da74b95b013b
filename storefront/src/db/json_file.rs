//! JSON document files with atomic replacement

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use super::repository::{RepoError, RepoResult};

/// Read and parse a JSON file. `Ok(None)` when the file does not exist.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> RepoResult<Option<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(RepoError::Persistence(format!(
                "read {}: {e}",
                path.display()
            )));
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| RepoError::Serialization(format!("{}: {e}", path.display())))
}

/// Write `value` as pretty JSON: write `<file>.tmp`, fsync, rename over the target.
///
/// Readers never observe a partially written file.
pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> RepoResult<()> {
    let data = serde_json::to_vec_pretty(value)
        .map_err(|e| RepoError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RepoError::Persistence(format!("create {}: {e}", parent.display())))?;
    }

    let tmp_path = tmp_path_for(path);
    if let Err(e) = write_and_sync(&tmp_path, &data).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(RepoError::Persistence(format!(
            "write {}: {e}",
            tmp_path.display()
        )));
    }
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(RepoError::Persistence(format!(
            "rename {}: {e}",
            path.display()
        )));
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
