use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::IoError;

/// Default ceiling for files loaded into memory (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Contents of a file together with its filesystem timestamp.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub data: Bytes,

    /// Last modification time, when the platform reports one
    pub modified: Option<DateTime<Utc>>,
}

/// Load a whole file into memory.
///
/// The declared size is checked against `max_size` before any bytes are
/// read, so oversized files are rejected without being loaded.
pub async fn read_file(path: &Path, max_size: u64) -> Result<LoadedFile, IoError> {
    let path_str = path.display().to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| map_io_error(&path_str, e))?;
    if !metadata.is_file() {
        return Err(IoError::Read {
            path: path_str,
            message: "not a regular file".to_string(),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(IoError::FileTooLarge {
            size,
            limit: max_size,
        });
    }

    let modified = metadata.modified().ok().map(DateTime::<Utc>::from);

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| map_io_error(&path_str, e))?;
    debug!(path = %path_str, size = data.len(), "loaded file");

    Ok(LoadedFile {
        data: Bytes::from(data),
        modified,
    })
}

/// Write `data` to `path`, replacing any existing file.
pub async fn write_file(path: &Path, data: &[u8]) -> Result<(), IoError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|e| IoError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    debug!(path = %path.display(), size = data.len(), "wrote file");
    Ok(())
}

fn map_io_error(path: &str, err: std::io::Error) -> IoError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IoError::NotFound(path.to_string())
    } else {
        IoError::Read {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
