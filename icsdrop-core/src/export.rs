//! Handing finished calendars to a persistence backend.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IcsError, IcsResult};

/// MIME type attached to exported calendars.
pub const ICS_MIME_TYPE: &str = "text/x-vCalendar;charset=utf-8";

/// A text payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub content: String,
    pub mime_type: &'static str,
}

impl Blob {
    pub fn calendar(content: String) -> Self {
        Blob {
            content,
            mime_type: ICS_MIME_TYPE,
        }
    }
}

/// Persists a blob under a suggested filename.
pub trait BlobSaver {
    fn save(&self, blob: &Blob, filename: &str) -> IcsResult<()>;
}

/// Writes blobs into a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSaver {
    dir: PathBuf,
}

impl FileSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSaver { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BlobSaver for FileSaver {
    fn save(&self, blob: &Blob, filename: &str) -> IcsResult<()> {
        if !is_plain_filename(filename) {
            return Err(IcsError::InvalidFilename(filename.to_string()));
        }

        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(filename);
        std::fs::write(&path, &blob.content)?;

        debug!(
            path = %path.display(),
            bytes = blob.content.len(),
            mime_type = blob.mime_type,
            "wrote calendar"
        );

        Ok(())
    }
}

/// A single path component: no separators, not `.` or `..`.
fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}
