use std::path::Path;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::utils::format_file_size;

/// A file the user has picked for upload with the next message.
///
/// The contents are read when the file is picked, so a later send uploads
/// exactly what was listed even if the file changes on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    data: Bytes,
}

impl SelectedFile {
    /// Create a file selection from in-memory contents.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk.  The selection is named after the final path
    /// component.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::validation(
                    format!("{} does not name a file", path.display()),
                    Some("path".to_string()),
                )
            })?;
        let data = std::fs::read(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        Ok(Self::new(name, data))
    }

    /// The file name used as the selection key and the upload file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Human-readable size, e.g. "1.5 KB".
    pub fn display_size(&self) -> String {
        format_file_size(self.size())
    }

    /// The file contents.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}
