//! Import and export of the document as a plain file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "document.md";

/// Media type of exported documents.
pub const EXPORT_MIME_TYPE: &str = "text/markdown";

/// Extensions suggested when choosing a file to import. Anything else is
/// still accepted and read as text.
pub const IMPORT_EXTENSIONS: &[&str] = &["md", "txt"];

#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not read {}: {source}", path.display())]
    ImportRead { path: PathBuf, source: io::Error },
    #[error("could not write {}: {source}", path.display())]
    ExportWrite { path: PathBuf, source: io::Error },
}

/// Read a file as document text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
///
/// # Errors
/// Returns [`FileError::ImportRead`] if the file cannot be read.
pub fn import(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::ImportRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(path = %path.display(), "import is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Ok(text)
}

/// Where an export into `dir` lands.
pub fn export_path(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILE_NAME)
}

/// Write `text` byte-for-byte to `document.md` inside `dir`, creating the
/// directory when it does not exist yet.
///
/// # Errors
/// Returns [`FileError::ExportWrite`] if the directory or file cannot be
/// written.
pub fn export(text: &str, dir: &Path) -> Result<PathBuf, FileError> {
    let path = export_path(dir);
    fs::create_dir_all(dir)
        .and_then(|()| fs::write(&path, text.as_bytes()))
        .map_err(|source| FileError::ExportWrite {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "exported document");
    Ok(path)
}

/// Whether `path` has one of the [`IMPORT_EXTENSIONS`].
pub fn has_import_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMPORT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
