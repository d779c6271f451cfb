//! Loading plain-text documents from files and directory trees.

use core::result::Result as CoreResult;
use serde_json::Value;
use sift_core::{Document, Error, Metadata, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// File extensions the loader reads, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Value stored under the `file_type` metadata key.
const TEXT_FILE_TYPE: &str = "text";

/// Check whether a path has a supported extension
pub fn is_supported(path: &Path) -> bool {
    let Some(extension) = path.extension() else {
        return false;
    };
    extension.to_str().is_some_and(|ext| {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Hidden files and directories are skipped, except the walk root.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Reads `.txt` and `.md` files into [`Document`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self
    }

    /// Load a single file or every supported file below a directory
    ///
    /// # Errors
    /// Returns `NotFound` if `path` does not exist, or the errors of
    /// [`DocumentLoader::load_file`] for a file path
    pub fn load(&self, path: &Path) -> Result<Vec<Document>> {
        if path.is_dir() {
            self.load_directory(path)
        } else {
            Ok(vec![self.load_file(path)?])
        }
    }

    /// Load one file
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist
    /// - `UnsupportedFormat` if the extension is not `txt` or `md`
    /// - `Io` if the file cannot be read as UTF-8
    pub fn load_file(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        if !is_supported(path) {
            let extension = path
                .extension()
                .map_or_else(String::new, |ext| ext.to_string_lossy().to_lowercase());
            return Err(Error::UnsupportedFormat(format!(
                "{} (extension '{extension}')",
                path.display()
            )));
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(path.display().to_string()));
            }
            Err(error) => return Err(error.into()),
        };

        let file_name = path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        let mut metadata = Metadata::new();
        metadata.insert(
            "source".to_owned(),
            Value::String(path.display().to_string()),
        );
        metadata.insert("file_name".to_owned(), Value::String(file_name));
        metadata.insert(
            "file_type".to_owned(),
            Value::String(TEXT_FILE_TYPE.to_owned()),
        );

        debug!("Loaded {} ({} bytes)", path.display(), content.len());
        Ok(Document::new(content, path.to_path_buf()).with_metadata(metadata))
    }

    /// Load every supported file below `dir`, in file-name order
    ///
    /// Unsupported files are skipped silently; unreadable ones are logged and skipped.
    ///
    /// # Errors
    /// Returns `NotFound` if `dir` does not exist
    pub fn load_directory(&self, dir: &Path) -> Result<Vec<Document>> {
        if !dir.exists() {
            return Err(Error::NotFound(dir.display().to_string()));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(CoreResult::ok)
        {
            if !entry.file_type().is_file() || !is_supported(entry.path()) {
                continue;
            }

            match self.load_file(entry.path()) {
                Ok(document) => documents.push(document),
                Err(error) => warn!("Skipping {}: {error}", entry.path().display()),
            }
        }

        debug!(
            "Loaded {} documents from {}",
            documents.len(),
            dir.display()
        );
        Ok(documents)
    }
}
