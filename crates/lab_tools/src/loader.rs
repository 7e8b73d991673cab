//! Balance document loading.
//!
//! Documents are the editor's JSON export. RON is accepted too, with the
//! same field names, for hand-written fixtures.

use std::path::Path;

use lab_core::data::Document;
use lab_core::export::GameExport;
use thiserror::Error;

/// Errors that can occur while loading or writing a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File not found.
    #[error("Document file not found: {0}")]
    FileNotFound(String),

    /// Failed to read or write a file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON.
    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse RON.
    #[error("Failed to parse RON document: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// The file extension is neither `.json` nor `.ron`.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The editor's JSON.
    Json,
    /// Rusty Object Notation.
    Ron,
}

impl Format {
    /// Pick a format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`LoadError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "ron" => Ok(Self::Ron),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse a document from text.
///
/// # Errors
///
/// Parse errors of the chosen format.
pub fn parse_document(contents: &str, format: Format) -> LoadResult<Document> {
    let document = match format {
        Format::Json => serde_json::from_str(contents)?,
        Format::Ron => ron::from_str(contents)?,
    };
    Ok(document)
}

/// Load a document from a `.json` or `.ron` file.
///
/// # Errors
///
/// Missing file, unreadable file, unsupported extension or parse failure.
pub fn load_document<P: AsRef<Path>>(path: P) -> LoadResult<Document> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }
    let format = Format::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let document = parse_document(&contents, format)?;

    tracing::info!(
        "Loaded '{}' with {} classes, {} weapons, {} units, {} stages",
        path.display(),
        document.classes.len(),
        document.weapons.len(),
        document.units.len(),
        document.stages.len()
    );
    Ok(document)
}

/// Pretty JSON of a game export.
///
/// # Errors
///
/// Serialization failure.
pub fn export_to_json(export: &GameExport) -> LoadResult<String> {
    Ok(serde_json::to_string_pretty(export)?)
}

/// Write a game export as pretty JSON.
///
/// # Errors
///
/// Serialization or write failure.
pub fn write_export<P: AsRef<Path>>(path: P, export: &GameExport) -> LoadResult<()> {
    let path = path.as_ref();
    let json = export_to_json(export)?;
    std::fs::write(path, json).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("Export written to {}", path.display());
    Ok(())
}
