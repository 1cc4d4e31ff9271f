use std::path::PathBuf;

/// Everything that can go wrong during an import run.
///
/// The `Store*` variants abort the whole run; `Fetch`, `ManifestInvalid` and
/// `Merge` only fail the source they name.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("store file not found at '{}'", .path.display())]
    StoreMissing { path: PathBuf },

    #[error("failed to read store file '{}': {source}", .path.display())]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file '{}' is not valid JSON: {source}", .path.display())]
    StoreInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store file '{}' is malformed: {reason}", .path.display())]
    StoreMalformed { path: PathBuf, reason: String },

    #[error("failed to save store to '{}': {reason}", .path.display())]
    StoreSave { path: PathBuf, reason: String },

    #[error("failed to fetch '{source_ref}': {reason}")]
    Fetch { source_ref: String, reason: String },

    #[error("invalid manifest from '{source_ref}': {reason}")]
    ManifestInvalid { source_ref: String, reason: String },

    #[error("failed to merge manifest from '{source_ref}': {reason}")]
    Merge { source_ref: String, reason: String },
}

impl ImportError {
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::StoreMissing { .. } => "StoreMissing",
            ImportError::StoreUnreadable { .. } => "StoreUnreadable",
            ImportError::StoreInvalid { .. } => "StoreInvalid",
            ImportError::StoreMalformed { .. } => "StoreMalformed",
            ImportError::StoreSave { .. } => "StoreSave",
            ImportError::Fetch { .. } => "FetchError",
            ImportError::ManifestInvalid { .. } => "ManifestInvalid",
            ImportError::Merge { .. } => "MergeError",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
