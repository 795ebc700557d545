use thiserror::Error;

/// Outcomes of a combine operation that reach the caller.
#[derive(Error, Debug)]
pub enum CombineError {
    #[error("No markdown files found in {folder}")]
    EmptyInput { folder: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CombineError {
    /// Empty input is a status, not a failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CombineError::EmptyInput { .. })
    }
}
