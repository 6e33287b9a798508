//! Error types for the memory pipeline.

use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("home directory not found")]
    HomeNotFound,

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("unknown hook event: {0}")]
    UnknownEvent(String),

    #[error("invalid pattern in group '{group}'")]
    Pattern {
        group: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("failed to {action} {path}")]
    Io {
        action: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MemoryError {
    pub(crate) fn io(action: &'static str, path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        MemoryError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
