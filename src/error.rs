//! Error types for the parts of yvc that touch the outside world.
//!
//! The matching engine in [`crate::pattern`] has no error type: bad pattern
//! text simply matches nothing. Errors come from loading configuration and
//! vulnerability lists, fetching lists, and setting up logging.

/// Everything that can go wrong outside the matching engine.
#[derive(Debug, thiserror::Error)]
pub enum YvcError {
    /// File I/O failure
    #[error("io error: {path}: {source}")]
    Io {
        /// File the operation was about
        path: String,
        source: std::io::Error,
    },

    /// An explicitly requested config file does not exist
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    /// Config file exists but is not valid
    #[error("config parse error: {path}: {reason}")]
    ConfigParse { path: String, reason: String },

    /// Downloading a vulnerability list failed
    #[error("fetch failed: {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Content that should be a vulnerability list has no usable entries
    #[error("no vulnerability entries found in {0}")]
    EmptyList(String),

    /// The tracing subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl YvcError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        YvcError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, YvcError>;
