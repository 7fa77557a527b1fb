//! Error types for badge generation

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving assets or composing badges
#[derive(Error, Debug)]
pub enum Error {
    /// The asset does not exist at its source (missing file or HTTP 404)
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Network error while fetching a remote asset
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Asset bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Slice tiles are empty or do not line up on a 3x3 grid
    #[error("Invalid slice set: {0}")]
    InvalidSlices(String),

    /// Font data could not be loaded
    #[error("Font error: {0}")]
    FontError(String),

    /// The batch descriptor is malformed
    #[error("Invalid batch descriptor: {0}")]
    DescriptorError(String),

    /// A descriptor entry cannot be rendered (bad id and similar)
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Failed to encode or write the rendered image
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the asset is simply absent, as opposed to
    /// the source being unreachable.
    pub fn is_missing(&self) -> bool {
        matches!(self, Error::AssetNotFound(_))
    }
}
