use std::path::{Path, PathBuf};

/// Convenience result type used across devframe.
pub type DevframeResult<T> = Result<T, DevframeError>;

/// Boxed cause carried by [`DevframeError::Composition`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum DevframeError {
    /// A frame asset file is absent or is not a readable image.
    #[error("asset missing: '{}': {reason}", .path.display())]
    AssetMissing {
        /// Resolved path that was tried.
        path: PathBuf,
        /// Why the asset could not be used.
        reason: String,
    },

    /// Width/height of a source raster or frame asset could not be determined.
    #[error("metadata read error: {0}")]
    MetadataRead(String),

    /// A resize or blend step failed while building the composite.
    #[error("composition error: {context}")]
    Composition {
        /// Step that failed.
        context: String,
        /// Underlying cause.
        #[source]
        source: BoxedCause,
    },

    /// Invalid configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DevframeError {
    /// Build a [`DevframeError::AssetMissing`] value.
    pub fn asset_missing(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::AssetMissing {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Build a [`DevframeError::MetadataRead`] value.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::MetadataRead(msg.into())
    }

    /// Build a [`DevframeError::Composition`] value wrapping `source`.
    pub fn composition(context: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Composition {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Build a [`DevframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
