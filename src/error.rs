//! Error types for scene loading and GPU resource creation.
//!
//! Every variant here is fatal: the renderer performs no retries and no
//! partial-failure recovery. Any error raised during startup aborts it.

use thiserror::Error;

/// Main error type for the renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The device-reported buffer size differs from the byte count implied
    /// by the host-side array that was uploaded.
    #[error("{name}: uploaded buffer is {actual} bytes, expected {expected}")]
    UploadSizeMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    /// A required asset file does not exist.
    #[error("could not find file {0}")]
    FileNotFound(String),

    /// A model file exists but could not be parsed.
    #[error("failed to load model {path}: {source}")]
    ModelLoad {
        path: String,
        source: tobj::LoadError,
    },

    /// A texture file exists but could not be decoded.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: String,
        source: image::ImageError,
    },

    /// The shading program failed validation.
    #[error("shader program failed to build: {0}")]
    ShaderLinkFailure(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the renderer's error type.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_mismatch_reports_both_sizes() {
        let err = RenderError::UploadSizeMismatch {
            name: "ground".to_string(),
            expected: 128,
            actual: 124,
        };
        let msg = err.to_string();
        assert!(msg.contains("128"));
        assert!(msg.contains("124"));
        assert!(msg.contains("ground"));
    }
}
