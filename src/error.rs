//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, decoder and encoder errors, and provides semantic variants
//! for invalid input, processing failures and oversized buffers.
//!
//! An unknown color-scheme name is deliberately absent from this taxonomy: it resolves to
//! the fallback scheme (see [`crate::core::processing::schemes::resolve_scheme`]).
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("TIFF encoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Resource exhausted: {detail}")]
    ResourceExhausted { detail: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Processing error during {context}: {source}")]
    ProcessingFailed {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Error::InvalidImage {
            reason: reason.into(),
        }
    }

    /// Wrap a failure from an underlying numeric/image library, keeping the cause attached.
    pub fn processing<E>(context: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::ProcessingFailed {
            context,
            source: Box::new(source),
        }
    }

    /// Short message suitable for end users. Never includes library internals.
    pub fn user_message(&self) -> String {
        match self {
            Error::Decode(_) | Error::InvalidImage { .. } => {
                "Image format error: the file is not a supported, non-empty gray or color image"
                    .to_string()
            }
            Error::ResourceExhausted { .. } => {
                "Not enough memory: the image is too large to process".to_string()
            }
            Error::Processing(_) | Error::ProcessingFailed { .. } => {
                "Image processing failed".to_string()
            }
            Error::InvalidArgument { arg, value } => {
                format!("Invalid setting for {arg}: {value}")
            }
            Error::Io(_) => "Could not read or write the requested file".to_string(),
            Error::Json(_) => "Could not read or write JSON data".to_string(),
            Error::Jpeg(_) | Error::Tiff(_) => "Could not encode the output image".to_string(),
        }
    }
}
