//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the mica crate.
#[derive(Debug)]
pub enum MicaError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to decode an image file into texture data.
    TextureDecode(image::ImageError),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MicaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TextureDecode(e) => {
                write!(f, "texture decode error: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MicaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::TextureDecode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MicaError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for MicaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for MicaError {
    fn from(e: image::ImageError) -> Self {
        Self::TextureDecode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undecodable_bytes_map_to_texture_decode() {
        let decode_err = image::load_from_memory(&[0u8; 4]).unwrap_err();
        let err = MicaError::from(decode_err);
        assert!(matches!(err, MicaError::TextureDecode(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("texture decode error"));
    }
}
