use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("unable to access image file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode PNG image")]
    Decode(#[from] ::png::DecodingError),

    #[error("unable to encode PNG image")]
    Encode(#[from] ::png::EncodingError),

    #[error("unsupported PNG color type {0:?}")]
    UnsupportedColorType(::png::ColorType),

    #[error("texture is already locked")]
    AlreadyLocked,

    #[error("expected a {expected:?} image but got {found:?}")]
    SizeMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
}
