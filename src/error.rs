use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid PPM file {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems found while decoding P3 text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("file is not ASCII text (invalid byte at offset {0})")]
    NotText(usize),
    #[error("invalid PPM file format, please use P3 files only (found {})", .0.as_deref().unwrap_or("nothing"))]
    BadMagic(Option<String>),
    #[error("missing header field `{0}`")]
    MissingField(&'static str),
    #[error("header field `{field}` is not an integer: {token:?}")]
    InvalidField { field: &'static str, token: String },
    #[error("header field `{0}` must be positive")]
    ZeroField(&'static str),
    #[error("image dimensions {width}x{height} are too large")]
    TooLarge { width: u32, height: u32 },
    #[error("channel value #{index} is not a non-negative integer: {token:?}")]
    InvalidChannel { index: usize, token: String },
    #[error("pixel data does not match the specified width and height: expected {expected} pixels, found {found}")]
    PixelCount { expected: usize, found: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("motionblur requires a strength argument")]
    MissingStrength,
    #[error("motion blur strength must be a positive integer, got {0}")]
    InvalidStrength(u32),
}
