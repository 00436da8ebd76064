pub mod decoder;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod model;

pub use decoder::{decode, decode_bytes, read_file};
pub use encoder::{encode, write_file, write_to};
pub use error::{ArgumentError, Error, FormatError, Result};
pub use filter::{apply_filter, Filter, FilterKind};
pub use model::{Image, PixelBuffer};
