use crate::error::{Error, FormatError, Result};
use crate::model::{pixel_count, Image};
use std::{fs, path::Path};

pub const MAGIC: &str = "P3";

/// Whitespace-delimited tokens with a read cursor.
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace().collect(),
            pos: 0,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn remaining(&self) -> &[&'a str] {
        &self.tokens[self.pos..]
    }

    fn header_field(&mut self, field: &'static str) -> std::result::Result<u32, FormatError> {
        let token = self.next().ok_or(FormatError::MissingField(field))?;
        let value = token
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidField {
                field,
                token: token.to_string(),
            })?;

        if value == 0 {
            return Err(FormatError::ZeroField(field));
        }
        Ok(value)
    }
}

/// Parses P3 text into an [`Image`].
///
/// The input is a single stream of whitespace-separated tokens: magic, width,
/// height, maxColor, then channel values grouped into `[r, g, b]` triples.
/// One or two trailing tokens that do not complete a triple are dropped with a
/// warning before the pixel count is checked against `width * height`.
pub fn decode(text: &str) -> std::result::Result<Image, FormatError> {
    let mut tokens = Tokens::new(text);

    match tokens.next() {
        Some(MAGIC) => {}
        other => return Err(FormatError::BadMagic(other.map(str::to_string))),
    }

    let width = tokens.header_field("width")?;
    let height = tokens.header_field("height")?;
    let max_color = tokens.header_field("maxColor")?;
    let expected = pixel_count(width, height)?;

    let data = tokens.remaining();
    let triples = data.chunks_exact(3);
    let leftover = triples.remainder().len();
    if leftover > 0 {
        log::warn!("ignoring {leftover} trailing channel value(s) that do not form a full pixel");
    }

    if triples.len() != expected {
        return Err(FormatError::PixelCount {
            expected,
            found: triples.len(),
        });
    }

    let mut pixels = Vec::with_capacity(expected);
    for (n, triple) in triples.enumerate() {
        let mut pixel = [0u32; 3];
        for (c, token) in triple.iter().enumerate() {
            pixel[c] = token
                .parse::<u32>()
                .map_err(|_| FormatError::InvalidChannel {
                    index: n * 3 + c,
                    token: token.to_string(),
                })?;
        }
        pixels.push(pixel);
    }

    log::debug!("decoded {width}x{height} image, max color {max_color}");
    Image::from_pixels(width, height, max_color, pixels)
}

/// Like [`decode`], for raw file contents.
pub fn decode_bytes(bytes: &[u8]) -> std::result::Result<Image, FormatError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| FormatError::NotText(e.valid_up_to()))?;
    decode(text)
}

/// Reads and decodes the P3 file at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_bytes(&bytes).map_err(|source| Error::Format {
        path: path.to_path_buf(),
        source,
    })
}
