use crate::error::FormatError;
use image::{ImageBuffer, Rgb};

/// Row-major RGB storage. `u32` channels leave room for any declared `maxColor`.
pub type PixelBuffer = ImageBuffer<Rgb<u32>, Vec<u32>>;

/// A decoded P3 image: dimensions, the declared maximum channel value and the pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    max_color: u32,
    buffer: PixelBuffer,
}

impl Image {
    pub fn new(width: u32, height: u32, max_color: u32) -> Self {
        Self {
            max_color,
            buffer: PixelBuffer::new(width, height),
        }
    }

    /// Builds an image from row-major `[r, g, b]` triples.
    ///
    /// Fails unless exactly `width * height` triples are given.
    pub fn from_pixels(
        width: u32,
        height: u32,
        max_color: u32,
        pixels: Vec<[u32; 3]>,
    ) -> Result<Self, FormatError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(FormatError::PixelCount {
                expected,
                found: pixels.len(),
            });
        }

        let raw = pixels.into_iter().flatten().collect::<Vec<u32>>();
        let buffer = PixelBuffer::from_raw(width, height, raw)
            .ok_or(FormatError::TooLarge { width, height })?;

        Ok(Self { max_color, buffer })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn max_color(&self) -> u32 {
        self.max_color
    }

    /// Pixel at row `i`, column `j`.
    pub fn pixel(&self, i: u32, j: u32) -> [u32; 3] {
        self.buffer.get_pixel(j, i).0
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.buffer.pixels().map(|p| p.0)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Swaps in a freshly computed buffer. The dimensions must not change.
    pub fn replace_buffer(&mut self, buffer: PixelBuffer) {
        debug_assert_eq!(
            buffer.dimensions(),
            self.buffer.dimensions(),
            "replacement buffer must keep the image dimensions"
        );
        self.buffer = buffer;
    }

    pub fn describe(&self) -> String {
        format!(
            "PPM Image: {}x{}, Max Color: {}",
            self.width(),
            self.height(),
            self.max_color
        )
    }
}

/// `width * height`, or `TooLarge` when the raw channel buffer could not be addressed.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, FormatError> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|count| count.checked_mul(3).is_some())
        .ok_or(FormatError::TooLarge { width, height })
}
