use crate::error::ArgumentError;
use crate::model::{Image, PixelBuffer};
use image::Rgb;
use std::{fmt, num::NonZeroU32, str::FromStr};

/// Inversion is always against this value, whatever the image declares as `maxColor`.
pub const INVERT_BASE: u32 = 255;
pub const EMBOSS_GREY: u32 = 128;
pub const EMBOSS_MAX: i64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterKind {
    Grayscale,
    Invert,
    Emboss,
    #[value(name = "motionblur")]
    MotionBlur,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Grayscale,
        FilterKind::Invert,
        FilterKind::Emboss,
        FilterKind::MotionBlur,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Invert => "invert",
            FilterKind::Emboss => "emboss",
            FilterKind::MotionBlur => "motionblur",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown filter `{s}`"))
    }
}

/// A filter selection with its parameters already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Grayscale,
    Invert,
    Emboss,
    MotionBlur { strength: NonZeroU32 },
}

impl Filter {
    /// `strength` is required for motion blur and ignored otherwise.
    pub fn new(kind: FilterKind, strength: Option<u32>) -> Result<Self, ArgumentError> {
        if kind != FilterKind::MotionBlur {
            if let Some(strength) = strength {
                log::warn!("{kind} takes no strength, ignoring {strength}");
            }
        }

        Ok(match kind {
            FilterKind::Grayscale => Filter::Grayscale,
            FilterKind::Invert => Filter::Invert,
            FilterKind::Emboss => Filter::Emboss,
            FilterKind::MotionBlur => {
                let strength = strength.ok_or(ArgumentError::MissingStrength)?;
                Filter::MotionBlur {
                    strength: NonZeroU32::new(strength)
                        .ok_or(ArgumentError::InvalidStrength(strength))?,
                }
            }
        })
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::Invert => FilterKind::Invert,
            Filter::Emboss => FilterKind::Emboss,
            Filter::MotionBlur { .. } => FilterKind::MotionBlur,
        }
    }

    /// Computes the whole output buffer from the current pixels, then swaps it in.
    pub fn apply(&self, image: &mut Image) {
        let output_buffer = match *self {
            Filter::Grayscale => grayscale(image),
            Filter::Invert => invert(image),
            Filter::Emboss => emboss(image),
            Filter::MotionBlur { strength } => motion_blur(image, strength),
        };
        image.replace_buffer(output_buffer);
        log::info!("applied {}", self.kind());
    }
}

pub fn apply_filter(image: &mut Image, filter: &Filter) {
    filter.apply(image)
}

/// Every channel becomes `floor((r + g + b) / 3)`.
pub fn grayscale(image: &Image) -> PixelBuffer {
    map_pixels(image, |[r, g, b]| {
        let avg = ((r as u64 + g as u64 + b as u64) / 3) as u32;
        [avg, avg, avg]
    })
}

/// Every channel `c` becomes `|255 - c|`.
pub fn invert(image: &Image) -> PixelBuffer {
    map_pixels(image, |rgb| rgb.map(|c| c.abs_diff(INVERT_BASE)))
}

/// Greyscale relief from the difference with the upper-left neighbour.
///
/// The output value is `128 + d` clamped to `0..=255`, where `d` is the channel
/// difference of largest magnitude (earlier channels win ties). Row 0 and
/// column 0 have no upper-left neighbour and become `(128, 128, 128)`.
pub fn emboss(image: &Image) -> PixelBuffer {
    let img = image.buffer();
    let mut output_buffer = PixelBuffer::new(img.width(), img.height());

    for (x, y, pixel) in img.enumerate_pixels() {
        let value = if x == 0 || y == 0 {
            EMBOSS_GREY
        } else {
            let neighbor = img.get_pixel(x - 1, y - 1);
            let max_diff = pixel
                .0
                .iter()
                .zip(neighbor.0.iter())
                .map(|(&c, &n)| c as i64 - n as i64)
                .fold(0i64, |best, diff| {
                    if diff.abs() > best.abs() {
                        diff
                    } else {
                        best
                    }
                });
            (EMBOSS_GREY as i64 + max_diff).clamp(0, EMBOSS_MAX) as u32
        };

        let output_pixel = output_buffer.get_pixel_mut(x, y);
        *output_pixel = Rgb([value, value, value]);
    }

    output_buffer
}

/// Horizontal blur: each pixel becomes the per-channel floor average of itself
/// and up to `strength - 1` pixels to its right, stopping at the row end.
pub fn motion_blur(image: &Image, strength: NonZeroU32) -> PixelBuffer {
    let img = image.buffer();
    let width = img.width();
    let mut output_buffer = PixelBuffer::new(width, img.height());

    for (x, y, _) in img.enumerate_pixels() {
        let end = x.saturating_add(strength.get()).min(width);
        let mut sum = [0u64; 3];
        for nx in x..end {
            for (acc, &c) in sum.iter_mut().zip(img.get_pixel(nx, y).0.iter()) {
                *acc += c as u64;
            }
        }

        let count = (end - x) as u64;
        let output_pixel = output_buffer.get_pixel_mut(x, y);
        *output_pixel = Rgb(sum.map(|acc| (acc / count) as u32));
    }

    output_buffer
}

fn map_pixels(image: &Image, f: impl Fn([u32; 3]) -> [u32; 3]) -> PixelBuffer {
    let img = image.buffer();
    let mut output_buffer = PixelBuffer::new(img.width(), img.height());
    for (output_pixel, pixel) in output_buffer.pixels_mut().zip(img.pixels()) {
        *output_pixel = Rgb(f(pixel.0));
    }
    output_buffer
}
