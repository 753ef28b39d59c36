//! Boolean pixel masks and the packed mask blob decoder
//!
//! Blob layout: rows top to bottom, each row `ceil(width / 8)` bytes long.
//! Every byte has its bit order reversed before it is read LSB-first, so the
//! leftmost pixel of a byte group is the most significant bit of the stored
//! byte.

use thiserror::Error;

/// Mask decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The blob has fewer bytes than the frame size requires
    #[error("mask blob has {actual} bytes, {width}x{height} frame needs {expected}")]
    Truncated {
        /// Frame width
        width: usize,
        /// Frame height
        height: usize,
        /// Bytes required
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// Width or height is zero
    #[error("mask frame has zero size ({width}x{height})")]
    ZeroSized {
        /// Frame width
        width: usize,
        /// Frame height
        height: usize,
    },
}

/// Row-major boolean grid, `height` rows of `width` cells
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollisionMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl CollisionMask {
    /// All-clear mask; a size whose cell count overflows `usize` gives an empty mask
    pub fn new(width: usize, height: usize) -> Self {
        let Some(cells) = width.checked_mul(height) else {
            log::warn!("Mask size {}x{} overflows, using an empty mask", width, height);
            return Self::default();
        };
        Self {
            width,
            height,
            bits: vec![false; cells],
        }
    }

    /// Build from rows of booleans; rows shorter than the first are padded with `false`
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut mask = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &bit) in row.as_ref().iter().take(width).enumerate() {
                mask.set(x, y, bit);
            }
        }
        mask
    }

    /// Decode a packed frame mask
    pub fn decode(packed: &[u8], width: usize, height: usize) -> Result<Self, MaskError> {
        if width == 0 || height == 0 {
            return Err(MaskError::ZeroSized { width, height });
        }

        let stride = width.div_ceil(8);
        let expected = stride.checked_mul(height).unwrap_or(usize::MAX);
        if packed.len() < expected {
            return Err(MaskError::Truncated {
                width,
                height,
                expected,
                actual: packed.len(),
            });
        }

        let mut mask = Self::new(width, height);
        for (y, row) in packed.chunks_exact(stride).take(height).enumerate() {
            for x in 0..width {
                let byte = row[x / 8].reverse_bits();
                if (byte >> (x % 8)) & 1 == 1 {
                    mask.set(x, y, true);
                }
            }
        }
        Ok(mask)
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a cell; out-of-range reads are `false`
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Read a cell with signed coordinates; anything outside the grid is `false`
    pub fn sample(&self, x: i64, y: i64) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y),
            _ => false,
        }
    }

    /// Write a cell; out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = value;
        }
    }

    /// Iterate over the coordinates of every set cell, row by row
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width.max(1);
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Number of set cells
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Whether the mask has no cells at all
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}
