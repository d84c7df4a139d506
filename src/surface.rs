// filepath: src/surface.rs
//! Off-screen pixel surface
//!
//! A [`Surface`] owns a packed pixel buffer whose rows are padded up to a
//! multiple of four bytes. Besides the true buffer length (`pitch * height`)
//! it can report the naive length (`width * height * bytes_per_pixel`) that
//! ignores the padding, which is how the misplaced-pixel bug is reproduced.

use crate::error::{Error, Result};
use crate::format::PixelFormat;
use log::debug;
use serde::{Deserialize, Serialize};

/// Row alignment in bytes.
pub const ROW_ALIGNMENT: usize = 4;

/// Round `n` up to the next multiple of [`ROW_ALIGNMENT`].
pub fn align4(n: usize) -> usize {
    n.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT
}

/// How the flat buffer length is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthModel {
    /// `pitch * height`, the real storage size.
    #[default]
    Padded,
    /// `width * height * bytes_per_pixel`, ignoring row padding.
    Naive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Open,
    Released,
}

/// Where a flat byte offset lands in the true row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteLocation {
    Pixel {
        row: usize,
        column: usize,
        channel: usize,
    },
    /// Inside the alignment padding at the end of `row`.
    Padding { row: usize, byte: usize },
    /// Past the end of the storage.
    Outside,
}

/// Byte layout of a surface, without the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub width: usize,
    pub height: usize,
    pub bytes_per_pixel: usize,
    pub pitch: usize,
}

impl SurfaceLayout {
    /// `None` if any dimension is zero.
    pub fn new(width: usize, height: usize, bytes_per_pixel: usize) -> Option<Self> {
        if width == 0 || height == 0 || bytes_per_pixel == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            bytes_per_pixel,
            pitch: align4(width * bytes_per_pixel),
        })
    }

    /// Bytes of pixel data per row, without padding.
    pub fn row_bytes(&self) -> usize {
        self.width * self.bytes_per_pixel
    }

    pub fn has_padding(&self) -> bool {
        self.pitch != self.row_bytes()
    }

    pub fn true_len(&self) -> usize {
        self.pitch * self.height
    }

    pub fn naive_len(&self) -> usize {
        self.width * self.height * self.bytes_per_pixel
    }

    pub fn len(&self, model: LengthModel) -> usize {
        match model {
            LengthModel::Padded => self.true_len(),
            LengthModel::Naive => self.naive_len(),
        }
    }

    pub fn offset_of(&self, row: usize, column: usize, channel: usize) -> usize {
        row * self.pitch + column * self.bytes_per_pixel + channel
    }

    /// The last channel of the bottom-right pixel, `Outside` for an empty layout.
    pub fn last_pixel_location(&self) -> ByteLocation {
        if self.width == 0 || self.height == 0 || self.bytes_per_pixel == 0 {
            return ByteLocation::Outside;
        }
        ByteLocation::Pixel {
            row: self.height - 1,
            column: self.width - 1,
            channel: self.bytes_per_pixel - 1,
        }
    }

    pub fn locate(&self, offset: usize) -> ByteLocation {
        if offset >= self.true_len() {
            return ByteLocation::Outside;
        }
        let row = offset / self.pitch;
        let within = offset % self.pitch;
        if within >= self.row_bytes() {
            return ByteLocation::Padding {
                row,
                byte: within - self.row_bytes(),
            };
        }
        ByteLocation::Pixel {
            row,
            column: within / self.bytes_per_pixel,
            channel: within % self.bytes_per_pixel,
        }
    }
}

/// A packed-pixel image that owns its storage until released.
#[derive(Debug)]
pub struct Surface {
    format: PixelFormat,
    layout: SurfaceLayout,
    length_model: LengthModel,
    pixels: Option<Vec<u8>>,
}

impl Surface {
    /// Allocate a zeroed surface.
    pub fn create(width: u32, height: u32, bits_per_pixel: u32, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if bits_per_pixel != format.bits_per_pixel() {
            return Err(Error::Format {
                format,
                bits_per_pixel,
            });
        }

        let bpp = format.bytes_per_pixel();
        let row_bytes = (width as usize)
            .checked_mul(bpp)
            .ok_or(Error::Allocation { bytes: None })?;
        // align4 can only overflow within the last 3 values of usize
        let pitch = row_bytes
            .checked_add(ROW_ALIGNMENT - 1)
            .map(|n| n / ROW_ALIGNMENT * ROW_ALIGNMENT)
            .ok_or(Error::Allocation { bytes: None })?;
        let len = pitch
            .checked_mul(height as usize)
            .ok_or(Error::Allocation { bytes: None })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation { bytes: Some(len) })?;
        pixels.resize(len, 0);

        let layout = SurfaceLayout {
            width: width as usize,
            height: height as usize,
            bytes_per_pixel: bpp,
            pitch,
        };
        debug!(
            "Created {}x{} {} surface, pitch {} ({} bytes)",
            width, height, format, pitch, len
        );

        Ok(Self {
            format,
            layout,
            length_model: LengthModel::default(),
            pixels: Some(pixels),
        })
    }

    pub fn width(&self) -> u32 {
        self.layout.width as u32
    }

    pub fn height(&self) -> u32 {
        self.layout.height as u32
    }

    pub fn pitch(&self) -> usize {
        self.layout.pitch
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    pub fn state(&self) -> SurfaceState {
        if self.pixels.is_some() {
            SurfaceState::Open
        } else {
            SurfaceState::Released
        }
    }

    pub fn length_model(&self) -> LengthModel {
        self.length_model
    }

    pub fn set_length_model(&mut self, model: LengthModel) {
        self.length_model = model;
    }

    /// Buffer length under the active length model.
    pub fn len(&self) -> Result<usize> {
        self.storage()?;
        Ok(self.layout.len(self.length_model))
    }

    /// The true storage size, `pitch * height`.
    pub fn true_len(&self) -> Result<usize> {
        Ok(self.storage()?.len())
    }

    pub fn naive_len(&self) -> Result<usize> {
        self.storage()?;
        Ok(self.layout.naive_len())
    }

    /// Flat view of the pixels, as long as the active length model says.
    pub fn pixels(&self) -> Result<&[u8]> {
        let len = self.layout.len(self.length_model);
        Ok(&self.storage()?[..len])
    }

    pub fn pixels_mut(&mut self) -> Result<&mut [u8]> {
        let len = self.layout.len(self.length_model);
        let pixels = self.pixels.as_mut().ok_or(Error::UseAfterFree)?;
        Ok(&mut pixels[..len])
    }

    pub fn set_byte(&mut self, offset: usize, value: u8) -> Result<()> {
        let pixels = self.pixels_mut()?;
        let len = pixels.len();
        let slot = pixels
            .get_mut(offset)
            .ok_or(Error::OutOfBounds { offset, len })?;
        *slot = value;
        Ok(())
    }

    /// Write through the real storage, ignoring the active length model.
    pub fn set_storage_byte(&mut self, offset: usize, value: u8) -> Result<()> {
        let pixels = self.pixels.as_mut().ok_or(Error::UseAfterFree)?;
        let len = pixels.len();
        let slot = pixels
            .get_mut(offset)
            .ok_or(Error::OutOfBounds { offset, len })?;
        *slot = value;
        Ok(())
    }

    pub fn get_byte(&self, offset: usize) -> Result<u8> {
        let pixels = self.pixels()?;
        pixels.get(offset).copied().ok_or(Error::OutOfBounds {
            offset,
            len: pixels.len(),
        })
    }

    /// Decode the pixel at column `x`, row `y` through the true pitch.
    pub fn pixel_rgb(&self, x: usize, y: usize) -> Result<[u8; 3]> {
        let storage = self.storage()?;
        if x >= self.layout.width || y >= self.layout.height {
            return Err(Error::OutOfBounds {
                offset: self.layout.offset_of(y, x, 0),
                len: storage.len(),
            });
        }
        let start = self.layout.offset_of(y, x, 0);
        Ok(self
            .format
            .decode_rgb(&storage[start..start + self.layout.bytes_per_pixel]))
    }

    /// Free the pixel storage. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        match self.pixels.take() {
            Some(pixels) => {
                debug!("Releasing {} byte surface", pixels.len());
                true
            }
            None => false,
        }
    }

    fn storage(&self) -> Result<&[u8]> {
        self.pixels.as_deref().ok_or(Error::UseAfterFree)
    }
}
