// filepath: src/draw.rs
//! Drawing utilities for surface-stride
//!
//! The window is backed by an ARGB8888 shm buffer. This file wraps that
//! buffer in a [`Canvas`] and scales an off-screen [`Surface`] into it.

use crate::error::{Error, Result};
use crate::surface::Surface;

/// Bytes per ARGB8888 pixel.
pub const CANVAS_BPP: usize = 4;

/// Canvas over a raw ARGB8888 buffer (little-endian, bytes `[B, G, R, A]`)
pub struct Canvas<'a> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> Canvas<'a> {
    /// Create a new canvas from a raw buffer with `stride` bytes per row
    ///
    /// Fails if `buffer` cannot hold `height` rows of `width` pixels.
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32, stride: usize) -> Result<Self> {
        let row_bytes = (width as usize)
            .checked_mul(CANVAS_BPP)
            .ok_or_else(|| Error::Blit(format!("canvas width {width} overflows")))?;
        let needed = match (height as usize).checked_sub(1) {
            None => 0,
            Some(rows) => rows
                .checked_mul(stride)
                .and_then(|n| n.checked_add(row_bytes))
                .ok_or_else(|| Error::Blit(format!("canvas {width}x{height} overflows")))?,
        };
        if stride < row_bytes || buffer.len() < needed {
            return Err(Error::Blit(format!(
                "buffer of {} bytes cannot hold {width}x{height} at stride {stride}",
                buffer.len()
            )));
        }
        Ok(Self {
            buffer,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Fill every pixel with `color`, given in buffer byte order
    pub fn fill(&mut self, color: [u8; 4]) {
        for y in 0..self.height as usize {
            let row = &mut self.buffer[y * self.stride..][..self.width as usize * CANVAS_BPP];
            for pixel in row.chunks_exact_mut(CANVAS_BPP) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    /// Read back a pixel as `[r, g, b, a]`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride + x as usize * CANVAS_BPP;
        let px = self.buffer.get(idx..idx + CANVAS_BPP)?;
        Some([px[2], px[1], px[0], px[3]])
    }

    fn put_rgb(&mut self, x: usize, y: usize, [r, g, b]: [u8; 3]) {
        let idx = y * self.stride + x * CANVAS_BPP;
        self.buffer[idx..idx + CANVAS_BPP].copy_from_slice(&[b, g, r, 0xff]);
    }
}

/// Sizes handed to the shm pool for a `width` x `height` ARGB8888 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShmGeometry {
    pub width: i32,
    pub height: i32,
    pub stride: i32,
    /// `stride * height`
    pub bytes: usize,
}

impl ShmGeometry {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let too_large = || Error::Blit(format!("window {width}x{height} is too large"));
        let stride = (width as usize)
            .checked_mul(CANVAS_BPP)
            .ok_or_else(too_large)?;
        let bytes = stride
            .checked_mul(height as usize)
            .ok_or_else(too_large)?;
        Ok(Self {
            width: i32::try_from(width).map_err(|_| too_large())?,
            height: i32::try_from(height).map_err(|_| too_large())?,
            stride: i32::try_from(stride).map_err(|_| too_large())?,
            bytes,
        })
    }
}

/// Scale `src` onto the whole canvas with nearest-neighbour sampling.
///
/// Source rows are read through the surface's real pitch, the way a
/// graphics library's own blitter would.
pub fn blit_scaled(src: &Surface, dst: &mut Canvas) -> Result<()> {
    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w, dst_h) = (dst.width as usize, dst.height as usize);
    if dst_w == 0 || dst_h == 0 {
        return Err(Error::Blit(format!(
            "destination is empty ({dst_w}x{dst_h})"
        )));
    }

    for y in 0..dst_h {
        let sy = y * src_h / dst_h;
        for x in 0..dst_w {
            let sx = x * src_w / dst_w;
            let rgb = src.pixel_rgb(sx, sy)?;
            dst.put_rgb(x, y, rgb);
        }
    }

    Ok(())
}
