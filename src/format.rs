// filepath: src/format.rs
//! Packed pixel formats understood by [`Surface`](crate::surface::Surface).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// One grey level per pixel.
    Index8,
    /// Little-endian `u16`, 5 bits red, 6 green, 5 blue.
    Rgb565,
    /// Bytes `[R, G, B]`, no alpha.
    Rgb24,
    /// Bytes `[B, G, R]`, no alpha.
    Bgr24,
    /// Little-endian `u32` `0xXXRRGGBB`, padding byte ignored.
    Xrgb8888,
    /// Little-endian `u32` `0xAARRGGBB`.
    Argb8888,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 6] = [
        PixelFormat::Index8,
        PixelFormat::Rgb565,
        PixelFormat::Rgb24,
        PixelFormat::Bgr24,
        PixelFormat::Xrgb8888,
        PixelFormat::Argb8888,
    ];

    /// Storage depth the format requires.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Index8 => 8,
            PixelFormat::Rgb565 => 16,
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 24,
            PixelFormat::Xrgb8888 | PixelFormat::Argb8888 => 32,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        (self.bits_per_pixel() / 8) as usize
    }

    /// Decode one pixel's bytes into `[r, g, b]`.
    ///
    /// `bytes` must hold at least [`bytes_per_pixel`](Self::bytes_per_pixel) bytes.
    pub fn decode_rgb(self, bytes: &[u8]) -> [u8; 3] {
        match self {
            PixelFormat::Index8 => [bytes[0], bytes[0], bytes[0]],
            PixelFormat::Rgb565 => {
                let v = u16::from_le_bytes([bytes[0], bytes[1]]);
                let r = ((v >> 11) & 0x1f) as u8;
                let g = ((v >> 5) & 0x3f) as u8;
                let b = (v & 0x1f) as u8;
                [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
            }
            PixelFormat::Rgb24 => [bytes[0], bytes[1], bytes[2]],
            PixelFormat::Bgr24 | PixelFormat::Xrgb8888 | PixelFormat::Argb8888 => {
                [bytes[2], bytes[1], bytes[0]]
            }
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Index8 => "INDEX8",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Bgr24 => "BGR24",
            PixelFormat::Xrgb8888 => "XRGB8888",
            PixelFormat::Argb8888 => "ARGB8888",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_follow_bits() {
        for format in PixelFormat::ALL {
            assert_eq!(format.bytes_per_pixel() * 8, format.bits_per_pixel() as usize);
        }
    }

    #[test]
    fn decode_channel_order() {
        assert_eq!(PixelFormat::Rgb24.decode_rgb(&[1, 2, 3]), [1, 2, 3]);
        assert_eq!(PixelFormat::Bgr24.decode_rgb(&[1, 2, 3]), [3, 2, 1]);
        assert_eq!(PixelFormat::Argb8888.decode_rgb(&[1, 2, 3, 4]), [3, 2, 1]);
        assert_eq!(PixelFormat::Index8.decode_rgb(&[9]), [9, 9, 9]);
    }

    #[test]
    fn decode_rgb565_extremes() {
        assert_eq!(PixelFormat::Rgb565.decode_rgb(&[0xff, 0xff]), [255, 255, 255]);
        // pure red: 0xf800
        assert_eq!(PixelFormat::Rgb565.decode_rgb(&[0x00, 0xf8]), [255, 0, 0]);
        // pure blue: 0x001f
        assert_eq!(PixelFormat::Rgb565.decode_rgb(&[0x1f, 0x00]), [0, 0, 255]);
    }

    #[test]
    fn parses_lowercase_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: PixelFormat,
        }
        let w: Wrapper = toml::from_str("format = \"xrgb8888\"").unwrap();
        assert_eq!(w.format, PixelFormat::Xrgb8888);
    }
}
