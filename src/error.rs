// filepath: src/error.rs
//! Error type shared by the surface model, the blitter and the window setup.

use crate::format::PixelFormat;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pixel storage could not be allocated (or its size overflowed).
    Allocation { bytes: Option<usize> },
    /// The bit depth does not match the storage the format requires.
    Format {
        format: PixelFormat,
        bits_per_pixel: u32,
    },
    InvalidDimensions { width: u32, height: u32 },
    OutOfBounds { offset: usize, len: usize },
    /// The surface was already released.
    UseAfterFree,
    WindowCreation(String),
    Blit(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Allocation { bytes: Some(bytes) } => {
                write!(f, "failed to allocate {bytes} bytes of pixel storage")
            }
            Error::Allocation { bytes: None } => {
                write!(f, "pixel storage size overflows usize")
            }
            Error::Format {
                format,
                bits_per_pixel,
            } => write!(
                f,
                "{format} requires {} bits per pixel, got {bits_per_pixel}",
                format.bits_per_pixel()
            ),
            Error::InvalidDimensions { width, height } => {
                write!(f, "surface dimensions must be non-zero, got {width}x{height}")
            }
            Error::OutOfBounds { offset, len } => {
                write!(f, "byte offset {offset} is outside a buffer of {len} bytes")
            }
            Error::UseAfterFree => write!(f, "surface accessed after release"),
            Error::WindowCreation(msg) => write!(f, "window creation failed: {msg}"),
            Error::Blit(msg) => write!(f, "blit failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
