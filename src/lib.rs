pub mod config;
pub mod demo;
pub mod draw;
pub mod error;
pub mod event;
pub mod format;
pub mod surface;

pub use crate::draw::Canvas;
pub use crate::error::{Error, Result};
pub use crate::format::PixelFormat;
pub use crate::surface::{ByteLocation, LengthModel, Surface, SurfaceLayout, SurfaceState};
