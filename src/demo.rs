// filepath: src/demo.rs
//! The single marker write that shows where a byte actually lands.

use crate::error::Result;
use crate::surface::{ByteLocation, LengthModel, Surface};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which byte the marker is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkTarget {
    /// `len - 1` under the surface's active length model.
    #[default]
    LastByte,
    /// Last channel of the bottom-right pixel, computed from the pitch.
    LastPixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkReport {
    pub offset: usize,
    pub model: LengthModel,
    pub target: MarkTarget,
    pub actual: ByteLocation,
    pub intended: ByteLocation,
}

impl MarkReport {
    pub fn landed_on_intended(&self) -> bool {
        self.actual == self.intended
    }
}

impl fmt::Display for MarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "offset {} ({:?} length, {:?}) -> {}, intended {}",
            self.offset,
            self.model,
            self.target,
            DisplayLocation(self.actual),
            DisplayLocation(self.intended)
        )
    }
}

struct DisplayLocation(ByteLocation);

impl fmt::Display for DisplayLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ByteLocation::Pixel {
                row,
                column,
                channel,
            } => write!(f, "row {row}, column {column}, channel {channel}"),
            ByteLocation::Padding { row, byte } => write!(f, "row {row}, padding byte {byte}"),
            ByteLocation::Outside => write!(f, "outside the buffer"),
        }
    }
}

/// Write `value` at the byte chosen by `target` and report where it went.
pub fn mark(surface: &mut Surface, target: MarkTarget, value: u8) -> Result<MarkReport> {
    let layout = surface.layout();
    let offset = match target {
        // len is never zero: create() rejects empty surfaces
        MarkTarget::LastByte => {
            let offset = surface.len()? - 1;
            surface.set_byte(offset, value)?;
            offset
        }
        // addressed by pitch, so the reported length does not matter
        MarkTarget::LastPixel => {
            let offset =
                layout.offset_of(layout.height - 1, layout.width - 1, layout.bytes_per_pixel - 1);
            surface.set_storage_byte(offset, value)?;
            offset
        }
    };

    Ok(MarkReport {
        offset,
        model: surface.length_model(),
        target,
        actual: layout.locate(offset),
        intended: layout.last_pixel_location(),
    })
}
