//! Command framing for the LED matrix controller.
//!
//! Commands are plain values; sending them is left to whatever link the host has.
//! Every command targets its own BLE characteristic on the controller. Fill and pixel
//! commands carry bare ASCII values, the canvas frame is a `<len>,<chunks>` header followed
//! by the packed bitmap in fixed-size chunks.

use serde::Serialize;

use crate::bitmap;
use crate::model::{CellChange, PixelGrid};

/// Payload bytes per write on the controller link.
pub const CHUNK_SIZE: usize = 20;

pub const SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";

pub const FILL_CLEAR: &str = "1";
pub const FILL_WHITE: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Channel {
    FillScreen,
    FillPixel,
    DrawNormal,
}

impl Channel {
    pub fn uuid(self) -> &'static str {
        match self {
            Channel::FillScreen => "beb5483e-36e1-4688-b7f5-ea07361b26a4",
            Channel::FillPixel => "beb5483e-36e1-4688-b7f5-ea07361b26a5",
            Channel::DrawNormal => "beb5483e-36e1-4688-b7f5-ea07361b26a7",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::FillScreen => "fill-screen",
            Channel::FillPixel => "fill-pixel",
            Channel::DrawNormal => "draw-normal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum LedCommand {
    /// Blank (`clear = true`) or light the whole panel.
    FillScreen { clear: bool },
    Pixel { x: usize, y: usize, value: u8 },
    Canvas { bitmap: Vec<u8> },
}

impl LedCommand {
    /// Cheapest command that reproduces the grid on the panel.
    pub fn for_grid(grid: &PixelGrid) -> Self {
        if grid.is_uniform(false) {
            LedCommand::FillScreen { clear: true }
        } else if grid.is_uniform(true) {
            LedCommand::FillScreen { clear: false }
        } else {
            LedCommand::Canvas {
                bitmap: bitmap::encode(grid),
            }
        }
    }

    pub fn clear_screen() -> Self {
        LedCommand::FillScreen { clear: true }
    }

    pub fn pixel(change: CellChange) -> Self {
        LedCommand::Pixel {
            x: change.x,
            y: change.y,
            value: change.value(),
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            LedCommand::FillScreen { .. } => Channel::FillScreen,
            LedCommand::Pixel { .. } => Channel::FillPixel,
            LedCommand::Canvas { .. } => Channel::DrawNormal,
        }
    }

    /// Text written to the command's channel. For a canvas frame this is the header that
    /// precedes the chunks.
    pub fn header(&self) -> String {
        match self {
            LedCommand::FillScreen { clear } => {
                (if *clear { FILL_CLEAR } else { FILL_WHITE }).to_string()
            }
            LedCommand::Pixel { x, y, value } => format!("{},{},{}", x, y, value),
            LedCommand::Canvas { bitmap } => {
                format!("{},{}", bitmap.len(), bitmap.len().div_ceil(CHUNK_SIZE))
            }
        }
    }

    /// Binary payload following the header; empty for text-only commands.
    pub fn chunks(&self) -> Vec<&[u8]> {
        match self {
            LedCommand::Canvas { bitmap } => bitmap.chunks(CHUNK_SIZE).collect(),
            _ => Vec::new(),
        }
    }

    /// One activity-log line: `channel: header`.
    pub fn log_line(&self) -> String {
        format!("{}: {}", self.channel().label(), self.header())
    }

    pub fn describe(&self) -> String {
        match self {
            LedCommand::FillScreen { clear: true } => "Fill screen: clear".to_string(),
            LedCommand::FillScreen { clear: false } => "Fill screen: white".to_string(),
            LedCommand::Pixel { x, y, value } => format!("Pixel ({},{}) = {}", x, y, value),
            LedCommand::Canvas { bitmap } => format!(
                "Canvas frame: {} bytes in {} chunks",
                bitmap.len(),
                bitmap.len().div_ceil(CHUNK_SIZE)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads a text value the way the controller does: comma-split, leading integer of each
    /// field, non-numeric text reading as 0.
    fn firmware_ints(text: &str) -> Vec<i64> {
        text.split(',')
            .map(|field| {
                let digits: String = field
                    .trim_start()
                    .chars()
                    .enumerate()
                    .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
                    .map(|(_, c)| c)
                    .collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    }

    #[test]
    fn blank_grid_sends_clear() {
        let cmd = LedCommand::for_grid(&PixelGrid::new());
        assert_eq!(cmd, LedCommand::clear_screen());
        assert_eq!(cmd.header(), "1");
        assert_eq!(cmd.channel(), Channel::FillScreen);
        assert_eq!(firmware_ints(&cmd.header()), vec![1]);
        assert!(cmd.chunks().is_empty());
    }

    #[test]
    fn full_grid_sends_white() {
        let mut grid = PixelGrid::new();
        grid.fill_all(true);
        let cmd = LedCommand::for_grid(&grid);
        assert_eq!(cmd.header(), "0");
        assert_eq!(firmware_ints(&cmd.header()), vec![0]);
        assert_eq!(cmd.describe(), "Fill screen: white");
    }

    #[test]
    fn mixed_grid_sends_chunked_canvas() {
        let mut grid = PixelGrid::new();
        grid.toggle(0, 0);
        let cmd = LedCommand::for_grid(&grid);
        assert_eq!(cmd.channel(), Channel::DrawNormal);
        assert_eq!(cmd.header(), "512,26");
        let chunks = cmd.chunks();
        assert_eq!(chunks.len(), 26);
        assert_eq!(chunks[0][0], 0x80);
        assert!(chunks[..25].iter().all(|c| c.len() == CHUNK_SIZE));
        assert_eq!(chunks[25].len(), 12);
        assert_eq!(chunks.concat(), bitmap::encode(&grid));
    }

    #[test]
    fn pixel_command_text() {
        let cmd = LedCommand::pixel(CellChange { x: 12, y: 40, on: true });
        assert_eq!(cmd.header(), "12,40,1");
        assert_eq!(cmd.channel(), Channel::FillPixel);
        assert_eq!(firmware_ints(&cmd.header()), vec![12, 40, 1]);
        let off = LedCommand::pixel(CellChange { x: 0, y: 63, on: false });
        assert_eq!(off.header(), "0,63,0");
        assert_eq!(off.log_line(), "fill-pixel: 0,63,0");
        assert_eq!(off.describe(), "Pixel (0,63) = 0");
    }

    #[test]
    fn mount_clear_reads_as_clear() {
        let cmd = LedCommand::clear_screen();
        assert_eq!(cmd.log_line(), "fill-screen: 1");
        let is_clear = firmware_ints(&cmd.header())[0];
        assert_eq!(is_clear, 1);
        assert_eq!(cmd.channel().uuid(), "beb5483e-36e1-4688-b7f5-ea07361b26a4");
    }

    #[test]
    fn channels_are_distinct_characteristics() {
        let uuids = [
            Channel::FillScreen.uuid(),
            Channel::FillPixel.uuid(),
            Channel::DrawNormal.uuid(),
        ];
        assert_ne!(uuids[0], uuids[1]);
        assert_ne!(uuids[1], uuids[2]);
        assert_ne!(uuids[0], uuids[2]);
        assert!(uuids.iter().all(|u| u.len() == SERVICE_UUID.len()));
    }

    #[test]
    fn serializes_for_export() {
        let cmd = LedCommand::FillScreen { clear: true };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"FillScreen":{"clear":true}}"#);
    }
}
