//! Packed bitmap codec for the LED matrix firmware.
//!
//! One bit per cell, eight cells per byte, most significant bit first. Rows (y) are the
//! outer order; within a row the bytes cover x = 0..8, 8..16, and so on.

use crate::model::{GRID_SIZE, PixelGrid};

/// Number of bytes in a packed frame: 64 * 64 / 8.
pub const BITMAP_LEN: usize = GRID_SIZE * GRID_SIZE / 8;

pub fn encode(grid: &PixelGrid) -> Vec<u8> {
    let mut out = Vec::with_capacity(BITMAP_LEN);
    for y in 0..GRID_SIZE {
        for x in (0..GRID_SIZE).step_by(8) {
            let mut byte = 0u8;
            for bit in 0..8 {
                // cells past the right edge pad with 0
                if x + bit < GRID_SIZE && grid.get(x + bit, y) {
                    byte |= 1 << (7 - bit);
                }
            }
            out.push(byte);
        }
    }
    out
}

/// Hex dump with one grid row (8 bytes) per line.
pub fn to_hex_rows(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(GRID_SIZE / 8)
        .map(|row| {
            row.iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_grid_is_all_zero() {
        let bytes = encode(&PixelGrid::new());
        assert_eq!(bytes.len(), 512);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn full_grid_is_all_ff() {
        let mut grid = PixelGrid::new();
        grid.fill_all(true);
        let bytes = encode(&grid);
        assert_eq!(bytes.len(), BITMAP_LEN);
        assert!(bytes.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn origin_is_msb_of_first_byte() {
        let mut grid = PixelGrid::new();
        grid.toggle(0, 0);
        let bytes = encode(&grid);
        assert_eq!(bytes[0], 0x80);
        assert!(bytes[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn layout_is_row_major_msb_first() {
        let mut grid = PixelGrid::new();
        grid.toggle(7, 0); // lsb of byte 0
        grid.toggle(8, 0); // msb of byte 1
        grid.toggle(63, 1); // lsb of last byte in row 1
        grid.toggle(2, 63); // bit 5 of first byte in last row
        let bytes = encode(&grid);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[1], 0x80);
        assert_eq!(bytes[15], 0x01);
        assert_eq!(bytes[63 * 8], 0x20);
        assert_eq!(bytes.iter().filter(|&&b| b != 0).count(), 4);
    }

    #[test]
    fn hex_rows_cover_one_grid_row_each() {
        let mut grid = PixelGrid::new();
        grid.toggle(0, 0);
        let rows = to_hex_rows(&encode(&grid));
        assert_eq!(rows.len(), GRID_SIZE);
        assert_eq!(rows[0], "80 00 00 00 00 00 00 00");
        assert_eq!(rows[1], "00 00 00 00 00 00 00 00");
    }
}
