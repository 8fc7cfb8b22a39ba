// SPDX-License-Identifier: GPL-3.0
// display.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use crate::lcd::SegmentOutput;

/// A palette entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Raw raster timing for a CRT, in pixel clocks and scanlines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenTiming {
    pub pixel_clock: u32,
    pub htotal: u16,
    pub hbend: u16,
    pub hbstart: u16,
    pub vtotal: u16,
    pub vbend: u16,
    pub vbstart: u16,
}

impl ScreenTiming {

    /// The area between blanking intervals.
    pub fn visible_area(&self) -> Rectangle {
        Rectangle {
            min_x: self.hbend as i32,
            max_x: self.hbstart as i32 - 1,
            min_y: self.vbend as i32,
            max_y: self.vbstart as i32 - 1,
        }
    }

    pub fn refresh_hz(&self) -> f64 {
        self.pixel_clock as f64 / (self.htotal as f64 * self.vtotal as f64)
    }
}

/// An inclusive clip rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rectangle {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Rectangle {

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

/// A bitmap of palette indices.
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
}

impl Bitmap {

    pub fn new(width: usize, height: usize) -> Self {
        Bitmap {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pix(&self, y: usize, x: usize) -> u16 {
        self.pixels[y * self.width + x]
    }

    /// One scanline, for callers that fill a whole row at once.
    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }
}

/// This struct models a multiplexed lamp or LCD matrix as the host sees it:
/// a grid of elements, each either lit or dark at the current instant. Rows
/// are written either whole (`write_row`) or as a row-select mask plus shared
/// column data (`write_my`/`write_mx`).
pub struct PwmDisplay {

    // Number of rows and columns.
    height: usize,
    width: usize,

    // Current column data per row.
    rows: Vec<u64>,

    // Last shared column data and row select.
    mx: u64,
    my: u64,
}

impl PwmDisplay {

    /// Creates a new display object with every element dark.
    pub fn new(height: usize, width: usize) -> Self {
        PwmDisplay {
            height,
            width,
            rows: vec![0; height],
            mx: 0,
            my: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn column_mask(&self) -> u64 {
        if self.width >= 64 { u64::MAX } else { (1 << self.width) - 1 }
    }

    pub fn write_row(&mut self, y: usize, data: u64) {
        if y < self.height {
            self.rows[y] = data & self.column_mask();
        }
    }

    fn update_matrix(&mut self) {
        for y in 0..self.height {
            let data = if (self.my >> y) & 1 != 0 { self.mx } else { 0 };
            self.write_row(y, data);
        }
    }

    /// Sets the shared column data driven onto every selected row.
    pub fn write_mx(&mut self, data: u64) {
        self.mx = data;
        self.update_matrix();
    }

    /// Sets which rows are currently selected.
    pub fn write_my(&mut self, data: u64) {
        self.my = data;
        self.update_matrix();
    }

    pub fn read_row(&self, y: usize) -> u64 {
        self.rows.get(y).copied().unwrap_or(0)
    }

    pub fn read_element(&self, y: usize, x: usize) -> bool {
        x < self.width && (self.read_row(y) >> x) & 1 != 0
    }
}

impl SegmentOutput for PwmDisplay {
    fn write_segs(&mut self, common: u8, segs: u64) {
        self.write_row(common as usize, segs);
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn visible_area_should_exclude_blanking() {

        let timing = ScreenTiming {
            pixel_clock: 5_000_000,
            htotal: 320,
            hbend: 0,
            hbstart: 256,
            vtotal: 262,
            vbend: 40,
            vbstart: 256,
        };

        let area = timing.visible_area();

        assert_eq!(area, Rectangle { min_x: 0, max_x: 255, min_y: 40, max_y: 255 });
        assert_eq!(area.width(), 256);
        assert_eq!(area.height(), 216);
        assert!((timing.refresh_hz() - 59.637).abs() < 0.001);
    }

    #[test]
    fn matrix_writes_should_only_light_selected_rows() {

        let mut display = PwmDisplay::new(4, 8);
        display.write_mx(0xA5);
        display.write_my(0b0101);

        assert_eq!(display.read_row(0), 0xA5);
        assert_eq!(display.read_row(1), 0);
        assert_eq!(display.read_row(2), 0xA5);
        assert!(display.read_element(0, 7));
        assert!(!display.read_element(0, 1));
    }

    #[test]
    fn rows_should_be_clipped_to_width() {

        let mut display = PwmDisplay::new(16, 34);
        display.write_segs(15, u64::MAX);
        display.write_segs(16, u64::MAX);

        assert_eq!(display.read_row(15), (1 << 34) - 1);
        assert!(!display.read_element(15, 34));
        assert_eq!(display.read_row(16), 0);
    }
}
