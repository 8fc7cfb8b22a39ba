// SPDX-License-Identifier: GPL-3.0
// video.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::BitField;

use super::Dribling;
use crate::display::{Bitmap, Rectangle, Rgb, ScreenTiming};

/// Raw raster timing: 5 MHz pixel clock, 320x262 total.
pub const SCREEN_TIMING: ScreenTiming = ScreenTiming {
    pixel_clock: 5_000_000,
    htotal: 320,
    hbend: 0,
    hbstart: 256,
    vtotal: 262,
    vbend: 40,
    vbstart: 256,
};

pub const PALETTE_SIZE: usize = 256;

// Offset of the colour PROM within the PROM region.
const PALETTE_PROM: usize = 0x400;

impl Dribling {

    /// Decodes the colour PROM. Each output is active low: red and blue are
    /// single bits, green has two bits through a resistor ladder.
    pub fn palette(&self) -> Vec<Rgb> {
        self.board.proms[PALETTE_PROM..PALETTE_PROM + PALETTE_SIZE]
            .iter()
            .map(|&prom| {
                let inverted = !prom;
                let r = inverted.bit(0);
                let g = (inverted >> 1) & 3;
                let b = inverted.bit(3);
                Rgb::new(r * 0xFF, g * 0x55, b * 0xFF)
            })
            .collect()
    }

    /// Renders the clip area into `bitmap` as palette indices.
    pub fn screen_update(&self, bitmap: &mut Bitmap, clip: &Rectangle) {
        let board = &self.board;

        for y in clip.min_y.max(0) as usize..=clip.max_y.max(0) as usize {
            if y >= bitmap.height() || y >= SCREEN_TIMING.vbstart as usize {
                break;
            }
            let row = bitmap.row_mut(y);

            for x in clip.min_x.max(0) as usize..=clip.max_x.max(0) as usize {
                if x >= row.len() || x >= SCREEN_TIMING.hbstart as usize {
                    break;
                }
                let column = x >> 3;
                let bit = (x & 7) as u32;

                let b7 = board.proms[column | ((y >> 3) << 5)].bit(0) as u16;
                let b6 = board.abca as u16;
                let b5 = ((x >> 3) & 1) as u16;
                let b4 = board.gfx[column | (y << 5)].bit(bit) as u16;
                let b3 = board.videoram[column | (y << 5)].bit(bit) as u16;
                let b2_0 = (board.colorram[column | ((y >> 2) << 7)] & 7) as u16;

                row[x] = (b7 << 7) | (b6 << 6) | (b5 << 5) | (b4 << 4) | (b3 << 3) | b2_0;
            }
        }
    }
}
