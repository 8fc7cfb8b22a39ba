// SPDX-License-Identifier: GPL-3.0
// chess_sensorboard.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::{SaveItem, SaveState};
use log::{debug, trace};

use super::Sensorboard;

/// Piece codes, white then black. Zero is an empty square.
pub const EMPTY: u8 = 0;
pub const WHITE_PAWN: u8 = 1;
pub const WHITE_KNIGHT: u8 = 2;
pub const WHITE_BISHOP: u8 = 3;
pub const WHITE_ROOK: u8 = 4;
pub const WHITE_QUEEN: u8 = 5;
pub const WHITE_KING: u8 = 6;
pub const BLACK_OFFSET: u8 = 6;

const BACK_RANK: [u8; 8] = [
    WHITE_ROOK,
    WHITE_KNIGHT,
    WHITE_BISHOP,
    WHITE_QUEEN,
    WHITE_KING,
    WHITE_BISHOP,
    WHITE_KNIGHT,
    WHITE_ROOK,
];

const SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// How the board senses the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SensorType {
    /// A push-button under each square, active only while held.
    Buttons,
    /// A reed switch under each square, active while a piece sits on it.
    MagneticSensors,
}

/// This struct models a chessboard with one sensor per square. The board
/// tracks which piece is where so it can be shown and persisted, while the
/// machine only sees the sensor matrix. Pressing a square picks up the
/// piece there, or puts down the piece in hand.
pub struct ChessSensorboard {

    sensor_type: SensorType,

    // Piece on each square, indexed y * 8 + x.
    squares: [u8; 64],

    // Piece lifted off the board, or EMPTY.
    hand: u8,

    // Square whose button is currently held down.
    pressed: Option<(u8, u8)>,
}

impl ChessSensorboard {

    /// Creates a new, empty sensorboard object of the given type.
    pub fn new(sensor_type: SensorType) -> Self {
        ChessSensorboard {
            sensor_type,
            squares: [EMPTY; 64],
            hand: EMPTY,
            pressed: None,
        }
    }

    fn index(x: u8, y: u8) -> usize {
        ((y & 7) as usize) * 8 + (x & 7) as usize
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn clear_board(&mut self) {
        self.squares = [EMPTY; 64];
        self.hand = EMPTY;
        self.pressed = None;
    }

    /// Sets up the standard chess starting position.
    pub fn preset_chess(&mut self) {
        debug!("sensorboard: preset chess position");
        self.clear_board();
        for x in 0..8u8 {
            let piece = BACK_RANK[x as usize];
            self.write_piece(x, 0, piece);
            self.write_piece(x, 1, WHITE_PAWN);
            self.write_piece(x, 6, WHITE_PAWN + BLACK_OFFSET);
            self.write_piece(x, 7, piece + BLACK_OFFSET);
        }
    }

    pub fn read_piece(&self, x: u8, y: u8) -> u8 {
        self.squares[Self::index(x, y)]
    }

    pub fn write_piece(&mut self, x: u8, y: u8, piece: u8) {
        self.squares[Self::index(x, y)] = piece;
    }

    pub fn hand(&self) -> u8 {
        self.hand
    }

    /// The user presses a square. An empty hand picks up whatever is there;
    /// a full hand puts its piece down, capturing anything in the way.
    pub fn press(&mut self, x: u8, y: u8) {
        let index = Self::index(x, y);
        if self.hand == EMPTY {
            self.hand = self.squares[index];
            self.squares[index] = EMPTY;
        } else {
            self.squares[index] = self.hand;
            self.hand = EMPTY;
        }
        trace!("sensorboard: press {} hand {}", SQUARE_NAMES[index], self.hand);
        self.pressed = Some((x & 7, y & 7));
    }

    pub fn release(&mut self) {
        self.pressed = None;
    }

    fn sensor(&self, x: u8, y: u8) -> bool {
        match self.sensor_type {
            SensorType::Buttons => self.pressed == Some((x, y)),
            SensorType::MagneticSensors => self.read_piece(x, y) != EMPTY,
        }
    }

    /// Draws the board as eight lines of text, rank 8 first, for diagnostics.
    pub fn render(&self) -> String {
        const GLYPHS: &[u8; 13] = b".PNBRQKpnbrqk";
        let mut text = String::new();
        for y in (0..8u8).rev() {
            text.push(char::from(b'1' + y));
            text.push(' ');
            for x in 0..8u8 {
                let piece = self.read_piece(x, y) as usize;
                text.push(char::from(GLYPHS.get(piece).copied().unwrap_or(b'?')));
            }
            text.push('\n');
        }
        text.push_str("  abcdefgh\n");
        text
    }
}

impl Sensorboard for ChessSensorboard {

    fn read_file(&self, x: u8) -> u8 {
        (0..8u8).fold(0, |data, y| data | ((self.sensor(x & 7, y) as u8) << y))
    }

    fn read_rank(&self, y: u8) -> u8 {
        (0..8u8).fold(0, |data, x| data | ((self.sensor(x, y & 7) as u8) << x))
    }
}

/// The board position is battery-backed, so it survives a save/restore cycle
/// together with the piece in hand.
impl SaveState for ChessSensorboard {
    fn save_items(&mut self) -> Vec<SaveItem<'_>> {
        let mut items: Vec<SaveItem<'_>> = SQUARE_NAMES
            .iter()
            .copied()
            .zip(self.squares.iter_mut())
            .map(|(name, piece)| SaveItem::new(name, piece))
            .collect();
        items.push(SaveItem::new("hand", &mut self.hand));
        items
    }
}
