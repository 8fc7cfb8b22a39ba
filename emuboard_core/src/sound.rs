// SPDX-License-Identifier: GPL-3.0
// sound.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use crate::netlist::Netlist;

/// Contains the Dribbling discrete sound board.
pub mod dribling_sound;

/// The digital lines a driver can drive into a discrete sound network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SoundInput {
    Pb0,
    Pb1,
    Pb2,
    Pb3,
    Pb4,
    Pb5,
    Pb6,
    Pb7,
    FollaA,
    FollaM,
    FollaB,
    CalcioA,
    CalcioB,
    Fischio,
    Contrasto,
    StopPalla,
    Parata,
    EnableSound,
}

impl SoundInput {

    pub const COUNT: usize = 18;

    pub const ALL: [SoundInput; SoundInput::COUNT] = [
        SoundInput::Pb0,
        SoundInput::Pb1,
        SoundInput::Pb2,
        SoundInput::Pb3,
        SoundInput::Pb4,
        SoundInput::Pb5,
        SoundInput::Pb6,
        SoundInput::Pb7,
        SoundInput::FollaA,
        SoundInput::FollaM,
        SoundInput::FollaB,
        SoundInput::CalcioA,
        SoundInput::CalcioB,
        SoundInput::Fischio,
        SoundInput::Contrasto,
        SoundInput::StopPalla,
        SoundInput::Parata,
        SoundInput::EnableSound,
    ];

    /// The eight tone-generator divisor bits, least significant first.
    pub const PB: [SoundInput; 8] = [
        SoundInput::Pb0,
        SoundInput::Pb1,
        SoundInput::Pb2,
        SoundInput::Pb3,
        SoundInput::Pb4,
        SoundInput::Pb5,
        SoundInput::Pb6,
        SoundInput::Pb7,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The name of the logic input device this line drives in the netlist.
    pub fn device_name(self) -> &'static str {
        match self {
            SoundInput::Pb0 => "I_PB0",
            SoundInput::Pb1 => "I_PB1",
            SoundInput::Pb2 => "I_PB2",
            SoundInput::Pb3 => "I_PB3",
            SoundInput::Pb4 => "I_PB4",
            SoundInput::Pb5 => "I_PB5",
            SoundInput::Pb6 => "I_PB6",
            SoundInput::Pb7 => "I_PB7",
            SoundInput::FollaA => "I_FOLLA_A",
            SoundInput::FollaM => "I_FOLLA_M",
            SoundInput::FollaB => "I_FOLLA_B",
            SoundInput::CalcioA => "I_CALCIO_A",
            SoundInput::CalcioB => "I_CALCIO_B",
            SoundInput::Fischio => "I_FISCHIO",
            SoundInput::Contrasto => "I_CONTRASTO",
            SoundInput::StopPalla => "I_STOP_PALLA",
            SoundInput::Parata => "I_PARATA",
            SoundInput::EnableSound => "ENABLE_SOUND",
        }
    }
}

/// A level change on one line, queued for the external solver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineChange {
    pub input: SoundInput,
    pub level: bool,
}

/// This trait describes a discrete sound network as a driver sees it: a set
/// of logic lines to drive, and the circuit description behind them.
pub trait SoundNetwork {

    /// Sets a line. Writing the level a line already has queues nothing.
    fn write_line(&mut self, input: SoundInput, level: bool);

    /// Returns the current level of a line.
    fn line_level(&self, input: SoundInput) -> bool;

    /// Hands over every change since the last call, oldest first. The host
    /// calls this once per solver step; the queue is bounded and drops its
    /// oldest entries if left undrained.
    fn drain_changes(&mut self) -> Vec<LineChange>;

    /// The circuit the lines feed.
    fn netlist(&self) -> &Netlist;
}
