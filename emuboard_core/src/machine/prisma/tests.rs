// SPDX-License-Identifier: GPL-3.0
// tests.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use super::*;
use crate::cpu::LineState;
use crate::error::DriverError;
use crate::sensorboard::chess_sensorboard::{EMPTY, WHITE_KING, WHITE_PAWN};

#[derive(Default)]
struct MockCpu {
    clocks: Vec<u32>,
}

impl HostCpu for MockCpu {

    fn set_input_line(&mut self, _line: u8, _state: LineState) {}

    fn set_unscaled_clock(&mut self, hz: u32) {
        self.clocks.push(hz);
    }

    fn reset(&mut self) {}
}

fn prisma_with(config: PrismaConfig) -> Prisma {
    let mut rom = vec![0u8; MAINCPU_SIZE];
    rom[0] = 0x5E;
    match Prisma::new(config, &rom) {
        Ok(prisma) => prisma,
        Err(e) => panic!("board should build: {e}"),
    }
}

fn prisma() -> Prisma {
    prisma_with(PrismaConfig::default())
}

/// Drives one LCD write cycle the way the firmware does: address, data,
/// then WR high and low with CS held low.
fn lcd_cycle(prisma: &mut Prisma, address: u8, value: u8) {
    prisma.p6_w(address);
    // The data lane swizzle is its own inverse.
    prisma.p3_w(value.bitswap(&[3, 4, 5, 6, 7, 0, 1, 2]));
    prisma.p4_w(0x04);
    prisma.p4_w(0x00);
}

#[test]
fn short_rom_should_be_rejected() {

    let result = Prisma::new(PrismaConfig::default(), &[0u8; 0x4000]);

    assert!(matches!(result, Err(DriverError::RegionSize { region: "maincpu", .. })));
}

#[test]
fn rom_should_fill_low_32k() {

    let prisma = prisma();

    assert_eq!(prisma.read(0x0000), 0x5E);
    assert_eq!(prisma.read(0x8000), 0xFF);
}

#[test]
fn strap_should_select_cpu_clock() {

    assert_eq!(prisma().cpu_clock(), 10_000_000);
    assert_eq!(
        prisma_with(PrismaConfig { cpu_frequency: CpuFrequency::Mhz8 }).cpu_clock(),
        8_000_000
    );
    assert_eq!(cpu_clock_for(0x80), 12_000_000);
    assert_eq!(cpu_clock_for(0x81), 6_000_000);
}

#[test]
fn strap_change_should_reach_host_cpu() {

    let mut prisma = prisma();
    let mut cpu = MockCpu::default();

    prisma.set_input(0, 0x01 | 0x20, &mut cpu);
    assert!(cpu.clocks.is_empty());

    prisma.set_input(0, 0x80, &mut cpu);
    assert_eq!(cpu.clocks, vec![12_000_000]);
}

#[test]
fn lcd_should_latch_only_on_wr_falling_edge_with_cs_low() {

    let mut prisma = prisma();
    lcd_cycle(&mut prisma, 0x05, 0x81);

    assert_eq!(prisma.lcd().read(0x05), 0x81);

    // WR held low: no further edge.
    prisma.p3_w(0xFF);
    prisma.p4_w(0x00);
    assert_eq!(prisma.lcd().read(0x05), 0x81);

    // CS high during the edge.
    prisma.p4_w(0x04);
    prisma.p4_w(0x01);
    assert_eq!(prisma.lcd().read(0x05), 0x81);
}

#[test]
fn lcd_refresh_should_light_written_segments() {

    let mut prisma = prisma();
    lcd_cycle(&mut prisma, 34, 0x01);
    lcd_cycle(&mut prisma, 0x02, 0x80);
    prisma.lcd_refresh();

    assert!(prisma.lcd_segment(7, 2));
    assert!(!prisma.lcd_segment(7, 3));
    assert!(!prisma.lcd_segment(0, 2));
}

#[test]
fn button_rows_should_follow_input_mux() {

    let mut prisma = prisma();
    let mut cpu = MockCpu::default();
    prisma.set_input(1, 0x08, &mut cpu);

    prisma.p2_w(!0x01);
    assert_eq!(prisma.p5_r(), 0xF5);

    prisma.p2_w(0xFF);
    assert_eq!(prisma.p5_r(), 0xF7);

    prisma.set_input(3, 0x00, &mut cpu);
    assert_eq!(prisma.p5_r(), 0xFF);
}

#[test]
fn chessboard_should_read_selected_files() {

    let mut prisma = prisma();
    prisma.p2_w(!0x01);

    assert_eq!(prisma.p7_r(), 0xFF);

    prisma.board_mut().press(3, 1);
    assert_eq!(prisma.p7_r(), 0xFB);

    prisma.board_mut().release();
    prisma.board_mut().press(4, 1);
    assert_eq!(prisma.p7_r(), 0xFF);
}

#[test]
fn led_matrix_should_use_mux_data_and_row_select() {

    let mut prisma = prisma();
    prisma.p2_w(!0xA5);
    prisma.p5_w(0xEF);

    assert!(prisma.led(0, 0));
    assert!(!prisma.led(0, 1));
    assert!(prisma.led(0, 7));
    assert!(!prisma.led(1, 0));
}

#[test]
fn speaker_should_follow_p14() {

    let mut prisma = prisma();
    prisma.p1_w(0x10);

    assert_eq!(prisma.speaker_level(), 1);

    prisma.p1_w(0xEF);
    assert_eq!(prisma.speaker_level(), 0);
}

#[test]
fn save_items_should_cover_port_latches_and_board() {

    let mut prisma = prisma();
    prisma.p6_w(0xFF);

    let state = emuboard_utility::snapshot(&mut prisma);

    assert_eq!(state.len(), 4 + 65);
    assert_eq!(
        state[..4],
        [("lcd_data", 0), ("lcd_address", 0x7F), ("lcd_write", 0), ("inp_mux", 0)]
    );
    assert!(state.contains(&("e1", WHITE_KING)));
    assert_eq!(state.last(), Some(&("hand", EMPTY)));
}

#[test]
fn restored_board_should_replace_the_opening_position() {

    let mut played = prisma();
    played.board_mut().press(4, 1);
    played.board_mut().release();
    played.board_mut().press(4, 3);
    played.board_mut().release();
    let state = emuboard_utility::snapshot(&mut played);

    let mut fresh = prisma();
    emuboard_utility::restore(&mut fresh, &state);

    assert_eq!(fresh.board().read_piece(4, 1), EMPTY);
    assert_eq!(fresh.board().read_piece(4, 3), WHITE_PAWN);
}

#[test]
fn board_should_start_in_opening_position() {

    let prisma = prisma();

    assert!(prisma.board().render().starts_with("8 rnbqkbnr"));
    assert!(!prisma.info().working);
}
