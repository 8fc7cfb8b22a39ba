// SPDX-License-Identifier: GPL-3.0
// tests.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use super::*;
use crate::display::{Bitmap, Rectangle, Rgb};
use crate::error::DriverError;
use crate::machine::dribling::video::SCREEN_TIMING;

#[derive(Default)]
struct MockCpu {
    lines: Vec<(u8, LineState)>,
    resets: u32,
}

impl HostCpu for MockCpu {

    fn set_input_line(&mut self, line: u8, state: LineState) {
        self.lines.push((line, state));
    }

    fn set_unscaled_clock(&mut self, _hz: u32) {}

    fn reset(&mut self) {
        self.resets += 1;
    }
}

struct Regions {
    maincpu: Vec<u8>,
    gfx: Vec<u8>,
    proms: Vec<u8>,
}

fn regions() -> Regions {
    let mut maincpu = vec![0u8; MAINCPU_SIZE];
    maincpu[0x0000] = 0xC3;
    maincpu[0x4000] = 0x31;
    let mut proms = vec![0u8; PROMS_SIZE];
    proms[0x400] = 0x00;
    proms[0x401] = 0xFF;
    proms[0x402] = 0xFD;
    Regions {
        maincpu,
        gfx: vec![0u8; GFX_SIZE],
        proms,
    }
}

fn build(config: DriblingConfig, regions: &Regions) -> Dribling {
    let roms = DriblingRoms {
        maincpu: &regions.maincpu,
        gfx: &regions.gfx,
        proms: &regions.proms,
    };
    match Dribling::new(config, roms) {
        Ok(dribling) => dribling,
        Err(e) => panic!("board should build: {e}"),
    }
}

fn dribling() -> Dribling {
    build(DriblingConfig::default(), &regions())
}

/// PPI0 as the game sets it up: A and B in, C out.
fn program_ppi0(dribling: &mut Dribling, cpu: &mut MockCpu) {
    dribling.io_write(0x0B, 0x92, cpu);
}

/// PPI1 with every port an output.
fn program_ppi1(dribling: &mut Dribling, cpu: &mut MockCpu) {
    dribling.io_write(0x13, 0x80, cpu);
}

#[test]
fn wrong_region_sizes_should_be_rejected() {

    let mut regions = regions();
    regions.gfx.truncate(0x1000);
    let roms = DriblingRoms {
        maincpu: &regions.maincpu,
        gfx: &regions.gfx,
        proms: &regions.proms,
    };

    assert!(matches!(
        Dribling::new(DriblingConfig::default(), roms),
        Err(DriverError::RegionSize { region: "gfx", .. })
    ));
}

#[test]
fn memory_map_should_decode_rom_and_ram() {

    let mut dribling = dribling();
    dribling.write(0x0000, 0x00);
    dribling.write(0x2345, 0x5A);

    assert_eq!(dribling.read(0x0000), 0xC3);
    assert_eq!(dribling.read(0x4000), 0x31);
    assert_eq!(dribling.read(0x2345), 0x5A);
    assert_eq!(dribling.read(0x8000), 0xFF);
    assert_eq!(dribling.read(0xE000), 0xFF);
}

#[test]
fn colour_ram_writes_should_drop_masked_address_lines() {

    let mut dribling = dribling();
    dribling.write(0xC060, 0x07);

    assert_eq!(dribling.read(0xC000), 0x07);
    assert_eq!(dribling.read(0xC060), 0x00);
}

#[test]
fn unmapped_io_should_read_ff() {

    let mut dribling = dribling();

    assert_eq!(dribling.io_read(0x00), 0xFF);
    assert_eq!(dribling.io_read(0x40), 0xFF);
    assert_eq!(dribling.io_read(0x87), 0xFF);
}

#[test]
fn shifter_should_slide_window_over_ds_dr() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    dribling.io_write(0x40, 0x12, &mut cpu);
    dribling.io_write(0x40, 0x34, &mut cpu);

    assert_eq!(dribling.io_read(0x08), 0x34);

    program_ppi1(&mut dribling, &mut cpu);
    dribling.io_write(0x12, 0x04, &mut cpu);
    assert_eq!(dribling.io_read(0x08), 0x41);
}

#[test]
fn restored_shift_amount_should_wrap_to_three_bits() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    dribling.io_write(0x40, 0x12, &mut cpu);
    dribling.io_write(0x40, 0x34, &mut cpu);

    emuboard_utility::restore(&mut dribling, &[("sh", 9)]);

    assert_eq!(dribling.io_read(0x08), 0x68);
}

#[test]
fn input_matrix_should_and_selected_groups() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    dribling.set_matrix(0, 0xFE);
    dribling.set_matrix(1, 0xFD);
    dribling.set_matrix(2, 0xFB);
    program_ppi0(&mut dribling, &mut cpu);

    let groups = [0xFEu8, 0xFD, 0xFB];
    for select in 0..8u8 {
        dribling.io_write(0x0A, select, &mut cpu);
        let expected = (0..3)
            .filter(|i| select & (1 << i) == 0)
            .fold(0xFF, |result, i| result & groups[i]);
        assert_eq!(dribling.io_read(0x09), expected, "selector {select}");
    }
}

#[test]
fn misc_latch_should_drive_lines_and_irq_mask() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    program_ppi0(&mut dribling, &mut cpu);
    cpu.lines.clear();

    dribling.io_write(0x0A, 0xF0, &mut cpu);

    assert!(dribling.interrupts_enabled());
    assert_eq!(dribling.abca(), 1);
    assert!(dribling.sound().line_level(SoundInput::Parata));
    assert!(dribling.sound().line_level(SoundInput::EnableSound));
    assert!(cpu.lines.is_empty());

    dribling.io_write(0x0A, 0x00, &mut cpu);

    assert!(!dribling.interrupts_enabled());
    assert_eq!(cpu.lines, vec![(0, LineState::Clear)]);
}

#[test]
fn sound_write_should_set_each_line_from_its_bit() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    program_ppi1(&mut dribling, &mut cpu);

    dribling.io_write(0x10, 0b1010_0101, &mut cpu);

    let sound = dribling.sound();
    assert!(sound.line_level(SoundInput::FollaB));
    assert!(!sound.line_level(SoundInput::FollaM));
    assert!(sound.line_level(SoundInput::FollaA));
    assert!(!sound.line_level(SoundInput::CalcioB));
    assert!(!sound.line_level(SoundInput::Fischio));
    assert!(sound.line_level(SoundInput::CalcioA));
    assert!(!sound.line_level(SoundInput::Contrasto));
    assert!(sound.line_level(SoundInput::StopPalla));
}

#[test]
fn pb_write_should_set_divisor_lines() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    program_ppi1(&mut dribling, &mut cpu);

    dribling.io_write(0x11, 0x81, &mut cpu);

    let levels: Vec<bool> = SoundInput::PB
        .iter()
        .map(|&input| dribling.sound().line_level(input))
        .collect();
    assert_eq!(levels, vec![true, false, false, false, false, false, false, true]);
}

#[test]
fn repeated_sound_write_should_queue_nothing() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    program_ppi1(&mut dribling, &mut cpu);
    dribling.io_write(0x10, 0x5A, &mut cpu);
    dribling.sound_mut().drain_changes();

    dribling.io_write(0x10, 0x5A, &mut cpu);

    assert!(dribling.sound_mut().drain_changes().is_empty());
}

#[test]
fn vblank_should_assert_irq_only_when_enabled() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();

    dribling.vblank(&mut cpu);
    assert!(cpu.lines.is_empty());

    program_ppi0(&mut dribling, &mut cpu);
    dribling.io_write(0x0A, 0x80, &mut cpu);
    cpu.lines.clear();
    dribling.vblank(&mut cpu);

    assert_eq!(cpu.lines, vec![(0, LineState::Assert)]);
}

#[test]
fn starved_watchdog_should_reset_machine() {

    let mut dribling = build(DriblingConfig { watchdog_frames: 3 }, &regions());
    let mut cpu = MockCpu::default();
    dribling.io_write(0x40, 0x99, &mut cpu);

    assert!(!dribling.vblank(&mut cpu));
    assert!(!dribling.vblank(&mut cpu));
    assert!(dribling.vblank(&mut cpu));

    assert_eq!(cpu.resets, 1);
    assert_eq!(emuboard_utility::snapshot(&mut dribling)[3], ("ds", 0));
}

#[test]
fn toggling_watchdog_bit_should_keep_machine_alive() {

    let mut dribling = build(DriblingConfig { watchdog_frames: 3 }, &regions());
    let mut cpu = MockCpu::default();
    program_ppi1(&mut dribling, &mut cpu);

    for frame in 0..20 {
        let data = if frame % 2 == 0 { 0x08 } else { 0x00 };
        dribling.io_write(0x12, data, &mut cpu);
        assert!(!dribling.vblank(&mut cpu));
    }
    assert_eq!(cpu.resets, 0);
}

#[test]
fn reset_should_clear_latches_and_save_items_should_list_them() {

    let mut dribling = dribling();
    let mut cpu = MockCpu::default();
    program_ppi0(&mut dribling, &mut cpu);
    dribling.io_write(0x0A, 0xA7, &mut cpu);
    dribling.io_write(0x40, 0x11, &mut cpu);

    dribling.machine_reset();

    assert_eq!(
        emuboard_utility::snapshot(&mut dribling),
        vec![("abca", 0), ("di", 0), ("dr", 0), ("ds", 0), ("sh", 0), ("input_sel", 0)]
    );
    assert_eq!(dribling.ppi(0).control(), 0x9B);
}

#[test]
fn in0_should_read_through_ppi1_port_c() {

    let mut dribling = dribling();
    dribling.set_in0(0xFF & !DIP_GAME_DURATION);

    assert_eq!(dribling.io_read(0x12), 0xBF);
}

#[test]
fn palette_should_decode_active_low_prom() {

    let palette = dribling().palette();

    assert_eq!(palette.len(), 256);
    assert_eq!(palette[0], Rgb::new(0xFF, 0xFF, 0xFF));
    assert_eq!(palette[1], Rgb::new(0, 0, 0));
    assert_eq!(palette[2], Rgb::new(0, 0x55, 0));
}

#[test]
fn screen_update_should_compose_pen_from_every_source() {

    let mut regions = regions();
    regions.proms[0] = 0x01;
    regions.gfx[0] = 0x02;
    let mut dribling = build(DriblingConfig::default(), &regions);
    dribling.write(0x2000, 0x01);
    dribling.write(0xC000, 0x05);

    let mut bitmap = Bitmap::new(256, 256);
    dribling.screen_update(&mut bitmap, &SCREEN_TIMING.visible_area());

    // Rows above the visible area are left alone.
    assert_eq!(bitmap.pix(0, 0), 0);

    let mut cpu = MockCpu::default();
    program_ppi0(&mut dribling, &mut cpu);
    dribling.io_write(0x0A, 0x20, &mut cpu);
    let full = Rectangle { min_x: 0, max_x: 255, min_y: 0, max_y: 255 };
    dribling.screen_update(&mut bitmap, &full);

    assert_eq!(bitmap.pix(0, 0), 0x80 | 0x40 | 0x08 | 0x05);
    assert_eq!(bitmap.pix(0, 1), 0x80 | 0x40 | 0x10 | 0x05);
    assert_eq!(bitmap.pix(0, 8), 0x40 | 0x20);
}

#[test]
fn info_should_name_the_board() {

    let dribling = dribling();

    assert_eq!(dribling.info().name, "dribling");
}
