// SPDX-License-Identifier: GPL-3.0
// main.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

// This file is the core of the basic client - it exists merely as a CLI-based
// program to build the device models and print what they look like. Running
// a machine needs a host emulation kernel, which this client does not have.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use emuboard_core::{
    machine::{
        prisma::{self, Prisma, PrismaConfig},
        Machine,
    },
    netlist::Netlist,
    pci::{
        pdc20262::{self, IdeMode, Pdc20262, Pdc20262Config},
        PciCard,
    },
    sound::{dribling_sound::DriblingSound, SoundNetwork},
};
use log::{error, info};

#[derive(Parser)]
#[command(
    version,
    about = "A basic barebones UI for the emuboard device models",
    long_about = None
)]
struct EmuboardArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and resolve the Dribbling sound netlist.
    Netlist {
        #[arg(long, help = "List every net and its terminals")]
        nets: bool,
    },

    /// Build a PDC20262 card and dump its configuration space.
    Pci {
        #[arg(long, value_enum, default_value_t = Mode::Unspecified)]
        mode: Mode,

        #[arg(long = "bios", help = "An optional 16 KiB Ultra66 BIOS image", id = "BIOS file")]
        bios: Option<OsString>,
    },

    /// Build the Prisma chess computer and print its board.
    Board {
        #[arg(long = "rom", help = "An optional 32 KiB Prisma ROM image", id = "ROM file")]
        rom: Option<OsString>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Mode {
    Unspecified,
    Compatible,
    Native,
}

impl From<Mode> for IdeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Unspecified => IdeMode::Unspecified,
            Mode::Compatible => IdeMode::Compatible,
            Mode::Native => IdeMode::Native,
        }
    }
}

/// Reads an image from disk, or makes a blank one of the right size.
fn load_image(path: Option<&OsString>, size: usize) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.to_string_lossy())),
        None => Ok(vec![0xFF; size]),
    }
}

fn print_netlist(netlist: &Netlist, nets: bool) {
    println!("netlist '{}'", netlist.name());
    println!("  components:     {}", netlist.components().count());
    println!("  nets:           {}", netlist.nets().len());
    println!("  sub-circuits:   {}", netlist.subcircuit_instances().len());
    println!("  logic inputs:   {}", netlist.logic_inputs().count());
    println!("  floating pins:  {}", netlist.floating_terminals().len());

    if nets {
        for net in netlist.nets() {
            let terminals: Vec<String> = net
                .terminals()
                .iter()
                .map(|&terminal| netlist.terminal_name(terminal))
                .collect();
            println!("{}: {}", net.name(), terminals.join(" "));
        }
    }
}

fn print_config_space(card: &Pdc20262) {
    for (row, bytes) in card.config_space().bytes().chunks(16).enumerate() {
        let hex: Vec<String> = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        println!("{:02x}: {}", row * 16, hex.join(" "));
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Netlist { nets } => {
            let sound = DriblingSound::new().context("Failed to build the Dribbling sound netlist")?;
            print_netlist(sound.netlist(), nets);
        }
        Command::Pci { mode, bios } => {
            let bios = load_image(bios.as_ref(), pdc20262::BIOS_SIZE)?;
            let config = Pdc20262Config { mode: mode.into() };
            let mut card = Pdc20262::new(config, &bios)?;
            card.reset();
            info!("PDC20262 in {:?} mode", card.mode());
            print_config_space(&card);
        }
        Command::Board { rom } => {
            let rom = load_image(rom.as_ref(), prisma::MAINCPU_SIZE)?;
            let prisma = Prisma::new(PrismaConfig::default(), &rom)?;
            let machine = prisma.info();
            info!("{} {} ({}), CPU at {} Hz", machine.manufacturer, machine.description, machine.year, prisma.cpu_clock());
            print!("{}", prisma.board().render());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    colog::init();

    let emuboard_args = EmuboardArgs::parse();

    match run(emuboard_args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn missing_image_should_keep_io_error_source() {

        let path = OsString::from("/nonexistent/emuboard/ultra66.bin");

        let e = match load_image(Some(&path), pdc20262::BIOS_SIZE) {
            Ok(_) => panic!("missing image should not load"),
            Err(e) => e,
        };

        assert!(e.to_string().contains("ultra66.bin"));
        let io = e.downcast_ref::<std::io::Error>().map(|io| io.kind());
        assert_eq!(io, Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn short_bios_should_surface_driver_error() {

        let bios = vec![0u8; 0x100];
        let e = match Pdc20262::new(Pdc20262Config { mode: IdeMode::Native }, &bios) {
            Ok(_) => panic!("short bios should be rejected"),
            Err(e) => anyhow::Error::from(e),
        };
        assert!(e.downcast_ref::<emuboard_core::error::DriverError>().is_some());
    }

    #[test]
    fn blank_image_should_fill_with_ones() {

        let image = match load_image(None, 4) {
            Ok(image) => image,
            Err(e) => panic!("blank image should build: {e:#}"),
        };

        assert_eq!(image, vec![0xFF; 4]);
    }
}
