#[macro_use]
extern crate log;

use std::fs;

use anyhow::{Context, Result};
use clap::{App, Arg};
use log::LevelFilter;

use gbcore::cart::Cartridge;
use gbcore::cpu::{Registers, CPU};
use gbcore::mem::Bus;

fn main() -> Result<()> {
  let matches = App::new("gbdump")
    .version(clap::crate_version!())
    .about("Dump Game Boy cartridge headers")
    .arg(
      Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .multiple(true)
        .help("Show verbose logging information"),
    )
    .arg(
      Arg::with_name("trace")
        .long("trace")
        .value_name("STEPS")
        .takes_value(true)
        .help("Run the CPU from the entry point for up to STEPS instructions"),
    )
    .arg(
      Arg::with_name("ROM")
        .required(true)
        .multiple(true)
        .help("ROM files to dump"),
    )
    .get_matches();

  let level = match matches.occurrences_of("verbose") {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new()
    .filter_level(level)
    .parse_default_env()
    .init();

  let steps = matches
    .value_of("trace")
    .map(|s| s.parse::<u64>())
    .transpose()
    .context("--trace takes a number of steps")?;

  for file in matches.values_of("ROM").into_iter().flatten() {
    dump(file, steps)?;
  }

  Ok(())
}

fn dump(file: &str, steps: Option<u64>) -> Result<()> {
  let rom = fs::read(file).with_context(|| format!("failed to read {}", file))?;
  info!("read {} bytes from {}", rom.len(), file);

  let cart = Cartridge::new(rom)
    .with_context(|| format!("failed to parse header of {}", file))?;
  let header = cart.header();

  println!("Rom file {}", file);
  if !cart.header_checksum_valid() {
    eprintln!("  Warning: Header checksum validation failed.");
  }

  println!("  Size: 0x{:04X}", cart.rom().len());
  println!("  Title: {}", header.title);
  println!("  Manufacturer Code: {}", header.manufacturer_code);
  println!("  Color GameBoy Support: {}", header.cgb_support);
  println!("  New Licensee Code: {}", header.new_licensee_code);
  println!("  Old Licensee Code: 0x{:02X}", header.old_licensee_code);
  println!("  Super GameBoy Support: {}", header.sgb_support);
  println!("  Type: {}", header.cartridge_type);
  println!("  ROM Size: {}KB", header.rom_size);
  println!("  RAM Size: {}KB", header.ram_size);
  println!("  Japanese?: {}", header.japanese);
  println!("  Version: {}", header.version);

  let actual = cart.global_checksum();
  if cart.global_checksum_valid() {
    println!("  Cartridge Checksum VERIFIED");
  } else {
    println!("  Cartridge Checksum NOT VERIFIED");
    println!(
      "    Expected: 0x{:04X}, Actual 0x{:04X}",
      header.global_checksum, actual
    );
  }

  if let Some(steps) = steps {
    trace(cart, steps)
      .with_context(|| format!("failed to trace {}", file))?;
  }

  Ok(())
}

/// Run the CPU from the post-boot state and report where it stopped.
fn trace(cart: Cartridge, steps: u64) -> Result<()> {
  let mut bus = Bus::new(cart.into_mmu()?);
  let mut cpu = CPU::with_registers(Registers::power_on());

  for _ in 0..steps {
    let pc = cpu.regs.pc;
    if let Err(e) = cpu.step(&mut bus) {
      println!("  Trace stopped at 0x{:04X}: {}", pc, e);
      return Ok(());
    }
    if cpu.is_halted() {
      println!("  Trace halted at 0x{:04X}", pc);
      return Ok(());
    }
  }

  info!("step limit reached after {} cycles", cpu.cycles());
  println!(
    "  Trace ran {} steps ({} cycles), next PC 0x{:04X}",
    steps,
    cpu.cycles(),
    cpu.regs.pc
  );
  Ok(())
}
