use std::fmt;

use crate::cart::{Error, Result};

/// Size of the header region, which starts at ROM offset 0x0100.
pub const HEADER_LEN: usize = 0x50;

/// The hardware present in a cartridge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CartridgeType {
  ROMOnly,
  MBC1,
  MBC1Ram,
  MBC1RamBattery,
  MBC2,
  MBC2Battery,
  ROMRam,
  ROMRamBattery,
  MMM01,
  MMM01Ram,
  MMM01RamBattery,
  MBC3TimerBattery,
  MBC3TimerRamBattery,
  MBC3,
  MBC3Ram,
  MBC3RamBattery,
  MBC5,
  MBC5Ram,
  MBC5RamBattery,
  MBC5Rumble,
  MBC5RumbleRam,
  MBC5RumbleRamBattery,
  MBC6,
  MBC7SensorRumbleRamBattery,
  PocketCamera,
  BandaiTama5,
  HuC3,
  HuC1RamBattery,
  Unknown(u8),
}

impl From<u8> for CartridgeType {
  fn from(code: u8) -> CartridgeType {
    use self::CartridgeType::*;
    match code {
      0x00 => ROMOnly,
      0x01 => MBC1,
      0x02 => MBC1Ram,
      0x03 => MBC1RamBattery,
      0x05 => MBC2,
      0x06 => MBC2Battery,
      0x08 => ROMRam,
      0x09 => ROMRamBattery,
      0x0b => MMM01,
      0x0c => MMM01Ram,
      0x0d => MMM01RamBattery,
      0x0f => MBC3TimerBattery,
      0x10 => MBC3TimerRamBattery,
      0x11 => MBC3,
      0x12 => MBC3Ram,
      0x13 => MBC3RamBattery,
      0x19 => MBC5,
      0x1a => MBC5Ram,
      0x1b => MBC5RamBattery,
      0x1c => MBC5Rumble,
      0x1d => MBC5RumbleRam,
      0x1e => MBC5RumbleRamBattery,
      0x20 => MBC6,
      0x22 => MBC7SensorRumbleRamBattery,
      0xfc => PocketCamera,
      0xfd => BandaiTama5,
      0xfe => HuC3,
      0xff => HuC1RamBattery,
      v => Unknown(v),
    }
  }
}

impl fmt::Display for CartridgeType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      CartridgeType::Unknown(v) => write!(f, "Unknown(0x{:02X})", v),
      known => write!(f, "{:?}", known),
    }
  }
}

/// Color Game Boy compatibility.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CgbSupport {
  NotSupported,
  Supported,
  Required,
}

impl From<u8> for CgbSupport {
  fn from(flag: u8) -> CgbSupport {
    match flag {
      0x80 => CgbSupport::Supported,
      0xc0 => CgbSupport::Required,
      _ => CgbSupport::NotSupported,
    }
  }
}

impl fmt::Display for CgbSupport {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Header {
  pub title: String,
  pub manufacturer_code: String,
  pub cgb_support: CgbSupport,
  pub new_licensee_code: String,
  pub sgb_support: bool,
  pub cartridge_type: CartridgeType,
  /// ROM size in KiB.
  pub rom_size: usize,
  /// External RAM size in KiB.
  pub ram_size: usize,
  pub japanese: bool,
  /// 0x33 means `new_licensee_code` is used instead.
  pub old_licensee_code: u8,
  pub version: u8,
  pub header_checksum: u8,
  pub global_checksum: u16,
}

impl Header {
  /// Parse the 0x50-byte header region.
  ///
  /// A bad header checksum does not stop parsing: the fully populated header
  /// comes back inside `Error::HeaderChecksumInvalid`.
  pub fn parse(data: &[u8]) -> Result<Header> {
    if data.len() != HEADER_LEN {
      return Err(Error::HeaderLengthInvalid(data.len()));
    }

    let header = Header {
      title: text(&data[0x34..0x3f]),
      manufacturer_code: text(&data[0x3f..0x42]),
      cgb_support: CgbSupport::from(data[0x43]),
      new_licensee_code: text(&data[0x44..0x46]),
      sgb_support: data[0x46] == 0x03,
      cartridge_type: CartridgeType::from(data[0x47]),
      rom_size: rom_size(data[0x48]),
      ram_size: ram_size(data[0x49]),
      japanese: data[0x4a] == 0x00,
      old_licensee_code: data[0x4b],
      version: data[0x4c],
      header_checksum: data[0x4d],
      global_checksum: (u16::from(data[0x4e]) << 8) | u16::from(data[0x4f]),
    };

    let computed = header_checksum(data);
    if computed != header.header_checksum {
      return Err(Error::HeaderChecksumInvalid {
        expected: header.header_checksum,
        computed,
        header: Box::new(header),
      });
    }

    Ok(header)
  }

  /// ROM size in bytes.
  pub fn rom_bytes(&self) -> usize {
    self.rom_size * 1024
  }

  /// External RAM size in bytes.
  pub fn ram_bytes(&self) -> usize {
    self.ram_size * 1024
  }
}

/// The boot ROM's check over bytes 0x34-0x4c of the header region.
///
/// Panics if `data` is shorter than 0x4d bytes.
pub fn header_checksum(data: &[u8]) -> u8 {
  data[0x34..=0x4c]
    .iter()
    .fold(0u8, |x, b| x.wrapping_sub(*b).wrapping_sub(1))
}

fn text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes)
    .trim_end_matches('\0')
    .to_string()
}

fn rom_size(code: u8) -> usize {
  16 *
    match code {
      0x00 => 2,
      0x01 => 4,
      0x02 => 8,
      0x03 => 16,
      0x04 => 32,
      0x05 => 128,
      0x06 => 256,
      0x08 => 512,
      0x52 => 72,
      0x53 => 80,
      0x54 => 96,
      _ => 0,
    }
}

fn ram_size(code: u8) -> usize {
  match code {
    0x01 => 2,
    0x02 => 8,
    0x03 => 32,
    0x04 => 128,
    0x05 => 64,
    _ => 0,
  }
}
