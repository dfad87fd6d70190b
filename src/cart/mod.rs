//! Cartridge images: header parsing, checksums and the memory controller
//! behind the ROM.

mod header;

pub use self::header::{
  header_checksum, CartridgeType, CgbSupport, Header, HEADER_LEN,
};

use crate::mem::mbc::{MBC0, MBC1};
use crate::mem::MMU;
use thiserror::Error;

/// Where the header region lives in the ROM.
pub const HEADER_START: usize = 0x0100;

/// Offset of the big-endian global checksum, which it does not cover.
const GLOBAL_CHECKSUM: usize = 0x014e;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum Error {
  #[error("header data is {0:#x} bytes long, expected 0x50")]
  HeaderLengthInvalid(usize),
  #[error(
    "header checksum mismatch: header says 0x{expected:02x}, computed 0x{computed:02x}"
  )]
  HeaderChecksumInvalid {
    header: Box<Header>,
    expected: u8,
    computed: u8,
  },
  #[error("unsupported cartridge type {0}")]
  UnsupportedType(CartridgeType),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Sum of every ROM byte except the two global checksum bytes.
pub fn global_checksum(rom: &[u8]) -> u16 {
  rom
    .iter()
    .enumerate()
    .filter(|(i, _)| *i != GLOBAL_CHECKSUM && *i != GLOBAL_CHECKSUM + 1)
    .fold(0u16, |sum, (_, b)| sum.wrapping_add(u16::from(*b)))
}

#[derive(Debug)]
pub struct Cartridge {
  rom: Vec<u8>,
  header: Header,
  header_valid: bool,
}

impl Cartridge {
  /// Load a ROM image. A header checksum mismatch is tolerated and only
  /// recorded; a header too short to parse is not.
  pub fn new(rom: Vec<u8>) -> Result<Cartridge> {
    let end = rom.len().min(HEADER_START + HEADER_LEN);
    let region = rom.get(HEADER_START..end).unwrap_or(&[]);

    let (header, header_valid) = match Header::parse(region) {
      Ok(header) => (header, true),
      Err(Error::HeaderChecksumInvalid {
        header,
        expected,
        computed,
      }) => {
        warn!(
          "header checksum mismatch: expected 0x{:02x}, computed 0x{:02x}",
          expected, computed
        );
        (*header, false)
      }
      Err(e) => return Err(e),
    };

    debug!(
      "loaded \"{}\": {} ({} KiB ROM, {} KiB RAM), image is {} bytes",
      header.title,
      header.cartridge_type,
      header.rom_size,
      header.ram_size,
      rom.len()
    );

    Ok(Cartridge {
      rom,
      header,
      header_valid,
    })
  }

  pub fn header(&self) -> &Header {
    &self.header
  }

  pub fn rom(&self) -> &[u8] {
    &self.rom
  }

  pub fn header_checksum_valid(&self) -> bool {
    self.header_valid
  }

  pub fn global_checksum(&self) -> u16 {
    global_checksum(&self.rom)
  }

  pub fn global_checksum_valid(&self) -> bool {
    self.global_checksum() == self.header.global_checksum
  }

  /// Build the memory controller for this cartridge.
  pub fn into_mmu(self) -> Result<Box<dyn MMU>> {
    let ram = self.header.ram_bytes();
    match self.header.cartridge_type {
      CartridgeType::ROMOnly |
      CartridgeType::ROMRam |
      CartridgeType::ROMRamBattery => Ok(Box::new(MBC0::new(self.rom, ram))),
      CartridgeType::MBC1 |
      CartridgeType::MBC1Ram |
      CartridgeType::MBC1RamBattery => Ok(Box::new(MBC1::new(self.rom, ram))),
      other => Err(Error::UnsupportedType(other)),
    }
  }
}
