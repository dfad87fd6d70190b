use crate::mem::mbc::impl_mmu;

/// A cartridge with no controller: up to 32 KiB of ROM and optionally a
/// single bank of RAM.
#[derive(Debug)]
pub struct MBC0 {
  rom: Vec<u8>,
  ram: Vec<u8>,
}

impl MBC0 {
  pub fn new(rom: Vec<u8>, ram_size: usize) -> Self {
    Self {
      rom,
      ram: vec![0; ram_size],
    }
  }

  fn read(&self, addr: u16) -> Option<u8> {
    match addr >> 12 {
      0x0..=0x7 => self.rom.get(addr as usize).copied(),
      0xa..=0xb => self.ram.get((addr & 0x1fff) as usize).copied(),
      _ => None,
    }
  }

  fn mapped_for_write(&self, addr: u16) -> bool {
    match addr >> 12 {
      0x0..=0x7 => true,
      0xa..=0xb => ((addr & 0x1fff) as usize) < self.ram.len(),
      _ => false,
    }
  }

  fn write(&mut self, addr: u16, value: u8) {
    if let 0xa..=0xb = addr >> 12 {
      self.ram[(addr & 0x1fff) as usize] = value;
    }
  }
}

impl_mmu!(MBC0);
