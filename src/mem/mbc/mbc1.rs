use crate::mem::mbc::{impl_mmu, RAM_BANK_SIZE, ROM_BANK_SIZE};

#[derive(Debug)]
pub struct MBC1 {
  rom: Vec<u8>,
  ram: Vec<u8>,

  rom_bank: u8,
  ram_bank: u8,
  ram_on: bool,
  mode: Mode,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
  ROM,
  RAM,
}

impl MBC1 {
  pub fn new(rom: Vec<u8>, ram_size: usize) -> Self {
    Self {
      rom,
      ram: vec![0; ram_size],

      rom_bank: 1,
      ram_bank: 0,
      ram_on: false,
      mode: Mode::ROM,
    }
  }

  /// Number of 16 KiB banks in the image; bank numbers wrap around it.
  fn rom_banks(&self) -> usize {
    ((self.rom.len() + ROM_BANK_SIZE - 1) / ROM_BANK_SIZE).max(1)
  }

  fn rom_offset(&self) -> usize {
    (self.rom_bank as usize % self.rom_banks()) * ROM_BANK_SIZE
  }

  fn ram_offset(&self) -> usize {
    match self.mode {
      Mode::RAM => self.ram_bank as usize * RAM_BANK_SIZE,
      Mode::ROM => 0,
    }
  }

  fn read(&self, addr: u16) -> Option<u8> {
    match addr >> 12 {
      0x0..=0x3 => self.rom.get(addr as usize).copied(),
      0x4..=0x7 => {
        self.rom.get(self.rom_offset() + (addr & 0x3fff) as usize).copied()
      }
      0xa..=0xb => {
        let idx = self.ram_offset() + (addr & 0x1fff) as usize;
        if idx >= self.ram.len() {
          None
        } else if self.ram_on {
          Some(self.ram[idx])
        } else {
          // Disabled RAM floats high.
          Some(0xff)
        }
      }
      _ => None,
    }
  }

  fn mapped_for_write(&self, addr: u16) -> bool {
    match addr >> 12 {
      0x0..=0x7 => true,
      0xa..=0xb => self.ram_offset() + ((addr & 0x1fff) as usize) < self.ram.len(),
      _ => false,
    }
  }

  fn write(&mut self, addr: u16, value: u8) {
    match addr >> 12 {
      0x0..=0x1 => self.ram_on = (value & 0x0f) == 0x0a,
      0x2..=0x3 => {
        self.rom_bank = (self.rom_bank & 0x60) +
          match value & 0x1f {
            0 => 1,
            v => v,
          }
      }
      0x4..=0x5 => {
        match self.mode {
          Mode::RAM => self.ram_bank = value & 0x03,
          Mode::ROM => {
            self.rom_bank = (self.rom_bank & 0x1f) + ((value & 0x03) << 5)
          }
        }
      }
      0x6..=0x7 => {
        self.mode = if value & 0x1 == 0x0 {
          Mode::ROM
        } else {
          Mode::RAM
        };
      }
      0xa..=0xb => {
        if self.ram_on {
          let idx = self.ram_offset() + (addr & 0x1fff) as usize;
          self.ram[idx] = value;
        }
      }
      _ => (),
    }
  }
}

impl_mmu!(MBC1);
