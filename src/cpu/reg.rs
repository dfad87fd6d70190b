use crate::cpu::flags::Flags;

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Registers {
  /// General-purpose registers.
  pub a: u8,
  pub b: u8,
  pub c: u8,
  pub d: u8,
  pub e: u8,
  pub f: Flags,
  pub h: u8,
  pub l: u8,

  /// Program counter.
  pub pc: u16,

  /// Stack pointer.
  pub sp: u16,
}

impl Registers {
  /// All registers zeroed.
  pub fn new() -> Registers {
    Registers::default()
  }

  /// The state the DMG boot ROM leaves behind when it jumps to the cartridge.
  pub fn power_on() -> Registers {
    Registers {
      a: 0x01,
      f: Flags::from_bits(0xb0),
      b: 0x00,
      c: 0x13,
      d: 0x00,
      e: 0xd8,
      h: 0x01,
      l: 0x4d,

      sp: 0xfffe,
      pc: 0x100,
    }
  }

  pub fn af(&self) -> u16 {
    (u16::from(self.a) << 8) | u16::from(self.f.bits())
  }
  pub fn bc(&self) -> u16 {
    (u16::from(self.b) << 8) | u16::from(self.c)
  }
  pub fn de(&self) -> u16 {
    (u16::from(self.d) << 8) | u16::from(self.e)
  }
  pub fn hl(&self) -> u16 {
    (u16::from(self.h) << 8) | u16::from(self.l)
  }

  pub fn set_af(&mut self, value: u16) {
    self.a = (value >> 8) as u8;
    self.f = Flags::from_bits(value as u8);
  }
  pub fn set_bc(&mut self, value: u16) {
    self.b = (value >> 8) as u8;
    self.c = value as u8;
  }
  pub fn set_de(&mut self, value: u16) {
    self.d = (value >> 8) as u8;
    self.e = value as u8;
  }
  pub fn set_hl(&mut self, value: u16) {
    self.h = (value >> 8) as u8;
    self.l = value as u8;
  }
}
