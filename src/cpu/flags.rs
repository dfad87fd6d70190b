use std::fmt;
use std::ops::BitOr;

/// The F register. Only the high nibble carries state; the low nibble is
/// always clear.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Flags(u8);

impl Flags {
  pub const EMPTY: Flags = Flags(0);
  pub const CARRY: Flags = Flags(0x10);
  pub const HALF_CARRY: Flags = Flags(0x20);
  pub const ADD_SUB: Flags = Flags(0x40);
  pub const ZERO: Flags = Flags(0x80);

  /// Build flags from a raw F byte, dropping the low nibble.
  pub fn from_bits(bits: u8) -> Flags {
    Flags(bits & 0xf0)
  }

  pub fn bits(self) -> u8 {
    self.0
  }

  pub fn set(&mut self, flag: Flags) {
    self.0 |= flag.0;
  }

  pub fn clear(&mut self, flag: Flags) {
    self.0 &= !flag.0;
  }

  /// Set `flag` when `condition` holds, clear it otherwise.
  pub fn set_if(&mut self, condition: bool, flag: Flags) {
    if condition {
      self.set(flag)
    } else {
      self.clear(flag)
    }
  }

  pub fn is_set(self, flag: Flags) -> bool {
    self.0 & flag.0 != 0
  }

  pub fn is_clear(self, flag: Flags) -> bool {
    self.0 & flag.0 == 0
  }
}

impl BitOr for Flags {
  type Output = Flags;

  fn bitor(self, rhs: Flags) -> Flags {
    Flags(self.0 | rhs.0)
  }
}

impl fmt::Display for Flags {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let bit = |flag, c| if self.is_set(flag) { c } else { '-' };
    write!(
      f,
      "{}{}{}{}",
      bit(Flags::ZERO, 'Z'),
      bit(Flags::ADD_SUB, 'N'),
      bit(Flags::HALF_CARRY, 'H'),
      bit(Flags::CARRY, 'C'),
    )
  }
}
