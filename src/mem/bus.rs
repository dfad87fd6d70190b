use crate::mem::{Error, Result, RAM, MMU};

/// The full 16-bit address space: a cartridge behind its controller, and
/// plain RAM everywhere else. There are no peripherals, so VRAM, OAM and the
/// I/O registers are ordinary bytes.
pub struct Bus {
  cart: Box<dyn MMU>,
  ram: RAM,
}

impl Bus {
  pub fn new(cart: Box<dyn MMU>) -> Bus {
    Bus {
      cart,
      ram: RAM::new(0x10000),
    }
  }
}

fn is_cart(addr: u16) -> bool {
  match addr >> 12 {
    // ROM 0, ROM 1
    0x0..=0x7 => true,
    // ERAM
    0xa..=0xb => true,
    // VRAM, WRAM, echo, OAM, I/O, zero page
    _ => false,
  }
}

impl MMU for Bus {
  fn rb(&self, addr: u16) -> Result<u8> {
    if is_cart(addr) {
      self.cart.rb(addr)
    } else {
      self.ram.rb(addr)
    }
  }

  fn rw(&self, addr: u16) -> Result<u16> {
    let next = addr.checked_add(1).ok_or(Error::AddressOutOfRange(addr))?;
    if is_cart(addr) == is_cart(next) {
      return if is_cart(addr) {
        self.cart.rw(addr)
      } else {
        self.ram.rw(addr)
      };
    }
    let out = |_| Error::AddressOutOfRange(addr);
    let hi = self.rb(addr).map_err(out)?;
    let lo = self.rb(next).map_err(out)?;
    Ok((u16::from(hi) << 8) | u16::from(lo))
  }

  fn wb(&mut self, addr: u16, value: u8) -> Result<()> {
    if is_cart(addr) {
      self.cart.wb(addr, value)
    } else {
      self.ram.wb(addr, value)
    }
  }

  fn ww(&mut self, addr: u16, value: u16) -> Result<()> {
    let next = addr.checked_add(1).ok_or(Error::AddressOutOfRange(addr))?;
    if is_cart(addr) == is_cart(next) {
      return if is_cart(addr) {
        self.cart.ww(addr, value)
      } else {
        self.ram.ww(addr, value)
      };
    }
    // Straddling a boundary: the cartridge half goes first since it is the
    // only one that can fail, and RAM below 0x10000 always accepts a byte.
    let (hi, lo) = ((value >> 8) as u8, (value & 0xff) as u8);
    let out = |_| Error::AddressOutOfRange(addr);
    if is_cart(addr) {
      self.cart.wb(addr, hi).map_err(out)?;
      self.ram.wb(next, lo)
    } else {
      self.cart.wb(next, lo).map_err(out)?;
      self.ram.wb(addr, hi)
    }
  }
}
