//! Cartridge memory bank controllers.
//!
//! Controllers map the cartridge windows of the address space:
//! `0x0000-0x7fff` for ROM and `0xa000-0xbfff` for external RAM. Writes into
//! the ROM window never touch the ROM; they program the controller instead.

mod mbc0;
mod mbc1;

pub use self::mbc0::MBC0;
pub use self::mbc1::MBC1;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;

/// Implement `MMU` for a controller in terms of two inherent methods:
///
/// * `fn read(&self, addr: u16) -> Option<u8>`, `None` when unmapped.
/// * `fn mapped_for_write(&self, addr: u16) -> bool` and
///   `fn write(&mut self, addr: u16, value: u8)`.
///
/// Word accesses check both bytes before touching anything.
macro_rules! impl_mmu {
  ($mbc:ty) => {
    impl crate::mem::MMU for $mbc {
      fn rb(&self, addr: u16) -> crate::mem::Result<u8> {
        self.read(addr).ok_or(crate::mem::Error::AddressOutOfRange(addr))
      }

      fn rw(&self, addr: u16) -> crate::mem::Result<u16> {
        let out = crate::mem::Error::AddressOutOfRange(addr);
        let next = addr.checked_add(1).ok_or(out)?;
        let hi = self.read(addr).ok_or(out)?;
        let lo = self.read(next).ok_or(out)?;
        Ok((u16::from(hi) << 8) | u16::from(lo))
      }

      fn wb(&mut self, addr: u16, value: u8) -> crate::mem::Result<()> {
        if !self.mapped_for_write(addr) {
          return Err(crate::mem::Error::AddressOutOfRange(addr));
        }
        self.write(addr, value);
        Ok(())
      }

      fn ww(&mut self, addr: u16, value: u16) -> crate::mem::Result<()> {
        let out = crate::mem::Error::AddressOutOfRange(addr);
        let next = addr.checked_add(1).ok_or(out)?;
        if !self.mapped_for_write(addr) || !self.mapped_for_write(next) {
          return Err(out);
        }
        self.write(addr, (value >> 8) as u8);
        self.write(next, (value & 0xff) as u8);
        Ok(())
      }
    }
  };
}

pub(crate) use impl_mmu;
