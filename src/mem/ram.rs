use crate::mem::{Error, Result, MMU};

/// A plain, zero-initialized block of memory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RAM {
  data: Vec<u8>,
}

impl RAM {
  /// Create a zeroed RAM of `size` bytes. The size never changes afterwards.
  pub fn new(size: usize) -> RAM {
    RAM {
      data: vec![0; size],
    }
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Index of `addr + offset`, if that byte exists.
  fn index(&self, addr: u16, offset: usize) -> Result<usize> {
    let idx = addr as usize + offset;
    if idx < self.data.len() {
      Ok(idx)
    } else {
      Err(Error::AddressOutOfRange(addr))
    }
  }
}

impl MMU for RAM {
  fn rb(&self, addr: u16) -> Result<u8> {
    let idx = self.index(addr, 0)?;
    Ok(self.data[idx])
  }

  fn rw(&self, addr: u16) -> Result<u16> {
    let lo = self.index(addr, 1)?;
    Ok((u16::from(self.data[lo - 1]) << 8) | u16::from(self.data[lo]))
  }

  fn wb(&mut self, addr: u16, value: u8) -> Result<()> {
    let idx = self.index(addr, 0)?;
    self.data[idx] = value;
    Ok(())
  }

  fn ww(&mut self, addr: u16, value: u16) -> Result<()> {
    let lo = self.index(addr, 1)?;
    self.data[lo - 1] = (value >> 8) as u8;
    self.data[lo] = (value & 0xff) as u8;
    Ok(())
  }
}
