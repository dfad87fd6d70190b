//! Addressable memory.
//!
//! Everything the CPU touches goes through the `MMU` trait. Words are stored
//! big-endian: the high byte lives at `addr` and the low byte at `addr + 1`.

mod bus;
pub mod mbc;
mod ram;

pub use self::bus::Bus;
pub use self::ram::RAM;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum Error {
  #[error("address out of range: 0x{0:04x}")]
  AddressOutOfRange(u16),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bounds-checked byte and word access.
///
/// Implementations must fail rather than wrap or truncate when any byte of
/// the requested span is unmapped, and must never apply a partial write.
pub trait MMU {
  /// Read a byte at address `addr`.
  fn rb(&self, addr: u16) -> Result<u8>;

  /// Read a 2-byte big-endian word from `addr`.
  fn rw(&self, addr: u16) -> Result<u16>;

  /// Write `value` at address `addr`.
  fn wb(&mut self, addr: u16, value: u8) -> Result<()>;

  /// Write a 2-byte big-endian word to `addr`.
  fn ww(&mut self, addr: u16, value: u16) -> Result<()>;
}
