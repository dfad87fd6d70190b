pub mod flags;
pub mod ops;
pub mod reg;

mod exec;

pub use self::flags::Flags;
pub use self::reg::Registers;

use crate::mem;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum Error {
  #[error("stack overflow")]
  StackOverflow,
  #[error("stack underflow")]
  StackUnderflow,
  #[error(transparent)]
  Memory(#[from] mem::Error),
  #[error("unknown opcode 0x{0:02x}")]
  UnknownOpcode(u8),
  #[error("unknown opcode 0xcb 0x{0:02x}")]
  UnknownCbOpcode(u8),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where the fetch/execute loop is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum State {
  Fetching,
  Executing,
  Halted,
}

/// A Sharp LR35902. Memory is borrowed per step, never owned.
#[derive(Debug)]
pub struct CPU {
  pub regs: Registers,
  state: State,

  /// Current clock.
  m: u64,
  t: u64,
}

#[cfg(test)]
mod optest;

impl CPU {
  pub fn new() -> CPU {
    CPU::with_registers(Registers::new())
  }

  pub fn with_registers(regs: Registers) -> CPU {
    CPU {
      regs,
      state: State::Fetching,
      m: 0,
      t: 0,
    }
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn is_halted(&self) -> bool {
    self.state == State::Halted
  }

  /// Elapsed machine cycles.
  pub fn cycles(&self) -> u64 {
    self.m
  }

  /// Elapsed clock states (four per machine cycle).
  pub fn clocks(&self) -> u64 {
    self.t
  }
}

impl Default for CPU {
  fn default() -> CPU {
    CPU::new()
  }
}
