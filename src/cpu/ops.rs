//! Instruction semantics.
//!
//! Each primitive is a state transition over borrowed registers, flags and
//! memory. None of them log or keep state of their own, so any decode loop
//! can drive them.

use crate::cpu::flags::Flags;
use crate::cpu::{Error, Result};
use crate::mem::{self, MMU};

/// Push `value` onto the stack.
///
/// SP is decremented by two and the word stored at the new SP. Fails with
/// `StackOverflow` when `sp <= 2`; SP is left untouched on any failure.
pub fn push<M: MMU + ?Sized>(value: u16, sp: &mut u16, mem: &mut M) -> Result<()> {
  if *sp <= 2 {
    return Err(Error::StackOverflow);
  }
  let top = *sp - 2;
  mem.ww(top, value)?;
  *sp = top;
  Ok(())
}

/// Pop a word off the stack.
///
/// A read outside memory means there is nothing left to pop and is reported
/// as `StackUnderflow`; SP is left untouched in that case.
pub fn pop<M: MMU + ?Sized>(sp: &mut u16, mem: &M) -> Result<u16> {
  let value = mem.rw(*sp).map_err(|e| match e {
    mem::Error::AddressOutOfRange(_) => Error::StackUnderflow,
  })?;
  *sp = sp.wrapping_add(2);
  Ok(value)
}

/// `left += right`, optionally adding the carry flag in.
pub fn add8(left: &mut u8, right: u8, f: &mut Flags, with_carry: bool) {
  let mut right = right;
  if with_carry && f.is_set(Flags::CARRY) {
    right = right.wrapping_add(1);
  }

  let result = u16::from(*left) + u16::from(right);

  f.set_if(result > 0xff, Flags::CARRY);
  let result = (result & 0xff) as u8;

  f.clear(Flags::ADD_SUB);
  f.set_if(result == 0, Flags::ZERO);
  f.set_if((right & 0x0f) + (*left & 0x0f) > 0x0f, Flags::HALF_CARRY);

  *left = result;
}

/// `left += right` over a 16-bit register pair. The zero flag is left alone.
pub fn add16(left: &mut u16, right: u16, f: &mut Flags) {
  let result = u32::from(*left) + u32::from(right);

  f.set_if(result > 0xffff, Flags::CARRY);
  f.clear(Flags::ADD_SUB);
  f.set_if((right & 0x0fff) + (*left & 0x0fff) > 0x0fff, Flags::HALF_CARRY);

  *left = (result & 0xffff) as u16;
}

/// `left &= right`. Half-carry is always set by AND on this CPU.
pub fn and(left: &mut u8, right: u8, f: &mut Flags) {
  *left &= right;
  f.set_if(*left == 0, Flags::ZERO);
  f.clear(Flags::ADD_SUB);
  f.set(Flags::HALF_CARRY);
  f.clear(Flags::CARRY);
}

/// Test bit `b` of `value`: zero is set when the bit is clear.
pub fn bit(b: u8, value: u8, f: &mut Flags) {
  f.set_if(value & (1 << (b & 7)) == 0, Flags::ZERO);
}

/// Push the return address and jump to `addr`. PC is only changed once the
/// push has succeeded.
pub fn call<M: MMU + ?Sized>(
  addr: u16,
  pc: &mut u16,
  sp: &mut u16,
  mem: &mut M,
) -> Result<()> {
  push(*pc, sp, mem)?;
  *pc = addr;
  Ok(())
}

/// Pop the return address into PC.
pub fn ret<M: MMU + ?Sized>(pc: &mut u16, sp: &mut u16, mem: &M) -> Result<()> {
  *pc = pop(sp, mem)?;
  Ok(())
}
