use crate::cpu::flags::Flags;
use crate::cpu::{ops, Error, Result, State, CPU};
use crate::mem::MMU;

impl CPU {
  /// Run one instruction.
  /// Increment m and t to account for the time taken by the clock.
  /// Return t, the time taken for this instruction.
  ///
  /// A halted CPU does nothing and takes no time. Any failure halts the CPU
  /// and is handed back to the caller.
  pub fn step<M: MMU + ?Sized>(&mut self, mem: &mut M) -> Result<u32> {
    if self.state == State::Halted {
      return Ok(0);
    }

    self.state = State::Fetching;
    let pc = self.regs.pc;
    let op = match self.bump(mem) {
      Ok(op) => op,
      Err(e) => {
        debug!("fetch failed at 0x{:04x}: {}", pc, e);
        self.state = State::Halted;
        return Err(e);
      }
    };

    trace!(
      "0x{:04x}: 0x{:02x} a=0x{:02x} f={} bc=0x{:04x} de=0x{:04x} \
       hl=0x{:04x} sp=0x{:04x}",
      pc,
      op,
      self.regs.a,
      self.regs.f,
      self.regs.bc(),
      self.regs.de(),
      self.regs.hl(),
      self.regs.sp,
    );

    self.state = State::Executing;
    match self.exec(op, mem) {
      Ok(m) => {
        if self.state == State::Executing {
          self.state = State::Fetching;
        }
        self.m += u64::from(m);
        self.t += u64::from(4 * m);
        Ok(4 * m)
      }
      Err(e) => {
        debug!("halting after 0x{:02x} at 0x{:04x}: {}", op, pc, e);
        self.state = State::Halted;
        Err(e)
      }
    }
  }

  /// Return the next byte at the program counter,
  /// and increment the program counter.
  fn bump<M: MMU + ?Sized>(&mut self, mem: &M) -> Result<u8> {
    let result = mem.rb(self.regs.pc)?;
    self.regs.pc = self.regs.pc.wrapping_add(1);
    Ok(result)
  }

  /// Operand `r` of the usual B, C, D, E, H, L, (HL), A encoding.
  fn reg8<M: MMU + ?Sized>(&self, r: u8, mem: &M) -> Result<u8> {
    Ok(match r & 0x7 {
      0 => self.regs.b,
      1 => self.regs.c,
      2 => self.regs.d,
      3 => self.regs.e,
      4 => self.regs.h,
      5 => self.regs.l,
      6 => mem.rb(self.regs.hl())?,
      _ => self.regs.a,
    })
  }

  /// Execute `op`, whose byte has already been consumed.
  /// Return the m-time taken to run that opcode.
  fn exec<M: MMU + ?Sized>(&mut self, op: u8, mem: &mut M) -> Result<u32> {
    macro_rules! bump {
      () => {{
        self.bump(mem)?
      }};
    }
    macro_rules! read_u16_le {
      () => {{
        let a = bump!();
        let b = bump!();
        u16::from(a) | (u16::from(b) << 8)
      }};
    }

    macro_rules! ld_r_n {
      ($reg:ident) => {{
        self.regs.$reg = bump!();
        2
      }};
    }
    macro_rules! ld_rr_nn {
      ($set:ident) => {{
        let nn = read_u16_le!();
        self.regs.$set(nn);
        3
      }};
    }

    macro_rules! push {
      ($rr:ident) => {{
        let value = self.regs.$rr();
        ops::push(value, &mut self.regs.sp, mem)?;
        4
      }};
    }
    macro_rules! pop {
      ($set:ident) => {{
        let value = ops::pop(&mut self.regs.sp, mem)?;
        self.regs.$set(value);
        3
      }};
    }

    macro_rules! add_a {
      ($n:expr, $carry:expr, $m:expr) => {{
        let n = $n;
        ops::add8(&mut self.regs.a, n, &mut self.regs.f, $carry);
        $m
      }};
    }
    macro_rules! and_a {
      ($n:expr, $m:expr) => {{
        let n = $n;
        ops::and(&mut self.regs.a, n, &mut self.regs.f);
        $m
      }};
    }
    macro_rules! add_hl {
      ($n:expr) => {{
        let n = $n;
        let mut hl = self.regs.hl();
        ops::add16(&mut hl, n, &mut self.regs.f);
        self.regs.set_hl(hl);
        2
      }};
    }

    macro_rules! call {
      () => {{
        let target = read_u16_le!();
        ops::call(target, &mut self.regs.pc, &mut self.regs.sp, mem)?;
        6
      }};
    }
    macro_rules! callc {
      ($e:expr) => {{
        if $e {
          call!()
        } else {
          self.regs.pc = self.regs.pc.wrapping_add(2);
          3
        }
      }};
    }
    macro_rules! ret {
      () => {{
        ops::ret(&mut self.regs.pc, &mut self.regs.sp, mem)?;
        4
      }};
    }
    macro_rules! retc {
      ($e:expr) => {{
        if $e {
          let m: u32 = ret!();
          m + 1
        } else {
          2
        }
      }};
    }

    let f = self.regs.f;
    let z = f.is_set(Flags::ZERO);
    let c = f.is_set(Flags::CARRY);

    Ok(match op {
      0x00 => 1, // nop

      0x01 => ld_rr_nn!(set_bc),
      0x11 => ld_rr_nn!(set_de),
      0x21 => ld_rr_nn!(set_hl),
      0x31 => {
        self.regs.sp = read_u16_le!();
        3
      }

      0x06 => ld_r_n!(b),
      0x0e => ld_r_n!(c),
      0x16 => ld_r_n!(d),
      0x1e => ld_r_n!(e),
      0x26 => ld_r_n!(h),
      0x2e => ld_r_n!(l),
      0x3e => ld_r_n!(a),

      0x09 => add_hl!(self.regs.bc()),
      0x19 => add_hl!(self.regs.de()),
      0x29 => add_hl!(self.regs.hl()),
      0x39 => add_hl!(self.regs.sp),

      0x76 => {
        self.state = State::Halted;
        1
      }

      0x80..=0x87 => add_a!(self.reg8(op, mem)?, false, alu_time(op)),
      0x88..=0x8f => add_a!(self.reg8(op, mem)?, true, alu_time(op)),
      0xa0..=0xa7 => and_a!(self.reg8(op, mem)?, alu_time(op)),
      0xc6 => add_a!(bump!(), false, 2),
      0xce => add_a!(bump!(), true, 2),
      0xe6 => and_a!(bump!(), 2),

      0xc1 => pop!(set_bc),
      0xd1 => pop!(set_de),
      0xe1 => pop!(set_hl),
      0xf1 => pop!(set_af),
      0xc5 => push!(bc),
      0xd5 => push!(de),
      0xe5 => push!(hl),
      0xf5 => push!(af),

      0xc3 => {
        self.regs.pc = read_u16_le!();
        4
      }

      0xc0 => retc!(!z),
      0xc8 => retc!(z),
      0xd0 => retc!(!c),
      0xd8 => retc!(c),
      0xc9 => ret!(),

      0xc4 => callc!(!z),
      0xcc => callc!(z),
      0xd4 => callc!(!c),
      0xdc => callc!(c),
      0xcd => call!(),

      0xcb => {
        let cb = bump!();
        self.exec_cb(cb, mem)?
      }

      _ => return Err(Error::UnknownOpcode(op)),
    })
  }

  fn exec_cb<M: MMU + ?Sized>(&mut self, op: u8, mem: &M) -> Result<u32> {
    match op {
      0x40..=0x7f => {
        let value = self.reg8(op, mem)?;
        ops::bit((op >> 3) & 0x7, value, &mut self.regs.f);
        Ok(if op & 0x7 == 6 { 3 } else { 2 })
      }
      _ => Err(Error::UnknownCbOpcode(op)),
    }
  }
}

/// Register operands take one m-cycle, (HL) takes two.
fn alu_time(op: u8) -> u32 {
  if op & 0x7 == 6 {
    2
  } else {
    1
  }
}
