use crate::cpu::{Error, Flags, Registers, State, CPU};
use crate::mem::{self, RAM, MMU};

fn init() -> (CPU, RAM) {
  let mut regs = Registers::new();
  // Start the PC in WRAM.
  regs.pc = 0xc000;
  regs.sp = 0xfffe;
  (CPU::with_registers(regs), RAM::new(0x10000))
}

/// Load `code` at the PC, execute one instruction, and check its timing and
/// length.
fn run(cpu: &mut CPU, mem: &mut RAM, code: &[u8], len: u16, time_expected: u32) {
  let start = cpu.regs.pc;
  for (i, byte) in code.iter().enumerate() {
    mem.wb(start + i as u16, *byte).unwrap();
  }
  let t = cpu.step(mem).unwrap();
  // Test time.
  assert_eq!(t, 4 * time_expected);
  // Test that the PC was incremented.
  assert_eq!(cpu.regs.pc, start + len);
  assert_eq!(cpu.state(), State::Fetching);
}

#[test]
fn nop() {
  let (mut cpu, mut mem) = init();
  run(&mut cpu, &mut mem, &[0x00], 1, 1);
  assert_eq!(cpu.cycles(), 1);
  assert_eq!(cpu.clocks(), 4);
}

#[test]
fn clock_accumulates() {
  let (mut cpu, mut mem) = init();
  run(&mut cpu, &mut mem, &[0x00], 1, 1);
  run(&mut cpu, &mut mem, &[0x06, 0x42], 2, 2);
  assert_eq!(cpu.cycles(), 3);
  assert_eq!(cpu.clocks(), 12);
}

#[test]
fn ld_r_n() {
  macro_rules! run_test {
    ($reg:ident, $opcode:expr) => {{
      let (mut cpu, mut mem) = init();
      let f = cpu.regs.f;
      run(&mut cpu, &mut mem, &[$opcode, 0x42], 2, 2);
      assert_eq!(cpu.regs.f, f);
      assert_eq!(cpu.regs.$reg, 0x42);
    }};
  }
  run_test!(b, 0x06);
  run_test!(c, 0x0e);
  run_test!(d, 0x16);
  run_test!(e, 0x1e);
  run_test!(h, 0x26);
  run_test!(l, 0x2e);
  run_test!(a, 0x3e);
}

#[test]
fn ld_rr_nn() {
  macro_rules! run_test {
    ($rr:ident, $opcode:expr) => {{
      let (mut cpu, mut mem) = init();
      run(&mut cpu, &mut mem, &[$opcode, 0x34, 0x12], 3, 3);
      assert_eq!(cpu.regs.$rr(), 0x1234);
    }};
  }
  run_test!(bc, 0x01);
  run_test!(de, 0x11);
  run_test!(hl, 0x21);

  let (mut cpu, mut mem) = init();
  run(&mut cpu, &mut mem, &[0x31, 0x00, 0xd0], 3, 3);
  assert_eq!(cpu.regs.sp, 0xd000);
}

#[test]
fn add_a_r() {
  macro_rules! run_test {
    ($reg:ident, $opcode:expr) => {{
      let (mut cpu, mut mem) = init();
      cpu.regs.a = 40;
      cpu.regs.$reg = 2;
      run(&mut cpu, &mut mem, &[$opcode], 1, 1);
      assert_eq!(cpu.regs.a, 42);
      assert_eq!(cpu.regs.f, Flags::EMPTY);
    }};
  }
  run_test!(b, 0x80);
  run_test!(c, 0x81);
  run_test!(d, 0x82);
  run_test!(e, 0x83);
  run_test!(h, 0x84);
  run_test!(l, 0x85);

  let (mut cpu, mut mem) = init();
  cpu.regs.a = 0x0a;
  run(&mut cpu, &mut mem, &[0x87], 1, 1);
  assert_eq!(cpu.regs.a, 0x14);
  assert!(cpu.regs.f.is_set(Flags::HALF_CARRY));
}

#[test]
fn add_a_hl() {
  let (mut cpu, mut mem) = init();
  cpu.regs.set_hl(0xd000);
  mem.wb(0xd000, 0x01).unwrap();
  cpu.regs.a = 0xff;
  run(&mut cpu, &mut mem, &[0x86], 1, 2);
  assert_eq!(cpu.regs.a, 0);
  assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn adc_a() {
  let (mut cpu, mut mem) = init();
  cpu.regs.a = 0x10;
  cpu.regs.b = 0x01;
  cpu.regs.f = Flags::CARRY;
  run(&mut cpu, &mut mem, &[0x88], 1, 1);
  assert_eq!(cpu.regs.a, 0x12);
  assert_eq!(cpu.regs.f, Flags::EMPTY);

  let (mut cpu, mut mem) = init();
  cpu.regs.a = 0x10;
  cpu.regs.f = Flags::CARRY;
  run(&mut cpu, &mut mem, &[0xce, 0x05], 2, 2);
  assert_eq!(cpu.regs.a, 0x16);
}

#[test]
fn add_a_n() {
  let (mut cpu, mut mem) = init();
  cpu.regs.a = 0xf0;
  cpu.regs.f = Flags::CARRY;
  run(&mut cpu, &mut mem, &[0xc6, 0x10], 2, 2);
  assert_eq!(cpu.regs.a, 0x00);
  assert_eq!(cpu.regs.f, Flags::ZERO | Flags::CARRY);
}

#[test]
fn and_a() {
  let (mut cpu, mut mem) = init();
  cpu.regs.a = 0b1010_1010;
  cpu.regs.c = 0b1111_0000;
  run(&mut cpu, &mut mem, &[0xa1], 1, 1);
  assert_eq!(cpu.regs.a, 0b1010_0000);
  assert_eq!(cpu.regs.f, Flags::HALF_CARRY);

  let (mut cpu, mut mem) = init();
  cpu.regs.a = 0x0f;
  run(&mut cpu, &mut mem, &[0xe6, 0xf0], 2, 2);
  assert_eq!(cpu.regs.a, 0);
  assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY);
}

#[test]
fn add_hl_rr() {
  let (mut cpu, mut mem) = init();
  cpu.regs.set_hl(0xffff);
  cpu.regs.set_de(0x0002);
  cpu.regs.f = Flags::ZERO;
  run(&mut cpu, &mut mem, &[0x19], 1, 2);
  assert_eq!(cpu.regs.hl(), 0x0001);
  assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

  let (mut cpu, mut mem) = init();
  cpu.regs.set_hl(0x0800);
  run(&mut cpu, &mut mem, &[0x29], 1, 2);
  assert_eq!(cpu.regs.hl(), 0x1000);
  assert_eq!(cpu.regs.f, Flags::HALF_CARRY);

  let (mut cpu, mut mem) = init();
  cpu.regs.set_hl(0x0001);
  run(&mut cpu, &mut mem, &[0x39], 1, 2);
  assert_eq!(cpu.regs.hl(), 0xffff);
}

#[test]
fn push_pop() {
  let (mut cpu, mut mem) = init();
  cpu.regs.set_bc(0xbeef);
  run(&mut cpu, &mut mem, &[0xc5], 1, 4);
  assert_eq!(cpu.regs.sp, 0xfffc);
  assert_eq!(mem.rw(0xfffc), Ok(0xbeef));

  run(&mut cpu, &mut mem, &[0xd1], 1, 3);
  assert_eq!(cpu.regs.de(), 0xbeef);
  assert_eq!(cpu.regs.sp, 0xfffe);
}

#[test]
fn pop_af_masks_flags() {
  let (mut cpu, mut mem) = init();
  cpu.regs.sp = 0xd000;
  mem.ww(0xd000, 0x12ff).unwrap();
  run(&mut cpu, &mut mem, &[0xf1], 1, 3);
  assert_eq!(cpu.regs.a, 0x12);
  assert_eq!(cpu.regs.f.bits(), 0xf0);
}

#[test]
fn jp() {
  let (mut cpu, mut mem) = init();
  mem.wb(0xc000, 0xc3).unwrap();
  mem.wb(0xc001, 0x50).unwrap();
  mem.wb(0xc002, 0x01).unwrap();
  assert_eq!(cpu.step(&mut mem), Ok(16));
  assert_eq!(cpu.regs.pc, 0x0150);
}

#[test]
fn call_ret() {
  let (mut cpu, mut mem) = init();
  mem.wb(0xc000, 0xcd).unwrap();
  mem.wb(0xc001, 0x00).unwrap();
  mem.wb(0xc002, 0xd0).unwrap();
  mem.wb(0xd000, 0xc9).unwrap();

  assert_eq!(cpu.step(&mut mem), Ok(24));
  assert_eq!(cpu.regs.pc, 0xd000);
  assert_eq!(cpu.regs.sp, 0xfffc);
  assert_eq!(mem.rw(0xfffc), Ok(0xc003));

  assert_eq!(cpu.step(&mut mem), Ok(16));
  assert_eq!(cpu.regs.pc, 0xc003);
  assert_eq!(cpu.regs.sp, 0xfffe);
}

#[test]
fn conditional_call() {
  let (mut cpu, mut mem) = init();
  cpu.regs.f = Flags::ZERO;
  // CALL NZ not taken.
  run(&mut cpu, &mut mem, &[0xc4, 0x00, 0xd0], 3, 3);
  assert_eq!(cpu.regs.sp, 0xfffe);

  // CALL Z taken.
  mem.wb(0xc003, 0xcc).unwrap();
  mem.wb(0xc004, 0x00).unwrap();
  mem.wb(0xc005, 0xd0).unwrap();
  assert_eq!(cpu.step(&mut mem), Ok(24));
  assert_eq!(cpu.regs.pc, 0xd000);

  let (mut cpu, mut mem) = init();
  cpu.regs.f = Flags::CARRY;
  run(&mut cpu, &mut mem, &[0xd4, 0x00, 0xd0], 3, 3);
  mem.wb(0xc003, 0xdc).unwrap();
  mem.wb(0xc004, 0x00).unwrap();
  mem.wb(0xc005, 0xd0).unwrap();
  assert_eq!(cpu.step(&mut mem), Ok(24));
  assert_eq!(cpu.regs.pc, 0xd000);
}

#[test]
fn conditional_ret() {
  let (mut cpu, mut mem) = init();
  mem.ww(0xfffc, 0x1234).unwrap();
  cpu.regs.sp = 0xfffc;

  // RET C not taken.
  run(&mut cpu, &mut mem, &[0xd8], 1, 2);
  assert_eq!(cpu.regs.sp, 0xfffc);

  // RET NC taken.
  mem.wb(0xc001, 0xd0).unwrap();
  assert_eq!(cpu.step(&mut mem), Ok(20));
  assert_eq!(cpu.regs.pc, 0x1234);
  assert_eq!(cpu.regs.sp, 0xfffe);
}

#[test]
fn bit_b_r() {
  macro_rules! bit_test {
    ($reg:ident, $opcode:expr, $value:expr, $zero:expr) => {{
      let (mut cpu, mut mem) = init();
      cpu.regs.$reg = $value;
      cpu.regs.f = Flags::CARRY;
      run(&mut cpu, &mut mem, &[0xcb, $opcode], 2, 2);
      assert_eq!(cpu.regs.f.is_set(Flags::ZERO), $zero);
      assert!(cpu.regs.f.is_set(Flags::CARRY));
    }};
  }
  bit_test!(b, 0x40, 0b0000_0001, false);
  bit_test!(c, 0x49, 0b0000_0001, true);
  bit_test!(d, 0x52, 0b0000_0100, false);
  bit_test!(e, 0x5b, 0b1111_0111, true);
  bit_test!(h, 0x64, 0b0001_0000, false);
  bit_test!(l, 0x6d, 0b0001_0000, true);
  bit_test!(a, 0x77, 0b1011_1111, true);
  bit_test!(a, 0x7f, 0b1000_0000, false);
}

#[test]
fn bit_b_hl() {
  let (mut cpu, mut mem) = init();
  cpu.regs.set_hl(0xd000);
  mem.wb(0xd000, 0b0100_0000).unwrap();
  run(&mut cpu, &mut mem, &[0xcb, 0x76], 2, 3);
  assert!(cpu.regs.f.is_clear(Flags::ZERO));
}

#[test]
fn halt() {
  let (mut cpu, mut mem) = init();
  mem.wb(0xc000, 0x76).unwrap();
  assert_eq!(cpu.step(&mut mem), Ok(4));
  assert!(cpu.is_halted());
  assert_eq!(cpu.regs.pc, 0xc001);

  // Halted CPUs stay put.
  assert_eq!(cpu.step(&mut mem), Ok(0));
  assert_eq!(cpu.regs.pc, 0xc001);
  assert_eq!(cpu.cycles(), 1);
}

#[test]
fn unknown_opcode_halts() {
  let (mut cpu, mut mem) = init();
  mem.wb(0xc000, 0xd3).unwrap();
  assert_eq!(cpu.step(&mut mem), Err(Error::UnknownOpcode(0xd3)));
  assert_eq!(cpu.state(), State::Halted);
  assert_eq!(cpu.cycles(), 0);

  let (mut cpu, mut mem) = init();
  mem.wb(0xc000, 0xcb).unwrap();
  mem.wb(0xc001, 0x00).unwrap();
  assert_eq!(cpu.step(&mut mem), Err(Error::UnknownCbOpcode(0x00)));
  assert!(cpu.is_halted());
}

#[test]
fn fetch_out_of_range_halts() {
  let mut cpu = CPU::new();
  let mut mem = RAM::new(0x10);
  cpu.regs.pc = 0x10;
  assert_eq!(
    cpu.step(&mut mem),
    Err(Error::Memory(mem::Error::AddressOutOfRange(0x10)))
  );
  assert!(cpu.is_halted());
  assert_eq!(cpu.regs.pc, 0x10);
}

#[test]
fn stack_overflow_halts() {
  let (mut cpu, mut mem) = init();
  cpu.regs.sp = 0x0002;
  mem.wb(0xc000, 0xc5).unwrap();
  assert_eq!(cpu.step(&mut mem), Err(Error::StackOverflow));
  assert!(cpu.is_halted());
  assert_eq!(cpu.regs.sp, 0x0002);
}

#[test]
fn call_overflow_keeps_pc_after_operands() {
  let (mut cpu, mut mem) = init();
  cpu.regs.sp = 0x0001;
  mem.wb(0xc000, 0xcd).unwrap();
  assert_eq!(cpu.step(&mut mem), Err(Error::StackOverflow));
  // Operands were consumed, but the jump never happened.
  assert_eq!(cpu.regs.pc, 0xc003);
}

#[test]
fn pop_underflow_halts() {
  let mut cpu = CPU::new();
  let mut mem = RAM::new(0x100);
  cpu.regs.sp = 0x00ff;
  mem.wb(0x0000, 0xc1).unwrap();
  assert_eq!(cpu.step(&mut mem), Err(Error::StackUnderflow));
  assert!(cpu.is_halted());
}
