//! Game Boy CPU core: registers and flags, instruction semantics over a
//! bounds-checked memory capability, and cartridge header parsing.

#[macro_use]
extern crate log;

pub mod cart;
pub mod cpu;
pub mod mem;
