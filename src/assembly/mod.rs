/*!

  The target is the 8-bit AVR core of the ATmega328P, written out as GNU `as` source
  (`.S`, run through the C preprocessor for `<avr/io.h>`). Only a handful of instructions
  are ever needed, because every result is a constant known at compile time:

    ldi  Rd, K        load an immediate byte into one of r16..r31
    sts  k, Rr        store a register to a data address
    out  A, Rr        write a register to an I/O port
    rjmp k            relative jump

  Values are moved through the scratch registers r16..r19, one byte per register, and
  stored to the result buffer from there.

  As with the rest of the listing, the opcode enum carries only the mnemonic; the operands
  live in the `Instruction` variants.

*/

mod instruction;
mod listing;

pub use instruction::{Expression, Immediate, Instruction, Operand};
pub use listing::{Line, Listing};

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display as StrumDisplay;

#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Operation {
  #[strum(serialize = "ldi")]
  Ldi,
  #[strum(serialize = "sts")]
  Sts,
  #[strum(serialize = "out")]
  Out,
  #[strum(serialize = "rjmp")]
  Rjmp,
}

/// The upper register file, the only registers `ldi` can load.
#[derive(TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum Register {
  R16 = 16,
  R17,
  R18,
  R19,
  R20,
  R21,
  R22,
  R23,
}

impl Register {
  pub fn number(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The scratch registers in load order: r16, r17, ...
  pub fn scratch() -> impl Iterator<Item = Register> {
    (Register::R16.number()..=Register::R23.number())
      .filter_map(|n| Register::try_from(n).ok())
  }
}

impl Display for Register {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "r{}", self.number())
  }
}

/// I/O registers named through `_SFR_IO_ADDR`.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum IoRegister {
  /// Stack pointer, high byte.
  SPH,
  /// Stack pointer, low byte.
  SPL,
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn registers() {
    assert_eq!(Register::R19.to_string(), "r19");
    assert_eq!(Register::try_from(17u8).ok(), Some(Register::R17));
    assert!(Register::try_from(24u8).is_err());
    let scratch: Vec<Register> = Register::scratch().take(4).collect();
    assert_eq!(scratch, vec![Register::R16, Register::R17, Register::R18, Register::R19]);
    assert_eq!(Register::scratch().count(), 8);
  }

  #[test]
  fn mnemonics() {
    assert_eq!(Operation::Ldi.to_string(), "ldi");
    assert_eq!(Operation::Rjmp.to_string(), "rjmp");
    assert_eq!(IoRegister::SPL.to_string(), "SPL");
  }
}
