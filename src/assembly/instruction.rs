use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;

use super::{IoRegister, Operation, Register};

/// A 16 bit assembler expression: a literal or a symbol the assembler resolves.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Expression {
  Number(u16),
  Symbol(DefaultAtom),
}

impl Display for Expression {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Expression::Number(n)    => write!(f, "{}", n),
      Expression::Symbol(name) => write!(f, "{}", name),
    }
  }
}

/// The `K` operand of `ldi`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Immediate {
  Byte(u8),
  /// The low byte of an expression, `lo8(e)`.
  Lo8(Expression),
  /// The high byte of an expression, `hi8(e)`.
  Hi8(Expression),
}

impl Immediate {
  /// The byte this immediate loads, if it is known without the assembler's symbols.
  pub fn resolve(&self) -> Option<u8> {
    match self {
      Immediate::Byte(byte)                   => Some(*byte),
      Immediate::Lo8(Expression::Number(n))   => Some((n & 0xFF) as u8),
      Immediate::Hi8(Expression::Number(n))   => Some((n >> 8) as u8),
      _                                       => None,
    }
  }
}

impl Display for Immediate {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Immediate::Byte(byte)       => write!(f, "{}", byte),
      Immediate::Lo8(expression)  => write!(f, "lo8({})", expression),
      Immediate::Hi8(expression)  => write!(f, "hi8({})", expression),
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Operand {
  /// `symbol+offset[+byte]`, a byte within a data buffer.
  Data {
    symbol : DefaultAtom,
    offset : usize,
    byte   : usize
  },
  /// An I/O register, addressed in I/O space.
  Io(IoRegister),
  Label(DefaultAtom),
}

impl Display for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operand::Data { symbol, offset, byte: 0 } => write!(f, "{}+{}", symbol, offset),
      Operand::Data { symbol, offset, byte }    => write!(f, "{}+{}+{}", symbol, offset, byte),
      Operand::Io(port)                         => write!(f, "_SFR_IO_ADDR({})", port),
      Operand::Label(name)                      => write!(f, "{}", name),
    }
  }
}

/// Holds the unencoded components of an instruction. As such, it enumerates the possible
/// instruction argument combinations.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// `ldi Rd, K`
  RegisterImmediate {
    opcode    : Operation,
    register  : Register,
    immediate : Immediate
  },
  /// `sts k, Rr` and `out A, Rr`
  OperandRegister {
    opcode   : Operation,
    operand  : Operand,
    register : Register
  },
  /// `rjmp k`
  Unary {
    opcode  : Operation,
    operand : Operand
  },
}

impl Instruction {

  pub fn ldi(register: Register, immediate: Immediate) -> Instruction {
    Instruction::RegisterImmediate { opcode: Operation::Ldi, register, immediate }
  }

  pub fn sts(operand: Operand, register: Register) -> Instruction {
    Instruction::OperandRegister { opcode: Operation::Sts, operand, register }
  }

  pub fn out(port: IoRegister, register: Register) -> Instruction {
    Instruction::OperandRegister { opcode: Operation::Out, operand: Operand::Io(port), register }
  }

  pub fn rjmp(label: DefaultAtom) -> Instruction {
    Instruction::Unary { opcode: Operation::Rjmp, operand: Operand::Label(label) }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::RegisterImmediate { opcode, register, immediate } => {
        write!(f, "{} {}, {}", opcode, register, immediate)
      }

      Instruction::OperandRegister { opcode, operand, register } => {
        write!(f, "{} {}, {}", opcode, operand, register)
      }

      Instruction::Unary { opcode, operand } => {
        write!(f, "{} {}", opcode, operand)
      }

    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_instructions() {
    assert_eq!(
      Instruction::ldi(Register::R16, Immediate::Byte(7)).to_string(),
      "ldi r16, 7"
    );
    assert_eq!(
      Instruction::ldi(Register::R17, Immediate::Hi8(Expression::Number(0x3C00))).to_string(),
      "ldi r17, hi8(15360)"
    );
    assert_eq!(
      Instruction::sts(
        Operand::Data { symbol: DefaultAtom::from("RESULT"), offset: 8, byte: 0 },
        Register::R16
      ).to_string(),
      "sts RESULT+8, r16"
    );
    assert_eq!(
      Instruction::sts(
        Operand::Data { symbol: DefaultAtom::from("RESULT"), offset: 8, byte: 3 },
        Register::R19
      ).to_string(),
      "sts RESULT+8+3, r19"
    );
    assert_eq!(
      Instruction::out(IoRegister::SPH, Register::R16).to_string(),
      "out _SFR_IO_ADDR(SPH), r16"
    );
    assert_eq!(Instruction::rjmp(DefaultAtom::from("label_1")).to_string(), "rjmp label_1");
  }

  #[test]
  fn resolves_known_bytes() {
    assert_eq!(Immediate::Lo8(Expression::Number(0x3E01)).resolve(), Some(0x01));
    assert_eq!(Immediate::Hi8(Expression::Number(0x3E01)).resolve(), Some(0x3E));
    assert_eq!(Immediate::Hi8(Expression::Symbol(DefaultAtom::from("RAMEND"))).resolve(), None);
  }
}
