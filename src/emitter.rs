/*!
  Maps a typed line result to the instructions that store it in the result buffer.

  Line `i` owns the slot at byte offset `i * unit_size` of `RESULT`, where the unit size
  is 2 in half precision mode and 4 otherwise. The value's bytes are loaded into r16, r17, ...
  with `ldi` and then stored into the slot with `sts`:

  ```text
  int           16 bit two's complement     low byte, high byte
  float         IEEE-754 single precision   big-endian, four bytes
  float (half)  half bit pattern            lo8(bits), hi8(bits)
  ```
*/

use string_cache::DefaultAtom;

use crate::assembly::{Expression, Immediate, Instruction, Line, Operand, Register};
use crate::error::CompileError;
use crate::half::float_to_half;
use crate::session::{Session, RESULT_SYMBOL};
use crate::value::Value;

/// The byte offset of line `line_index`'s slot.
pub fn result_offset(line_index: usize, unit_size: usize) -> usize {
  line_index * unit_size
}

/// The immediates that materialise `value`, in load order.
pub fn encode(value: Value, half_precision: bool) -> Vec<Immediate> {
  match value {

    Value::Integer(i) => {
      let bits = i as u16;
      vec![Immediate::Byte((bits & 0xFF) as u8), Immediate::Byte((bits >> 8) as u8)]
    }

    Value::Float(f) if half_precision => {
      let bits = float_to_half(f);
      vec![
        Immediate::Lo8(Expression::Number(bits)),
        Immediate::Hi8(Expression::Number(bits))
      ]
    }

    Value::Float(f) => {
      f.to_be_bytes().iter().map(|byte| Immediate::Byte(*byte)).collect()
    }

  }
}

/// The fragment for a successfully evaluated line: a comment restating it, the loads, and
/// the stores into the line's slot.
pub fn emit(session: &Session, line_index: usize, source: &str, value: Value) -> Vec<Line> {
  let offset = result_offset(line_index, session.unit_size());
  let symbol = DefaultAtom::from(RESULT_SYMBOL);
  let immediates = encode(value, session.half_precision());

  let mut lines = vec![
    Line::Comment(format!("Line {}: {} = {}", line_index + 1, source, value))
  ];

  let registers: Vec<Register> = Register::scratch().take(immediates.len()).collect();

  lines.extend(
    registers.iter()
             .zip(immediates)
             .map(|(register, immediate)| Line::Instruction(Instruction::ldi(*register, immediate)))
  );
  lines.extend(
    registers.iter()
             .enumerate()
             .map(|(byte, register)| {
               let operand = Operand::Data { symbol: symbol.clone(), offset, byte };
               Line::Instruction(Instruction::sts(operand, *register))
             })
  );

  lines
}

/// The fragment for a failed line. It stores nothing.
pub fn emit_error(error: &CompileError) -> Vec<Line> {
  vec![Line::Comment(format!("ERROR: {}", error))]
}
