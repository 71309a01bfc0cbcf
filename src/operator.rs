/*!
  Binary operators and their host-side arithmetic.

  Every result is computed ahead of time; the listing only ever materialises constants.
  The arithmetic here is permissive: undefined operations (`/ 0`, `% 0`,
  `| 0`, a negative or fractional exponent) yield `Value::NAN` rather than an error.
  The strict type rules live in `typecheck`.

  Integer arithmetic wraps at 64 bits. Only the low 16 bits of an integer ever reach the
  result buffer, and wrapping preserves those exactly.
*/

use std::convert::TryFrom;
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, EnumString};

use crate::value::{NumericType, Value};

#[derive(
StrumDisplay, EnumString,
Clone,        Copy,       Eq, PartialEq, Debug, Hash
)]
pub enum BinaryOperator {
  #[strum(serialize = "+")]
  Add,
  #[strum(serialize = "-")]
  Subtract,
  #[strum(serialize = "*")]
  Multiply,
  /// Floor division.
  #[strum(serialize = "/")]
  FloorDivide,
  /// Floor modulo; the remainder takes the divisor's sign.
  #[strum(serialize = "%")]
  Modulo,
  /// True division, always a float.
  #[strum(serialize = "|")]
  Divide,
  #[strum(serialize = "^")]
  Power,
}

impl BinaryOperator {

  /// Recognises an operator token. Anything else is an operand.
  pub fn from_symbol(text: &str) -> Option<BinaryOperator> {
    BinaryOperator::from_str(text).ok()
  }

  /// The type the permissive evaluator gives the result of `left op right`.
  pub fn result_type(&self, left: NumericType, right: NumericType) -> NumericType {
    match self {

      BinaryOperator::Divide => NumericType::Float,

      BinaryOperator::Power => left,

      _ => {
        match (left, right) {
          (NumericType::Integer, NumericType::Integer) => NumericType::Integer,
          _                                            => NumericType::Float,
        }
      }

    }
  }

  /// Applies the operator to `a op b`, where `a` is the left operand.
  pub fn apply(&self, a: Value, b: Value) -> Value {
    match self {

      BinaryOperator::Add      => arithmetic(a, b, i64::wrapping_add, |x, y| x + y),
      BinaryOperator::Subtract => arithmetic(a, b, i64::wrapping_sub, |x, y| x - y),
      BinaryOperator::Multiply => arithmetic(a, b, i64::wrapping_mul, |x, y| x * y),

      BinaryOperator::FloorDivide if b.is_zero() => Value::NAN,
      BinaryOperator::FloorDivide => arithmetic(a, b, floor_div, |x, y| (x / y).floor()),

      BinaryOperator::Modulo if b.is_zero() => Value::NAN,
      BinaryOperator::Modulo => arithmetic(a, b, floor_mod, floor_mod_f32),

      BinaryOperator::Divide if b.is_zero() => Value::NAN,
      BinaryOperator::Divide => Value::Float(a.as_f32() / b.as_f32()),

      BinaryOperator::Power => {
        match (a, b) {
          (Value::Integer(base), Value::Integer(exponent)) if exponent >= 0 => {
            Value::Integer(wrapping_power(base, exponent as u64))
          }
          (Value::Float(base), Value::Integer(exponent)) if exponent >= 0 => {
            match i32::try_from(exponent) {
              Ok(n)  => Value::Float(base.powi(n)),
              Err(_) => Value::Float(base.powf(exponent as f32)),
            }
          }
          _ => Value::NAN
        }
      }

    }
  }
}

/// Integer operands stay integers, anything else is promoted to float.
fn arithmetic(
  a: Value,
  b: Value,
  integer_op: fn(i64, i64) -> i64,
  float_op: fn(f32, f32) -> f32
) -> Value
{
  match (a, b) {
    (Value::Integer(x), Value::Integer(y)) => Value::Integer(integer_op(x, y)),
    _                                      => Value::Float(float_op(a.as_f32(), b.as_f32())),
  }
}

// Callers guarantee `y != 0`.
fn floor_div(x: i64, y: i64) -> i64 {
  let quotient = x.wrapping_div(y);
  if x.wrapping_rem(y) != 0 && ((x < 0) != (y < 0)) {
    quotient - 1
  } else {
    quotient
  }
}

fn floor_mod(x: i64, y: i64) -> i64 {
  let remainder = x.wrapping_rem(y);
  if remainder != 0 && ((remainder < 0) != (y < 0)) {
    remainder + y
  } else {
    remainder
  }
}

fn floor_mod_f32(x: f32, y: f32) -> f32 {
  let remainder = x % y;
  if remainder != 0.0 && ((remainder < 0.0) != (y < 0.0)) {
    remainder + y
  } else {
    remainder
  }
}

fn wrapping_power(mut base: i64, mut exponent: u64) -> i64 {
  let mut result: i64 = 1;
  while exponent > 0 {
    if exponent & 1 == 1 {
      result = result.wrapping_mul(base);
    }
    base = base.wrapping_mul(base);
    exponent >>= 1;
  }
  result
}
