//! The tagged scalar every expression evaluates to.

use std::fmt::{Display, Formatter};

use strum_macros::Display as StrumDisplay;

use crate::half::truncate_to_half;

/// The static type of a `Value`, as seen by the strict type checker.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum NumericType {
  #[strum(serialize = "int")]
  Integer,
  #[strum(serialize = "float")]
  Float,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Value {
  Integer(i64),
  Float(f32),
}

impl Value {
  /// The sentinel produced by undefined arithmetic instead of an error.
  pub const NAN: Value = Value::Float(f32::NAN);

  pub fn numeric_type(&self) -> NumericType {
    match self {
      Value::Integer(_) => NumericType::Integer,
      Value::Float(_)   => NumericType::Float,
    }
  }

  pub fn as_f32(&self) -> f32 {
    match self {
      Value::Integer(i) => *i as f32,
      Value::Float(f)   => *f,
    }
  }

  pub fn is_zero(&self) -> bool {
    match self {
      Value::Integer(i) => *i == 0,
      Value::Float(f)   => *f == 0.0,
    }
  }

  #[cfg(test)]
  pub fn is_nan(&self) -> bool {
    match self {
      Value::Float(f) => f.is_nan(),
      Value::Integer(_) => false,
    }
  }

  /// Floats are squeezed through the half format; integers pass through.
  pub fn truncated_to_half(self) -> Value {
    match self {
      Value::Float(f) => Value::Float(truncate_to_half(f)),
      integer => integer,
    }
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Value::Integer(i) => write!(f, "{}", i),

      Value::Float(x) if x.is_nan() => write!(f, "nan"),

      Value::Float(x) if x.is_infinite() => {
        match x.is_sign_negative() {
          true  => write!(f, "-inf"),
          false => write!(f, "inf"),
        }
      }

      // Whole floats keep a trailing `.0` so they read differently from integers.
      Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),

      Value::Float(x) => write!(f, "{}", x),

    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_distinguishes_integers_from_floats() {
    assert_eq!(Value::Integer(7).to_string(), "7");
    assert_eq!(Value::Float(7.0).to_string(), "7.0");
    assert_eq!(Value::Float(-0.5).to_string(), "-0.5");
    assert_eq!(Value::NAN.to_string(), "nan");
    assert_eq!(Value::Float(f32::NEG_INFINITY).to_string(), "-inf");
  }

  #[test]
  fn types_and_predicates() {
    assert_eq!(Value::Integer(0).numeric_type(), NumericType::Integer);
    assert_eq!(Value::Float(0.0).numeric_type(), NumericType::Float);
    assert!(Value::Float(-0.0).is_zero());
    assert!(Value::NAN.is_nan());
    assert!(!Value::Integer(3).is_nan());
    assert_eq!(NumericType::Float.to_string(), "float");
  }

  #[test]
  fn half_truncation_leaves_integers_alone() {
    assert_eq!(Value::Integer(70000).truncated_to_half(), Value::Integer(70000));
    assert_eq!(Value::Float(70000.0).truncated_to_half(), Value::Float(f32::INFINITY));
  }
}
