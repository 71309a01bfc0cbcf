//! Line-local compilation errors. None of them abort a run: a failing line is reported
//! and replaced by an error comment in the listing.

use std::fmt::{Display, Formatter};

use crate::operator::BinaryOperator;
use crate::value::NumericType;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CompileError {
  /// An `(` without its matching `)`.
  UnbalancedParens,
  InsufficientOperands {
    operator  : BinaryOperator,
    available : usize
  },
  /// A token that is neither an operator, a paren, nor a number where one is required.
  InvalidToken(String),
  /// The stack did not hold exactly one value once the tokens ran out.
  InvalidExpressionShape {
    depth: usize
  },
  HistoryIndexOutOfRange {
    index     : i64,
    available : usize
  },
  /// Only reported by the strict type checker.
  StrictTypeViolation {
    operator : BinaryOperator,
    left     : NumericType,
    right    : NumericType
  },
}

impl Display for CompileError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      CompileError::UnbalancedParens => {
        write!(f, "Unbalanced parentheses")
      }

      CompileError::InsufficientOperands { operator, available } => {
        write!(f, "Operator {} needs 2 operands but {} available", operator, available)
      }

      CompileError::InvalidToken(token) => {
        write!(f, "Invalid token: {}", token)
      }

      CompileError::InvalidExpressionShape { depth } => {
        write!(f, "Invalid expression: {} values left on the stack", depth)
      }

      CompileError::HistoryIndexOutOfRange { index, available } => {
        write!(f, "No result {} steps back ({} available)", index, available)
      }

      CompileError::StrictTypeViolation { operator: BinaryOperator::Power, right, .. } => {
        write!(f, "The exponent must be int, found {}", right)
      }

      CompileError::StrictTypeViolation { operator, left, right } => {
        write!(f, "Operator {} requires int operands, found {} and {}", operator, left, right)
      }

    }
  }
}

impl std::error::Error for CompileError {}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages() {
    assert_eq!(
      CompileError::HistoryIndexOutOfRange { index: 3, available: 3 }.to_string(),
      "No result 3 steps back (3 available)"
    );
    assert_eq!(
      CompileError::StrictTypeViolation {
        operator: BinaryOperator::Modulo,
        left: NumericType::Float,
        right: NumericType::Integer
      }.to_string(),
      "Operator % requires int operands, found float and int"
    );
    assert_eq!(
      CompileError::StrictTypeViolation {
        operator: BinaryOperator::Power,
        left: NumericType::Integer,
        right: NumericType::Float
      }.to_string(),
      "The exponent must be int, found float"
    );
  }
}
