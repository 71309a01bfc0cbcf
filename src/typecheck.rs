/*!
  The strict type checker, an optional validation pass independent of evaluation.

  The evaluator computes a result for any operand types. The checker additionally demands
  that `/` and `%` have int operands on both sides and that the exponent of `^` is an int.
  It walks the same token structure as the evaluator, but over `NumericType`s, and
  reports every violation it finds rather than stopping at the first.
*/

use crate::error::CompileError;
use crate::evaluator::{matching_close, parse_history_index, parse_number};
use crate::operator::BinaryOperator;
use crate::session::Session;
use crate::token::{Keyword, Token};
use crate::value::NumericType;

/// The strict result type of `left op right`.
pub fn verify_type(operator: BinaryOperator, left: NumericType, right: NumericType)
  -> Result<NumericType, CompileError>
{
  let violation = CompileError::StrictTypeViolation { operator, left, right };

  match operator {

    BinaryOperator::FloorDivide | BinaryOperator::Modulo => {
      match (left, right) {
        (NumericType::Integer, NumericType::Integer) => Ok(NumericType::Integer),
        _ => Err(violation)
      }
    }

    BinaryOperator::Divide => Ok(NumericType::Float),

    BinaryOperator::Power => {
      match right {
        NumericType::Integer => Ok(left),
        NumericType::Float   => Err(violation)
      }
    }

    _ => Ok(operator.result_type(left, right))

  }
}

/// The type of a numeric literal, failing if the text is not a number.
pub fn determine_type(token: &Token) -> Result<NumericType, CompileError> {
  parse_number(token).map(|value| value.numeric_type())
}

/**
  Type checks one line against the committed state of `session` and returns every
  diagnostic found. An empty list means the line is well typed.

  Strict violations are recorded and checking continues with the type the evaluator
  would produce. Structural errors (bad tokens, unbalanced parens, a bad stack shape)
  end the check.
*/
pub fn check_types(session: &Session, tokens: &[Token]) -> Vec<CompileError> {
  let mut checker = TypeChecker {
    session,
    diagnostics: Vec::new()
  };

  if let Err(error) = checker.check(tokens) {
    checker.diagnostics.push(error);
  }
  checker.diagnostics
}

struct TypeChecker<'s> {
  session     : &'s Session,
  diagnostics : Vec<CompileError>,
}

impl<'s> TypeChecker<'s> {

  fn check(&mut self, tokens: &[Token]) -> Result<NumericType, CompileError> {
    let mut stack: Vec<NumericType> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
      match &tokens[i] {

        Token::Open => {
          let close = matching_close(tokens, i)?;
          stack.push(self.check_group(&tokens[i + 1..close])?);
          i = close + 1;
        }

        Token::Close => {
          i += 1;
        }

        Token::Operator(operator) => {
          let available = stack.len();
          match (stack.pop(), stack.pop()) {

            (Some(right), Some(left)) => {
              let result = match verify_type(*operator, left, right) {
                Ok(result) => result,
                Err(violation) => {
                  self.diagnostics.push(violation);
                  operator.result_type(left, right)
                }
              };
              stack.push(result);
            }

            _ => {
              return Err(CompileError::InsufficientOperands { operator: *operator, available });
            }

          }
          i += 1;
        }

        literal => {
          stack.push(determine_type(literal)?);
          i += 1;
        }

      }
    }

    match stack.as_slice() {
      [result] => Ok(*result),
      _        => Err(CompileError::InvalidExpressionShape { depth: stack.len() })
    }
  }

  fn check_group(&mut self, group: &[Token]) -> Result<NumericType, CompileError> {
    match group {

      // The memory cell always holds a float.
      [Token::Keyword(Keyword::Mem)] => Ok(NumericType::Float),

      [value, Token::Keyword(Keyword::Mem)] => {
        determine_type(value)?;
        Ok(NumericType::Float)
      }

      [index, Token::Keyword(Keyword::Res)] => {
        let index = parse_history_index(index)?;
        Ok(self.session.lookup_result(index)?.numeric_type())
      }

      inner => self.check(inner)

    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::evaluator::evaluate_line;
  use crate::parser::parse;

  fn check(line: &str) -> Vec<CompileError> {
    check_types(&Session::new(false), &parse(line))
  }

  #[test]
  fn strict_rules() {
    use BinaryOperator::*;
    use NumericType::*;

    assert_eq!(verify_type(FloorDivide, Integer, Integer), Ok(Integer));
    assert!(verify_type(FloorDivide, Float, Integer).is_err());
    assert!(verify_type(Modulo, Integer, Float).is_err());
    assert_eq!(verify_type(Divide, Integer, Integer), Ok(Float));
    assert_eq!(verify_type(Power, Float, Integer), Ok(Float));
    assert!(verify_type(Power, Integer, Float).is_err());
    assert_eq!(verify_type(Add, Integer, Float), Ok(Float));
    assert_eq!(verify_type(Multiply, Integer, Integer), Ok(Integer));
  }

  #[test]
  fn literal_types() {
    assert_eq!(determine_type(&Token::from_word("12")), Ok(NumericType::Integer));
    assert_eq!(determine_type(&Token::from_word("1e2")), Ok(NumericType::Float));
    assert!(determine_type(&Token::from_word("1.2.3")).is_err());
  }

  #[test]
  fn well_typed_lines_have_no_diagnostics() {
    assert!(check("3 4 +").is_empty());
    assert!(check("7 2 / 3 %").is_empty());
    assert!(check("1.5 2 ^").is_empty());
    assert!(check("(MEM) 2 |").is_empty());
  }

  #[test]
  fn reports_every_violation() {
    let diagnostics = check("7.0 2 / 2 1.0 ^ +");
    assert_eq!(
      diagnostics,
      vec![
        CompileError::StrictTypeViolation {
          operator: BinaryOperator::FloorDivide,
          left: NumericType::Float,
          right: NumericType::Integer
        },
        CompileError::StrictTypeViolation {
          operator: BinaryOperator::Power,
          left: NumericType::Integer,
          right: NumericType::Float
        }
      ]
    );
  }

  #[test]
  fn memory_is_float_typed() {
    assert_eq!(check("(MEM) 2 %").len(), 1);
    assert_eq!(check("(3 MEM) 2 /").len(), 1);
  }

  #[test]
  fn history_types_come_from_committed_results() {
    let mut session = Session::new(false);
    evaluate_line(&mut session, &parse("2.5")).unwrap();
    evaluate_line(&mut session, &parse("4")).unwrap();
    assert!(check_types(&session, &parse("(0 RES) 2 %")).is_empty());
    assert_eq!(check_types(&session, &parse("(1 RES) 2 %")).len(), 1);
    assert_eq!(
      check_types(&session, &parse("(9 RES) 2 %")),
      vec![CompileError::HistoryIndexOutOfRange { index: 9, available: 2 }]
    );
  }

  #[test]
  fn structural_errors_end_the_check() {
    assert_eq!(check("3 (4"), vec![CompileError::UnbalancedParens]);
    assert_eq!(check("1.0 2 % 3"), vec![
      CompileError::StrictTypeViolation {
        operator: BinaryOperator::Modulo,
        left: NumericType::Float,
        right: NumericType::Integer
      },
      CompileError::InvalidExpressionShape { depth: 2 }
    ]);
  }

  #[test]
  fn checking_does_not_mutate_the_session() {
    let session = Session::new(false);
    check_types(&session, &parse("(8 MEM)"));
    assert_eq!(session.memory(), crate::value::Value::Float(0.0));
  }
}
