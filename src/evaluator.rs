/*!
  Evaluates the tokens of one line to a single `Value`.

  Tokens are scanned left to right against a value stack. A parenthesised group is
  evaluated as a whole, either as one of the special forms or recursively:

  ```text
  (MEM)      the memory cell
  (v MEM)    set the memory cell to v (always a float), giving the new cell
  (n RES)    the committed result n lines back, 0 being the most recent
  (...)      any other group is an expression of its own
  ```

  In half precision mode, every float that enters the stack, literal or group result,
  is round-tripped through the half format first.
*/

#[cfg(feature = "trace_computation")]
use tracing::trace;

use crate::error::CompileError;
use crate::session::Session;
use crate::token::{Keyword, Token};
use crate::value::Value;

/// Evaluates one line and, if it succeeds, commits its result and memory cell to the
/// session. A failing line changes nothing.
pub fn evaluate_line(session: &mut Session, tokens: &[Token]) -> Result<Value, CompileError> {
  let mut evaluator = Evaluator::new(session);
  let result = evaluator.evaluate(tokens)?;
  let memory = evaluator.memory;

  session.commit(result, memory);
  Ok(result)
}

pub struct Evaluator<'s> {
  session : &'s Session,
  /// Working copy of the memory cell, committed only if the whole line succeeds.
  memory  : Value,
}

impl<'s> Evaluator<'s> {

  pub fn new(session: &'s Session) -> Self {
    Evaluator {
      session,
      memory: session.memory()
    }
  }

  pub fn evaluate(&mut self, tokens: &[Token]) -> Result<Value, CompileError> {
    let mut stack: Vec<Value> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
      let token = &tokens[i];
      match token {

        Token::Open => {
          let close = matching_close(tokens, i)?;
          let mut result = self.evaluate_group(&tokens[i + 1..close])?;
          if self.session.half_precision() {
            result = result.truncated_to_half();
          }
          stack.push(result);
          i = close + 1;
        }

        // Only reachable for a `)` with no `(`, which is skipped.
        Token::Close => {
          i += 1;
        }

        Token::Operator(operator) => {
          let available = stack.len();
          match (stack.pop(), stack.pop()) {
            (Some(b), Some(a)) => stack.push(operator.apply(a, b)),
            _ => {
              return Err(CompileError::InsufficientOperands { operator: *operator, available });
            }
          }
          i += 1;
        }

        literal => {
          let mut value = parse_number(literal)?;
          if self.session.half_precision() {
            value = value.truncated_to_half();
          }
          stack.push(value);
          i += 1;
        }

      } // end match on token

      #[cfg(feature = "trace_computation")]
      trace!("{:>8}  stack: {:?}", token.to_string(), stack);
    }

    match stack.as_slice() {
      [value] => Ok(*value),
      _       => Err(CompileError::InvalidExpressionShape { depth: stack.len() })
    }
  }

  fn evaluate_group(&mut self, group: &[Token]) -> Result<Value, CompileError> {
    match group {

      [Token::Keyword(Keyword::Mem)] => Ok(self.memory),

      [value, Token::Keyword(Keyword::Mem)] => {
        self.memory = Value::Float(parse_number(value)?.as_f32());
        Ok(self.memory)
      }

      [index, Token::Keyword(Keyword::Res)] => {
        let index = parse_history_index(index)?;
        self.session.lookup_result(index)
      }

      inner => self.evaluate(inner)

    }
  }
}

/// Finds the `)` closing the group opened at `open` by counting depth. The token at `open`
/// itself is taken to be the `(` and is not inspected.
pub fn matching_close(tokens: &[Token], open: usize) -> Result<usize, CompileError> {
  let mut depth: usize = 1;
  for (j, token) in tokens.iter().enumerate().skip(open + 1) {
    match token {
      Token::Open => depth += 1,
      Token::Close => {
        depth -= 1;
        if depth == 0 {
          return Ok(j);
        }
      }
      _ => {}
    }
  }
  Err(CompileError::UnbalancedParens)
}

/// Reads a numeric literal at full precision.
pub fn parse_number(token: &Token) -> Result<Value, CompileError> {
  let invalid = || CompileError::InvalidToken(token.to_string());
  match token {
    Token::Integer(text) => text.parse::<i64>().map(Value::Integer).map_err(|_| invalid()),
    Token::Float(text)   => text.parse::<f32>().map(Value::Float).map_err(|_| invalid()),
    _                    => Err(invalid())
  }
}

pub fn parse_history_index(token: &Token) -> Result<i64, CompileError> {
  match token {
    Token::Integer(text) => text.parse::<i64>()
                                .map_err(|_| CompileError::InvalidToken(token.to_string())),
    _                    => Err(CompileError::InvalidToken(token.to_string()))
  }
}
