/*!
  Tokens of one expression line.

  Numeric literals keep their source text. Whether the text is actually a number is
  decided by the evaluator, so the parser never fails; it only decides whether a literal
  *looks* like a float (it has a `.` or an exponent marker) or an integer.
*/

use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::operator::BinaryOperator;

/// The two special-form keywords.
#[derive(StrumDisplay, EnumString, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Keyword {
  /// The memory cell: `(MEM)` reads it, `(v MEM)` writes it.
  #[strum(serialize = "MEM")]
  Mem,
  /// The result history: `(n RES)` is the result `n` lines back.
  #[strum(serialize = "RES")]
  Res,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Token {
  Integer(DefaultAtom),
  Float(DefaultAtom),
  Operator(BinaryOperator),
  Open,
  Close,
  Keyword(Keyword),
}

impl Token {

  /// Classifies a run of non-space, non-paren characters.
  pub fn from_word(word: &str) -> Token {
    if let Some(operator) = BinaryOperator::from_symbol(word) {
      return Token::Operator(operator);
    }
    if let Ok(keyword) = word.parse::<Keyword>() {
      return Token::Keyword(keyword);
    }
    match word.contains(|c: char| c == '.' || c == 'e' || c == 'E') {
      true  => Token::Float(DefaultAtom::from(word)),
      false => Token::Integer(DefaultAtom::from(word)),
    }
  }

  pub fn is_paren(&self) -> bool {
    match self {
      Token::Open | Token::Close => true,
      _ => false
    }
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      | Token::Integer(text)
      | Token::Float(text)     => write!(f, "{}", text),
      Token::Operator(operator) => write!(f, "{}", operator),
      Token::Open               => write!(f, "("),
      Token::Close              => write!(f, ")"),
      Token::Keyword(keyword)   => write!(f, "{}", keyword),
    }
  }
}

/// Space-separated rendering of a token sequence.
pub fn tokens_to_string(tokens: &[Token]) -> String {
  tokens.iter()
        .map(Token::to_string)
        .collect::<Vec<String>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_words() {
    assert_eq!(Token::from_word("+"), Token::Operator(BinaryOperator::Add));
    assert_eq!(Token::from_word("MEM"), Token::Keyword(Keyword::Mem));
    assert_eq!(Token::from_word("RES"), Token::Keyword(Keyword::Res));
    assert_eq!(Token::from_word("-3"), Token::Integer(DefaultAtom::from("-3")));
    assert_eq!(Token::from_word("2.5"), Token::Float(DefaultAtom::from("2.5")));
    assert_eq!(Token::from_word("1e3"), Token::Float(DefaultAtom::from("1e3")));
    // Not a number, but still a literal; the evaluator rejects it.
    assert_eq!(Token::from_word("abc"), Token::Integer(DefaultAtom::from("abc")));
    assert_eq!(Token::from_word("mem"), Token::Float(DefaultAtom::from("mem")));
  }

  #[test]
  fn renders_tokens() {
    let tokens = vec![
      Token::Open,
      Token::from_word("5"),
      Token::Keyword(Keyword::Mem),
      Token::Close
    ];
    assert_eq!(tokens_to_string(&tokens), "( 5 MEM )");
  }
}
