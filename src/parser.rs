/*!

This module splits one expression line into `Token`s.

A line has the following lexical structure:

  * Parentheses: `(` and `)` are always tokens of their own, whether or not whitespace
                 surrounds them.
  * Words:       Any other run of non-whitespace characters. A word is an operator
                 (`+ - * / % | ^`), a keyword (`MEM`, `RES`), or a numeric literal.

Parsing is total. Words that are not numbers still become literal tokens; the evaluator
rejects them. Paren nesting is not checked here either.

Before general tokenizing, three line shapes are recognised, in this order:

  1. `(MEM)` alone reads the memory cell.
  2. A line ending in `(v MEM)` writes `v` to the memory cell. Only the trailing form is kept.
  3. A line ending in `(n RES)` looks up the result `n` lines back. Only the trailing form
     is kept.

A trailing `v MEM)` without its `(` is not a special form; it is tokenized like any other
line and the evaluator rejects the stray keyword.

*/

use nom::{
  branch::alt,
  bytes::complete::is_not,
  character::complete::{
    char as one_char,
    multispace0
  },
  combinator::map,
  multi::many0,
  sequence::preceded,
  IResult
};

use crate::token::{Keyword, Token};

const MEMORY_READ_LINE: &str = "(MEM)";

/// Parses one line of text into tokens, left to right.
pub fn parse(line: &str) -> Vec<Token> {
  let line = line.trim();

  if line == MEMORY_READ_LINE {
    return vec![Token::Open, Token::Keyword(Keyword::Mem), Token::Close];
  }

  let tokens = match ptokens(line) {
    Ok((_rest, tokens)) => tokens,
    // `many0` stops at the first failure, so this is unreachable in practice.
    Err(_) => Vec::new()
  };

  trailing_special_form(&tokens, Keyword::Mem)
    .or_else(|| trailing_special_form(&tokens, Keyword::Res))
    .unwrap_or(tokens)
}

/// Matches a line ending in `( value KEYWORD )` and keeps only that group.
fn trailing_special_form(tokens: &[Token], keyword: Keyword) -> Option<Vec<Token>> {
  match tokens {

    [.., Token::Open, value, Token::Keyword(found), Token::Close]
      if *found == keyword && !value.is_paren() =>
    {
      Some(vec![Token::Open, value.clone(), Token::Keyword(keyword), Token::Close])
    }

    _ => None

  }
}

fn ptokens(input: &str) -> IResult<&str, Vec<Token>> {
  many0(ptoken)(input)
}

fn ptoken(input: &str) -> IResult<&str, Token> {
  preceded(
    multispace0,
    alt((
      map(one_char('('), |_| Token::Open),
      map(one_char(')'), |_| Token::Close),
      map(is_not(" \t\r\n()"), Token::from_word),
    ))
  )(input)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::operator::BinaryOperator;
  use string_cache::DefaultAtom;

  fn int(text: &str) -> Token { Token::Integer(DefaultAtom::from(text)) }
  fn float(text: &str) -> Token { Token::Float(DefaultAtom::from(text)) }

  #[test]
  fn simple_expression() {
    assert_eq!(
      parse("3 4 +"),
      vec![int("3"), int("4"), Token::Operator(BinaryOperator::Add)]
    );
    assert_eq!(
      parse("  3.0\t4   *  "),
      vec![float("3.0"), int("4"), Token::Operator(BinaryOperator::Multiply)]
    );
  }

  #[test]
  fn parens_stand_alone() {
    assert_eq!(
      parse("((1 2 +)3)"),
      vec![
        Token::Open, Token::Open, int("1"), int("2"),
        Token::Operator(BinaryOperator::Add), Token::Close,
        int("3"), Token::Close
      ]
    );
  }

  #[test]
  fn memory_read_line() {
    assert_eq!(
      parse("(MEM)"),
      vec![Token::Open, Token::Keyword(Keyword::Mem), Token::Close]
    );
  }

  #[test]
  fn memory_write_keeps_only_the_trailing_form() {
    let expected = vec![Token::Open, int("5"), Token::Keyword(Keyword::Mem), Token::Close];
    assert_eq!(parse("(5 MEM)"), expected);
    assert_eq!(parse("1 2 + (5 MEM)"), expected);
  }

  #[test]
  fn history_lookup_form() {
    assert_eq!(
      parse("(2 RES)"),
      vec![Token::Open, int("2"), Token::Keyword(Keyword::Res), Token::Close]
    );
  }

  #[test]
  fn trailing_form_needs_its_open_paren() {
    assert_eq!(
      parse("5 MEM)"),
      vec![int("5"), Token::Keyword(Keyword::Mem), Token::Close]
    );
    assert_eq!(
      parse("1 2 + 0 RES)"),
      vec![
        int("1"), int("2"), Token::Operator(BinaryOperator::Add),
        int("0"), Token::Keyword(Keyword::Res), Token::Close
      ]
    );
  }

  #[test]
  fn longer_groups_ending_in_a_keyword_are_not_special() {
    assert_eq!(
      parse("(1 2 + MEM)"),
      vec![
        Token::Open, int("1"), int("2"), Token::Operator(BinaryOperator::Add),
        Token::Keyword(Keyword::Mem), Token::Close
      ]
    );
    assert_eq!(
      parse("((1) MEM)"),
      vec![
        Token::Open, Token::Open, int("1"), Token::Close,
        Token::Keyword(Keyword::Mem), Token::Close
      ]
    );
  }

  #[test]
  fn special_forms_inside_expressions_are_left_alone() {
    assert_eq!(
      parse("(0 RES) (1 RES) +"),
      vec![
        Token::Open, int("0"), Token::Keyword(Keyword::Res), Token::Close,
        Token::Open, int("1"), Token::Keyword(Keyword::Res), Token::Close,
        Token::Operator(BinaryOperator::Add)
      ]
    );
  }

  #[test]
  fn never_fails() {
    assert_eq!(parse(""), Vec::<Token>::new());
    assert_eq!(parse("   "), Vec::<Token>::new());
    assert_eq!(parse("3 (4"), vec![int("3"), Token::Open, int("4")]);
    assert_eq!(parse("@@ #"), vec![int("@@"), int("#")]);
  }
}
