//! The lines of an assembly source file.

use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;

use super::Instruction;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
  /// An assembler directive or preprocessor line, written verbatim.
  Directive(String),
  /// `name: .space size`
  Reserve {
    symbol : DefaultAtom,
    size   : usize
  },
  Label(DefaultAtom),
  Instruction(Instruction),
  Comment(String),
  Blank,
}

impl Display for Line {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Line::Directive(text)          => write!(f, "{}", text),
      Line::Reserve { symbol, size } => write!(f, "{}: .space {}", symbol, size),
      Line::Label(name)              => write!(f, "{}:", name),
      Line::Instruction(instruction) => write!(f, "    {}", instruction),
      Line::Comment(text)            => write!(f, "; {}", text),
      Line::Blank                    => Ok(()),
    }
  }
}

/// A whole source file, one `Line` per output line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Listing {
  lines: Vec<Line>
}

impl Listing {

  pub fn new() -> Listing {
    Listing { lines: Vec::new() }
  }

  pub fn push(&mut self, line: Line) {
    self.lines.push(line);
  }

  pub fn extend<I: IntoIterator<Item = Line>>(&mut self, lines: I) {
    for line in lines {
      self.push(line);
    }
  }

  pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
    self.lines.iter().filter_map(|line| {
      match line {
        Line::Instruction(instruction) => Some(instruction),
        _ => None
      }
    })
  }
}

impl Display for Listing {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let text =
      self.lines
          .iter()
          .map(|line| format!("{}", line))
          .collect::<Vec<String>>()
          .join("\n");
    write!(f, "{}", text)
  }
}
