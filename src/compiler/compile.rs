/*!
  Functions to produce a compilation artifact from source code input.
  Accepts a sequence of RPN lines and turns them into an AVR assembly listing that stores
  each line's value in the result buffer.

  The compilation pipeline for each line is this:
  ```
  text -> [`parser::parse`] -> `Token`s ->⋯

      ┌────────────[optional, `--strict-types`]─────────────┐
  ⋯->*│*-> [`typecheck::check_types`] -> diagnostics ->    *│*->⋯
      └─────────────────────────────────────────────────────┘

  ⋯-> [`evaluate_line`] -> `Value` -> [`emitter::emit`] -> `Line`s
  ```
  Lines are compiled strictly in order, since each may read the memory cell and the results
  committed by the lines before it. A failing line becomes an error comment and the run
  carries on.
*/

use string_cache::DefaultAtom;
use tracing::{debug, info, warn};

use crate::address::Address;
use crate::assembly::{Expression, Immediate, Instruction, IoRegister, Line, Listing, Register};
use crate::config::CompilerOptions;
use crate::emitter::{emit, emit_error};
use crate::error::CompileError;
use crate::evaluator::evaluate_line;
use crate::parser::parse;
use crate::session::Session;
use crate::token::{tokens_to_string, Token};
use crate::typecheck::check_types;
use crate::value::Value;

/// The outcome of one input line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineReport {
  /// Zero-based position among the non-blank input lines.
  pub index   : usize,
  pub source  : String,
  pub outcome : Result<Value, CompileError>,
}

/// A `Compilation` is the result of executing `Compilation::compile(source, options)` and holds
/// the assembly listing, the per-line outcomes, and the final session state.
pub struct Compilation {
  pub listing : Listing,
  pub reports : Vec<LineReport>,
  session     : Session,
  options     : CompilerOptions,
}

impl Compilation {

  /// Compiles every non-blank line of `text`. Surrounding whitespace is ignored.
  pub fn compile(text: &str, options: CompilerOptions) -> Compilation {
    let lines: Vec<&str> =
      text.lines()
          .map(str::trim)
          .filter(|line| !line.is_empty())
          .collect();
    Compilation::compile_lines(&lines, options)
  }

  /// Compiles `lines` in order. The caller has already dropped blank lines.
  pub fn compile_lines(lines: &[&str], options: CompilerOptions) -> Compilation {
    let compilation_time = std::time::Instant::now();
    let mut compilation = Compilation {
      listing : Listing::new(),
      reports : Vec::with_capacity(lines.len()),
      session : Session::new(options.half_precision),
      options,
    };

    let mut body: Vec<Line> = Vec::new();
    for (index, source) in lines.iter().enumerate() {
      body.extend(compilation.compile_line(index, source));
    }

    // The prolog sizes the result buffer, so it can only be written once every line is in.
    let prolog = compilation.prolog();
    let epilog = compilation.epilog();
    compilation.listing.extend(prolog);
    compilation.listing.extend(body);
    compilation.listing.extend(epilog);

    info!(
      "Compiled {} lines ({} failed) to {} instructions in {:?}.",
      compilation.reports.len(),
      compilation.failed_lines(),
      compilation.listing.instructions().count(),
      compilation_time.elapsed()
    );

    compilation
  }

  /// Compiles a single line into its listing fragment and records its outcome.
  fn compile_line(&mut self, index: usize, source: &str) -> Vec<Line> {
    let tokens = parse(source);
    debug!("Line {}: {}", index + 1, tokens_to_string(&tokens));

    let outcome =
      match self.check_strict(&tokens) {
        Ok(()) => evaluate_line(&mut self.session, &tokens),
        Err(violation) => Err(violation)
      };

    let fragment =
      match &outcome {
        Ok(value) => emit(&self.session, index, source, *value),
        Err(error) => {
          warn!("Error line {}: {}", index + 1, error);
          emit_error(error)
        }
      };

    self.reports.push(LineReport {
      index,
      source: source.to_string(),
      outcome
    });
    fragment
  }

  /// In strict mode, the first diagnostic of the type checker fails the line.
  fn check_strict(&self, tokens: &[Token]) -> Result<(), CompileError> {
    if !self.options.strict_types {
      return Ok(());
    }

    let diagnostics = check_types(&self.session, tokens);
    for diagnostic in &diagnostics {
      debug!("Type check: {}", diagnostic);
    }
    match diagnostics.into_iter().next() {
      Some(diagnostic) => Err(diagnostic),
      None             => Ok(())
    }
  }

  /**
    The startup sequence: the data section with one `.space` per data symbol, then the
    entry point, which initialises the stack pointer to the top of RAM.

    Each data symbol extends to the next one; the last, the result buffer, holds one slot
    for every line but never fewer than `options.result_slots`.
  */
  fn prolog(&self) -> Vec<Line> {
    let unit_size = self.session.unit_size();
    let buffer_end = unit_size + self.slot_count() * unit_size;

    let data_symbols: Vec<(DefaultAtom, Address)> =
      self.session
          .symbols()
          .sorted()
          .into_iter()
          .filter(|(_, address)| address.is_data())
          .collect();

    let mut lines = vec![
      Line::Comment("Code for ATmega328P".to_string()),
      Line::Directive("#include <avr/io.h>".to_string()),
      Line::Blank,
      Line::Directive(".section .data".to_string()),
    ];

    for (position, (symbol, address)) in data_symbols.iter().enumerate() {
      let end = match data_symbols.get(position + 1) {
        Some((_, next)) => next.idx(),
        None            => buffer_end
      };
      lines.push(Line::Reserve { symbol: symbol.clone(), size: end - address.idx() });
    }

    let ramend = || Expression::Symbol(DefaultAtom::from("RAMEND"));
    lines.extend(vec![
      Line::Blank,
      Line::Directive(".section .text".to_string()),
      Line::Directive(".global main".to_string()),
      Line::Blank,
      Line::Label(DefaultAtom::from("main")),
      Line::Instruction(Instruction::ldi(Register::R16, Immediate::Hi8(ramend()))),
      Line::Instruction(Instruction::out(IoRegister::SPH, Register::R16)),
      Line::Instruction(Instruction::ldi(Register::R16, Immediate::Lo8(ramend()))),
      Line::Instruction(Instruction::out(IoRegister::SPL, Register::R16)),
    ]);

    match self.session.half_precision() {
      true  => lines.push(Line::Comment("Results stored as half floats (16 bit)".to_string())),
      false => lines.push(Line::Comment("Results stored as single precision floats (32 bit)".to_string())),
    }
    lines
  }

  /// The shutdown sequence, an endless loop on a fresh label.
  fn epilog(&mut self) -> Vec<Line> {
    let label = self.session.new_label();
    vec![
      Line::Label(label.clone()),
      Line::Instruction(Instruction::rjmp(label)),
    ]
  }

  /// The size of the result buffer in slots.
  pub fn slot_count(&self) -> usize {
    self.options.result_slots.max(self.reports.len())
  }

  pub fn failed_lines(&self) -> usize {
    self.reports.iter().filter(|report| report.outcome.is_err()).count()
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  /// The assembly source text.
  pub fn assembly(&self) -> String {
    self.listing.to_string()
  }
}
