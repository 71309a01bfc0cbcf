//! Run-level configuration. It is fixed before the first line is compiled.

/// The number of result slots reserved even for shorter inputs.
pub const DEFAULT_RESULT_SLOTS: usize = 10;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CompilerOptions {
  /// Store floats as 2 byte halves and truncate every float entering the stack.
  pub half_precision : bool,
  /// Fail lines the strict type checker rejects, before evaluating them.
  pub strict_types   : bool,
  /// Minimum size of the result buffer in slots. The buffer grows to one slot per line.
  pub result_slots   : usize,
}

impl Default for CompilerOptions {
  fn default() -> Self {
    CompilerOptions {
      half_precision : false,
      strict_types   : false,
      result_slots   : DEFAULT_RESULT_SLOTS,
    }
  }
}

impl CompilerOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_half_precision(mut self, half_precision: bool) -> Self {
    self.half_precision = half_precision;
    self
  }

  pub fn with_strict_types(mut self, strict_types: bool) -> Self {
    self.strict_types = strict_types;
    self
  }
}
