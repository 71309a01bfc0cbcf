/*!
  State that lives for one compilation run: the memory cell, the history of committed
  line results, the precision mode, and the symbols (data buffers and labels) of the
  listing being produced.

  Lines only ever see committed state. The evaluator works on its own copy of the memory
  cell and hands it back through `Session::commit` together with the line's result, so a
  line that fails leaves both the memory cell and the history untouched.
*/

use string_cache::DefaultAtom;
use tracing::warn;

use crate::address::{Address, AddressNumberType};
use crate::error::CompileError;
use crate::symboltable::SymbolTable;
use crate::value::Value;

/// The data symbol holding the memory cell.
pub const MEMORY_SYMBOL: &str = "MEMORY";
/// The data symbol of the result buffer, one slot per line.
pub const RESULT_SYMBOL: &str = "RESULT";

const FULL_FLOAT_SIZE: usize = 4;
const HALF_FLOAT_SIZE: usize = 2;

#[derive(Debug)]
pub struct Session {
  memory         : Value,
  history        : Vec<Value>,
  half_precision : bool,
  label_counter  : usize,
  symbols        : SymbolTable,
}

impl Session {

  pub fn new(half_precision: bool) -> Session {
    let mut session = Session {
      memory         : Value::Float(0.0),
      history        : Vec::new(),
      half_precision,
      label_counter  : 0,
      symbols        : SymbolTable::new(),
    };

    // The memory cell comes first in the data section, the result buffer right after it.
    let unit_size = session.unit_size();
    session.define_symbol(MEMORY_SYMBOL, Address::Data(0));
    session.define_symbol(RESULT_SYMBOL, Address::Data(unit_size as AddressNumberType));
    session
  }

  /// The size in bytes of one result slot.
  pub fn unit_size(&self) -> usize {
    match self.half_precision {
      true  => HALF_FLOAT_SIZE,
      false => FULL_FLOAT_SIZE
    }
  }

  pub fn half_precision(&self) -> bool {
    self.half_precision
  }

  pub fn memory(&self) -> Value {
    self.memory
  }

  /// Committed results in line order, oldest first.
  #[cfg(test)]
  pub fn history(&self) -> &[Value] {
    &self.history
  }

  /// Looks up a committed result counting backward: `0` is the most recent.
  pub fn lookup_result(&self, index: i64) -> Result<Value, CompileError> {
    let available = self.history.len();
    let out_of_range = CompileError::HistoryIndexOutOfRange { index, available };

    if index < 0 || index as u64 >= available as u64 {
      return Err(out_of_range);
    }
    self.history
        .get(available - 1 - index as usize)
        .copied()
        .ok_or(out_of_range)
  }

  /// Records a successfully evaluated line.
  pub fn commit(&mut self, result: Value, memory: Value) {
    self.history.push(result);
    self.memory = memory;
  }

  /// Creates a fresh code label `label_N` and records it in the symbol table.
  pub fn new_label(&mut self) -> DefaultAtom {
    self.label_counter += 1;
    let label = DefaultAtom::from(format!("label_{}", self.label_counter));
    self.define_symbol(&label, Address::Code(self.label_counter));
    label
  }

  pub fn symbols(&self) -> &SymbolTable {
    &self.symbols
  }

  fn define_symbol(&mut self, name: &str, address: Address) {
    if let Err((name, address)) = self.symbols.insert(DefaultAtom::from(name), address) {
      warn!("Symbol {} at {} is already defined; keeping the first definition.", name, address);
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_empty_with_float_zero_memory() {
    let session = Session::new(false);
    assert_eq!(session.memory(), Value::Float(0.0));
    assert!(session.history().is_empty());
    assert_eq!(session.unit_size(), 4);
    assert_eq!(Session::new(true).unit_size(), 2);
  }

  #[test]
  fn data_symbols_follow_unit_size() {
    let session = Session::new(true);
    assert_eq!(session.symbols().get_address(MEMORY_SYMBOL), Some(Address::Data(0)));
    assert_eq!(session.symbols().get_address(RESULT_SYMBOL), Some(Address::Data(2)));
  }

  #[test]
  fn history_is_indexed_backward() {
    let mut session = Session::new(false);
    for i in &[10, 20, 30] {
      session.commit(Value::Integer(*i), session.memory());
    }
    assert_eq!(session.lookup_result(0), Ok(Value::Integer(30)));
    assert_eq!(session.lookup_result(1), Ok(Value::Integer(20)));
    assert_eq!(session.lookup_result(2), Ok(Value::Integer(10)));
    assert_eq!(
      session.lookup_result(3),
      Err(CompileError::HistoryIndexOutOfRange { index: 3, available: 3 })
    );
    assert!(session.lookup_result(-1).is_err());
  }

  #[test]
  fn labels_are_unique_and_recorded() {
    let mut session = Session::new(false);
    let first = session.new_label();
    let second = session.new_label();
    assert_eq!(&*first, "label_1");
    assert_eq!(&*second, "label_2");
    assert_eq!(session.symbols().get_address("label_2"), Some(Address::Code(2)));
  }
}
