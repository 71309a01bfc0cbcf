use bimap::BiMap;
use string_cache::DefaultAtom;

use crate::address::Address;

/**
  A symbol table is a mapping between symbol names and their address in the data or code
  section. `MEMORY` and `RESULT` are data symbols; labels are code symbols. A symbol table
  is really just a convenience wrapper around a BiMap, so no two symbols share an address.
*/
#[derive(Debug)]
pub struct SymbolTable {
  table: BiMap<DefaultAtom, Address>
}

impl SymbolTable {

  pub fn new() -> SymbolTable {
    SymbolTable {
      table: BiMap::new()
    }
  }

  pub fn get_address(&self, name: &str) -> Option<Address> {
    self.table.get_by_left(&DefaultAtom::from(name)).cloned()
  }

  /// Fails, returning the pair, if either the name or the address is already taken.
  pub fn insert(&mut self, name: DefaultAtom, address: Address)
    -> Result<(), (DefaultAtom, Address)>
  {
    self.table.insert_no_overwrite(name, address)
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.table.len()
  }

  /// All symbols ordered by address, data section first.
  pub fn sorted(&self) -> Vec<(DefaultAtom, Address)> {
    let mut symbols: Vec<(DefaultAtom, Address)> =
      self.table
          .iter()
          .map(|(name, address)| (name.clone(), *address))
          .collect();
    symbols.sort_by_key(|(_, address)| (!address.is_data(), address.idx()));
    symbols
  }
}
