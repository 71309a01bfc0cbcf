//! An `Either` type that holds a location in either the data section or the code section,
//! with some convenience functions.

use std::ops::Add;
use std::fmt::{Display, Formatter};

// `AddressNumberType` is `usize`, as it is naturally a byte offset into a section.
pub type AddressNumberType = usize;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Address {
  /// A byte offset into `.section .data`.
  Data(AddressNumberType),
  /// A code label. Labels are numbered in the order they are created.
  Code(AddressNumberType)
}

impl Address {
  /// The raw offset, regardless of section.
  pub fn idx(&self) -> AddressNumberType {
    match self {
      | Address::Data(i)
      | Address::Code(i) => *i
    }
  }

  pub fn is_data(&self) -> bool {
    match self {
      Address::Data(_) => true,
      _ => false
    }
  }
}


impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Address::Data(i) => {
        write!(f, "DATA[0x{:04X}]", i)
      },
      Address::Code(i) => {
        write!(f, "CODE[{}]", i)
      }
    }
  }
}

// Increment an address
impl Add<AddressNumberType> for Address {
  type Output = Address;
  fn add(self, rhs: AddressNumberType) -> Address {
    match self {
      Address::Data(i) => {
        Address::Data(i + rhs)
      },
      Address::Code(i) => {
        Address::Code(i + rhs)
      }
    }
  }
}
