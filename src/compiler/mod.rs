mod compile;
mod report;

pub use compile::*;
