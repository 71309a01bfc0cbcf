//! Tabular summaries of a compilation, printed with `--summary`.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::address::Address;
use crate::emitter::{encode, result_offset};
use crate::session::RESULT_SYMBOL;

use super::Compilation;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Compilation {

  /// One row per line: its value, type, and where and how it is stored.
  pub fn results_table(&self) -> Table {
    let session = self.session();
    let unit_size = session.unit_size();
    let base = session.symbols()
                      .get_address(RESULT_SYMBOL)
                      .unwrap_or(Address::Data(0));

    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(
      row![ubr->"Line", ubl->"Source", ubl->"Result", ubl->"Type", ubr->"Slot", ubl->"Address", ubl->"Bytes"]
    );

    for report in &self.reports {
      let address = base + result_offset(report.index, unit_size);

      match &report.outcome {

        Ok(value) => {
          let bytes =
            encode(*value, session.half_precision())
              .iter()
              .map(|immediate| {
                match immediate.resolve() {
                  Some(byte) => format!("{:02X}", byte),
                  None       => "??".to_string()
                }
              })
              .collect::<Vec<String>>()
              .join(" ");
          table.add_row(row![
            r->report.index + 1, report.source, value, value.numeric_type(),
            r->report.index, address, bytes
          ]);
        }

        Err(error) => {
          table.add_row(row![
            r->report.index + 1, report.source, Fr->error, "", r->report.index, address, ""
          ]);
        }

      }
    }

    table
  }

  /// Every symbol of the listing with its address.
  pub fn symbols_table(&self) -> Table {
    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Symbol", ubl->"Address"]);

    for (name, address) in self.session().symbols().sorted() {
      table.add_row(row![r->name, address]);
    }
    table
  }
}

impl Display for Compilation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let outcome = match self.failed_lines() {
      0 => "All lines compiled.".to_string(),
      n => format!("{} of {} lines failed.", n, self.reports.len())
    };

    let mut combined_table = table!([self.results_table(), self.symbols_table()]);
    combined_table.set_titles(row![ub->"Results", ub->"Symbols"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "{}\n{}", outcome, combined_table)
  }
}


#[cfg(test)]
mod tests {
  use crate::config::CompilerOptions;

  use super::*;

  #[test]
  fn results_table_rows() {
    let compilation = Compilation::compile("3 4 +\n1 +\n2.5", CompilerOptions::default());
    let table = compilation.results_table();
    assert_eq!(table.len(), 3);

    let text = table.to_string();
    assert!(text.contains("07 00"));
    assert!(text.contains("40 20 00 00"));
    assert!(text.contains("DATA[0x000C]"));
    assert!(text.contains("needs 2 operands"));
  }

  #[test]
  fn half_precision_bytes() {
    let options = CompilerOptions::default().with_half_precision(true);
    let compilation = Compilation::compile("1.0", options);
    assert!(compilation.results_table().to_string().contains("00 3C"));
  }

  #[test]
  fn symbols_table_lists_data_then_code() {
    let compilation = Compilation::compile("1", CompilerOptions::default());
    let text = compilation.symbols_table().to_string();
    let memory = text.find("MEMORY").unwrap();
    let result = text.find("RESULT").unwrap();
    let label  = text.find("label_1").unwrap();
    assert!(memory < result && result < label);
  }

  #[test]
  fn summary_reports_failures() {
    let compilation = Compilation::compile("1 2 +\n+", CompilerOptions::default());
    assert!(compilation.to_string().starts_with("1 of 2 lines failed."));
  }
}
