#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod address;
mod assembly;
mod compiler;
mod config;
mod emitter;
mod error;
mod evaluator;
mod half;
mod operator;
mod parser;
mod session;
mod symboltable;
mod token;
mod typecheck;
mod value;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, Level};

use crate::compiler::Compilation;
use crate::config::CompilerOptions;

#[derive(Parser, Debug)]
#[command(name = "rpnc")]
#[command(about = "Compile RPN expression lines into an AVR assembly listing")]
struct Cli {
  /// Input file, one expression per line
  input: PathBuf,

  /// Output assembly file
  #[arg(default_value = "output.S")]
  output: PathBuf,

  /// Store floats as 16 bit halves
  #[arg(long)]
  half_float: bool,

  /// Reject lines that apply `/` or `%` to floats or raise to a float exponent
  #[arg(long)]
  strict_types: bool,

  /// Print the per-line results and the symbol table
  #[arg(long)]
  summary: bool,

  /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  #[cfg(feature = "trace_computation")]
  info!("Computation tracing enabled");

  let options = CompilerOptions::new()
    .with_half_precision(cli.half_float)
    .with_strict_types(cli.strict_types);

  println!("\nCompiling: {}", cli.input.display());
  match options.half_precision {
    true  => println!("Using half-float (16-bit) precision"),
    false => println!("Using single-precision (32-bit) floats"),
  }
  println!("----------------------------------");

  let text = match std::fs::read_to_string(&cli.input) {
    Ok(text) => text,
    Err(e) => {
      error!("Cannot read {}: {}", cli.input.display(), e);
      println!("Compilation failed: {}", e);
      std::process::exit(1);
    }
  };

  let compilation = Compilation::compile(&text, options);

  if let Err(e) = std::fs::write(&cli.output, compilation.assembly()) {
    error!("Cannot write {}: {}", cli.output.display(), e);
    println!("Compilation failed: {}", e);
    std::process::exit(1);
  }

  info!("Wrote {} bytes to {}", compilation.assembly().len(), cli.output.display());
  println!("Compilation succeeded. Output: {}", cli.output.display());
  if cli.summary {
    println!("\n{}", compilation);
  }
}
