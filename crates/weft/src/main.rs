//! Weft CLI - directive-comment line rewriter.
//!
//! Reads markup from a file or stdin, applies the instructions bound on the
//! command line, and writes the rewritten stream to a file or stdout.
//!
//! Directive spans look like:
//!
//! ```html
//! <!-- debug:start -->
//! <script src="debug-console.js"></script>
//! <!-- debug:end -->
//! ```
//!
//! With `--strip debug`, the whole span above disappears from the output.

mod error;
mod output;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use weft_transform::instruction::{
    AggregateCallback, AggregateInstruction, DropInstruction, IdentityInstruction,
    MinifyInstruction,
};
use weft_transform::{DirectiveTransform, TransformConfig};

use error::CliError;
use output::Output;

/// Weft - directive-comment line rewriter.
#[derive(Parser)]
#[command(name = "weft", version, about)]
struct Cli {
    /// Input file; `-` or absent reads stdin.
    input: Option<PathBuf>,

    /// Output file; absent writes stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bind NAME to the suppressing instruction (the whole span is removed).
    #[arg(long, value_name = "NAME")]
    strip: Vec<String>,

    /// Bind NAME to the minified-reference rewriting instruction.
    #[arg(long, value_name = "NAME")]
    minify: Vec<String>,

    /// Bind NAME to the aggregating instruction (collapse the span's script
    /// references into one).
    #[arg(long, value_name = "NAME")]
    aggregate: Vec<String>,

    /// Enable info-level logging.
    #[arg(long)]
    verbose: bool,
}

/// Build a transform with identity default and the bindings from the
/// command line.
fn build_transform(cli: &Cli) -> Result<DirectiveTransform, CliError> {
    let mut config =
        TransformConfig::new().with_default_instruction(|| Box::new(IdentityInstruction::new()));

    for name in &cli.strip {
        config = config.with_instruction(name.clone(), || Box::new(DropInstruction::new()));
    }
    for name in &cli.minify {
        config = config.with_instruction(name.clone(), || Box::new(MinifyInstruction::new()));
    }
    for name in &cli.aggregate {
        let callback: Arc<AggregateCallback> = Arc::new(|sources: &[String], target: &str| {
            tracing::info!(target_file = target, ?sources, "aggregated script references");
        });
        config = config.with_instruction(name.clone(), move || {
            Box::new(AggregateInstruction::with_callback(Arc::clone(&callback)))
        });
    }

    Ok(DirectiveTransform::new(config)?)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut transform = build_transform(cli)?;

    let stdin = io::stdin();
    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) if path.as_os_str() != "-" => Box::new(BufReader::new(File::open(path)?)),
        _ => Box::new(stdin.lock()),
    };
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    transform.transform_reader(reader, writer)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries the transformed stream.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
