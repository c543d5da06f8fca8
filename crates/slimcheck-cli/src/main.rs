//! slimcheck CLI
//!
//! Grade returned values against expected-value specs from the command line.
//!
//! Exit codes: 0 when nothing failed, 1 when any expectation failed,
//! 2 when the input could not be graded (bad pattern, bad suite file).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slimcheck_core::{
    classify, Expectation, HtmlRenderer, PlainRenderer, Renderer, Suite, SuiteReport, SymbolTable,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slimcheck", version, about = "Grade actual values against expected-value specs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Grade one actual value
    Check {
        /// Expected-value spec, e.g. "< 5.2" or "=~/Bob/"
        #[arg(short, long, allow_hyphen_values = true)]
        expected: String,

        /// Actual value returned by the system under test
        #[arg(short, long, allow_hyphen_values = true)]
        actual: String,

        /// Bind a symbol before grading (NAME=VALUE), repeatable
        #[arg(short, long = "symbol", value_name = "NAME=VALUE")]
        symbols: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show how a spec is classified
    Classify {
        #[arg(allow_hyphen_values = true)]
        spec: String,
    },

    /// Grade every case in a YAML or JSON suite file
    Run {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether everything graded passed or was ignored.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Check {
            expected,
            actual,
            symbols,
            format,
        } => {
            let symbols = parse_symbols(&symbols)?;
            let expectation = Expectation::grade("cli", 0, 0, &expected, &actual, &symbols)?;
            println!("{}", render_one(&expectation, format)?);
            Ok(!expectation.outcome().is_fail())
        }
        Command::Classify { spec } => {
            println!("{}", serde_json::to_string_pretty(&classify(&spec))?);
            Ok(true)
        }
        Command::Run { file, format } => {
            let suite = Suite::from_path(&file)
                .with_context(|| format!("loading suite {}", file.display()))?;
            let report = suite.run()?;
            print_report(&report, format)?;
            Ok(report.is_success())
        }
    }
}

fn parse_symbols(pairs: &[String]) -> Result<SymbolTable> {
    let mut symbols = SymbolTable::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("symbol must be NAME=VALUE, got {:?}", pair))?;
        let name = name.trim().trim_start_matches('$');
        if name.is_empty() {
            return Err(anyhow!("symbol name is empty in {:?}", pair));
        }
        symbols.set(name, value);
    }
    Ok(symbols)
}

fn render(expectation: &Expectation, format: Format) -> String {
    match format {
        Format::Html => HtmlRenderer.render(expectation.verdict()),
        Format::Text | Format::Json => PlainRenderer.render(expectation.verdict()),
    }
}

fn render_one(expectation: &Expectation, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(expectation)?),
        _ => Ok(render(expectation, format)),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    #[serde(flatten)]
    report: &'a SuiteReport,
}

fn print_report(report: &SuiteReport, format: Format) -> Result<()> {
    if let Format::Json = format {
        let json = JsonReport {
            success: report.is_success(),
            report,
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for expectation in &report.expectations {
        println!(
            "{} [{},{}] {}",
            expectation.instruction_id(),
            expectation.column(),
            expectation.row(),
            render(expectation, format)
        );
    }

    let tally = report.tally;
    println!(
        "{} pass, {} fail, {} ignore ({} total)",
        tally.pass,
        tally.fail,
        tally.ignore,
        tally.total()
    );
    Ok(())
}
