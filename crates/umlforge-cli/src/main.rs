//! umlforge CLI - command-line interface for umlforge-core
//!
//! ARCHITECTURE: Thin I/O layer over umlforge-core. This binary owns:
//! - File I/O (reading Java sources from disk or stdin)
//! - CLI argument parsing (clap)
//! - Output formatting (plain PlantUML text, or `--json`)
//! - Process exit codes
//!
//! All parsing/diagramming logic lives in the library; this binary never
//! touches a `tree_sitter::Node`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read};
use umlforge_core::Facade;

/// umlforge - Java-to-UML diagram generator
///
/// Parses one or more Java source files and emits PlantUML diagrams
/// (class, use-case, and activity/flow) describing their structure.
#[derive(Parser, Debug)]
#[command(name = "umlforge")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    umlforge A.java                    Emit all three diagrams for A.java\n  \
    umlforge src/*.java --diagram class  Emit only the class diagram\n  \
    cat A.java | umlforge -            Read a single unit from stdin\n  \
    umlforge A.java --json             Emit the full ConversionResult as JSON")]
struct Args {
    /// Java source file(s) to convert (use '-' to read a single unit from stdin)
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    files: Vec<String>,

    /// Which diagram(s) to print
    #[arg(short, long, value_enum, default_value = "all")]
    diagram: DiagramArg,

    /// Emit the full ConversionResult (diagrams, errors, sources) as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DiagramArg {
    Class,
    Usecase,
    Flow,
    All,
}

impl DiagramArg {
    fn names(self) -> &'static [&'static str] {
        match self {
            DiagramArg::Class => &["class"],
            DiagramArg::Usecase => &["usecase"],
            DiagramArg::Flow => &["flow"],
            DiagramArg::All => &["class", "usecase", "flow"],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let sources = read_sources(&args.files)?;

    let facade = Facade::new();
    let result = facade.convert(sources);

    for error in &result.errors {
        eprintln!("warning: {error}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for name in args.diagram.names() {
        if let Some(diagram) = result.diagrams.get(*name) {
            println!("--- {name} ---");
            println!("{diagram}");
        }
    }

    Ok(())
}

fn read_sources(files: &[String]) -> Result<Vec<(String, String)>> {
    files
        .iter()
        .map(|path| {
            if path == "-" {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read Java source from stdin")?;
                Ok(("<stdin>".to_string(), buf))
            } else {
                let code = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {path}"))?;
                Ok((path.clone(), code))
            }
        })
        .collect()
}
