//! `jzon` CLI: format, compact, query and validate JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print (stdin to stdout)
//! echo '{"name":"Alice","tags":[1,2]}' | jzon format
//!
//! # Pretty-print with tabs and ANSI colors
//! jzon format --tab --color -i data.json
//!
//! # Strip all insignificant whitespace, file to file
//! jzon compact -i data.json -o data.min.json
//!
//! # Extract a value by path
//! jzon query '$.users[0].name' -i data.json
//!
//! # Check a document against a condition schema (exit 1 on violations)
//! jzon validate --schema schema.json -i data.json
//! ```
//!
//! Set `RUST_LOG=debug` to see parser and query diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jzon::RenderOptions;
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(name = "jzon", version, about = "JSON formatter, query tool and validator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print JSON
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,
        /// Indent with tabs instead of spaces
        #[arg(long)]
        tab: bool,
        /// Highlight keys and values with ANSI colors
        #[arg(long)]
        color: bool,
    },
    /// Remove all insignificant whitespace
    Compact {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the value at a path such as `$.a.b[0]`
    Query {
        /// Path expression
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Check a document against a schema of conditions
    Validate {
        /// Schema file: an object mapping keys to conditions or nested schemas
        #[arg(long)]
        schema: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            input,
            output,
            indent,
            tab,
            color,
        } => {
            let root = read_document(input.as_deref())?;
            let options = RenderOptions::default()
                .with_indent(indent)
                .with_tab(tab)
                .with_color(color);
            write_output(output.as_deref(), &root.render(&options))?;
        }
        Commands::Compact { input, output } => {
            let root = read_document(input.as_deref())?;
            write_output(output.as_deref(), &root.to_compact_string())?;
        }
        Commands::Query { path, input } => {
            let root = read_document(input.as_deref())?;
            let found = root
                .query(&path)
                .with_context(|| format!("Failed to resolve path: {}", path))?;
            write_output(None, &found.to_compact_string())?;
        }
        Commands::Validate { schema, input } => {
            let schema_text = read_input(Some(schema.as_str()))?;
            let schema = jzon::parse_str(&schema_text)
                .with_context(|| format!("Failed to parse schema: {}", schema))?;
            let root = read_document(input.as_deref())?;
            let violations = jzon::validate(&root, &schema).context("Invalid schema")?;

            if violations.is_empty() {
                println!("ok");
            } else {
                for violation in &violations {
                    println!("{}", violation);
                }
                log::debug!("{} violation(s) found", violations.len());
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn read_document(path: Option<&str>) -> Result<jzon::Node> {
    let text = read_input(path)?;
    log::debug!("read {} bytes of input", text.len());
    jzon::parse_str(&text).context("Failed to parse JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
