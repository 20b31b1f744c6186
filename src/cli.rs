//! `toolsense` demo/check CLI.
//!
//! This is offline tooling for exercising the engine without a gateway, not
//! the gateway itself (see `wire.rs`): a REPL for trying out queries
//! against a catalog, and a `check` subcommand for catalog authors to
//! validate a catalog file in CI.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::{Suggestion, ToolSpec};
use crate::engine::{EngineConfig, SuggestionEngine};
use crate::types::SessionId;

#[derive(Parser)]
#[command(name = "toolsense")]
#[command(about = "Real-time tool suggestion engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive REPL against a catalog: each line is fed incrementally,
    /// a blank line submits the accumulated buffer, `:reset` clears it.
    Demo {
        /// JSON catalog file; the embedded 3-tool demo catalog is used if
        /// omitted.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Load a catalog file and report validation problems (duplicate
    /// names, empty descriptions) without starting a session.
    Check {
        #[arg(long)]
        catalog: PathBuf,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Demo { catalog } => run_demo(catalog),
        Commands::Check { catalog } => run_check(&catalog),
    }
}

fn load_catalog(path: Option<PathBuf>) -> anyhow::Result<Vec<ToolSpec>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
            let tools: Vec<ToolSpec> = serde_json::from_str(&text)
                .map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))?;
            Ok(tools)
        }
        None => Ok(embedded_demo_catalog()),
    }
}

/// The 3-tool catalog used in worked scenarios: `export_csv`, `send_email`,
/// `db_query`.
fn embedded_demo_catalog() -> Vec<ToolSpec> {
    serde_json::from_str(
        r#"[
            {
                "name": "export_csv",
                "aliases": ["export to csv", "csv export"],
                "keywords": ["csv", "spreadsheet", "export"],
                "description": "Export the current dataset to a CSV file",
                "arguments_template": {"path": "string"},
                "tags": ["data"]
            },
            {
                "name": "send_email",
                "aliases": ["email", "send mail"],
                "keywords": ["mail", "message", "notify"],
                "description": "Send an email message to one or more recipients",
                "arguments_template": {"to": "string", "subject": "string", "body": "string"},
                "tags": ["communication"]
            },
            {
                "name": "db_query",
                "aliases": ["database query", "sql query"],
                "keywords": ["sql", "database", "query"],
                "description": "Run a query against the database",
                "arguments_template": {"sql": "string"},
                "tags": ["data"]
            }
        ]"#,
    )
    .expect("embedded demo catalog is valid JSON")
}

fn run_check(path: &Path) -> anyhow::Result<()> {
    let tools = load_catalog(Some(path.to_path_buf()))?;
    let mut problems = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for tool in &tools {
        if !seen.insert(tool.name.as_str().to_string()) {
            problems.push(format!("duplicate tool name: {}", tool.name));
        }
        if tool.description.trim().is_empty() {
            problems.push(format!("{}: empty description", tool.name));
        }
    }

    if problems.is_empty() {
        println!("{}: {} tools, no problems found", path.display(), tools.len());
        Ok(())
    } else {
        for problem in &problems {
            eprintln!("{problem}");
        }
        anyhow::bail!("{} problem(s) found in {}", problems.len(), path.display());
    }
}

fn run_demo(catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let tools = load_catalog(catalog_path)?;
    let engine = SuggestionEngine::with_tools(EngineConfig::default(), tools)?;
    let session = SessionId::new("demo").expect("non-empty literal");

    println!("toolsense demo — type text to feed it, blank line to submit, :reset to clear, Ctrl-D to exit");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line == ":reset" {
            engine.reset(&session);
            println!("(session reset)");
        } else if line.is_empty() {
            print_suggestions(&engine.finalize(&session));
        } else {
            print_suggestions(&engine.feed(&session, &line));
        }
        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}

fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("(no suggestions)");
        return;
    }
    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!(
            "  {}. {} ({:.3}) — {}",
            rank + 1,
            suggestion.label,
            suggestion.score,
            suggestion.reason
        );
    }
}
