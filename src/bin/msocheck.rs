//! msocheck - check MSO formulas against a graph
//!
//! Usage: msocheck <CONFIG> [FORMULA]
//!
//! With a formula, checks it once and exits. Without one, starts a REPL that
//! reads one formula per line.
//!
//! Commands:
//!   :help       - Show help
//!   :graph      - Show the loaded graph
//!   :quit       - Exit REPL

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use msocheck::config::{load_config, Config};
use msocheck::{diagnostic, Graph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = "mso> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "msocheck",
    version,
    about = "Parse, validate and model-check MSO formulas on a finite graph"
)]
struct Cli {
    /// TOML file describing the graph
    config: PathBuf,

    /// Formula to check; starts a REPL when omitted
    formula: Option<String>,

    #[arg(long, value_enum, default_value = "warn", help = "Set the log level")]
    log_level: LogLevel,

    #[arg(long, help = "Disable colored diagnostics")]
    no_color: bool,
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::from_default_env().add_directive(cli.log_level.as_tracing_level().into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct Session {
    graph: Graph,
    color: bool,
}

impl Session {
    /// Check one formula, printing diagnostics and the result. Returns whether
    /// the formula was accepted.
    fn check(&self, source: &str) -> anyhow::Result<bool> {
        let outcome = match msocheck::run(source, &self.graph) {
            Ok(outcome) => outcome,
            Err(error) => {
                match error.diagnostic() {
                    Some(diagnostic) => {
                        eprint!("{}", diagnostic::render(source, &[diagnostic], self.color)?)
                    }
                    None => eprintln!("Error: {}", error),
                }
                return Ok(false);
            }
        };

        let diagnostics = outcome.diagnostics();
        if !diagnostics.is_empty() {
            eprint!("{}", diagnostic::render(source, &diagnostics, self.color)?);
        }
        match outcome.result {
            Some(result) => {
                println!("{}", result);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config: Config = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let graph = config.graph.build().context("building graph")?;
    let session = Session {
        graph,
        color: config.report.color && !cli.no_color,
    };

    if let Some(formula) = &cli.formula {
        let accepted = session.check(formula)?;
        return Ok(if accepted {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    repl(&session)?;
    Ok(ExitCode::SUCCESS)
}

fn repl(session: &Session) -> anyhow::Result<()> {
    println!("msocheck v{} - MSO model checker", VERSION);
    println!(
        "Graph with {} vertices and {} edges",
        session.graph.vertex_count(),
        session.graph.edge_count()
    );
    println!("Type :help for help, :quit to exit\n");

    let config = rustyline::Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), DefaultHistory> =
        Editor::with_config(config).context("creating line editor")?;

    let history_path = history_path();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                match line {
                    "" => {}
                    ":quit" | ":q" => break,
                    ":help" | ":h" => print_help(),
                    ":graph" => println!("{}", session.graph),
                    command if command.starts_with(':') => {
                        eprintln!("Error: Unknown command '{}'", command);
                        eprintln!("Type :help for available commands");
                    }
                    formula => {
                        session.check(formula)?;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use :quit or Ctrl-D to exit");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }
    Ok(())
}

fn print_help() {
    println!("Enter a formula to check it against the graph, for example:");
    println!("  \\forall x \\exists y E(x, y)");
    println!("  ∃X ∀x∀y (E(x,y) → (X(x) ↔ ¬X(y)))");
    println!();
    println!("Commands:");
    println!("  :help   Show this help");
    println!("  :graph  Show the loaded graph");
    println!("  :quit   Exit");
}

fn history_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let mut path = PathBuf::from(home);
    path.push(".config");
    path.push("msocheck");
    path.push("history");
    Some(path)
}
