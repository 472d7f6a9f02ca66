use std::borrow::Cow::{self, Borrowed, Owned};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use aim_core::reply::KeywordReplies;
use aim_core::session::SessionManager;
use aim_infrastructure::{AimPaths, ConfigService, JsonMemoryRepository, MarkdownExporter};

mod command;
mod console;
mod view;

use command::COMMAND_NAMES;
use console::{Console, Flow, GOODBYE};

#[derive(Parser)]
#[command(name = "aim")]
#[command(about = "SSM-AIM Mini - a local, file-backed personal console", long_about = None)]
struct Cli {
    /// Directory holding memory.json, config.json and the export
    #[arg(long, env = "AIM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of <data dir>/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// CLI helper for rustyline that completes, hints and highlights commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }

    fn is_command(&self, line: &str) -> bool {
        let lower = line.trim().to_lowercase();
        self.commands.iter().any(|cmd| *cmd == lower)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with(':') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with(':') && self.is_command(line) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with(':') && line.len() > 1 {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(io::stderr)
        .init();
}

/// Entry point for the SSM-AIM mini console.
///
/// Opens the session memory, reports a changed memory file, then reads
/// lines until quit, end of input or Ctrl-C. The final save runs on every
/// exit path.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = AimPaths::new(cli.data_dir);
    let config_path = cli.config.unwrap_or_else(|| paths.config_file());
    let config_service = ConfigService::new(config_path);
    let config = config_service.load();
    tracing::debug!(
        "Data dir {:?}, config {:?}, max_records={}, digest length={}",
        paths.base_dir(),
        config_service.path(),
        config.max_records,
        config.digest_display_length
    );

    let repository = Arc::new(JsonMemoryRepository::new(paths.memory_file()));
    let (manager, startup) = SessionManager::open(repository, Arc::new(KeywordReplies), config);
    let mut console = Console::new(manager, MarkdownExporter::new(paths.export_file()));
    tracing::info!(
        "Session memory {} with {} record(s)",
        startup.source,
        startup.records
    );

    let mut stdout = io::stdout();
    view::write_banner(&mut stdout)?;
    if let Some(warning) = &startup.integrity_warning {
        println!("{}", format!("[verify] {}", warning).yellow());
    }

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    loop {
        match rl.readline(console.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if console.handle_line(&line, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                println!("{}", GOODBYE.bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    tracing::debug!("Leaving with {} record(s)", console.manager().store().len());
    console.finish();
    Ok(())
}
