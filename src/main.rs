use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use kakomon::app::{App, KeyOutcome};
use kakomon::bank::QuestionBank;
use kakomon::config::{ConfigStore, FileConfigStore};
use kakomon::datasets;
use kakomon::runtime::{CrosstermEventSource, QuizEvent, Runner};

const TICK_RATE_MS: u64 = 250;

/// terminal quiz trainer for past-exam questions
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice past-exam multiple-choice questions in the terminal: draw random questions, \
retry the ones you missed, and review per-period and per-category accuracy for the session."
)]
pub struct Cli {
    /// CSV question file to load instead of a bundled bank
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// bundled question bank to use
    #[clap(short = 'b', long)]
    bank: Option<String>,

    /// list the bundled question banks and exit
    #[clap(long)]
    list_banks: bool,
}

/// Resolves the question source from CLI and config: an explicit file wins
/// over a bundled bank name; whatever was used is remembered for next time.
fn resolve_bank(cli: &Cli, store: &FileConfigStore) -> Result<(QuestionBank, String), Box<dyn Error>> {
    let mut cfg = store.load();
    if let Some(file) = &cli.file {
        cfg.file = Some(file.clone());
    } else if cli.bank.is_some() {
        cfg.file = None;
    }
    if let Some(bank) = &cli.bank {
        cfg.bank = bank.clone();
    }

    let (bank, label) = if let Some(path) = &cfg.file {
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        (QuestionBank::load_from_path(path)?, label)
    } else {
        let bank = datasets::load_builtin(&cfg.bank).ok_or_else(|| {
            format!(
                "unknown bundled bank {:?} (available: {})",
                cfg.bank,
                datasets::builtin_names().join(", ")
            )
        })??;
        (bank, cfg.bank.clone())
    };

    // Dataset contents are never written back, only the choice of dataset.
    let _ = store.save(&cfg);
    Ok((bank, label))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_banks {
        for name in datasets::builtin_names() {
            println!("{name}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let (bank, label) = match resolve_bank(&cli, &store) {
        Ok(loaded) => loaded,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };
    if bank.is_empty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "the question bank contains no questions")
            .exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(bank, label);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {}
            QuizEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            QuizEvent::Key(key) => {
                // Session misuse (EmptyBank at this point) is fatal and
                // propagates out of the loop for teardown + reporting.
                if app.on_key(key)? == KeyOutcome::Quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
