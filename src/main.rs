use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use wordrush::{
    app::App,
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    language::word_source,
    logging,
    runtime::{CrosstermEventSource, EventSource, Runner, Schedule, TimerKind},
    session::Session,
};

/// type the words on screen, watch your wpm climb
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing-speed trainer: a handful of words are on screen, type any of them to replace it with a new one. Idle for a while and the whole set is reshuffled."
)]
pub struct Cli {
    /// word list to draw from (json, or one word per line); defaults to the bundled english list
    #[clap(short = 'w', long = "words")]
    word_list: Option<PathBuf>,

    /// number of words on screen at once
    #[clap(short = 'k', long)]
    display_size: Option<usize>,

    /// milliseconds without typing before the words are reshuffled
    #[clap(long)]
    idle_threshold_ms: Option<u64>,

    /// how often to check for idleness, in milliseconds
    #[clap(long)]
    reshuffle_interval_ms: Option<u64>,

    /// how often the wpm display refreshes, in milliseconds
    #[clap(long)]
    clock_interval_ms: Option<u64>,

    /// seed for word selection, for reproducible sessions
    #[clap(long)]
    seed: Option<u64>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,

    /// where to write the log
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags win over the stored configuration
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(ref path) = self.word_list {
            cfg.word_list = Some(path.clone());
        }
        if let Some(k) = self.display_size {
            cfg.display_size = k;
        }
        if let Some(ms) = self.idle_threshold_ms {
            cfg.idle_threshold_ms = ms;
        }
        if let Some(ms) = self.reshuffle_interval_ms {
            cfg.reshuffle_interval_ms = ms;
        }
        if let Some(ms) = self.clock_interval_ms {
            cfg.clock_interval_ms = ms;
        }
        cfg
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("warning: logging disabled ({}): {}", log_path.display(), e);
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    cfg.validate()?;
    if cli.save_config {
        store
            .save(&cfg)
            .with_context(|| format!("unable to save config to {}", store.path().display()))?;
        log::info!("saved config to {}", store.path().display());
    }

    let pool = word_source(cfg.word_list.as_deref())
        .load_words()
        .context("cannot start a session")?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = Session::new(pool, &cfg.session_config(), rng, SystemClock);
    let mut app = App::new(session);

    let schedule = Schedule::new(
        &[
            (TimerKind::Clock, cfg.clock_interval()),
            (TimerKind::Reshuffle, app.session.reshuffle_period()),
        ],
        Instant::now(),
    );
    let mut runner = Runner::new(CrosstermEventSource::new(), schedule);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app, &mut runner);

    // restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    let summary = app.session.summary();
    log::info!("session finished: {}", summary);
    println!("{}", summary);

    Ok(())
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E>,
) -> Result<()> {
    loop {
        if app.needs_redraw() {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
        if app.should_quit() {
            break;
        }
        app.handle_event(runner.step());
    }
    Ok(())
}
