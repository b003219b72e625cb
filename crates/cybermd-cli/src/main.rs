mod app;
mod ui;

use anyhow::{Context, Result};
use app::{App, Flow, pass_limits};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use cybermd_config::Config;
use cybermd_engine::{
    BackgroundExecutor, EditorSession, Theme, highlight, parse_with_diagnostics,
    parsing::source::preview,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, Write, stdout},
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
};

/// How long to wait for input while a pass is running.
const BUSY_POLL: Duration = Duration::from_millis(16);
/// How long to wait for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();
    let (config, first_run) = match Config::load() {
        Ok(Some(config)) => (config, false),
        Ok(None) => (Config::default(), true),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", config_path.display());
            process::exit(1);
        }
    };

    init_logging(&config)?;
    log::info!("cybermd starting, config {}", config_path.display());
    if first_run {
        match config.save() {
            Ok(()) => log::info!("wrote default config to {}", config_path.display()),
            Err(e) => log::warn!("Failed to write default config: {e:#}"),
        }
    }

    let path = match args.as_slice() {
        [_] => None,
        [_, flag, file] if flag == "--dump" => return dump(Path::new(file)),
        [_, file] if !file.starts_with('-') => Some(PathBuf::from(file)),
        _ => {
            eprintln!("Usage: {} [FILE]", args[0]);
            eprintln!("       {} --dump FILE", args[0]);
            process::exit(1);
        }
    };

    let theme: Theme = config.theme.parse().unwrap_or_else(|e| {
        log::warn!("{e}; using the dark theme");
        Theme::Dark
    });
    let executor = BackgroundExecutor::spawn(pass_limits(&config))
        .context("Failed to start the parse worker")?;
    let session = EditorSession::new(executor, config.debounce());
    let mut app = App::new(session, theme, path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Sends `log` output to the configured file; without one, logging is off
/// so the terminal UI stays clean.
fn init_logging(config: &Config) -> Result<()> {
    let Some(log_file) = &config.log_file else {
        return Ok(());
    };
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<BackgroundExecutor>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        let now = Instant::now();
        let timeout = match app.session.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now),
            None if app.session.is_busy() => BUSY_POLL,
            None => IDLE_POLL,
        };
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key, Instant::now())? == Flow::Quit
        {
            return Ok(());
        }
        app.tick(Instant::now());
    }
}

/// Prints the highlight ranges and parse anomalies for `file`.
fn dump(file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let outcome = parse_with_diagnostics(&text);
    let mut out = stdout().lock();
    for range in highlight(outcome.ast()) {
        writeln!(
            out,
            "{:>6}..{:<6} {:<12} depth={} {:?}",
            range.span.start,
            range.span.end,
            format!("{:?}", range.style),
            range.depth,
            preview(&text, range.span, 40),
        )?;
    }
    for anomaly in outcome.anomalies() {
        writeln!(
            out,
            "anomaly {:?} at {}..{}",
            anomaly.kind, anomaly.span.start, anomaly.span.end
        )?;
    }
    Ok(())
}
