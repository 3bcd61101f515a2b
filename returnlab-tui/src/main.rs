//! ReturnLab dashboard binary.
//!
//! Runs the built-in three-market study against `./data` unless a config
//! file or data directory is given. Logs go to a file in the temp directory.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use returnlab_runner::{init_file_logging, StudyConfig};
use returnlab_tui::app::AppState;
use returnlab_tui::{input, persistence, ui};

#[derive(Parser)]
#[command(name = "returnlab-tui", about = "Stock market return dashboard", version)]
struct Args {
    /// Study configuration (TOML). Defaults to the built-in three-market study.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the input files; overrides the config's data_dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level for the log file (RUST_LOG takes precedence).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = std::env::temp_dir().join("returnlab-tui.log");
    init_file_logging(&args.log_level, &log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let mut config = match &args.config {
        Some(path) => StudyConfig::from_file(path)?,
        None => StudyConfig::builtin(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = persistence::default_path();
    let persisted = persistence::load(&state_path);

    let mut app = AppState::new(config, args.config);
    persistence::apply(&mut app, persisted);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    if let Err(e) = persistence::save(&state_path, &persistence::extract(&app)) {
        tracing::warn!(error = %e, path = %state_path.display(), "failed to save dashboard state");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
