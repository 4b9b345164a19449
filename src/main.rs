mod app;
mod boundary;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod navigation;
mod orchestrator;
mod panel;
mod terminal_ui;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, LoggingConfig};
use crate::event::{Event, EventHandler};
use crate::terminal_ui::TerminalUi;
use crate::tui::{install_panic_hook, Tui};

/// A dual-panel terminal file manager.
#[derive(Parser, Debug)]
#[command(name = "duo", version, about)]
struct Cli {
    /// Directory both panels start in (defaults to the configured start path, then the current directory)
    path: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    /// Partial config built from the flags that override file settings.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_path: self
                    .path
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                ..Default::default()
            },
            logging: LoggingConfig {
                file: self
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                level: self.log_level.clone(),
            },
            ..Default::default()
        }
    }
}

/// Resolve the start directory to an absolute, existing directory.
fn resolve_start_path(config: &AppConfig) -> error::Result<PathBuf> {
    let requested = match config.start_path() {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let path = requested.canonicalize().map_err(|_| {
        error::AppError::InvalidPath(format!("{} does not exist", requested.display()))
    })?;
    if !path.is_dir() {
        return Err(error::AppError::InvalidPath(format!(
            "{} is not a directory",
            requested.display()
        )));
    }
    Ok(path)
}

async fn run(
    tui: &mut Tui,
    events: &mut EventHandler,
    app: &mut App,
    config: &AppConfig,
) -> error::Result<()> {
    loop {
        let size = tui.terminal_mut().size()?;
        app.page_rows = ui::panel_rows(size.height).max(1);
        app.engine.update_scroll(app.page_rows);

        let status = app
            .status_message
            .as_ref()
            .map(|(msg, is_error, _)| (msg.as_str(), *is_error));
        let state = app.engine.state();
        tui.terminal_mut().draw(|frame| {
            ui::render(frame, state, config, status, None);
        })?;

        match events.next().await? {
            Event::Key(key) => {
                let backdrop = app.engine.state().clone();
                let mut terminal_ui = TerminalUi::new(tui, events, config, backdrop);
                handler::handle_key_event(app, key, &mut terminal_ui).await;
            }
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn init_logging(config: &AppConfig) {
    let Some(path) = config.log_file() else {
        return;
    };
    if let Err(e) = logging::init(&path, config.log_level()) {
        eprintln!("Warning: logging disabled ({}): {}", path.display(), e);
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    init_logging(&config);

    let path = resolve_start_path(&config)?;
    info!(path = %path.display(), "starting");

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(&path, &config);
    let mut events = EventHandler::new(Duration::from_millis(250));

    let result = run(&mut tui, &mut events, &mut app, &config).await;

    tui.restore()?;
    info!("exiting");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_with_start(path: &Path) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_path: Some(path.to_string_lossy().to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn cli_flags_become_overrides() {
        let cli = Cli::parse_from(["duo", "/tmp", "--log-level", "debug"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.general.start_path.as_deref(), Some("/tmp"));
        assert_eq!(overrides.logging.level.as_deref(), Some("debug"));
        assert!(overrides.logging.file.is_none());
    }

    #[test]
    fn start_path_is_canonicalized() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_start(&tmp.path().join("."));
        let resolved = resolve_start_path(&config).unwrap();
        assert_eq!(resolved, tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_start_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_start(&tmp.path().join("nope"));
        let err = resolve_start_path(&config).unwrap_err();
        assert!(matches!(err, error::AppError::InvalidPath(_)));
    }

    #[test]
    fn file_start_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        std::fs::write(&file, "").unwrap();
        let err = resolve_start_path(&config_with_start(&file)).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
