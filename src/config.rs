//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--log-file`, `--log-level`, start path)
//! 2. `$DUO_CONFIG` environment variable (path to config file)
//! 3. Project-local `.duo.toml` in the current working directory
//! 4. Global `~/.config/duo/config.toml`
//! 5. Built-in defaults
//!
//! Everything here is a display hint or a startup preference; the panel and
//! file-operation logic never depends on it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory for both panels (overridden by CLI positional arg).
    pub start_path: Option<String>,
    /// Ask before quitting with F10/Esc.
    pub confirm_exit: Option<bool>,
}

/// Panel split.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left panel width as a percentage; the right panel fills the rest.
    pub left_panel_width: Option<u16>,
}

/// Panel column settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    /// Width of the name column.
    pub name_width: Option<usize>,
    /// Width of the size column.
    pub size_width: Option<usize>,
    /// strftime format for the modified column.
    pub date_format: Option<String>,
}

/// Bottom status line settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StatusBarConfig {
    pub show_date_time: Option<bool>,
    /// strftime format for the clock.
    pub date_time_format: Option<String>,
    pub function_keys: Option<String>,
}

/// Application identity shown in the status bar.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    pub title: Option<String>,
    pub version: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path.
    pub file: Option<String>,
    /// "error", "warn", "info", "debug" or "trace".
    pub level: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub layout: LayoutConfig,
    pub panel: PanelConfig,
    pub status_bar: StatusBarConfig,
    pub application: ApplicationConfig,
    pub logging: LoggingConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default left panel width in percent.
pub const DEFAULT_LEFT_PANEL_WIDTH: u16 = 50;
/// Default name column width.
pub const DEFAULT_NAME_WIDTH: usize = 30;
/// Default size column width.
pub const DEFAULT_SIZE_WIDTH: usize = 12;
/// Default modified-date format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Default status bar clock format.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Default key hint line.
pub const DEFAULT_FUNCTION_KEYS: &str = "F1=Help F3=Search F5=Copy F6=Move F8=Delete F10=Quit";
/// Default application title.
pub const DEFAULT_TITLE: &str = "Duo";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("DUO_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".duo.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("duo").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_path: other
                    .general
                    .start_path
                    .clone()
                    .or(self.general.start_path),
                confirm_exit: other.general.confirm_exit.or(self.general.confirm_exit),
            },
            layout: LayoutConfig {
                left_panel_width: other
                    .layout
                    .left_panel_width
                    .or(self.layout.left_panel_width),
            },
            panel: PanelConfig {
                name_width: other.panel.name_width.or(self.panel.name_width),
                size_width: other.panel.size_width.or(self.panel.size_width),
                date_format: other
                    .panel
                    .date_format
                    .clone()
                    .or(self.panel.date_format),
            },
            status_bar: StatusBarConfig {
                show_date_time: other
                    .status_bar
                    .show_date_time
                    .or(self.status_bar.show_date_time),
                date_time_format: other
                    .status_bar
                    .date_time_format
                    .clone()
                    .or(self.status_bar.date_time_format),
                function_keys: other
                    .status_bar
                    .function_keys
                    .clone()
                    .or(self.status_bar.function_keys),
            },
            application: ApplicationConfig {
                title: other.application.title.clone().or(self.application.title),
                version: other
                    .application
                    .version
                    .clone()
                    .or(self.application.version),
            },
            logging: LoggingConfig {
                file: other.logging.file.clone().or(self.logging.file),
                level: other.logging.level.clone().or(self.logging.level),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        let paths = candidate_paths();
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Configured start directory, if any.
    pub fn start_path(&self) -> Option<PathBuf> {
        self.general.start_path.as_ref().map(PathBuf::from)
    }

    /// Whether to ask before quitting.
    pub fn confirm_exit(&self) -> bool {
        self.general.confirm_exit.unwrap_or(true)
    }

    /// Left panel width in percent, clamped so both panels stay visible.
    pub fn left_panel_width(&self) -> u16 {
        self.layout
            .left_panel_width
            .unwrap_or(DEFAULT_LEFT_PANEL_WIDTH)
            .clamp(10, 90)
    }

    pub fn name_width(&self) -> usize {
        self.panel.name_width.unwrap_or(DEFAULT_NAME_WIDTH)
    }

    pub fn size_width(&self) -> usize {
        self.panel.size_width.unwrap_or(DEFAULT_SIZE_WIDTH)
    }

    pub fn date_format(&self) -> &str {
        self.panel.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    pub fn show_date_time(&self) -> bool {
        self.status_bar.show_date_time.unwrap_or(true)
    }

    pub fn date_time_format(&self) -> &str {
        self.status_bar
            .date_time_format
            .as_deref()
            .unwrap_or(DEFAULT_DATE_TIME_FORMAT)
    }

    pub fn function_keys(&self) -> &str {
        self.status_bar
            .function_keys
            .as_deref()
            .unwrap_or(DEFAULT_FUNCTION_KEYS)
    }

    pub fn title(&self) -> &str {
        self.application.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn version(&self) -> &str {
        self.application
            .version
            .as_deref()
            .unwrap_or(env!("CARGO_PKG_VERSION"))
    }

    /// Log file path: configured, or `<cache dir>/duo/duo.log`.
    pub fn log_file(&self) -> Option<PathBuf> {
        match &self.logging.file {
            Some(file) => Some(PathBuf::from(file)),
            None => dirs::cache_dir().map(|dir| dir.join("duo").join("duo.log")),
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
