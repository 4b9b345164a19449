use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing::Level;

use crate::error::{AppError, Result};

/// Parse a level name ("info", "DEBUG", ...).
pub fn parse_level(name: &str) -> Result<Level> {
    Level::from_str(name.trim())
        .map_err(|_| AppError::Config(format!("unknown log level '{}'", name)))
}

/// Send `tracing` output to `path`, appending. The terminal belongs to the UI,
/// so nothing is ever written to stdout/stderr.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let level = parse_level(level)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| AppError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" warn ").unwrap(), Level::WARN);
    }

    #[test]
    fn rejects_unknown_level() {
        let err = parse_level("chatty").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn bad_level_fails_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("duo.log");
        assert!(init(&path, "nope").is_err());
        assert!(!path.exists());
    }
}
