use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Logging or configuration could not be set up.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure categories reported back to the user for file operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    /// Never produced by the executor: existing destinations are overwritten.
    AlreadyExists,
    IoFailure,
    /// No item was highlighted when the command was issued.
    NoSelection,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Not found",
            ErrorKind::AccessDenied => "Access denied",
            ErrorKind::AlreadyExists => "Already exists",
            ErrorKind::IoFailure => "I/O failure",
            ErrorKind::NoSelection => "No selection",
        }
    }
}

impl From<std::io::ErrorKind> for ErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
            std::io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
            _ => ErrorKind::IoFailure,
        }
    }
}

impl AppError {
    /// Classify this error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Io(e) => e.kind().into(),
            AppError::InvalidPath(_) => ErrorKind::NotFound,
            AppError::Terminal(_) | AppError::Config(_) => ErrorKind::IoFailure,
        }
    }

    /// Message without the variant prefix, suitable for a dialog body.
    pub fn detail(&self) -> String {
        match self {
            AppError::Io(e) => e.to_string(),
            AppError::Terminal(msg) | AppError::InvalidPath(msg) | AppError::Config(msg) => {
                msg.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn invalid_path_error_display() {
        let err = AppError::InvalidPath("/nonexistent".into());
        assert_eq!(err.to_string(), "Invalid path: /nonexistent");
    }

    #[test]
    fn io_kinds_map_to_report_kinds() {
        let cases = [
            (std::io::ErrorKind::NotFound, ErrorKind::NotFound),
            (std::io::ErrorKind::PermissionDenied, ErrorKind::AccessDenied),
            (std::io::ErrorKind::AlreadyExists, ErrorKind::AlreadyExists),
            (std::io::ErrorKind::InvalidInput, ErrorKind::IoFailure),
            (std::io::ErrorKind::Other, ErrorKind::IoFailure),
        ];
        for (io_kind, expected) in cases {
            let err: AppError = std::io::Error::new(io_kind, "x").into();
            assert_eq!(err.kind(), expected);
        }
    }

    #[test]
    fn detail_strips_variant_prefix() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.detail(), "disk full");
        assert_eq!(AppError::Config("bad level".into()).detail(), "bad level");
    }
}
