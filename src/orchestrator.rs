use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::boundary::UserInterface;
use crate::error::{AppError, ErrorKind, Result};
use crate::fs::operations;
use crate::navigation::NavigationEngine;

/// The three file operations a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Copy,
    Move,
    Delete,
}

impl OperationKind {
    pub fn title(&self) -> &'static str {
        match self {
            OperationKind::Copy => "Copy",
            OperationKind::Move => "Move",
            OperationKind::Delete => "Delete",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            OperationKind::Copy => "copy",
            OperationKind::Move => "move",
            OperationKind::Delete => "delete",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            OperationKind::Copy => "copied",
            OperationKind::Move => "moved",
            OperationKind::Delete => "deleted",
        }
    }
}

/// A fully resolved operation: what to do, to which item, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub kind: OperationKind,
    pub source: PathBuf,
    /// Required for copy and move, absent for delete.
    pub destination_dir: Option<PathBuf>,
}

impl OperationRequest {
    pub fn copy(source: PathBuf, destination_dir: PathBuf) -> Self {
        Self {
            kind: OperationKind::Copy,
            source,
            destination_dir: Some(destination_dir),
        }
    }

    pub fn move_to(source: PathBuf, destination_dir: PathBuf) -> Self {
        Self {
            kind: OperationKind::Move,
            source,
            destination_dir: Some(destination_dir),
        }
    }

    pub fn delete(source: PathBuf) -> Self {
        Self {
            kind: OperationKind::Delete,
            source,
            destination_dir: None,
        }
    }

    pub fn item_name(&self) -> String {
        item_name(&self.source)
    }

    /// Full path the item will end up at, for copy and move.
    pub fn destination(&self) -> Option<PathBuf> {
        self.destination_dir
            .as_ref()
            .map(|dir| dir.join(self.item_name()))
    }

    fn destination_dir(&self) -> Result<&Path> {
        self.destination_dir.as_deref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no destination directory").into()
        })
    }

    /// Title and body of the prompt shown before anything is touched.
    pub fn confirmation_prompt(&self, is_directory: bool) -> (String, String) {
        let item_type = if is_directory { "folder" } else { "file" };
        let title = format!("{} {}", self.kind.title(), item_type);
        let message = match self.destination() {
            Some(dest) => format!(
                "Are you sure you want to {verb} this {item_type}?\n\n\
                 From: {from}\nTo: {to}\n\n\
                 This will {verb} the {item_type} to the other panel.",
                verb = self.kind.verb(),
                item_type = item_type,
                from = self.source.display(),
                to = dest.display(),
            ),
            None => format!(
                "Are you sure you want to delete this {}?\n\n'{}'\n\nThis action cannot be undone!",
                item_type,
                self.item_name()
            ),
        };
        (title, message)
    }
}

fn item_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Result of one user-issued operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub succeeded: bool,
    pub item_name: String,
    /// Set for every failure; `None` together with `succeeded == false`
    /// means the user declined the confirmation.
    pub error_kind: Option<ErrorKind>,
    pub message: String,
}

impl OperationOutcome {
    fn success(kind: OperationKind, item_name: String) -> Self {
        Self {
            message: format!("'{}' {} successfully!", item_name, kind.past_tense()),
            succeeded: true,
            item_name,
            error_kind: None,
        }
    }

    fn failure(kind: OperationKind, item_name: String, err: &AppError) -> Self {
        Self {
            message: format!("Failed to {} '{}':\n{}", kind.verb(), item_name, err.detail()),
            succeeded: false,
            item_name,
            error_kind: Some(err.kind()),
        }
    }

    fn no_selection(kind: OperationKind) -> Self {
        Self {
            succeeded: false,
            item_name: String::new(),
            error_kind: Some(ErrorKind::NoSelection),
            message: format!("Please select a file or folder to {}.", kind.verb()),
        }
    }

    fn declined(kind: OperationKind, item_name: String) -> Self {
        Self {
            message: format!("{} of '{}' cancelled", kind.title(), item_name),
            succeeded: false,
            item_name,
            error_kind: None,
        }
    }

    pub fn is_declined(&self) -> bool {
        !self.succeeded && self.error_kind.is_none()
    }

    /// Dialog title used when reporting this outcome.
    pub fn title(&self, kind: OperationKind) -> String {
        match self.error_kind {
            None if self.succeeded => format!("{} Successful", kind.title()),
            Some(ErrorKind::NoSelection) => "No Selection".to_string(),
            _ => format!("{} Error", kind.title()),
        }
    }
}

/// Performs a resolved request against the filesystem.
///
/// Runs on a blocking worker thread, hence `Send + 'static`.
pub trait FileExecutor: Clone + Send + 'static {
    /// Returns the path the item now lives at (the removed path for delete).
    fn execute(&self, request: &OperationRequest) -> Result<PathBuf>;
}

/// Executes requests against the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExecutor;

impl FileExecutor for LocalExecutor {
    fn execute(&self, request: &OperationRequest) -> Result<PathBuf> {
        match request.kind {
            OperationKind::Copy => operations::copy(&request.source, request.destination_dir()?),
            OperationKind::Move => {
                operations::move_item(&request.source, request.destination_dir()?)
            }
            OperationKind::Delete => {
                operations::delete(&request.source)?;
                Ok(request.source.clone())
            }
        }
    }
}

/// Turns "copy/move/delete the selected item" into a confirmed, executed,
/// reported filesystem operation.
#[derive(Debug, Clone, Default)]
pub struct OperationOrchestrator<E = LocalExecutor> {
    executor: E,
}

impl OperationOrchestrator<LocalExecutor> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: FileExecutor> OperationOrchestrator<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Copy the highlighted item into the other panel's directory.
    pub async fn copy_selected<U: UserInterface>(
        &self,
        engine: &mut NavigationEngine,
        ui: &mut U,
    ) -> OperationOutcome {
        self.run(OperationKind::Copy, engine, ui).await
    }

    /// Move the highlighted item into the other panel's directory.
    pub async fn move_selected<U: UserInterface>(
        &self,
        engine: &mut NavigationEngine,
        ui: &mut U,
    ) -> OperationOutcome {
        self.run(OperationKind::Move, engine, ui).await
    }

    /// Delete the highlighted item.
    pub async fn delete_selected<U: UserInterface>(
        &self,
        engine: &mut NavigationEngine,
        ui: &mut U,
    ) -> OperationOutcome {
        self.run(OperationKind::Delete, engine, ui).await
    }

    async fn run<U: UserInterface>(
        &self,
        kind: OperationKind,
        engine: &mut NavigationEngine,
        ui: &mut U,
    ) -> OperationOutcome {
        let Some(source) = engine.selected_item_path() else {
            let outcome = OperationOutcome::no_selection(kind);
            ui.notify(&outcome.title(kind), &outcome.message).await;
            return outcome;
        };

        let destination_dir = engine.inactive_panel_path().to_path_buf();
        let request = match kind {
            OperationKind::Copy => OperationRequest::copy(source, destination_dir),
            OperationKind::Move => OperationRequest::move_to(source, destination_dir),
            OperationKind::Delete => OperationRequest::delete(source),
        };

        let (title, message) = request.confirmation_prompt(engine.selected_is_directory());
        if !ui.confirm(&title, &message).await {
            info!(operation = kind.verb(), source = %request.source.display(), "declined");
            return OperationOutcome::declined(kind, request.item_name());
        }

        let outcome = match self.execute(request.clone()).await {
            Ok(_) => {
                info!(
                    operation = kind.verb(),
                    source = %request.source.display(),
                    destination = ?request.destination(),
                    "operation completed"
                );
                OperationOutcome::success(kind, request.item_name())
            }
            Err(e) => {
                warn!(
                    operation = kind.verb(),
                    source = %request.source.display(),
                    kind = e.kind().label(),
                    error = %e,
                    "operation failed"
                );
                OperationOutcome::failure(kind, request.item_name(), &e)
            }
        };

        ui.notify(&outcome.title(kind), &outcome.message).await;
        if outcome.succeeded {
            engine.refresh_active_panel();
            ui.render(engine.state()).await;
        }
        outcome
    }

    /// Run the request on the blocking pool and wait for it.
    async fn execute(&self, request: OperationRequest) -> Result<PathBuf> {
        let executor = self.executor.clone();
        match tokio::task::spawn_blocking(move || executor.execute(&request)).await {
            Ok(result) => result,
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string()).into()),
        }
    }
}
