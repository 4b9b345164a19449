use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::boundary::UserInterface;
use crate::config::AppConfig;
use crate::error::ErrorKind;
use crate::fs::drives;
use crate::fs::listing::EntryKind;
use crate::fs::search::{self, SearchHit, DEFAULT_SEARCH_LIMIT};
use crate::navigation::NavigationEngine;
use crate::orchestrator::{OperationOrchestrator, OperationOutcome};

/// Seconds a status message stays in the status bar.
const STATUS_MESSAGE_SECS: u64 = 3;

const HELP_TEXT: &str = "NAVIGATION
  Up / Down        Move the cursor
  Enter            Open directory (.. goes up)
  Backspace        Go up one directory level
  Tab              Switch between left/right panels
  Home / End       First / last entry
  PgUp / PgDn      Move one page
  Ctrl+R           Refresh both panels

FILE OPERATIONS
  F5               Copy selected item to the other panel
  F6               Move selected item to the other panel
  F8 / Delete      Delete selected item

SYSTEM
  F1               Show this help
  F3               Search below the active panel
  Ctrl+D           Change drive in the active panel
  F10 / Esc        Exit (with confirmation)
  Ctrl+C           Exit immediately

Directories are shown in [square brackets].";

/// Application state: the dual-panel engine plus adapter-level state.
pub struct App {
    pub engine: NavigationEngine,
    orchestrator: OperationOrchestrator,
    pub should_quit: bool,
    /// Transient status bar message: text, error flag and creation time.
    pub status_message: Option<(String, bool, Instant)>,
    /// Entry rows visible in a panel, used for paging.
    pub page_rows: usize,
    title: String,
    confirm_exit: bool,
}

impl App {
    pub fn new(path: &Path, config: &AppConfig) -> Self {
        Self {
            engine: NavigationEngine::new(path),
            orchestrator: OperationOrchestrator::new(),
            should_quit: false,
            status_message: None,
            page_rows: 10,
            title: config.title().to_string(),
            confirm_exit: config.confirm_exit(),
        }
    }

    /// Set a transient status message.
    pub fn set_status_message(&mut self, msg: String, is_error: bool) {
        self.status_message = Some((msg, is_error, Instant::now()));
    }

    /// Clear the status message once it has been displayed long enough.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, _, ref created)) = self.status_message {
            if created.elapsed().as_secs() >= STATUS_MESSAGE_SECS {
                self.status_message = None;
            }
        }
    }

    /// Quit the application immediately.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Go to the parent directory and put the cursor on the directory just left.
    pub fn go_up(&mut self) {
        let before = self.engine.current_path().to_path_buf();
        self.engine.navigate_up();
        if self.engine.current_path() != before {
            if let Some(name) = before.file_name() {
                self.engine.select_entry_named(&name.to_string_lossy());
            }
        }
    }

    /// Enter the highlighted directory; `..` behaves like [`App::go_up`].
    pub fn open_selected(&mut self) {
        let on_parent_marker = self
            .engine
            .state()
            .active()
            .selected_entry()
            .is_some_and(|e| e.kind == EntryKind::ParentMarker);
        if on_parent_marker {
            self.go_up();
        } else {
            self.engine.navigate_into();
        }
    }

    /// Re-list both panels.
    pub fn refresh(&mut self) {
        let active = self.engine.active_side();
        self.engine.refresh_panel(active);
        self.engine.refresh_panel(active.other());
    }

    pub async fn copy_selected<U: UserInterface>(&mut self, ui: &mut U) {
        let outcome = self.orchestrator.copy_selected(&mut self.engine, ui).await;
        self.finish_operation(outcome, ui).await;
    }

    pub async fn move_selected<U: UserInterface>(&mut self, ui: &mut U) {
        let outcome = self.orchestrator.move_selected(&mut self.engine, ui).await;
        self.finish_operation(outcome, ui).await;
    }

    pub async fn delete_selected<U: UserInterface>(&mut self, ui: &mut U) {
        let outcome = self.orchestrator.delete_selected(&mut self.engine, ui).await;
        self.finish_operation(outcome, ui).await;
    }

    /// The active panel was refreshed by the operation; the other panel may
    /// show the destination or the removed source, so it is refreshed too.
    async fn finish_operation<U: UserInterface>(&mut self, outcome: OperationOutcome, ui: &mut U) {
        match outcome.error_kind {
            None if outcome.succeeded => {
                let inactive = self.engine.active_side().other();
                self.engine.refresh_panel(inactive);
                ui.render(self.engine.state()).await;
                self.set_status_message(outcome.message, false);
            }
            None => self.set_status_message(outcome.message, false),
            // the dialog already asked for a selection
            Some(ErrorKind::NoSelection) => {}
            Some(_) => {
                let status = outcome.message.lines().collect::<Vec<_>>().join(" ");
                self.set_status_message(status, true);
            }
        }
    }

    /// Ask for a name fragment, search below the active panel and jump to the
    /// chosen hit.
    pub async fn search<U: UserInterface>(&mut self, ui: &mut U) {
        let Some(term) = ui.ask_text("Search Files", "Search for:").await else {
            return;
        };
        let term = term.trim().to_string();
        if term.is_empty() {
            return;
        }

        let root = self.engine.current_path().to_path_buf();
        let hits = {
            let root = root.clone();
            let term = term.clone();
            tokio::task::spawn_blocking(move || search::search(&root, &term, DEFAULT_SEARCH_LIMIT))
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "search task failed");
                    Vec::new()
                })
        };
        info!(root = %root.display(), term = %term, hits = hits.len(), "search");

        if hits.is_empty() {
            ui.notify("Search", "No files found").await;
            return;
        }

        let labels: Vec<String> = hits.iter().map(SearchHit::label).collect();
        let title = format!("Search Results for '{}'", term);
        let Some(choice) = ui.pick_from_list(&title, &labels).await else {
            return;
        };
        let Some(hit) = hits.iter().find(|h| h.label() == choice) else {
            return;
        };

        let (dir, file) = hit.target_in(&root);
        self.engine.navigate_to_path(&dir);
        if let Some(name) = file {
            self.engine.select_entry_named(&name);
        }
        ui.render(self.engine.state()).await;
    }

    /// Let the user pick a drive or mount point for the active panel.
    pub async fn change_drive<U: UserInterface>(&mut self, ui: &mut U) {
        let available = tokio::task::spawn_blocking(drives::list_available_drives)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "drive enumeration failed");
                Vec::new()
            });
        if available.is_empty() {
            ui.notify("Select Drive", "No drives available").await;
            return;
        }
        if let Some(drive) = ui.pick_from_list("Select Drive", &available).await {
            self.engine.navigate_to_path(Path::new(&drive));
            ui.render(self.engine.state()).await;
        }
    }

    pub async fn show_help<U: UserInterface>(&mut self, ui: &mut U) {
        let title = format!("{} Help & Shortcuts", self.title);
        ui.notify(&title, HELP_TEXT).await;
    }

    /// Quit, asking first unless exit confirmation is turned off.
    pub async fn request_exit<U: UserInterface>(&mut self, ui: &mut U) {
        if !self.confirm_exit {
            self.quit();
            return;
        }
        let title = format!("Exit {}", self.title);
        let message = format!("Are you sure you want to exit {}?", self.title);
        if ui.confirm(&title, &message).await {
            self.quit();
        }
    }
}
