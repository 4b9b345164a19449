use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::fs::listing::EntryKind;
use crate::panel::{DualPanelState, PanelSide};

/// Applies navigation commands to the dual-panel state.
///
/// Every command acts on the active panel unless it names a side. Commands
/// that cannot make progress (missing target, file selected, already at the
/// root) leave the state untouched.
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    state: DualPanelState,
}

impl NavigationEngine {
    /// Start with both panels on `initial`.
    pub fn new(initial: &Path) -> Self {
        Self {
            state: DualPanelState::new(&normalize(initial)),
        }
    }

    pub fn state(&self) -> &DualPanelState {
        &self.state
    }

    pub fn active_side(&self) -> PanelSide {
        self.state.active_side()
    }

    /// Current directory of the active panel.
    pub fn current_path(&self) -> &Path {
        &self.state.active().current_path
    }

    /// Current directory of the inactive panel, the destination for copy/move.
    pub fn inactive_panel_path(&self) -> &Path {
        &self.state.inactive().current_path
    }

    /// Path of the highlighted entry, if it is a real file or directory.
    pub fn selected_item_path(&self) -> Option<PathBuf> {
        self.state
            .active()
            .selected_entry()
            .filter(|e| e.is_actionable())
            .and_then(|e| e.absolute_path.clone())
    }

    /// Whether the highlighted item is a directory.
    pub fn selected_is_directory(&self) -> bool {
        self.state
            .active()
            .selected_entry()
            .map(|e| e.is_directory())
            .unwrap_or(false)
    }

    /// Open the highlighted entry: `..` goes up, a directory is entered,
    /// anything else is ignored.
    pub fn navigate_into(&mut self) {
        let Some(entry) = self.state.active().selected_entry() else {
            return;
        };
        match entry.kind {
            EntryKind::ParentMarker => self.navigate_up(),
            EntryKind::Directory => {
                if let Some(path) = entry.absolute_path.clone() {
                    self.navigate_to_path(&path);
                }
            }
            EntryKind::File | EntryKind::Placeholder => {}
        }
    }

    /// Go to the parent of the active panel's directory, selecting its first
    /// entry. No-op at the root.
    pub fn navigate_up(&mut self) {
        if let Some(parent) = self.current_path().parent().map(Path::to_path_buf) {
            self.navigate_to_path(&parent);
        }
    }

    /// Point the active panel at `path` if it is an existing directory;
    /// otherwise do nothing. Relative paths resolve against the active panel.
    pub fn navigate_to_path(&mut self, path: &Path) {
        let target = if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.current_path().join(path))
        };
        if !target.is_dir() {
            debug!(path = %target.display(), "navigation target is not a directory");
            return;
        }
        debug!(
            side = self.active_side().label(),
            path = %target.display(),
            "navigate"
        );
        self.state.active_mut().change_directory(target);
    }

    /// Make the other panel active.
    pub fn switch_panel(&mut self) {
        self.state.toggle_active();
    }

    /// Re-list the active panel's directory in place.
    pub fn refresh_active_panel(&mut self) {
        self.refresh_panel(self.active_side());
    }

    /// Re-list either panel's directory in place.
    pub fn refresh_panel(&mut self, side: PanelSide) {
        self.state.panel_mut(side).reload();
    }

    // ── Cursor movement ─────────────────────────────────────────────────────

    fn move_selection(&mut self, delta: isize) {
        let panel = self.state.active_mut();
        let Some(current) = panel.selected_index else {
            return;
        };
        let last = panel.entries.len().saturating_sub(1) as isize;
        let next = (current as isize + delta).clamp(0, last);
        panel.selected_index = Some(next as usize);
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self, rows: usize) {
        self.move_selection(rows.max(1) as isize);
    }

    pub fn page_up(&mut self, rows: usize) {
        self.move_selection(-(rows.max(1) as isize));
    }

    pub fn select_first(&mut self) {
        let panel = self.state.active_mut();
        if !panel.entries.is_empty() {
            panel.selected_index = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        let panel = self.state.active_mut();
        if !panel.entries.is_empty() {
            panel.selected_index = Some(panel.entries.len() - 1);
        }
    }

    /// Move the cursor to the entry called `name`. Returns whether it was found.
    pub fn select_entry_named(&mut self, name: &str) -> bool {
        let panel = self.state.active_mut();
        match panel.entries.iter().position(|e| e.name == name) {
            Some(i) => {
                panel.selected_index = Some(i);
                true
            }
            None => false,
        }
    }

    /// Keep both panels' cursors visible in a window of `visible_height` rows.
    pub fn update_scroll(&mut self, visible_height: usize) {
        for side in [PanelSide::Left, PanelSide::Right] {
            self.state.panel_mut(side).update_scroll(visible_height);
        }
    }
}

/// Remove `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn setup() -> (TempDir, NavigationEngine) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        File::create(dir.path().join("alpha").join("inside.txt")).unwrap();
        File::create(dir.path().join("file_a.txt")).unwrap();
        File::create(dir.path().join("file_b.rs")).unwrap();
        let engine = NavigationEngine::new(dir.path());
        (dir, engine)
    }

    fn names(engine: &NavigationEngine) -> Vec<String> {
        engine
            .state()
            .active()
            .entries
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[test]
    fn initial_listing() {
        let (_dir, engine) = setup();
        assert_eq!(
            names(&engine),
            vec!["..", "alpha", "beta", "file_a.txt", "file_b.rs"]
        );
        assert_eq!(engine.state().active().selected_index, Some(0));
    }

    #[test]
    fn navigate_into_directory() {
        let (dir, mut engine) = setup();
        engine.select_next(); // alpha
        engine.navigate_into();
        assert_eq!(engine.current_path(), dir.path().join("alpha"));
        assert_eq!(names(&engine), vec!["..", "inside.txt"]);
        assert_eq!(engine.state().active().selected_index, Some(0));
    }

    #[test]
    fn navigate_into_parent_marker_goes_up() {
        let (dir, mut engine) = setup();
        engine.navigate_to_path(&dir.path().join("alpha"));
        engine.select_first();
        engine.navigate_into();
        assert_eq!(engine.current_path(), dir.path());
        assert_eq!(names(&engine)[0], "..");
        assert_eq!(engine.state().active().selected_index, Some(0));
    }

    #[test]
    fn navigate_up_matches_navigate_to_parent() {
        let (dir, mut engine) = setup();
        engine.navigate_to_path(&dir.path().join("beta"));
        engine.navigate_up();
        assert_eq!(engine.current_path(), dir.path());
        assert_eq!(engine.state().active().selected_index, Some(0));

        let mut direct = NavigationEngine::new(&dir.path().join("beta"));
        direct.navigate_to_path(dir.path());
        assert_eq!(engine.state().active(), direct.state().active());
    }

    #[test]
    fn navigate_into_file_is_noop() {
        let (_dir, mut engine) = setup();
        engine.select_last(); // file_b.rs
        let before = engine.state().clone();
        engine.navigate_into();
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn navigate_to_path_is_idempotent() {
        let (dir, mut engine) = setup();
        let target = dir.path().join("alpha");
        engine.navigate_to_path(&target);
        let once = engine.state().clone();
        engine.navigate_to_path(&target);
        assert_eq!(engine.state(), &once);
    }

    #[test]
    fn navigate_to_missing_path_is_noop() {
        let (dir, mut engine) = setup();
        engine.select_next();
        let before = engine.state().clone();
        engine.navigate_to_path(&dir.path().join("does_not_exist"));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn navigate_to_file_path_is_noop() {
        let (dir, mut engine) = setup();
        let before = engine.state().clone();
        engine.navigate_to_path(&dir.path().join("file_a.txt"));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn navigate_to_relative_path_resolves_against_active_panel() {
        let (dir, mut engine) = setup();
        engine.navigate_to_path(Path::new("alpha"));
        assert_eq!(engine.current_path(), dir.path().join("alpha"));
        engine.navigate_to_path(Path::new("../beta"));
        assert_eq!(engine.current_path(), dir.path().join("beta"));
    }

    #[test]
    fn navigate_up_at_root_is_noop() {
        let root = Path::new("/");
        if root.is_dir() && root.parent().is_none() {
            let mut engine = NavigationEngine::new(root);
            engine.navigate_up();
            assert_eq!(engine.current_path(), root);
        }
    }

    #[test]
    fn switch_panel_is_its_own_inverse() {
        let (dir, mut engine) = setup();
        engine.navigate_to_path(&dir.path().join("alpha"));
        let before = engine.state().clone();

        engine.switch_panel();
        assert_eq!(engine.active_side(), PanelSide::Right);
        assert_eq!(engine.current_path(), dir.path());
        assert_eq!(engine.inactive_panel_path(), dir.path().join("alpha"));

        engine.switch_panel();
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn navigation_only_affects_active_panel() {
        let (dir, mut engine) = setup();
        engine.switch_panel();
        engine.navigate_to_path(&dir.path().join("beta"));
        assert_eq!(
            engine.state().panel(PanelSide::Left).current_path,
            dir.path()
        );
        assert_eq!(
            engine.state().panel(PanelSide::Right).current_path,
            dir.path().join("beta")
        );
    }

    #[test]
    fn selected_item_path_excludes_parent_marker() {
        let (dir, mut engine) = setup();
        assert_eq!(engine.selected_item_path(), None);
        engine.select_next();
        assert_eq!(engine.selected_item_path(), Some(dir.path().join("alpha")));
        assert!(engine.selected_is_directory());
    }

    #[test]
    fn refresh_picks_up_new_entries_without_moving() {
        let (dir, mut engine) = setup();
        File::create(dir.path().join("new.txt")).unwrap();
        engine.refresh_active_panel();
        assert_eq!(engine.current_path(), dir.path());
        assert!(names(&engine).contains(&"new.txt".to_string()));
    }

    #[test]
    fn cursor_movement_clamps() {
        let (_dir, mut engine) = setup();
        engine.select_previous();
        assert_eq!(engine.state().active().selected_index, Some(0));
        engine.page_down(100);
        assert_eq!(engine.state().active().selected_index, Some(4));
        engine.select_next();
        assert_eq!(engine.state().active().selected_index, Some(4));
        engine.page_up(2);
        assert_eq!(engine.state().active().selected_index, Some(2));
    }

    #[test]
    fn select_entry_named_finds_entry() {
        let (_dir, mut engine) = setup();
        assert!(engine.select_entry_named("file_a.txt"));
        assert_eq!(engine.state().active().selected_index, Some(3));
        assert!(!engine.select_entry_named("nope"));
        assert_eq!(engine.state().active().selected_index, Some(3));
    }

    #[test]
    fn engines_are_independent() {
        let (dir, mut first) = setup();
        let second = NavigationEngine::new(dir.path());
        first.navigate_to_path(&dir.path().join("alpha"));
        assert_eq!(second.current_path(), dir.path());
    }

    #[test]
    fn normalize_strips_dot_components() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
    }
}
