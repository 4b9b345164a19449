use std::path::{Path, PathBuf};

use crate::fs::listing::{self, DirectoryEntry};

/// Identifies one of the two panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelSide {
    #[default]
    Left,
    Right,
}

impl PanelSide {
    pub fn other(self) -> Self {
        match self {
            PanelSide::Left => PanelSide::Right,
            PanelSide::Right => PanelSide::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelSide::Left => "Left",
            PanelSide::Right => "Right",
        }
    }

    fn index(self) -> usize {
        match self {
            PanelSide::Left => 0,
            PanelSide::Right => 1,
        }
    }
}

/// One directory view: where it points, what it lists, which row is highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDescriptor {
    pub current_path: PathBuf,
    pub entries: Vec<DirectoryEntry>,
    /// `None` only when `entries` is empty.
    pub selected_index: Option<usize>,
    /// First visible row, maintained by the renderer.
    pub scroll_offset: usize,
}

impl PanelDescriptor {
    /// Point a new panel at `path` and list it.
    pub fn open(path: &Path) -> Self {
        let mut panel = Self {
            current_path: path.to_path_buf(),
            entries: Vec::new(),
            selected_index: None,
            scroll_offset: 0,
        };
        panel.reload();
        panel.selected_index = panel.first_index();
        panel
    }

    fn first_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    /// Re-list `current_path`, keeping the selection as close as possible.
    pub fn reload(&mut self) {
        self.entries = listing::list(&self.current_path);
        self.selected_index = match (self.selected_index, self.entries.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    /// Point at a new directory and start the cursor at the top.
    pub fn change_directory(&mut self, path: PathBuf) {
        self.current_path = path;
        self.entries = listing::list(&self.current_path);
        self.selected_index = self.first_index();
        self.scroll_offset = 0;
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    /// Keep the selected row inside a window of `visible_height` rows.
    pub fn update_scroll(&mut self, visible_height: usize) {
        let Some(selected) = self.selected_index else {
            self.scroll_offset = 0;
            return;
        };
        if visible_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + visible_height {
            self.scroll_offset = selected + 1 - visible_height;
        }
    }
}

/// The two panels plus the active-panel indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualPanelState {
    panels: [PanelDescriptor; 2],
    active: PanelSide,
}

impl DualPanelState {
    /// Both panels start on the same directory, left panel active.
    pub fn new(initial: &Path) -> Self {
        let panel = PanelDescriptor::open(initial);
        Self {
            panels: [panel.clone(), panel],
            active: PanelSide::Left,
        }
    }

    pub fn active_side(&self) -> PanelSide {
        self.active
    }

    pub fn panel(&self, side: PanelSide) -> &PanelDescriptor {
        &self.panels[side.index()]
    }

    pub fn panel_mut(&mut self, side: PanelSide) -> &mut PanelDescriptor {
        &mut self.panels[side.index()]
    }

    pub fn active(&self) -> &PanelDescriptor {
        self.panel(self.active)
    }

    pub fn active_mut(&mut self) -> &mut PanelDescriptor {
        self.panel_mut(self.active)
    }

    pub fn inactive(&self) -> &PanelDescriptor {
        self.panel(self.active.other())
    }

    /// Flip the active panel. Neither panel's contents change.
    pub fn toggle_active(&mut self) {
        self.active = self.active.other();
    }
}
