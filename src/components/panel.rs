use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::{fit, format_timestamp};
use crate::fs::listing::{DirectoryEntry, EntryKind};
use crate::panel::{PanelDescriptor, PanelSide};

/// Renders one panel: a bordered list of entries with name, size and date columns.
pub struct PanelWidget<'a> {
    panel: &'a PanelDescriptor,
    side: PanelSide,
    is_active: bool,
    name_width: usize,
    size_width: usize,
    date_format: &'a str,
}

impl<'a> PanelWidget<'a> {
    pub fn new(panel: &'a PanelDescriptor, side: PanelSide, is_active: bool) -> Self {
        Self {
            panel,
            side,
            is_active,
            name_width: crate::config::DEFAULT_NAME_WIDTH,
            size_width: crate::config::DEFAULT_SIZE_WIDTH,
            date_format: crate::config::DEFAULT_DATE_FORMAT,
        }
    }

    pub fn columns(mut self, name_width: usize, size_width: usize, date_format: &'a str) -> Self {
        self.name_width = name_width;
        self.size_width = size_width;
        self.date_format = date_format;
        self
    }

    /// Text of one row. Directories are bracketed, files show their size.
    fn row_text(&self, entry: &DirectoryEntry, width: usize) -> String {
        let name = match entry.kind {
            EntryKind::Directory => format!("[{}]", entry.name),
            _ => entry.name.clone(),
        };
        let size = match entry.kind {
            EntryKind::File => entry.size.to_string(),
            EntryKind::Directory => "<DIR>".to_string(),
            EntryKind::ParentMarker | EntryKind::Placeholder => String::new(),
        };
        let date = entry
            .modified
            .map(|t| format_timestamp(t, self.date_format))
            .unwrap_or_default();

        let name_width = self.name_width.min(width);
        let mut row = fit(&name, name_width);
        let remaining = width.saturating_sub(name_width);
        if remaining > self.size_width {
            row.push_str(&format!(" {:>w$}", size, w = self.size_width.saturating_sub(1)));
            let remaining = remaining - self.size_width;
            if remaining > 1 && !date.is_empty() {
                row.push(' ');
                row.push_str(&fit(&date, remaining - 1));
            }
        }
        row
    }

    fn entry_style(&self, entry: &DirectoryEntry, selected: bool) -> Style {
        if selected && self.is_active {
            return Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD);
        }
        let base = match entry.kind {
            EntryKind::Directory | EntryKind::ParentMarker => Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            EntryKind::File => Style::default().fg(Color::White),
            EntryKind::Placeholder => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::ITALIC),
        };
        if selected {
            base.add_modifier(Modifier::UNDERLINED)
        } else {
            base
        }
    }
}

impl<'a> Widget for PanelWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(
                " {}: {} ",
                self.side.label(),
                self.panel.current_path.display()
            ))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let visible_height = inner.height as usize;
        if visible_height == 0 || inner.width == 0 {
            return;
        }

        let rows = self
            .panel
            .entries
            .iter()
            .enumerate()
            .skip(self.panel.scroll_offset)
            .take(visible_height);

        for (i, (idx, entry)) in rows.enumerate() {
            let selected = self.panel.selected_index == Some(idx);
            let text = self.row_text(entry, inner.width as usize);
            let line = Line::from(Span::styled(text, self.entry_style(entry, selected)));
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}
