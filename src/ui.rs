use std::time::SystemTime;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::components::dialog::{DialogWidget, Modal};
use crate::components::format_timestamp;
use crate::components::panel::PanelWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::config::AppConfig;
use crate::panel::{DualPanelState, PanelSide};

/// Rows available to a panel's entry list in a terminal `height` rows tall:
/// one row for the status bar and two for the panel border.
pub fn panel_rows(height: u16) -> usize {
    height.saturating_sub(3) as usize
}

/// Render both panels, the status bar and an optional modal on top.
///
/// Scroll offsets are expected to be up to date for `panel_rows(frame height)`.
pub fn render(
    frame: &mut Frame,
    state: &DualPanelState,
    config: &AppConfig,
    status: Option<(&str, bool)>,
    modal: Option<&Modal>,
) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let left_width = config.left_panel_width();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_width),
            Constraint::Percentage(100 - left_width),
        ])
        .split(rows[0]);

    for (side, column) in [(PanelSide::Left, columns[0]), (PanelSide::Right, columns[1])] {
        let widget = PanelWidget::new(state.panel(side), side, state.active_side() == side)
            .columns(config.name_width(), config.size_width(), config.date_format());
        frame.render_widget(widget, column);
    }

    let clock = config
        .show_date_time()
        .then(|| format_timestamp(SystemTime::now(), config.date_time_format()));
    let mut status_bar =
        StatusBarWidget::new(config.title(), config.version(), config.function_keys());
    if let Some(clock) = clock.as_deref() {
        status_bar = status_bar.clock(clock);
    }
    if let Some((msg, is_error)) = status {
        status_bar = status_bar.status_message(msg, is_error);
    }
    frame.render_widget(status_bar, rows[1]);

    if let Some(modal) = modal {
        frame.render_widget(DialogWidget::new(modal), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::TempDir;

    fn draw(state: &DualPanelState, modal: Option<&Modal>) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let config = AppConfig::default();
        terminal
            .draw(|frame| render(frame, state, &config, None, modal))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn panel_rows_reserves_status_and_borders() {
        assert_eq!(panel_rows(24), 21);
        assert_eq!(panel_rows(2), 0);
    }

    #[test]
    fn renders_both_panels_and_status_bar() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        let state = DualPanelState::new(tmp.path());

        let content = draw(&state, None);
        assert!(content.contains("Left:"));
        assert!(content.contains("Right:"));
        assert_eq!(content.matches("notes.txt").count(), 2);
        assert!(content.contains("F5=Copy"));
    }

    #[test]
    fn modal_is_drawn_over_panels() {
        let tmp = TempDir::new().unwrap();
        let state = DualPanelState::new(tmp.path());
        let modal = Modal::Message {
            title: "No Selection".into(),
            message: "Please select a file or folder to copy.".into(),
        };

        let content = draw(&state, Some(&modal));
        assert!(content.contains("No Selection"));
        assert!(content.contains("Please select a file or folder to copy."));
    }
}
