use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::fit;

/// Status bar widget: application identity, clock and key hints, or a
/// transient status message that replaces them.
pub struct StatusBarWidget<'a> {
    title: &'a str,
    version: &'a str,
    clock: Option<&'a str>,
    function_keys: &'a str,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(title: &'a str, version: &'a str, function_keys: &'a str) -> Self {
        Self {
            title,
            version,
            clock: None,
            function_keys,
            status_message: None,
            is_error: false,
        }
    }

    pub fn clock(mut self, clock: &'a str) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    fn summary(&self) -> String {
        let mut parts = vec![format!("{} v{}", self.title, self.version)];
        if let Some(clock) = self.clock {
            parts.push(clock.to_string());
        }
        parts.push(self.function_keys.to_string());
        parts.join(" | ")
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default().bg(Color::Red).fg(Color::White)
            } else {
                Style::default().fg(Color::Green)
            };
            let line = Line::from(Span::styled(fit(msg, width), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let line = Line::from(Span::styled(fit(&self.summary(), width), style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
