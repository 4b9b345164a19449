use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

/// Single-line text input with a byte-indexed cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pub input: String,
    pub cursor_position: usize,
}

impl InputState {
    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    /// Move cursor left by one character.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn end(&mut self) {
        self.cursor_position = self.input.len();
    }
}

/// A modal prompt drawn over the panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Confirm {
        title: String,
        message: String,
        yes_selected: bool,
    },
    Message {
        title: String,
        message: String,
    },
    Pick {
        title: String,
        options: Vec<String>,
        selected: usize,
    },
    Input {
        title: String,
        label: String,
        state: InputState,
    },
}

/// Dialog widget that renders a centered modal overlay.
pub struct DialogWidget<'a> {
    modal: &'a Modal,
}

impl<'a> DialogWidget<'a> {
    pub fn new(modal: &'a Modal) -> Self {
        Self { modal }
    }

    /// Calculate a centered rectangle within the given area.
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect::new(x, y, w, h)
    }
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.modal {
            Modal::Confirm {
                title,
                message,
                yes_selected,
            } => render_confirm_dialog(title, message, *yes_selected, area, buf),
            Modal::Message { title, message } => render_message_dialog(title, message, area, buf),
            Modal::Pick {
                title,
                options,
                selected,
            } => render_pick_dialog(title, options, *selected, area, buf),
            Modal::Input {
                title,
                label,
                state,
            } => render_input_dialog(title, label, state, area, buf),
        }
    }
}

/// Draw the frame of a dialog sized for `lines` body lines and return its inner area.
fn dialog_frame(
    title: &str,
    lines: &[&str],
    extra_height: u16,
    border: Color,
    area: Rect,
    buf: &mut Buffer,
) -> Rect {
    let longest = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let dialog_width = (longest + 6).max(40).min(area.width.saturating_sub(4));
    let dialog_height = (lines.len() as u16 + extra_height + 2).min(area.height.saturating_sub(2));
    let rect = DialogWidget::centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);
    inner
}

fn render_hint(hint: &str, inner: Rect, buf: &mut Buffer) {
    if inner.height < 2 {
        return;
    }
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    let hint_line = Line::from(Span::styled(hint, hint_style));
    buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
}

fn render_body(lines: &[&str], style: Style, inner: Rect, buf: &mut Buffer) {
    for (i, text) in lines.iter().enumerate() {
        if i as u16 >= inner.height.saturating_sub(2) {
            break;
        }
        let line = Line::from(Span::styled(*text, style));
        buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
    }
}

fn render_confirm_dialog(
    title: &str,
    message: &str,
    yes_selected: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let lines: Vec<&str> = message.lines().collect();
    let inner = dialog_frame(title, &lines, 2, Color::Yellow, area, buf);
    if inner.height == 0 || inner.width == 0 {
        return;
    }
    render_body(&lines, Style::default().fg(Color::White), inner, buf);

    let button = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Yellow))
        }
    };
    let buttons = Line::from(vec![
        button(" Yes ", yes_selected),
        Span::raw("   "),
        button(" No ", !yes_selected),
        Span::styled(
            "   [y/n] [←/→] [Enter]",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    if inner.height >= 2 {
        buf.set_line(inner.x, inner.y + inner.height - 1, &buttons, inner.width);
    }
}

fn render_message_dialog(title: &str, message: &str, area: Rect, buf: &mut Buffer) {
    let lines: Vec<&str> = message.lines().collect();
    let is_error = title.ends_with("Error");
    let border = if is_error { Color::Red } else { Color::Cyan };
    let inner = dialog_frame(title, &lines, 2, border, area, buf);
    if inner.height == 0 || inner.width == 0 {
        return;
    }
    let style = if is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };
    render_body(&lines, style, inner, buf);
    render_hint("[Enter/Esc] Dismiss", inner, buf);
}

fn render_pick_dialog(title: &str, options: &[String], selected: usize, area: Rect, buf: &mut Buffer) {
    let lines: Vec<&str> = options.iter().map(String::as_str).collect();
    let inner = dialog_frame(title, &lines, 2, Color::Cyan, area, buf);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let visible = inner.height.saturating_sub(2) as usize;
    let start = if visible == 0 {
        0
    } else {
        selected.saturating_sub(visible - 1)
    };
    for (row, (idx, option)) in options.iter().enumerate().skip(start).take(visible).enumerate() {
        let style = if idx == selected {
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let line = Line::from(Span::styled(option.as_str(), style));
        buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
    }
    render_hint("[↑/↓] Move  [Enter] Open  [Esc] Cancel", inner, buf);
}

fn render_input_dialog(title: &str, label: &str, state: &InputState, area: Rect, buf: &mut Buffer) {
    let inner = dialog_frame(title, &[label, ""], 1, Color::Cyan, area, buf);
    if inner.height == 0 || inner.width == 0 {
        return;
    }
    let label_line = Line::from(Span::styled(label, Style::default().fg(Color::Yellow)));
    buf.set_line(inner.x, inner.y, &label_line, inner.width);

    // Render input line with cursor
    let input = &state.input;
    let cursor_pos = state.cursor_position;
    let max_width = inner.width as usize;

    let (before, cursor_char, after) = match input[cursor_pos..].chars().next() {
        Some(ch) => {
            let end = cursor_pos + ch.len_utf8();
            (&input[..cursor_pos], &input[cursor_pos..end], &input[end..])
        }
        None => (input.as_str(), " ", ""),
    };

    // Truncate from left if input is too long
    let before_chars = before.chars().count();
    let before_display: String = if before_chars > max_width.saturating_sub(2) {
        before
            .chars()
            .skip(before_chars - max_width.saturating_sub(2))
            .collect()
    } else {
        before.to_string()
    };

    let input_style = Style::default().fg(Color::White);
    let cursor_style = Style::default()
        .bg(Color::White)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(before_display, input_style),
        Span::styled(cursor_char, cursor_style),
        Span::styled(after, input_style),
    ]);
    if inner.height > 1 {
        buf.set_line(inner.x, inner.y + 1, &line, inner.width);
    }
    render_hint("[Enter] Confirm  [Esc] Cancel", inner, buf);
}
