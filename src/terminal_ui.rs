//! Terminal implementation of [`UserInterface`].
//!
//! Each prompt runs its own key loop over the shared event channel, drawing the
//! last rendered panel state underneath the modal. Terminal errors end the
//! prompt as if it had been cancelled.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::boundary::UserInterface;
use crate::components::dialog::{InputState, Modal};
use crate::config::AppConfig;
use crate::error::Result;
use crate::event::{Event, EventHandler};
use crate::panel::{DualPanelState, PanelSide};
use crate::tui::Tui;
use crate::ui;

pub struct TerminalUi<'a> {
    tui: &'a mut Tui,
    events: &'a mut EventHandler,
    config: &'a AppConfig,
    backdrop: DualPanelState,
}

impl<'a> TerminalUi<'a> {
    pub fn new(
        tui: &'a mut Tui,
        events: &'a mut EventHandler,
        config: &'a AppConfig,
        backdrop: DualPanelState,
    ) -> Self {
        Self {
            tui,
            events,
            config,
            backdrop,
        }
    }

    fn draw(&mut self, modal: Option<&Modal>) -> Result<()> {
        let size = self.tui.terminal_mut().size()?;
        let rows = ui::panel_rows(size.height);
        for side in [PanelSide::Left, PanelSide::Right] {
            self.backdrop.panel_mut(side).update_scroll(rows);
        }
        let backdrop = &self.backdrop;
        let config = self.config;
        self.tui
            .terminal_mut()
            .draw(|frame| ui::render(frame, backdrop, config, None, modal))?;
        Ok(())
    }

    /// Show `modal` until `on_key` produces an answer.
    async fn run_modal<T>(
        &mut self,
        mut modal: Modal,
        mut on_key: impl FnMut(&mut Modal, KeyEvent) -> Option<T>,
    ) -> Result<T> {
        loop {
            self.draw(Some(&modal))?;
            match self.events.next().await? {
                Event::Key(key) => {
                    if let Some(answer) = on_key(&mut modal, key) {
                        return Ok(answer);
                    }
                }
                Event::Tick | Event::Resize(_, _) => {}
            }
        }
    }
}

fn confirm_key(modal: &mut Modal, key: KeyEvent) -> Option<bool> {
    let Modal::Confirm { yes_selected, .. } = modal else {
        return Some(false);
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        KeyCode::Enter => Some(*yes_selected),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
            *yes_selected = !*yes_selected;
            None
        }
        _ => None,
    }
}

fn message_key(_modal: &mut Modal, key: KeyEvent) -> Option<()> {
    matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
    )
    .then_some(())
}

/// `Some(None)` is a cancel, `Some(Some(i))` picks option `i`.
fn pick_key(modal: &mut Modal, key: KeyEvent) -> Option<Option<usize>> {
    let Modal::Pick {
        options, selected, ..
    } = modal
    else {
        return Some(None);
    };
    let last = options.len().saturating_sub(1);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *selected = selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            *selected = (*selected + 1).min(last);
            None
        }
        KeyCode::Home => {
            *selected = 0;
            None
        }
        KeyCode::End => {
            *selected = last;
            None
        }
        KeyCode::PageUp => {
            *selected = selected.saturating_sub(10);
            None
        }
        KeyCode::PageDown => {
            *selected = (*selected + 10).min(last);
            None
        }
        KeyCode::Enter => Some(Some(*selected)),
        KeyCode::Esc => Some(None),
        _ => None,
    }
}

fn input_key(modal: &mut Modal, key: KeyEvent) -> Option<Option<String>> {
    let Modal::Input { state, .. } = modal else {
        return Some(None);
    };
    match key.code {
        KeyCode::Enter => Some(Some(state.input.clone())),
        KeyCode::Esc => Some(None),
        KeyCode::Char(c) => {
            state.insert_char(c);
            None
        }
        KeyCode::Backspace => {
            state.delete_char();
            None
        }
        KeyCode::Left => {
            state.move_left();
            None
        }
        KeyCode::Right => {
            state.move_right();
            None
        }
        KeyCode::Home => {
            state.home();
            None
        }
        KeyCode::End => {
            state.end();
            None
        }
        _ => None,
    }
}

impl UserInterface for TerminalUi<'_> {
    async fn render(&mut self, state: &DualPanelState) {
        self.backdrop = state.clone();
        if let Err(e) = self.draw(None) {
            warn!(error = %e, "redraw failed");
        }
    }

    async fn confirm(&mut self, title: &str, message: &str) -> bool {
        let modal = Modal::Confirm {
            title: title.to_string(),
            message: message.to_string(),
            yes_selected: true,
        };
        self.run_modal(modal, confirm_key).await.unwrap_or_else(|e| {
            warn!(error = %e, "confirmation aborted");
            false
        })
    }

    async fn notify(&mut self, title: &str, message: &str) {
        let modal = Modal::Message {
            title: title.to_string(),
            message: message.to_string(),
        };
        if let Err(e) = self.run_modal(modal, message_key).await {
            warn!(error = %e, "message dialog aborted");
        }
    }

    async fn pick_from_list(&mut self, title: &str, options: &[String]) -> Option<String> {
        if options.is_empty() {
            return None;
        }
        let modal = Modal::Pick {
            title: title.to_string(),
            options: options.to_vec(),
            selected: 0,
        };
        match self.run_modal(modal, pick_key).await {
            Ok(choice) => choice.and_then(|i| options.get(i).cloned()),
            Err(e) => {
                warn!(error = %e, "list selection aborted");
                None
            }
        }
    }

    async fn ask_text(&mut self, title: &str, label: &str) -> Option<String> {
        let modal = Modal::Input {
            title: title.to_string(),
            label: label.to_string(),
            state: InputState::default(),
        };
        self.run_modal(modal, input_key).await.unwrap_or_else(|e| {
            warn!(error = %e, "text prompt aborted");
            None
        })
    }
}
