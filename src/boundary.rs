//! The capabilities the core needs from whatever presents it to the user.
//!
//! Every method may suspend until the user answers. The core never issues a
//! second call before the previous one has returned.

use crate::panel::DualPanelState;

#[allow(async_fn_in_trait)]
pub trait UserInterface {
    /// Redraw after a state change.
    async fn render(&mut self, state: &DualPanelState);

    /// Ask a yes/no question. Nothing may be mutated before this returns `true`.
    async fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Show an informational message and wait for it to be dismissed.
    async fn notify(&mut self, title: &str, message: &str);

    /// Let the user choose one option; `None` when cancelled or `options` is empty.
    async fn pick_from_list(&mut self, title: &str, options: &[String]) -> Option<String>;

    /// Ask for a line of text; `None` when cancelled.
    async fn ask_text(&mut self, title: &str, label: &str) -> Option<String>;
}
