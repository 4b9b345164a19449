use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::boundary::UserInterface;

/// Handle a key event from the main panel view.
pub async fn handle_key_event<U: UserInterface>(app: &mut App, key: KeyEvent, ui: &mut U) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit(),
            KeyCode::Char('d') => app.change_drive(ui).await,
            KeyCode::Char('r') => app.refresh(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Navigation
        KeyCode::Up => app.engine.select_previous(),
        KeyCode::Down => app.engine.select_next(),
        KeyCode::Home => app.engine.select_first(),
        KeyCode::End => app.engine.select_last(),
        KeyCode::PageUp => app.engine.page_up(app.page_rows),
        KeyCode::PageDown => app.engine.page_down(app.page_rows),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Backspace => app.go_up(),
        KeyCode::Tab | KeyCode::BackTab => app.engine.switch_panel(),

        // File operations
        KeyCode::F(5) => app.copy_selected(ui).await,
        KeyCode::F(6) => app.move_selected(ui).await,
        KeyCode::F(8) | KeyCode::Delete => app.delete_selected(ui).await,

        // System
        KeyCode::F(1) => app.show_help(ui).await,
        KeyCode::F(3) => app.search(ui).await,
        KeyCode::F(10) | KeyCode::Esc => app.request_exit(ui).await,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::testing::ScriptedUi;
    use crate::config::AppConfig;
    use crate::panel::PanelSide;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::write(dir.path().join("alpha").join("inner.txt"), "").unwrap();
        fs::write(dir.path().join("beta.txt"), "b").unwrap();
        let app = App::new(dir.path(), &AppConfig::default());
        (dir, app)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn enter_and_backspace_walk_the_tree() {
        let (dir, mut app) = setup();
        let mut ui = ScriptedUi::default();

        handle_key_event(&mut app, press(KeyCode::Down), &mut ui).await;
        handle_key_event(&mut app, press(KeyCode::Enter), &mut ui).await;
        assert_eq!(app.engine.current_path(), dir.path().join("alpha"));

        handle_key_event(&mut app, press(KeyCode::Backspace), &mut ui).await;
        assert_eq!(app.engine.current_path(), dir.path());
        assert_eq!(
            app.engine.selected_item_path(),
            Some(dir.path().join("alpha"))
        );

        // the engine itself lands on the first entry
        app.engine.navigate_to_path(&dir.path().join("alpha"));
        app.engine.navigate_up();
        assert_eq!(app.engine.state().active().selected_index, Some(0));
        assert_eq!(app.engine.selected_item_path(), None);
    }

    #[tokio::test]
    async fn enter_on_parent_marker_highlights_directory_left() {
        let (dir, mut app) = setup();
        let mut ui = ScriptedUi::default();
        app.engine.navigate_to_path(&dir.path().join("alpha"));
        app.engine.select_first();

        handle_key_event(&mut app, press(KeyCode::Enter), &mut ui).await;
        assert_eq!(app.engine.current_path(), dir.path());
        assert_eq!(
            app.engine.selected_item_path(),
            Some(dir.path().join("alpha"))
        );
    }

    #[tokio::test]
    async fn tab_switches_panels() {
        let (_dir, mut app) = setup();
        let mut ui = ScriptedUi::default();
        handle_key_event(&mut app, press(KeyCode::Tab), &mut ui).await;
        assert_eq!(app.engine.active_side(), PanelSide::Right);
        handle_key_event(&mut app, press(KeyCode::Tab), &mut ui).await;
        assert_eq!(app.engine.active_side(), PanelSide::Left);
    }

    #[tokio::test]
    async fn home_end_and_paging_move_the_cursor() {
        let (dir, mut app) = setup();
        let mut ui = ScriptedUi::default();
        handle_key_event(&mut app, press(KeyCode::End), &mut ui).await;
        assert_eq!(
            app.engine.selected_item_path(),
            Some(dir.path().join("beta.txt"))
        );
        handle_key_event(&mut app, press(KeyCode::Home), &mut ui).await;
        assert_eq!(app.engine.selected_item_path(), None);
        handle_key_event(&mut app, press(KeyCode::PageDown), &mut ui).await;
        assert_eq!(
            app.engine.selected_item_path(),
            Some(dir.path().join("beta.txt"))
        );
    }

    #[tokio::test]
    async fn f8_and_delete_both_ask_before_deleting() {
        let (dir, mut app) = setup();
        app.engine.select_last();
        let mut ui = ScriptedUi::declining();

        handle_key_event(&mut app, press(KeyCode::F(8)), &mut ui).await;
        handle_key_event(&mut app, press(KeyCode::Delete), &mut ui).await;

        assert_eq!(ui.confirms.len(), 2);
        assert_eq!(ui.confirms[0].0, "Delete file");
        assert!(dir.path().join("beta.txt").exists());
    }

    #[tokio::test]
    async fn f5_without_selection_notifies() {
        let (_dir, mut app) = setup();
        let mut ui = ScriptedUi::accepting();
        handle_key_event(&mut app, press(KeyCode::F(5)), &mut ui).await;
        assert!(ui.confirms.is_empty());
        assert_eq!(ui.notices[0].0, "No Selection");
    }

    #[tokio::test]
    async fn f10_and_esc_request_exit() {
        let (_dir, mut app) = setup();
        let mut ui = ScriptedUi::declining();
        handle_key_event(&mut app, press(KeyCode::Esc), &mut ui).await;
        handle_key_event(&mut app, press(KeyCode::F(10)), &mut ui).await;
        assert_eq!(ui.confirms.len(), 2);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn ctrl_c_quits_without_asking() {
        let (_dir, mut app) = setup();
        let mut ui = ScriptedUi::declining();
        handle_key_event(&mut app, ctrl('c'), &mut ui).await;
        assert!(app.should_quit);
        assert!(ui.confirms.is_empty());
    }

    #[tokio::test]
    async fn ctrl_r_picks_up_new_files() {
        let (dir, mut app) = setup();
        let mut ui = ScriptedUi::default();
        fs::write(dir.path().join("gamma.txt"), "").unwrap();
        handle_key_event(&mut app, ctrl('r'), &mut ui).await;
        for side in [PanelSide::Left, PanelSide::Right] {
            assert!(app
                .engine
                .state()
                .panel(side)
                .entries
                .iter()
                .any(|e| e.name == "gamma.txt"));
        }
    }
}
