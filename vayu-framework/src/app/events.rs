use super::{App, DISPLAY_EVENT_DURATION_MS};
use crate::mode::Mode;
use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl App {
    /// dispatch a key event to the handler of the active mode
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // help popup mode has higher priority
        if self.show_help_popup {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => {
                    self.show_help_popup = false;
                    return Ok(());
                }
                KeyCode::Char('q') => {
                    // let 'q' fall through to quit the program
                }
                _ if is_ctrl_c(&key) => {}
                _ => return Ok(()), // ignore other keys when help popup is open
            }
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Filtering => self.handle_filtering_key(key),
            Mode::ColumnManagement => self.handle_column_key(key),
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        log::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_ctrl_c(&key) {
            self.is_exiting = true;
            return Ok(());
        }

        let len = self.filter_engine.len();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let cursor_moved = match key.code {
            KeyCode::Char('q') => {
                log::debug!("Quit key pressed");
                self.is_exiting = true;
                false
            }
            KeyCode::Char('j') | KeyCode::Down => self.viewport.move_down(len),
            KeyCode::Char('k') | KeyCode::Up => self.viewport.move_up(),
            KeyCode::Char('d') if ctrl => self.viewport.page_down(len),
            KeyCode::Char('u') if ctrl => self.viewport.page_up(len),
            KeyCode::PageDown => self.viewport.page_down(len),
            KeyCode::PageUp => self.viewport.page_up(len),
            KeyCode::Char('g') | KeyCode::Home => self.viewport.jump_to_top(len),
            KeyCode::Char('G') | KeyCode::End => self.viewport.jump_to_bottom(len),
            KeyCode::Char('J') => {
                self.scroll_details(true);
                false
            }
            KeyCode::Char('K') => {
                self.scroll_details(false);
                false
            }
            KeyCode::Char('/') => {
                self.set_mode(Mode::Filtering);
                false
            }
            KeyCode::Char('c') => {
                self.columns.reset_cursor();
                self.set_mode(Mode::ColumnManagement);
                false
            }
            KeyCode::Char('s') => {
                self.reverse_view();
                false
            }
            KeyCode::Char('y') => {
                if let Err(e) = self.yank_current_log() {
                    log::debug!("Failed to yank log content: {}", e);
                }
                false
            }
            KeyCode::Char('?') => {
                self.show_help_popup = !self.show_help_popup;
                false
            }
            _ => false,
        };

        if cursor_moved {
            self.update_detail();
        }
        Ok(())
    }

    fn handle_filtering_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_ctrl_c(&key) {
            self.is_exiting = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                // leave input focus, the pattern stays active
                self.set_mode(Mode::Normal);
            }
            KeyCode::Backspace => {
                if self.filter_input.pop().is_some() {
                    self.apply_filter();
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.filter_input.push(c);
                self.apply_filter();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_column_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') | KeyCode::Esc => {
                self.set_mode(Mode::Normal);
            }
            KeyCode::Char('j') | KeyCode::Down => self.columns.cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => self.columns.cursor_up(),
            KeyCode::Char(' ') | KeyCode::Enter => self.columns.toggle_at_cursor(),
            _ => {}
        }
        Ok(())
    }

    fn scroll_details(&mut self, move_down: bool) {
        let lines_count = self.details_block.get_lines_count();
        let current_position = self.details_block.get_scroll_position();
        let last_index = lines_count.saturating_sub(1);

        let new_position = if move_down {
            current_position.saturating_add(1).min(last_index)
        } else {
            current_position.saturating_sub(1)
        };
        self.details_block.set_scroll_position(new_position);
    }

    fn yank_current_log(&mut self) -> Result<()> {
        let Some(line) = self.selected_line() else {
            log::debug!("No log line selected for yanking");
            return Ok(());
        };
        let content = line.raw().to_string();

        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(&content)?;
        log::debug!("Copied {} chars to clipboard", content.len());

        self.set_display_event(
            "Selected log copied to clipboard".to_string(),
            Duration::from_millis(DISPLAY_EVENT_DURATION_MS),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::AppDesc,
        highlight::PlainHighlighter,
        loader::{Loaded, load_from_reader},
    };
    use std::{io::Cursor, sync::Arc};

    fn desc() -> AppDesc {
        AppDesc {
            highlighter: Arc::new(PlainHighlighter),
            ..AppDesc::new()
        }
    }

    fn app_from(input: &str) -> App {
        let loaded = load_from_reader(Cursor::new(input.to_string())).unwrap();
        let mut app = App::new(loaded, &desc());
        app.resize(120, 13); // 10 table rows
        app
    }

    fn numbered(count: usize) -> String {
        (0..count)
            .map(|i| format!("{{\"ts\":\"{}\",\"level\":\"info\",\"msg\":\"line {}\"}}\n", i, i))
            .collect()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code)).unwrap();
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn detail_text(app: &App) -> Vec<String> {
        app.detail_lines().iter().map(|l| l.to_string()).collect()
    }

    fn column_keys(app: &App) -> Vec<String> {
        app.columns().all().iter().map(|c| c.key.clone()).collect()
    }

    fn assert_view_invariants(app: &App) {
        let len = app.filtered().len();
        if len == 0 {
            assert_eq!(app.cursor(), 0);
        } else {
            assert!(app.cursor() < len);
        }
        assert!(app.offset() <= app.cursor());
        assert!(app.cursor() <= app.offset() + app.visible_rows() - 1);
    }

    const TWO_LINES: &str = "{\"ts\":\"1\",\"level\":\"info\",\"msg\":\"a\"}\n{\"ts\":\"2\",\"level\":\"error\",\"msg\":\"b\"}\n";

    #[test]
    fn test_two_line_scenario() {
        let mut app = app_from(TWO_LINES);
        assert_eq!(column_keys(&app), vec!["ts", "level", "msg"]);
        assert_eq!(
            detail_text(&app),
            vec!["{", "  \"level\": \"info\",", "  \"msg\": \"a\",", "  \"ts\": \"1\"", "}"]
        );

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode(), Mode::Filtering);
        type_text(&mut app, "error");
        assert_eq!(app.filtered(), &[1]);
        assert_eq!(app.cursor(), 0);
        assert!(detail_text(&app).contains(&"  \"level\": \"error\",".to_string()));
    }

    #[test]
    fn test_sample_bound_scenario() {
        let mut input = numbered(149);
        input.push_str("{\"ts\":\"149\",\"msg\":\"late\",\"late_key\":true}\n");
        let app = app_from(&input);
        assert_eq!(app.store().len(), 150);
        assert_eq!(column_keys(&app), vec!["ts", "level", "msg"]);
    }

    #[test]
    fn test_live_filter_resets_cursor_and_keeps_pattern_on_exit() {
        let mut app = app_from(&numbered(30));
        for _ in 0..15 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.cursor(), 15);
        assert!(app.offset() > 0);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "line 1");
        assert_eq!(app.filtered().len(), 11); // 1, 10..=19
        assert_eq!((app.cursor(), app.offset()), (0, 0));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::Normal);
        assert_eq!(app.filter_input(), "line 1");
        assert_eq!(app.filtered().len(), 11);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Normal);
        assert_eq!(app.filtered().len(), 11);
    }

    #[test]
    fn test_invalid_pattern_leaves_view_and_cursor_untouched() {
        let mut app = app_from(&numbered(30));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "line");
        press(&mut app, KeyCode::Enter);
        for _ in 0..4 {
            press(&mut app, KeyCode::Down);
        }
        let before = app.filtered().to_vec();
        let detail_before = detail_text(&app);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "[");
        assert_eq!(app.filter_input(), "line[");
        assert_eq!(app.filtered(), before.as_slice());
        assert_eq!(app.cursor(), 4);
        assert_eq!(detail_text(&app), detail_before);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filter_input(), "line");
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_filter_keys_are_text_not_commands() {
        let mut app = app_from(&numbered(5));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "qjkcs");
        assert!(!app.is_exiting());
        assert_eq!(app.mode(), Mode::Filtering);
        assert_eq!(app.filter_input(), "qjkcs");
        assert!(app.filtered().is_empty());
        assert!(app.detail_lines().is_empty());
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_empty_pattern_restores_full_view() {
        let mut app = app_from(&numbered(6));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "line 3");
        assert_eq!(app.filtered(), &[3]);
        for _ in 0.."line 3".len() {
            press(&mut app, KeyCode::Backspace);
        }
        assert_eq!(app.filtered(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reverse_toggle() {
        let mut app = app_from(&numbered(4));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.filtered(), &[3, 2, 1, 0]);
        assert_eq!((app.cursor(), app.offset()), (0, 0));
        assert!(detail_text(&app).contains(&"  \"msg\": \"line 3\",".to_string()));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.filtered(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_navigation_keeps_invariants() {
        let mut app = app_from(&numbered(40));
        let keys = [
            KeyCode::Down,
            KeyCode::Char('j'),
            KeyCode::PageDown,
            KeyCode::Char('G'),
            KeyCode::Up,
            KeyCode::Char('k'),
            KeyCode::PageUp,
            KeyCode::Char('g'),
        ];
        for round in 0..200 {
            let key = keys[(round * 7 + round / 3) % keys.len()];
            press(&mut app, key);
            assert_view_invariants(&app);
            if round % 37 == 0 {
                app.resize(80, (round % 17) as u16);
                assert_view_invariants(&app);
            }
        }
    }

    #[test]
    fn test_cursor_moves_update_detail() {
        let mut app = app_from(&numbered(3));
        press(&mut app, KeyCode::Down);
        assert!(detail_text(&app).contains(&"  \"msg\": \"line 1\",".to_string()));
        press(&mut app, KeyCode::Char('G'));
        assert!(detail_text(&app).contains(&"  \"msg\": \"line 2\",".to_string()));
        press(&mut app, KeyCode::Char('g'));
        assert!(detail_text(&app).contains(&"  \"msg\": \"line 0\",".to_string()));
    }

    #[test]
    fn test_column_management() {
        let mut app = app_from(TWO_LINES);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode(), Mode::ColumnManagement);
        assert_eq!(app.columns().cursor(), 0);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let visible: Vec<&str> = app.columns().visible().map(|c| c.key.as_str()).collect();
        assert_eq!(visible, vec!["ts"]);
        assert_eq!(column_keys(&app), vec!["ts", "level", "msg"]);
        assert_eq!(app.filtered(), &[0, 1]);
        assert_eq!(app.cursor(), 1);

        // 's' and 'j' never reach the normal-mode handler here
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.filtered(), &[0, 1]);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode(), Mode::Normal);
        assert!(!app.is_exiting());

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.columns().cursor(), 0);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Normal);
    }

    #[test]
    fn test_quit_paths() {
        let mut app = app_from(TWO_LINES);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.is_exiting());

        let mut app = app_from(TWO_LINES);
        ctrl(&mut app, 'c');
        assert!(app.is_exiting());

        let mut app = app_from(TWO_LINES);
        press(&mut app, KeyCode::Char('/'));
        ctrl(&mut app, 'c');
        assert!(app.is_exiting());

        let mut app = app_from(TWO_LINES);
        press(&mut app, KeyCode::Char('c'));
        ctrl(&mut app, 'c');
        assert!(!app.is_exiting());
        assert_eq!(app.mode(), Mode::Normal);
    }

    #[test]
    fn test_resize_rerenders_detail_and_keeps_its_scroll() {
        let mut app = app_from(&numbered(3));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('J'));
        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.detail_scroll(), 2);
        let detail_before = detail_text(&app);

        app.resize(60, 6);
        assert_eq!(detail_text(&app), detail_before);
        assert!(detail_text(&app).contains(&"  \"msg\": \"line 1\",".to_string()));
        assert_eq!(app.detail_scroll(), 2);

        // a new selection starts at the top again
        press(&mut app, KeyCode::Down);
        assert_eq!(app.detail_scroll(), 0);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app_from(TWO_LINES);
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        app.handle_key(key).unwrap();
        assert!(!app.is_exiting());
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let mut app = app_from(&numbered(3));
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor(), 0);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor(), 1);
    }

    #[test]
    fn test_esc_after_leaving_filter_keeps_pattern() {
        let mut app = app_from(&numbered(5));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "line 2");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Normal);
        assert_eq!(app.filtered(), &[2]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Normal);
        assert_eq!(app.filter_input(), "line 2");
        assert_eq!(app.filtered(), &[2]);
    }

    #[test]
    fn test_initial_filter_and_unparseable_lines() {
        let loaded = Loaded {
            lines: vec!["plain warning text".into(), "{\"msg\":\"ok\"}".into()],
            sample: vec![serde_json::json!({"msg": "ok"})],
        };
        let app = App::new(
            loaded,
            &AppDesc {
                initial_filter: Some("WARN".into()),
                ..desc()
            },
        );
        assert_eq!(app.filtered(), &[0]);
        assert_eq!(detail_text(&app), vec!["plain warning text"]);
        assert!(app.selected_line().unwrap().field("msg").is_absent());
    }

    #[test]
    fn test_empty_input() {
        let mut app = app_from("");
        assert!(app.columns().is_empty());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor(), 0);
        assert!(app.detail_lines().is_empty());
        assert!(app.frame().cursor_row.is_none());
    }

    #[test]
    fn test_frame_window() {
        let mut app = app_from(&numbered(30));
        for _ in 0..12 {
            press(&mut app, KeyCode::Down);
        }
        let frame = app.frame();
        assert_eq!(frame.rows.len(), 10);
        assert_eq!(frame.rows[0].field("msg").display_text(), "line 3");
        assert_eq!(frame.cursor_row, Some(9));
        assert_eq!(frame.filtered_count, 30);
        assert_eq!(frame.columns.len(), 3);
    }
}
