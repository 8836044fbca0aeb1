use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, ChatView};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::ChatDone { seq, result } => app.finish(seq, result),
    }
    Ok(())
}

/// Chip bound to a key: F1..F9, or Alt+1..Alt+9 for terminals that eat
/// function keys
fn chip_index(key: &KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::F(n @ 1..=9) => Some(n as usize - 1),
        KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
            Some(c as usize - '1' as usize)
        }
        _ => None,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if let Some(index) = chip_index(&key) {
        app.activate_chip(index);
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.submit(),
        KeyCode::Tab => app.cycle_language(),

        // Answer scrolling
        KeyCode::Up => app.scroll_answer_up(1),
        KeyCode::Down => app.scroll_answer_down(1),
        KeyCode::PageUp => app.scroll_answer_up(10),
        KeyCode::PageDown => app.scroll_answer_down(10),

        _ => edit_prompt(&mut app.view, key),
    }
}

fn edit_prompt(view: &mut ChatView, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            view.prompt_input.clear();
            view.prompt_cursor = 0;
        }
        KeyCode::Backspace => {
            if view.prompt_cursor > 0 {
                view.prompt_cursor -= 1;
                let byte_pos = char_to_byte_index(&view.prompt_input, view.prompt_cursor);
                view.prompt_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = view.prompt_input.chars().count();
            if view.prompt_cursor < char_count {
                let byte_pos = char_to_byte_index(&view.prompt_input, view.prompt_cursor);
                view.prompt_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            view.prompt_cursor = view.prompt_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = view.prompt_input.chars().count();
            view.prompt_cursor = (view.prompt_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            view.prompt_cursor = 0;
        }
        KeyCode::End => {
            view.prompt_cursor = view.prompt_input.chars().count();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let byte_pos = char_to_byte_index(&view.prompt_input, view.prompt_cursor);
            view.prompt_input.insert(byte_pos, c);
            view.prompt_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_answer = app
        .answer_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_answer {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_answer_down(3),
        MouseEventKind::ScrollUp => app.scroll_answer_up(3),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medxpert_core::{ChatClient, Chip, Config, Language};
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(
            &Config::new(),
            ChatClient::new("http://127.0.0.1:1"),
            Language::English,
            tx,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_char_to_byte_index() {
        assert_eq!(char_to_byte_index("abc", 1), 1);
        assert_eq!(char_to_byte_index("हिन्दी", 2), 6);
        assert_eq!(char_to_byte_index("ab", 10), 2);
    }

    #[test]
    fn test_typing_and_editing() {
        let mut app = app();
        for c in "helo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.view.prompt_input, "hello");

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.view.prompt_input, "ello");

        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.view.prompt_input, "ell");
    }

    #[test]
    fn test_unicode_editing() {
        let mut app = app();
        for c in "தமிழ்".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.view.prompt_input, "தமிழ");
    }

    #[test]
    fn test_function_keys_activate_chips() {
        let mut app = app();
        app.chips = vec![Chip::new("A", "first"), Chip::new("B", "second")];

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.view.prompt_input, "second");

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT));
        assert_eq!(app.view.prompt_input, "first");

        // No chip behind F9
        press(&mut app, KeyCode::F(9));
        assert_eq!(app.view.prompt_input, "first");
    }

    #[test]
    fn test_plain_digits_are_typed() {
        let mut app = app();
        app.chips = vec![Chip::new("A", "first")];

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view.prompt_input, "1");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = self::app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_answer_scroll_saturates() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.view.display_scroll, 0);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.view.display_scroll, 10);
    }
}
