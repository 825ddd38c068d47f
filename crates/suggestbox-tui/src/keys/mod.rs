
use crossterm::event::{KeyCode, KeyModifiers};
use suggestbox_core::Event;

use crate::app::App;

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        handle_control(app, code);
        return;
    }

    if app.state().is_focused() {
        handle_focused(app, code);
    } else {
        handle_unfocused(app, code);
    }
}

fn handle_control(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('c') | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('u') => app.clear_line(),
        KeyCode::Char('a') => app.cursor_home(),
        KeyCode::Char('e') => app.cursor_end(),
        KeyCode::Char('n') => app.dispatch(Event::HighlightNext),
        KeyCode::Char('p') => app.dispatch(Event::HighlightPrev),
        _ => {}
    }
}

fn handle_focused(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Tab => app.dispatch(Event::Blur),
        KeyCode::Enter => app.dispatch(Event::SelectHighlighted),
        KeyCode::Down => app.dispatch(Event::HighlightNext),
        KeyCode::Up => app.dispatch(Event::HighlightPrev),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Backspace => app.delete_back(),
        KeyCode::Delete => app.delete_forward(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn handle_unfocused(app: &mut App, code: KeyCode) {
    match code {
        // The dropdown stays clickable until the blur grace runs out.
        KeyCode::Enter if app.state().is_hide_pending() && app.state().highlighted().is_some() => {
            app.dispatch(Event::SelectHighlighted)
        }
        KeyCode::Tab | KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('/') => {
            app.dispatch(Event::Focus)
        }
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}
