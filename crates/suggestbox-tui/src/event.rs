use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::app::App;

/// What woke the main loop.
#[derive(Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Debounce, lookup or blur-grace completions were applied to the widget.
    Widget(usize),
    /// Nothing happened within one tick.
    Tick,
}

/// Merges the widget's completion channel with terminal input. Completions
/// are drained first so a redraw follows each settled lookup without
/// waiting out a full terminal poll.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self, app: &mut App) -> Result<AppEvent> {
        let handled = app.pump();
        if handled > 0 {
            return Ok(AppEvent::Widget(handled));
        }

        if !event::poll(self.tick_rate)? {
            return Ok(AppEvent::Tick);
        }
        Ok(match event::read()? {
            // Windows reports releases too; only presses edit the query.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            CrosstermEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => AppEvent::Tick,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suggestbox_core::AppConfig;

    #[tokio::test(start_paused = true)]
    async fn test_widget_completions_come_before_terminal_input() {
        let mut app = App::new(AppConfig::default());
        let handler = EventHandler::new(Duration::from_millis(25));
        app.insert_char('a');

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(handler.next(&mut app).unwrap(), AppEvent::Widget(1));
        assert!(app.state().is_loading());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(handler.next(&mut app).unwrap(), AppEvent::Widget(1));
        assert!(!app.state().is_loading());
        assert_eq!(app.state().results(), &["apple", "banana", "date"]);
    }
}
