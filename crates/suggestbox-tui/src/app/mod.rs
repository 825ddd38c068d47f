use std::sync::Arc;

use suggestbox_core::{
    AppConfig, CandidateSet, Event, Messages, Presentation, Session, StaticEngine,
    SuggestionEngine, WidgetState,
};
use tracing::debug;

use crate::theme::NordTheme;

/// Braille spinner shown while a lookup is in flight.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub session: Session,
    /// Byte-level cursor position in the query.
    pub cursor: usize,
    pub candidates: CandidateSet,
    pub messages: Messages,
    pub theme: NordTheme,
    /// Rows of the dropdown before it scrolls.
    pub max_visible: u16,
    pub spinner_frame: usize,
}

impl App {
    /// Build the app with the built-in static engine described by `config`.
    /// Must be called inside a tokio runtime.
    pub fn new(config: AppConfig) -> Self {
        let engine = StaticEngine::new(config.candidate_set(), config.lookup_delay());
        Self::with_engine(config, Arc::new(engine))
    }

    pub fn with_engine(config: AppConfig, engine: Arc<dyn SuggestionEngine>) -> Self {
        let state = WidgetState::new(config.widget.policy, config.timings());
        Self {
            should_quit: false,
            session: Session::new(state, engine),
            cursor: 0,
            candidates: config.candidate_set(),
            messages: Messages::new(config.ui.title.clone(), config.candidates.noun.clone()),
            theme: NordTheme::default(),
            max_visible: config.ui.max_visible.max(1),
            spinner_frame: 0,
        }
    }

    pub fn state(&self) -> &WidgetState {
        self.session.state()
    }

    pub fn query(&self) -> &str {
        self.state().query()
    }

    pub fn presentation(&self) -> Presentation<'_> {
        Presentation::of(self.session.state())
    }

    /// Dispatch a widget event. A query replaced from outside the editor
    /// (a selected suggestion) moves the cursor to the end.
    pub fn dispatch(&mut self, event: Event) {
        let changed_from = self.query().to_string();
        self.session.dispatch(event);
        if self.query() != changed_from || self.cursor > self.query().len() {
            debug!(query = %self.query(), "query replaced");
            self.cursor = self.query().len();
        }
    }

    /// Drain timer and lookup completions.
    pub fn pump(&mut self) -> usize {
        let changed_from = self.query().to_string();
        let handled = self.session.pump();
        if self.query() != changed_from {
            self.cursor = self.query().len();
        }
        handled
    }

    pub fn on_tick(&mut self) {
        if self.state().is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        } else {
            self.spinner_frame = 0;
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    // ── Text editing ─────────────────────────────

    fn set_text(&mut self, text: String, cursor: usize) {
        self.session.dispatch(Event::InputChanged(text));
        self.cursor = cursor.min(self.query().len());
    }

    pub fn insert_char(&mut self, c: char) {
        let mut text = self.query().to_string();
        text.insert(self.cursor, c);
        let cursor = self.cursor + c.len_utf8();
        self.set_text(text, cursor);
    }

    pub fn delete_back(&mut self) {
        let Some(prev) = self.prev_boundary() else {
            return;
        };
        let mut text = self.query().to_string();
        text.replace_range(prev..self.cursor, "");
        self.set_text(text, prev);
    }

    pub fn delete_forward(&mut self) {
        let Some(next) = self.next_boundary() else {
            return;
        };
        let mut text = self.query().to_string();
        text.replace_range(self.cursor..next, "");
        let cursor = self.cursor;
        self.set_text(text, cursor);
    }

    pub fn clear_line(&mut self) {
        self.set_text(String::new(), 0);
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.query().len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.query()[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.query()[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn instant_app() -> App {
        let mut config = AppConfig::default();
        config.widget.lookup_delay_ms = 0;
        App::new(config)
    }

    #[tokio::test]
    async fn test_insert_and_delete_keep_cursor_in_sync() {
        let mut app = instant_app();
        for c in "fgi".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.query(), "fgi");
        assert_eq!(app.cursor, 3);

        app.cursor_left();
        app.delete_back();
        assert_eq!(app.query(), "fi");
        assert_eq!(app.cursor, 1);

        app.cursor_home();
        app.delete_forward();
        assert_eq!(app.query(), "i");
        assert_eq!(app.cursor, 0);
    }

    #[tokio::test]
    async fn test_multibyte_editing() {
        let mut app = instant_app();
        app.insert_char('é');
        app.insert_char('x');
        app.cursor_left();
        app.cursor_left();
        assert_eq!(app.cursor, 0);
        app.cursor_right();
        assert_eq!(app.cursor, 'é'.len_utf8());
        app.delete_back();
        assert_eq!(app.query(), "x");
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_moves_cursor_to_end() {
        let mut app = instant_app();
        app.insert_char('a');
        app.insert_char('n');
        app.session.settle().await.unwrap();
        app.cursor_home();

        app.dispatch(Event::SuggestionSelected(0));
        assert_eq!(app.query(), "banana");
        assert_eq!(app.cursor, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_advances_only_while_loading() {
        let mut app = App::new(AppConfig::default());
        app.on_tick();
        assert_eq!(app.spinner_frame, 0);

        app.insert_char('e');
        app.session.run_for(Duration::from_millis(210)).await.unwrap();
        assert!(app.state().is_loading());
        app.on_tick();
        app.on_tick();
        assert_eq!(app.spinner_frame, 2);

        app.session.settle().await.unwrap();
        app.on_tick();
        assert_eq!(app.spinner_frame, 0);
    }
}
