use crate::widget::WidgetState;

/// Coarse display state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Blank query: nothing to look up.
    Idle,
    Loading,
    HasResults,
    NoResults,
}

/// What the dropdown contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent<'a> {
    Suggestions(&'a [String]),
    /// Non-blank query, lookup settled, nothing matched.
    NoMatches(&'a str),
    Placeholder,
}

/// Render-ready view of a [`WidgetState`], independent of any toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation<'a> {
    pub spinner: bool,
    pub list: ListContent<'a>,
    pub list_visible: bool,
    pub highlighted: Option<usize>,
}

impl<'a> Presentation<'a> {
    pub fn of(state: &'a WidgetState) -> Self {
        let has_query = !state.query_is_blank();
        let results = state.results();
        let no_matches = has_query && !state.is_loading() && results.is_empty();

        let list = if !results.is_empty() {
            ListContent::Suggestions(results)
        } else if no_matches {
            ListContent::NoMatches(state.query())
        } else {
            ListContent::Placeholder
        };

        Self {
            spinner: state.is_loading(),
            list,
            list_visible: state.is_visible() || no_matches,
            highlighted: state.highlighted(),
        }
    }

    /// (query, loading, result count) collapsed into one state.
    pub fn phase(state: &WidgetState) -> Phase {
        if state.query_is_blank() {
            Phase::Idle
        } else if state.is_loading() {
            Phase::Loading
        } else if state.results().is_empty() {
            Phase::NoResults
        } else {
            Phase::HasResults
        }
    }
}

/// User-facing strings, parameterized by the candidate noun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub title: String,
    pub noun: String,
}

impl Messages {
    pub fn new(title: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            noun: noun.into(),
        }
    }

    pub fn input_placeholder(&self) -> String {
        format!("Type to search {}...", self.noun)
    }

    pub fn no_matches(&self, query: &str) -> String {
        format!("No {} found matching \"{query}\"", self.noun)
    }

    pub fn start_typing(&self) -> &'static str {
        "Start typing to see suggestions..."
    }

    pub fn available(&self, joined: &str) -> String {
        let mut noun = self.noun.clone();
        if let Some(first) = noun.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        format!("Available {noun}: {joined}")
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new("Fruit Autocomplete", "fruits")
    }
}
