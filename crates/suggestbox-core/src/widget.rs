//! Autocomplete widget state and its reducer.
//!
//! All state changes go through [`WidgetState::apply`]. Timers and lookups are
//! never started here: the reducer returns [`Effect`]s and the caller (see
//! `runtime::EffectRunner`) turns them into tokio tasks whose completions come
//! back as [`Event`]s.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Identifier attached to every scheduled lookup. Strictly increasing per widget.
pub type RequestId = u64;

/// Which lookup responses are allowed to update the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponsePolicy {
    /// Apply only the response of the most recently issued lookup.
    #[default]
    LatestOnly,
    /// Apply every response in arrival order; the last to resolve wins.
    LastResolved,
}

impl ResponsePolicy {
    pub fn label(self) -> &'static str {
        match self {
            Self::LatestOnly => "latest-only",
            Self::LastResolved => "last-resolved",
        }
    }
}

impl fmt::Display for ResponsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest-only" | "latest" => Ok(Self::LatestOnly),
            "last-resolved" | "legacy" => Ok(Self::LastResolved),
            other => Err(format!(
                "unknown policy '{other}' (expected latest-only or last-resolved)"
            )),
        }
    }
}

/// Timer intervals used by the reducer when it schedules effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTimings {
    pub debounce: Duration,
    pub blur_grace: Duration,
}

impl Default for WidgetTimings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
            blur_grace: Duration::from_millis(150),
        }
    }
}

/// Inputs to the reducer: user interactions and timer/lookup completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The input text was replaced by the user.
    InputChanged(String),
    /// The debounce timer for `id` fired.
    DebounceElapsed(RequestId),
    /// A lookup finished.
    LookupResolved {
        id: RequestId,
        outcome: Result<Vec<String>, String>,
    },
    /// The suggestion at this index was picked.
    SuggestionSelected(usize),
    /// Pick whatever is highlighted, if anything.
    SelectHighlighted,
    HighlightNext,
    HighlightPrev,
    Focus,
    Blur,
    /// The blur grace timer carrying this token fired.
    BlurGraceElapsed(u64),
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the debounce timer, replacing any armed one.
    ScheduleDebounce { id: RequestId, after: Duration },
    /// Disarm the debounce timer if it has not fired.
    CancelDebounce,
    /// Run the suggestion engine for `query`.
    StartLookup { id: RequestId, query: String },
    /// Hide the list after `after` unless the token is superseded.
    ScheduleBlurHide { token: u64, after: Duration },
}

/// Complete state of one autocomplete widget.
#[derive(Debug, Clone)]
pub struct WidgetState {
    query: String,
    results: Vec<String>,
    show_suggestions: bool,
    loading: bool,
    focused: bool,
    highlighted: Option<usize>,

    policy: ResponsePolicy,
    timings: WidgetTimings,

    next_id: RequestId,
    pending_debounce: Option<RequestId>,
    /// Lookup whose response will be applied under `LatestOnly`.
    accepting: Option<RequestId>,
    blur_token: u64,
    pending_blur: Option<u64>,
}

impl WidgetState {
    pub fn new(policy: ResponsePolicy, timings: WidgetTimings) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            show_suggestions: false,
            loading: false,
            focused: true,
            highlighted: None,
            policy,
            timings,
            next_id: 1,
            pending_debounce: None,
            accepting: None,
            blur_token: 0,
            pending_blur: None,
        }
    }

    // ── Accessors ────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn is_visible(&self) -> bool {
        self.show_suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.pending_debounce.is_some()
    }

    /// Blurred, with the grace timer still running.
    pub fn is_hide_pending(&self) -> bool {
        self.pending_blur.is_some()
    }

    /// True when the query holds nothing but whitespace.
    pub fn query_is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    // ── Reducer ──────────────────────────────────

    /// Apply one event and return the effects it requires.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::InputChanged(text) => self.on_input(text),
            Event::DebounceElapsed(id) => self.on_debounce(id),
            Event::LookupResolved { id, outcome } => {
                self.on_resolved(id, outcome);
                Vec::new()
            }
            Event::SuggestionSelected(index) => self.on_select(index),
            Event::SelectHighlighted => match self.highlighted {
                Some(index) => self.on_select(index),
                None => Vec::new(),
            },
            Event::HighlightNext => {
                self.move_highlight(true);
                Vec::new()
            }
            Event::HighlightPrev => {
                self.move_highlight(false);
                Vec::new()
            }
            Event::Focus => {
                self.focused = true;
                self.pending_blur = None;
                if !self.results.is_empty() {
                    self.show_suggestions = true;
                }
                Vec::new()
            }
            Event::Blur => {
                self.focused = false;
                self.blur_token += 1;
                self.pending_blur = Some(self.blur_token);
                vec![Effect::ScheduleBlurHide {
                    token: self.blur_token,
                    after: self.timings.blur_grace,
                }]
            }
            Event::BlurGraceElapsed(token) => {
                if self.pending_blur == Some(token) {
                    self.pending_blur = None;
                    self.show_suggestions = false;
                }
                Vec::new()
            }
        }
    }

    fn on_input(&mut self, text: String) -> Vec<Effect> {
        self.query = text;
        self.highlighted = None;
        self.pending_debounce = None;
        let mut effects = vec![Effect::CancelDebounce];

        if self.query_is_blank() {
            self.clear_results();
            self.loading = false;
            self.abandon_in_flight();
            return effects;
        }

        // A newer query supersedes whatever lookup is still running.
        if self.policy == ResponsePolicy::LatestOnly {
            self.loading = false;
            self.abandon_in_flight();
        }
        effects.push(self.schedule_lookup());
        effects
    }

    fn on_debounce(&mut self, id: RequestId) -> Vec<Effect> {
        if self.pending_debounce != Some(id) {
            debug!(id, "ignoring stale debounce");
            return Vec::new();
        }
        self.pending_debounce = None;
        self.loading = true;
        self.accepting = Some(id);
        debug!(id, query = %self.query, "lookup started");
        vec![Effect::StartLookup {
            id,
            query: self.query.clone(),
        }]
    }

    fn on_resolved(&mut self, id: RequestId, outcome: Result<Vec<String>, String>) {
        if self.policy == ResponsePolicy::LatestOnly {
            if self.accepting != Some(id) {
                debug!(id, latest = ?self.accepting, "discarding stale lookup response");
                return;
            }
            self.accepting = None;
        }

        self.loading = false;
        self.highlighted = None;
        match outcome {
            Ok(list) => {
                debug!(id, matches = list.len(), "lookup resolved");
                self.show_suggestions = !list.is_empty();
                self.results = list;
            }
            Err(err) => {
                warn!(id, error = %err, "error filtering suggestions");
                self.clear_results();
            }
        }
    }

    fn on_select(&mut self, index: usize) -> Vec<Effect> {
        let Some(choice) = self.results.get(index).cloned() else {
            return Vec::new();
        };
        debug!(index, choice = %choice, "suggestion selected");

        self.query = choice;
        self.clear_results();
        self.highlighted = None;
        self.pending_debounce = None;
        let mut effects = vec![Effect::CancelDebounce];

        match self.policy {
            ResponsePolicy::LatestOnly => {
                self.loading = false;
                self.abandon_in_flight();
            }
            // Every text change re-queries under this policy, selection included.
            ResponsePolicy::LastResolved => effects.push(self.schedule_lookup()),
        }
        effects
    }

    fn schedule_lookup(&mut self) -> Effect {
        let id = self.next_id;
        self.next_id += 1;
        self.pending_debounce = Some(id);
        Effect::ScheduleDebounce {
            id,
            after: self.timings.debounce,
        }
    }

    fn abandon_in_flight(&mut self) {
        if self.policy == ResponsePolicy::LatestOnly {
            self.accepting = None;
        }
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.show_suggestions = false;
    }

    fn move_highlight(&mut self, forward: bool) {
        let len = self.results.len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (Some(i), true) => (i + 1) % len,
            (None, true) => 0,
            (Some(0) | None, false) => len - 1,
            (Some(i), false) => i - 1,
        });
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new(ResponsePolicy::default(), WidgetTimings::default())
    }
}

/// Functional form of [`WidgetState::apply`].
pub fn reduce(mut state: WidgetState, event: Event) -> (WidgetState, Vec<Effect>) {
    let effects = state.apply(event);
    (state, effects)
}
