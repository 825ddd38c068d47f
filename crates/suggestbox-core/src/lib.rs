pub mod candidates;
pub mod config;
pub mod error;
pub mod presentation;
pub mod widget;

#[cfg(feature = "async")]
pub mod engine;
#[cfg(feature = "async")]
pub mod runtime;

pub use candidates::{CandidateSet, DEFAULT_FRUITS};
pub use config::AppConfig;
pub use error::{Result, SuggestboxError};
pub use presentation::{ListContent, Messages, Phase, Presentation};
pub use widget::{Effect, Event, RequestId, ResponsePolicy, WidgetState, WidgetTimings, reduce};

#[cfg(feature = "async")]
pub use engine::{StaticEngine, SuggestionEngine};
#[cfg(feature = "async")]
pub use runtime::{Debouncer, EffectRunner, Session};
