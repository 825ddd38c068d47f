//! Tokio-backed execution of widget effects.
//!
//! Every timer and lookup runs as a spawned task that reports back through an
//! unbounded channel of [`Event`]s. Callers must be inside a tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::SuggestionEngine;
use crate::error::{Result, SuggestboxError};
use crate::widget::{Effect, Event, WidgetState};

/// A single re-armable timer. Arming it aborts whatever was armed before.
#[derive(Debug, Default)]
pub struct Debouncer {
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `event` on `tx` after `after`, replacing any armed timer.
    pub fn schedule(&mut self, after: Duration, tx: UnboundedSender<Event>, event: Event) {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(event).is_err() {
                debug!("timer fired after the widget went away");
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Turns [`Effect`]s into tasks.
pub struct EffectRunner {
    engine: Arc<dyn SuggestionEngine>,
    tx: UnboundedSender<Event>,
    debounce: Debouncer,
    blur: Debouncer,
}

impl EffectRunner {
    pub fn new(engine: Arc<dyn SuggestionEngine>, tx: UnboundedSender<Event>) -> Self {
        Self {
            engine,
            tx,
            debounce: Debouncer::new(),
            blur: Debouncer::new(),
        }
    }

    pub fn run_all(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleDebounce { id, after } => {
                self.debounce
                    .schedule(after, self.tx.clone(), Event::DebounceElapsed(id));
            }
            Effect::CancelDebounce => self.debounce.cancel(),
            Effect::StartLookup { id, query } => self.spawn_lookup(id, query),
            Effect::ScheduleBlurHide { token, after } => {
                self.blur
                    .schedule(after, self.tx.clone(), Event::BlurGraceElapsed(token));
            }
        }
    }

    /// Lookups are not tracked: once started they always run to completion.
    fn spawn_lookup(&self, id: u64, query: String) {
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = engine.suggest(&query).await.map_err(|e| e.to_string());
            if tx.send(Event::LookupResolved { id, outcome }).is_err() {
                debug!(id, "lookup finished after the widget went away");
            }
        });
    }
}

/// A widget wired to its runner: dispatch events in, observe state out.
pub struct Session {
    state: WidgetState,
    runner: EffectRunner,
    rx: UnboundedReceiver<Event>,
}

impl Session {
    pub fn new(state: WidgetState, engine: Arc<dyn SuggestionEngine>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            runner: EffectRunner::new(engine, tx),
            rx,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Apply an event and start the effects it produced.
    pub fn dispatch(&mut self, event: Event) {
        let effects = self.state.apply(event);
        self.runner.run_all(effects);
    }

    /// Dispatch every event already waiting in the channel. Never blocks.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next timer or lookup event and dispatch it.
    pub async fn next(&mut self) -> Result<()> {
        let event = self.rx.recv().await.ok_or(SuggestboxError::ChannelClosed)?;
        self.dispatch(event);
        Ok(())
    }

    /// Keep dispatching until nothing is debouncing or loading.
    pub async fn settle(&mut self) -> Result<()> {
        while self.state.has_pending_debounce() || self.state.is_loading() {
            self.next().await?;
        }
        Ok(())
    }

    /// Keep dispatching whatever arrives during the next `span`.
    pub async fn run_for(&mut self, span: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + span;
        while let Ok(step) = tokio::time::timeout_at(deadline, self.next()).await {
            step?;
        }
        Ok(())
    }
}
