use std::sync::{Arc, Mutex};

use crate::events::BattleEvent;

/// Receives every event after the command that produced it has finished
/// mutating the session.
///
/// Observers are never awaited and cannot influence the battle. Presentation
/// layers use them to schedule animations, sounds and text.
pub trait BattleObserver: Send {
    /// Returns a human-readable name for this observer (used in logging).
    fn name(&self) -> &'static str;

    fn on_event(&mut self, event: &BattleEvent);
}

/// Observer that records every event it sees.
///
/// Clones share one buffer, so a caller can keep a handle after registering
/// a clone with the engine.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<BattleEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Removes and returns every recorded event.
    pub fn drain(&self) -> Vec<BattleEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl BattleObserver for EventLog {
    fn name(&self) -> &'static str {
        "event_log"
    }

    fn on_event(&mut self, event: &BattleEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Observer that logs each event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl BattleObserver for TracingObserver {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_event(&mut self, event: &BattleEvent) {
        tracing::debug!(kind = event.kind(), ?event, "battle event");
    }
}
