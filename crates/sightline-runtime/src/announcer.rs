//! Spoken-alert boundary.
//!
//! The [`Announcer`] sits between the state store and the text-to-speech
//! device. The device itself is outside this crate; it is reached through
//! the [`SpeechSink`] trait and decides on its own whether and how to
//! vocalize the phrase it is handed.
//!
//! Two rules, enforced here and not inside the classifier:
//!
//! - an unchanged alert is never re-announced;
//! - `clear` is recorded but never vocalized (silence is the all-clear).

use std::sync::{Mutex, PoisonError};

use sightline_types::{Alert, CanonicalState};
use tracing::info;

/// Receives the plain alert phrase to vocalize.
pub trait SpeechSink: Send + Sync {
    fn speak(&self, phrase: &str);
}

/// Sink that logs the phrase instead of speaking it. Useful headless and in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeaker;

impl SpeechSink for LogSpeaker {
    fn speak(&self, phrase: &str) {
        info!(phrase, "speaking alert");
    }
}

/// Dedup-on-change announcer holding the last announced alert.
pub struct Announcer<S: SpeechSink> {
    sink: S,
    last: Mutex<Option<Alert>>,
}

impl<S: SpeechSink> Announcer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            last: Mutex::new(None),
        }
    }

    /// Feed one published state. Speaks at most once per alert transition.
    pub fn observe(&self, state: &CanonicalState) {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if *last == Some(state.alert) {
            return;
        }
        *last = Some(state.alert);
        if state.alert == Alert::Clear {
            return;
        }
        self.sink.speak(state.alert.phrase());
    }
}
