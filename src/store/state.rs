use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Envelope, Item},
};

/// Correlation id for one accepted submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FetchId(pub Uuid);

impl FetchId {
    /// Creates a new random fetch ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FetchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FetchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the store is in the request lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Success,
    Failed,
}

/// Full session state, published to observers on every change
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// Last accepted prompt, verbatim
    pub current_prompt: String,
    pub results: Vec<Item>,
    pub selected_item: Option<Item>,
    pub last_error: Option<String>,
    pub pending: bool,
    pub fetch_id: Option<FetchId>,
    /// When the most recent fetch finished, successfully or not
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Applies an accepted submission. Selection is left alone.
    pub(crate) fn begin_fetch(&mut self, prompt: String, fetch_id: FetchId) {
        self.phase = Phase::Fetching;
        self.current_prompt = prompt;
        self.results.clear();
        self.last_error = None;
        self.pending = true;
        self.fetch_id = Some(fetch_id);
    }

    /// Applies the outcome of the in-flight fetch
    pub(crate) fn complete_fetch(&mut self, outcome: AppResult<Envelope>) {
        match outcome {
            Ok(envelope) => {
                self.phase = Phase::Success;
                self.results = envelope.results;
                self.last_error = None;
            }
            Err(err) => {
                self.phase = Phase::Failed;
                self.results.clear();
                self.last_error = Some(err.user_message());
            }
        }
        self.pending = false;
        self.completed_at = Some(Utc::now());
    }
}
