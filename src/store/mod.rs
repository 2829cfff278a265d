//! Recommendation store: the client-side request state machine.
//!
//! The store owns the session state and runs at most one fetch at a time.
//! Every mutation goes through the `watch` sender, so mutations are
//! serialized and receivers are woken only after a mutation is complete.
//! Receivers always hold the full latest snapshot; a slow receiver may skip
//! intermediate snapshots but never sees a partial one.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tokio::{runtime::Handle, sync::oneshot, sync::watch};
use tracing::Instrument;

use crate::{
    error::{AppError, AppResult, StoreError},
    models::{Envelope, Item},
    services::RecommendationClient,
};

mod state;

pub use state::{FetchId, Phase, SessionSnapshot};

/// Handle to the recommendation session
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    client: Arc<dyn RecommendationClient>,
    state: watch::Sender<SessionSnapshot>,
}

/// Resolves once an accepted fetch has been applied to the store
///
/// Dropping it does not cancel the fetch.
#[derive(Debug)]
pub struct Submission {
    fetch_id: FetchId,
    done: oneshot::Receiver<()>,
}

impl Submission {
    pub fn fetch_id(&self) -> FetchId {
        self.fetch_id
    }
}

impl Future for Submission {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // A dropped sender also means the outcome has been applied.
        Pin::new(&mut self.done).poll(cx).map(|_| ())
    }
}

/// Settles the in-flight fetch exactly once
///
/// If the fetch task is dropped or unwinds before `finish` runs, the store is
/// moved to `Failed` so it never stays stuck in `Fetching`.
struct FetchCompletion {
    store: Store,
    done: Option<oneshot::Sender<()>>,
}

impl FetchCompletion {
    fn finish(mut self, outcome: AppResult<Envelope>) {
        self.store.finish_fetch(outcome);
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}

impl Drop for FetchCompletion {
    fn drop(&mut self) {
        if let Some(done) = self.done.take() {
            self.store.finish_fetch(Err(AppError::Interrupted(
                "fetch task ended before the client returned".to_string(),
            )));
            let _ = done.send(());
        }
    }
}

impl Store {
    /// Creates an idle store that fetches through `client`
    pub fn new(client: Arc<dyn RecommendationClient>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(StoreInner { client, state }),
        }
    }

    /// Subscribes to state changes
    ///
    /// The receiver starts out holding the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    /// Returns a copy of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Waits until no fetch is in flight and returns the state at that point
    pub async fn settled(&self) -> SessionSnapshot {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|state| !state.pending).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Starts a fetch for `text`
    ///
    /// Refused when `text` is blank, when no tokio runtime is available, or
    /// while another fetch is in flight; a refused call changes nothing. On
    /// acceptance the prompt is recorded verbatim, results and error are
    /// cleared, and the fetch runs on a spawned task. The returned
    /// [`Submission`] only observes completion.
    pub fn submit_prompt(&self, text: impl Into<String>) -> Result<Submission, StoreError> {
        let text = text.into();
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank prompt");
            return Err(StoreError::EmptyPrompt);
        }

        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let fetch_id = FetchId::new();
        let mut in_flight = false;
        self.inner.state.send_if_modified(|state| {
            if state.pending {
                in_flight = true;
                return false;
            }
            state.begin_fetch(text.clone(), fetch_id);
            true
        });

        if in_flight {
            tracing::debug!(prompt = %text, "Ignoring prompt while a fetch is in flight");
            return Err(StoreError::FetchInFlight);
        }

        let span = tracing::info_span!(
            "recommendation_fetch",
            fetch_id = %fetch_id,
            client = self.inner.client.name()
        );
        tracing::info!(parent: &span, prompt = %text, "Prompt submitted");

        let (done_tx, done_rx) = oneshot::channel();
        let completion = FetchCompletion {
            store: self.clone(),
            done: Some(done_tx),
        };
        let client = self.inner.client.clone();
        runtime.spawn(
            async move {
                let outcome = client.fetch(&text).await;
                completion.finish(outcome);
            }
            .instrument(span),
        );

        Ok(Submission {
            fetch_id,
            done: done_rx,
        })
    }

    fn finish_fetch(&self, outcome: AppResult<Envelope>) {
        match &outcome {
            Ok(envelope) => tracing::info!(results = envelope.len(), "Fetch succeeded"),
            Err(e) => tracing::warn!(error = %e, "Fetch failed"),
        }

        self.inner
            .state
            .send_modify(|state| state.complete_fetch(outcome));
    }

    /// Marks `item` as the selected recommendation
    ///
    /// `item` must be one of the current results. Re-selecting the item that
    /// is already selected publishes nothing.
    pub fn select_item(&self, item: Item) -> Result<(), StoreError> {
        let mut result = Ok(());
        self.inner.state.send_if_modified(|state| {
            if !state.results.contains(&item) {
                result = Err(StoreError::UnknownItem);
                return false;
            }
            if state.selected_item.as_ref() == Some(&item) {
                return false;
            }
            tracing::debug!(title = %item.title, "Item selected");
            state.selected_item = Some(item);
            true
        });
        result
    }

    /// Clears the selection; works in any phase
    pub fn clear_selection(&self) {
        self.inner
            .state
            .send_if_modified(|state| state.selected_item.take().is_some());
    }
}
