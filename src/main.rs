use std::sync::Arc;

use anivibe_core::{BackendClient, Config, HttpTransport, Phase, SessionSnapshot, Store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let config = Config::from_env()?;
    tracing::info!(endpoint = %config.recommendations_url(), "Loaded configuration");

    let transport = HttpTransport::from_config(&config)?;
    let store = Store::new(Arc::new(BackendClient::new(Arc::new(transport))));

    // Stand-in for a view layer: log every snapshot it would render.
    let mut receiver = store.subscribe();
    let watcher = tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let state = receiver.borrow_and_update().clone();
            tracing::info!(
                phase = ?state.phase,
                pending = state.pending,
                results = state.results.len(),
                error = state.last_error.as_deref().unwrap_or(""),
                "State changed"
            );
        }
    });

    store.submit_prompt(prompt)?.await;
    let state = store.settled().await;

    let outcome = ensure_success(&state);
    if outcome.is_ok() {
        print_results(&state);
        if let Some(top) = state.results.first().cloned() {
            store.select_item(top)?;
            if let Some(selected) = store.snapshot().selected_item {
                println!("\n{}", serde_json::to_string_pretty(&selected)?);
            }
        }
    }

    drop(store);
    watcher.await?;
    outcome
}

/// Maps a settled session to the process result, so failures exit non-zero
fn ensure_success(state: &SessionSnapshot) -> anyhow::Result<()> {
    match state.phase {
        Phase::Success => Ok(()),
        _ => Err(anyhow::anyhow!(state
            .last_error
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string()))),
    }
}

fn print_results(state: &SessionSnapshot) {
    println!("Recommendations for \"{}\":", state.current_prompt);
    for (rank, item) in state.results.iter().enumerate() {
        println!("{:>2}. {}", rank + 1, item.title);
        println!("    {}", item.explanation);
        if !item.genres.is_empty() {
            println!("    {}", item.genres.join(", "));
        }
    }
}
