//! Live View SSE Handlers
//!
//! Streams full-collection snapshots: one immediately on connect, then one
//! per mutation of the store. Dropping the connection unsubscribes.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::message::StoreSnapshot;

/// Subscribe to a store's live snapshots
pub async fn stream(
    State(state): State<ServerState>,
    Path(store): Path<String>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let (initial, rx) = state.subscribe_store(&store).await?;
    tracing::debug!(store = %store, "Live subscriber connected");

    let first = snapshot_event(&initial);
    let updates = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => return Some((snapshot_event(&snapshot), rx)),
                // A slow consumer only misses intermediate snapshots; the
                // next received one is always the freshest full state
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Live subscriber lagged");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let stream = futures::stream::once(async move { first }).chain(updates);
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn snapshot_event(snapshot: &StoreSnapshot) -> Result<Event, Infallible> {
    let data = serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string());
    Ok(Event::default().event("snapshot").data(data))
}
