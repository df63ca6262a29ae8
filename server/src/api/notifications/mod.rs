//! Notification stream
//!
//! Server-sent events feed for the admin UI. Each delivered notification
//! becomes one `notification` event with a JSON body. A receiver that lags
//! behind skips the missed messages and keeps going; the stream ends when
//! the service shuts down.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{Router, routing::get};
use futures::stream::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::notify::Notification;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/notifications/stream", get(stream))
}

async fn stream(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, std::convert::Infallible>>> {
    let rx = state.notify().subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notification) => return Some((to_event(&notification), rx)),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "notification stream lagged, skipping");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_event(notification: &Notification) -> Result<Event, std::convert::Infallible> {
    let event = Event::default().event("notification");
    Ok(match event.json_data(notification) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize notification event");
            Event::default().event("notification").data("{}")
        }
    })
}
