//! Server-Sent Events support

use crate::runtime::ChatEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init_event: ChatEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<ChatEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(chat_event_to_axum(init_event)) });

    // A lagging client is told so it can refetch the snapshot
    let broadcasts = BroadcastStream::new(broadcast_rx).map(|result| {
        let event = match result {
            Ok(event) => event,
            Err(BroadcastStreamRecvError::Lagged(missed)) => ChatEvent::Error {
                message: format!("Missed {missed} events, reload the session"),
            },
        };
        Ok(chat_event_to_axum(event))
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn chat_event_to_axum(event: ChatEvent) -> Event {
    let (event_type, data) = event_payload(event);
    Event::default().event(event_type).data(data.to_string())
}

fn event_payload(event: ChatEvent) -> (&'static str, serde_json::Value) {
    match event {
        ChatEvent::Init { snapshot } => (
            "init",
            json!({
                "type": "init",
                "session": snapshot
            }),
        ),
        ChatEvent::Message { turn } => (
            "message",
            json!({
                "type": "message",
                "turn": turn
            }),
        ),
        ChatEvent::Composing { composing } => (
            "composing",
            json!({
                "type": "composing",
                "composing": composing
            }),
        ),
        ChatEvent::StageChange { stage, milestone } => (
            "stage_change",
            json!({
                "type": "stage_change",
                "stage": stage,
                "milestone": milestone
            }),
        ),
        ChatEvent::Feedback { cue } => (
            "feedback",
            json!({
                "type": "feedback",
                "cue": cue
            }),
        ),
        ChatEvent::Error { message } => (
            "error",
            json!({
                "type": "error",
                "message": message
            }),
        ),
    }
}
