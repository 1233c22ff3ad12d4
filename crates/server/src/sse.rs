//! Maps Progress Store updates onto the streaming wire format, the same way the
//! teacher's `chat_completions` handler maps a provider stream to SSE `Event`s.

use std::convert::Infallible;

use axum::response::sse::{Event, Sse};
use futures::{Stream, StreamExt};
use model::Stage;
use progress::ProgressStore;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct SseEvent {
    task_id: String,
    status: Stage,
    progress: u8,
    message: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

/// Subscribe to `task_id` and forward every update as a `data: <json>\n\n` event,
/// terminating after a terminal-stage payload (matching `Subscription`'s own
/// termination contract).
pub async fn stream_task(store: &ProgressStore, task_id: String) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = store.subscribe(&task_id).await;

    let stream = futures::stream::unfold(subscription, move |mut subscription| {
        let task_id = task_id.clone();
        async move {
            let event = subscription.next().await?;
            let payload = SseEvent {
                task_id,
                status: event.stage,
                progress: event.progress,
                message: event.message,
                timestamp: jiff::Timestamp::now().to_string(),
                data: event.payload,
            };
            let json = serde_json::to_string(&payload).unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string());
            Some((Ok(Event::default().data(json)), subscription))
        }
    });

    Sse::new(stream)
}
