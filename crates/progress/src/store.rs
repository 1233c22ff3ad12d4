use std::collections::HashMap;
use std::sync::Arc;

use model::Stage;
use tokio::sync::{RwLock, broadcast};

use crate::event::ProgressEvent;

const CHANNEL_CAPACITY: usize = 64;

struct TaskChannel {
    latest: ProgressEvent,
    sender: broadcast::Sender<ProgressEvent>,
}

/// A task-scoped, in-process publish/subscribe layer over [`ProgressEvent`]s.
///
/// Ordering contract: within one task, subscribers observe updates in the order `set`
/// calls completed; across tasks there is no ordering. Late subscribers receive the
/// latest state but not history.
#[derive(Default)]
pub struct ProgressStore {
    tasks: RwLock<HashMap<String, TaskChannel>>,
}

impl ProgressStore {
    /// Build an empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Atomically update the latest state for `task_id` and fan out to every current
    /// subscriber.
    pub async fn set(&self, task_id: &str, stage: Stage, progress: u8, message: impl Into<String>, payload: Option<serde_json::Value>) {
        let event = ProgressEvent { stage, progress, message: message.into(), payload };

        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(task_id) {
            Some(channel) => {
                channel.latest = event.clone();
                let _ = channel.sender.send(event);
            }
            None => {
                let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
                let _ = sender.send(event.clone());
                tasks.insert(task_id.to_string(), TaskChannel { latest: event, sender });
            }
        }
    }

    /// The latest known state for `task_id`, if any.
    pub async fn get(&self, task_id: &str) -> Option<ProgressEvent> {
        self.tasks.read().await.get(task_id).map(|channel| channel.latest.clone())
    }

    /// Subscribe to `task_id`'s updates: the current latest state first (if any), then
    /// every subsequent update, until a terminal stage is observed.
    pub async fn subscribe(&self, task_id: &str) -> Subscription {
        let tasks = self.tasks.read().await;
        match tasks.get(task_id) {
            Some(channel) => Subscription { pending_first: Some(channel.latest.clone()), receiver: Some(channel.sender.subscribe()), done: false },
            None => Subscription { pending_first: None, receiver: None, done: true },
        }
    }

    /// Drop all state and subscribers for `task_id`.
    pub async fn cleanup(&self, task_id: &str) {
        self.tasks.write().await.remove(task_id);
    }
}

/// A finite sequence of [`ProgressEvent`]s for one task, terminating after a terminal
/// stage is observed or the task is cleaned up.
pub struct Subscription {
    pending_first: Option<ProgressEvent>,
    receiver: Option<broadcast::Receiver<ProgressEvent>>,
    done: bool,
}

impl Subscription {
    /// Await the next event, or `None` once the sequence is exhausted.
    pub async fn next(&mut self) -> Option<ProgressEvent> {
        if let Some(event) = self.pending_first.take() {
            if event.is_terminal() {
                self.done = true;
            }
            return Some(event);
        }

        if self.done {
            return None;
        }

        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if event.is_terminal() {
                        self.done = true;
                    }
                    return Some(event);
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
