use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use model::Stage;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::store::ProgressStore;

/// How long a terminal task's progress state is kept around before cleanup, to give
/// trailing subscribers a chance to observe the terminal event.
const POST_TERMINAL_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// The ceiling on one generation task's total runtime, after which it is forced into
/// `Stage::TimedOut` regardless of what the worker is doing.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Handed to a spawned worker so it can report progress and check for cancellation.
#[derive(Clone)]
pub struct TaskContext {
    task_id: String,
    store: Arc<ProgressStore>,
    cancel_token: CancellationToken,
}

impl TaskContext {
    /// This task's id.
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Whether cancellation has been requested. Workers should check this at their own
    /// suspension points in addition to the manager's outer `select!` race.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Report a progress update at `stage`'s representative percentage.
    pub async fn report(&self, stage: Stage, message: impl Into<String>) {
        self.store.set(&self.task_id, stage, stage.default_progress(), message, None).await;
    }

    /// Report a progress update with an explicit percentage and payload.
    pub async fn report_detailed(&self, stage: Stage, progress: u8, message: impl Into<String>, payload: Option<serde_json::Value>) {
        self.store.set(&self.task_id, stage, progress, message, payload).await;
    }
}

/// Tracks active background generation tasks: assigns task ids, wires up the Progress
/// Store, and supports cooperative cancellation.
pub struct TaskManager {
    store: Arc<ProgressStore>,
    cancel_tokens: Arc<RwLock<HashMap<String, CancellationToken>>>,
}

impl TaskManager {
    /// Build a task manager over a shared Progress Store.
    pub fn new(store: Arc<ProgressStore>) -> Self {
        Self { store, cancel_tokens: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// The Progress Store this manager reports into.
    pub fn store(&self) -> &Arc<ProgressStore> {
        &self.store
    }

    /// Spawn `work` as a background task: assigns a fresh task id, initializes its
    /// Progress Store entry at `queued`/0, and returns the id immediately.
    ///
    /// `work` races against cancellation in an outer `select!`; if cancelled first, a
    /// `cancelled` terminal event is emitted on the worker's behalf. Either way, after
    /// a terminal state the manager waits [`POST_TERMINAL_GRACE_PERIOD`] before calling
    /// `cleanup`.
    pub async fn spawn<F, Fut>(&self, work: F) -> String
    where
        F: FnOnce(TaskContext) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task_id = uuid::Uuid::new_v4().to_string();
        let token = CancellationToken::new();

        self.store.set(&task_id, Stage::Queued, Stage::Queued.default_progress(), "queued", None).await;
        self.cancel_tokens.write().await.insert(task_id.clone(), token.clone());

        let context = TaskContext { task_id: task_id.clone(), store: Arc::clone(&self.store), cancel_token: token.clone() };
        let store = Arc::clone(&self.store);
        let cancel_tokens = Arc::clone(&self.cancel_tokens);
        let task_id_for_worker = task_id.clone();

        tokio::spawn(async move {
            tokio::select! {
                result = tokio::time::timeout(GENERATION_TIMEOUT, work(context)) => {
                    if result.is_err() {
                        let err = model::ClipForgeError::TaskTimeout;
                        let payload = serde_json::json!({ "kind": err.kind(), "message": err.to_string() });
                        store.set(&task_id_for_worker, Stage::TimedOut, Stage::TimedOut.default_progress(), err.to_string(), Some(payload)).await;
                    }
                }
                () = token.cancelled() => {
                    store.set(&task_id_for_worker, Stage::Cancelled, Stage::Cancelled.default_progress(), "cancelled", None).await;
                }
            }

            tokio::time::sleep(POST_TERMINAL_GRACE_PERIOD).await;
            store.cleanup(&task_id_for_worker).await;
            cancel_tokens.write().await.remove(&task_id_for_worker);
        });

        task_id
    }

    /// Request cancellation of `task_id`. Returns `false` if no such task is active.
    pub async fn cancel(&self, task_id: &str) -> bool {
        match self.cancel_tokens.read().await.get(task_id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}
