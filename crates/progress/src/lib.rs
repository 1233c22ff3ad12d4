//! Task-scoped progress pub/sub and the background task manager that drives it.

#![deny(missing_docs)]

mod event;
mod manager;
mod store;

pub use event::ProgressEvent;
pub use manager::{TaskContext, TaskManager};
pub use store::{ProgressStore, Subscription};

#[cfg(test)]
mod tests {
    use super::*;
    use model::Stage;

    #[tokio::test]
    async fn late_subscriber_gets_latest_state_not_history() {
        let store = ProgressStore::new();
        store.set("t1", Stage::Queued, 0, "queued", None).await;
        store.set("t1", Stage::Started, 5, "started", None).await;
        store.set("t1", Stage::Transcribing, 30, "transcribing", None).await;

        let mut subscription = store.subscribe("t1").await;
        let first = subscription.next().await.unwrap();
        assert_eq!(first.stage, Stage::Transcribing);
    }

    #[tokio::test]
    async fn subscriber_stops_after_terminal_stage() {
        let store = ProgressStore::new();
        store.set("t1", Stage::Queued, 0, "queued", None).await;

        let mut subscription = store.subscribe("t1").await;
        assert!(subscription.next().await.is_some());

        store.set("t1", Stage::Complete, 100, "done", None).await;
        let terminal = subscription.next().await.unwrap();
        assert!(terminal.is_terminal());

        assert!(subscription.next().await.is_none());
    }

    #[tokio::test]
    async fn cleanup_drops_state() {
        let store = ProgressStore::new();
        store.set("t1", Stage::Queued, 0, "queued", None).await;
        store.cleanup("t1").await;
        assert!(store.get("t1").await.is_none());
    }

    #[tokio::test]
    async fn task_manager_assigns_id_and_initializes_queued() {
        let store = ProgressStore::new();
        let manager = TaskManager::new(store.clone());

        let task_id = manager.spawn(|ctx| async move { ctx.report(Stage::Complete, "done").await }).await;

        let state = store.get(&task_id).await.unwrap();
        assert_eq!(state.stage, Stage::Queued);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_emits_cancelled_terminal_event() {
        let store = ProgressStore::new();
        let manager = TaskManager::new(store.clone());

        let task_id = manager.spawn(|_ctx| std::future::pending()).await;

        assert!(manager.cancel(&task_id).await);

        let mut subscription = store.subscribe(&task_id).await;
        subscription.next().await;
        let event = subscription.next().await.unwrap();
        assert_eq!(event.stage, Stage::Cancelled);
    }

    #[tokio::test]
    async fn cancel_unknown_task_returns_false() {
        let store = ProgressStore::new();
        let manager = TaskManager::new(store);
        assert!(!manager.cancel("does-not-exist").await);
    }

    #[tokio::test(start_paused = true)]
    async fn spawn_times_out_stalled_work_after_five_minutes() {
        let store = ProgressStore::new();
        let manager = TaskManager::new(store.clone());

        let task_id = manager.spawn(|_ctx| std::future::pending()).await;

        tokio::time::advance(std::time::Duration::from_secs(301)).await;
        tokio::task::yield_now().await;

        let state = store.get(&task_id).await.unwrap();
        assert_eq!(state.stage, Stage::TimedOut);
    }
}
