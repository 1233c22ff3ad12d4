//! Sliding-window RPM + daily-count gate shared by every external LLM caller.
//!
//! `acquire()` blocks until the caller may perform one call; capacity is consumed at
//! acquire time, not on completion, so there is no explicit `release()`. Waiters are
//! served strictly FIFO by polling the shared lock in 100ms increments — calls are
//! never dropped.

#![deny(missing_docs)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use config::RateLimitConfig;
use tokio::sync::Mutex;
use tokio::time::sleep;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct State {
    recent_calls: VecDeque<Instant>,
    daily_date: jiff::civil::Date,
    daily_count: u32,
}

impl State {
    fn new() -> Self {
        Self {
            recent_calls: VecDeque::new(),
            daily_date: today(),
            daily_count: 0,
        }
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.recent_calls.front() {
            if now.duration_since(oldest) >= WINDOW {
                self.recent_calls.pop_front();
            } else {
                break;
            }
        }

        let current_date = today();
        if current_date != self.daily_date {
            self.daily_date = current_date;
            self.daily_count = 0;
        }
    }
}

fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}

/// The shared rate limiter. Cheaply cloneable; every clone shares the same state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<State>>,
    requests_per_minute: u32,
    requests_per_day: u32,
}

impl RateLimiter {
    /// Build a limiter from configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::new())),
            requests_per_minute: config.requests_per_minute,
            requests_per_day: config.requests_per_day,
        }
    }

    /// Block until the caller may perform one LLM call, then consume that capacity.
    pub async fn acquire(&self) {
        loop {
            let mut state = self.state.lock().await;
            let now = Instant::now();
            state.prune(now);

            if (state.recent_calls.len() as u32) < self.requests_per_minute && state.daily_count < self.requests_per_day {
                state.recent_calls.push_back(now);
                state.daily_count += 1;
                return;
            }

            log::debug!(
                "rate limiter: {}/{} calls in window, {}/{} today; waiting",
                state.recent_calls.len(),
                self.requests_per_minute,
                state.daily_count,
                self.requests_per_day
            );

            drop(state);
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Snapshot of current usage, for diagnostics.
    pub async fn usage(&self) -> (u32, u32) {
        let mut state = self.state.lock().await;
        state.prune(Instant::now());
        (state.recent_calls.len() as u32, state.daily_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rpm: u32, daily: u32) -> RateLimitConfig {
        RateLimitConfig {
            requests_per_minute: rpm,
            requests_per_day: daily,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn admits_up_to_rpm_then_blocks() {
        let limiter = RateLimiter::new(config(2, 250));

        limiter.acquire().await;
        limiter.acquire().await;

        let (in_window, _) = limiter.usage().await;
        assert_eq!(in_window, 2);

        let third = tokio::time::timeout(Duration::from_millis(500), limiter.acquire()).await;
        assert!(third.is_err(), "third call should block within the 60s window");
    }

    #[tokio::test(start_paused = true)]
    async fn eleventh_call_admits_after_window_ages_out() {
        let limiter = RateLimiter::new(config(1, 250));

        limiter.acquire().await;

        let acquire_fut = limiter.acquire();
        tokio::pin!(acquire_fut);

        tokio::select! {
            _ = &mut acquire_fut => panic!("should not admit immediately"),
            _ = sleep(Duration::from_millis(200)) => {}
        }

        tokio::time::advance(WINDOW + Duration::from_secs(1)).await;
        acquire_fut.await;
    }

    #[tokio::test]
    async fn daily_cap_gates_independently_of_rpm() {
        let limiter = RateLimiter::new(config(100, 1));

        limiter.acquire().await;
        let (_, daily) = limiter.usage().await;
        assert_eq!(daily, 1);

        let second = tokio::time::timeout(Duration::from_millis(200), limiter.acquire()).await;
        assert!(second.is_err(), "daily cap of 1 should block a second call");
    }
}
