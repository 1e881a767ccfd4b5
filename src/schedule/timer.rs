use std::time::Duration;
use tokio::time::{Instant, sleep_until};

use super::Scheduler;

/// Wall-clock scheduler for the terminal loop.
///
/// Await [`TokioScheduler::fired`] inside `tokio::select!`; dropping that
/// future early keeps the deadline, so the next call picks it up again.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    deadline: Option<Instant>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves when the pending tick is due; never resolves while nothing
    /// is scheduled.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_tick(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
