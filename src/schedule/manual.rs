use std::time::Duration;

use super::Scheduler;

/// Virtual-clock scheduler for deterministic tests and headless runs.
///
/// Time only moves when told to; every requested delay is recorded.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    deadline: Option<Duration>,
    requested: Vec<Duration>,
    cancellations: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Absolute virtual time of the pending tick
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Every delay passed to `schedule_tick`, oldest first
    pub fn requested_delays(&self) -> &[Duration] {
        &self.requested
    }

    pub fn cancellations(&self) -> usize {
        self.cancellations
    }

    /// Move the clock forward. Returns true if the pending tick came due,
    /// which also disarms it.
    pub fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        match self.deadline {
            Some(deadline) if deadline <= self.now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Jump straight to the pending tick. Returns false if none is armed.
    pub fn advance_to_next(&mut self) -> bool {
        match self.deadline.take() {
            Some(deadline) => {
                self.now = self.now.max(deadline);
                true
            }
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_tick(&mut self, delay: Duration) {
        self.requested.push(delay);
        self.deadline = Some(self.now + delay);
    }

    fn cancel_pending(&mut self) {
        if self.deadline.take().is_some() {
            self.cancellations += 1;
        }
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_fires_once() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_tick(Duration::from_millis(300));

        assert!(!scheduler.advance(Duration::from_millis(299)));
        assert!(scheduler.advance(Duration::from_millis(1)));
        assert!(!scheduler.advance(Duration::from_millis(1000)));
        assert_eq!(scheduler.now(), Duration::from_millis(1300));
    }

    #[test]
    fn test_advance_to_next() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.advance_to_next());

        scheduler.schedule_tick(Duration::from_millis(500));
        assert!(scheduler.advance_to_next());
        assert_eq!(scheduler.now(), Duration::from_millis(500));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = ManualScheduler::new();
        scheduler.cancel_pending();
        assert_eq!(scheduler.cancellations(), 0);

        scheduler.schedule_tick(Duration::from_millis(100));
        scheduler.cancel_pending();
        assert_eq!(scheduler.cancellations(), 1);
        assert!(!scheduler.advance(Duration::from_secs(10)));
        assert_eq!(scheduler.requested_delays(), &[Duration::from_millis(100)]);
    }
}
