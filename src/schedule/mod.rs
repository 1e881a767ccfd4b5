//! Tick scheduling
//!
//! The loop never runs on a fixed-rate timer. After every tick it asks a
//! [`Scheduler`] for exactly one more tick, with a delay derived from the
//! current score. Pausing means cancelling that single pending tick.

pub mod game_loop;
pub mod manual;
pub mod timer;

use std::time::Duration;

use crate::game::SpeedConfig;

pub use game_loop::{GameLoop, LoopState, TickReport};
pub use manual::ManualScheduler;
pub use timer::TokioScheduler;

/// Something that can arm a single future tick
pub trait Scheduler {
    /// Arm the next tick `delay` from now, replacing any pending one
    fn schedule_tick(&mut self, delay: Duration);

    /// Drop the pending tick, if any
    fn cancel_pending(&mut self);

    fn is_pending(&self) -> bool;
}

/// Delay before the next tick: `base - score * decay`, never below `min`
pub fn interval(score: u32, speed: &SpeedConfig) -> Duration {
    let decay = u64::from(score).saturating_mul(speed.decay_per_point_ms);
    let millis = speed
        .base_interval_ms
        .saturating_sub(decay)
        .max(speed.min_interval_ms);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_ramp() {
        let speed = SpeedConfig::default();
        assert_eq!(interval(0, &speed), Duration::from_millis(500));
        assert_eq!(interval(1, &speed), Duration::from_millis(480));
        assert_eq!(interval(10, &speed), Duration::from_millis(300));
        assert_eq!(interval(20, &speed), Duration::from_millis(100));
        assert_eq!(interval(25, &speed), Duration::from_millis(100));
        assert_eq!(interval(100, &speed), Duration::from_millis(100));
        assert_eq!(interval(u32::MAX, &speed), Duration::from_millis(100));
    }

    #[test]
    fn test_interval_never_increases() {
        let speed = SpeedConfig::default();
        let mut last = interval(0, &speed);
        for score in 1..200 {
            let next = interval(score, &speed);
            assert!(next <= last);
            assert!(next >= Duration::from_millis(speed.min_interval_ms));
            last = next;
        }
    }

    #[test]
    fn test_custom_speed() {
        let speed = SpeedConfig {
            base_interval_ms: 300,
            min_interval_ms: 50,
            decay_per_point_ms: 0,
        };
        assert_eq!(interval(40, &speed), Duration::from_millis(300));
    }
}
