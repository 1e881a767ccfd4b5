use log::{info, warn};

use super::store::ScoreStore;

/// Key the best score is stored under
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Best score across sessions.
///
/// Read once when created and written only when a finished game beats it.
/// Storage failures are logged and otherwise ignored: the value falls back
/// to 0 and simply is not saved.
pub struct HighScore {
    best: u32,
    store: Box<dyn ScoreStore>,
}

impl HighScore {
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let best = match store.get_persisted_int(HIGH_SCORE_KEY) {
            Ok(Some(value)) => u32::try_from(value).unwrap_or_else(|_| {
                warn!("Ignoring out-of-range stored high score {value}");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("Could not load high score: {e}");
                0
            }
        };

        Self { best, store }
    }

    pub fn value(&self) -> u32 {
        self.best
    }

    /// Offer a final score. Returns true if it set a new record.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        info!("New high score: {score}");

        if let Err(e) = self
            .store
            .set_persisted_int(HIGH_SCORE_KEY, i64::from(score))
        {
            warn!("Could not save high score: {e}");
        }
        true
    }
}
