//! Scrub accumulator: charge value and press timing while Scrubbing.

use puckshot_core::config::ShotConfig;
use puckshot_core::constants::TIMER_EPSILON;

/// Power built up by repeated presses during one Scrubbing episode.
#[derive(Debug, Clone)]
pub struct ScrubAccumulator {
    /// Always within `[0, max_scrub]`.
    pub amount: f64,
    pub press_count: u32,
    /// Simulation time of the most recent press. `None` = no press yet.
    pub last_press_time: Option<f64>,
    per_press: f64,
    max_scrub: f64,
    finalize_delay: f64,
}

impl ScrubAccumulator {
    pub fn new(config: &ShotConfig) -> Self {
        Self {
            amount: 0.0,
            press_count: 0,
            last_press_time: None,
            per_press: config.scrub_per_press,
            max_scrub: config.max_scrub,
            finalize_delay: config.scrub_finalize_delay,
        }
    }

    pub fn reset(&mut self) {
        self.amount = 0.0;
        self.press_count = 0;
        self.last_press_time = None;
    }

    /// Register one press at `now`. No debouncing: presses at the same
    /// instant all count.
    pub fn press(&mut self, now: f64) {
        self.amount = (self.amount + self.per_press).clamp(0.0, self.max_scrub);
        self.last_press_time = Some(now);
        self.press_count += 1;
    }

    /// Whether the finalize delay has elapsed since the last press.
    /// Never true before the first press.
    pub fn ready_to_fire(&self, now: f64) -> bool {
        match self.last_press_time {
            Some(last) => now - last + TIMER_EPSILON >= self.finalize_delay,
            None => false,
        }
    }

    /// Scrub bar fill, 0..1.
    pub fn fill(&self) -> f64 {
        if self.max_scrub > 0.0 {
            (self.amount / self.max_scrub).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
