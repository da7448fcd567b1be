use std::time::Duration;

use crate::config::PollConfig;

/// Picks the polling delay: fast while hot, slow while cool
#[derive(Debug)]
pub struct PollRate {
    config: PollConfig,
    high: bool,
}

impl PollRate {
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            high: false,
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Feed a reading (and the fan target computed for it, for logging).
    /// Returns true if the mode changed.
    pub fn update(&mut self, temp_c: i32, fan_pct: u32) -> bool {
        let high = temp_c >= self.config.high_threshold_c;
        if high == self.high {
            return false;
        }

        self.high = high;
        log::info!("temp: {}°C -> fan speed: {}%", temp_c, fan_pct);
        true
    }

    pub fn sleep_duration(&self) -> Duration {
        if self.high {
            self.config.sleep_high
        } else {
            self.config.sleep_low
        }
    }
}
