use std::time::Duration;

use crate::curve::FanAtTemp;

/// Index of the GPU we read the temperature from and drive the fan of
pub const GPU_INDEX: u32 = 0;

/// Fan channel the curve is applied to
pub const FAN_INDEX: u32 = 0;

/// At or above this temperature we poll with `SLEEP_HIGH_S`, below with `SLEEP_LOW_S`
pub const HIGH_TEMP_THRESHOLD_C: i32 = 42;

/// Polling rate while hot
pub const SLEEP_HIGH_S: u64 = 2;

/// Polling rate while cool
pub const SLEEP_LOW_S: u64 = 5;

/// Actual fan curve
/// Each point's speed holds from its temperature up to (excluding) the next point's temperature
pub const CURVE: &'static [FanAtTemp] = &[
    FanAtTemp {
        temp_c: 0,
        fan_pct: 25,
    },
    FanAtTemp {
        temp_c: 40,
        fan_pct: 30,
    },
    FanAtTemp {
        temp_c: 55,
        fan_pct: 45,
    },
    FanAtTemp {
        temp_c: 67,
        fan_pct: 65,
    },
    FanAtTemp {
        temp_c: 75,
        fan_pct: 78,
    },
    FanAtTemp {
        temp_c: 85,
        fan_pct: 99,
    },
];

/// Polling tunables, see `poll::PollRate`
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub high_threshold_c: i32,
    pub sleep_high: Duration,
    pub sleep_low: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            high_threshold_c: HIGH_TEMP_THRESHOLD_C,
            sleep_high: Duration::from_secs(SLEEP_HIGH_S),
            sleep_low: Duration::from_secs(SLEEP_LOW_S),
        }
    }
}
