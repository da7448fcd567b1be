use nvml_wrapper::error::NvmlError;
use thiserror::Error;

/// Failure of a single call into the GPU management library
#[derive(Error, Debug)]
pub enum HwError {
    #[error(transparent)]
    Nvml(#[from] NvmlError),

    #[cfg(test)]
    #[error("mock failure: {0}")]
    Mock(&'static str),
}

/// Unrecoverable errors before the control loop is entered
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid fan curve: {0}")]
    Curve(#[from] CurveError),

    #[error("failed to initialize NVML: {0}")]
    Init(#[source] HwError),

    #[error("failed to get handle of GPU {index}: {source}")]
    DeviceLookup { index: u32, source: HwError },

    #[error("failed to get fan count of GPU {index}: {source}")]
    FanCount { index: u32, source: HwError },

    #[error("GPU {index} reports no fans")]
    NoFans { index: u32 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CurveError {
    #[error("a curve needs at least 2 points")]
    TooFewPoints,

    #[error("point {index} is not hotter than the one before it")]
    NotIncreasing { index: usize },

    #[error("point {index} has fan speed {fan_pct}% (max is 100%)")]
    SpeedOutOfRange { index: usize, fan_pct: u32 },
}
