mod config;
mod curve;
mod error;
mod fan;
mod logging;
mod nv;
mod poll;
mod shutdown;


use std::time::Duration;

use config::PollConfig;
use curve::{tmp_to_fan, FanCurve};
use error::{HwError, StartupError};
use fan::FanWriter;
use nv::{GpuBackend, GpuDevice};
use poll::PollRate;
use shutdown::StopFlag;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-iteration state, owned by the loop
struct Controller<'c> {
    curve: &'c FanCurve,
    writer: FanWriter,
    poll: PollRate,
}

impl<'c> Controller<'c> {
    fn new(curve: &'c FanCurve, fan_index: u32, poll: PollConfig) -> Self {
        Self {
            curve,
            writer: FanWriter::new(fan_index),
            poll: PollRate::new(poll),
        }
    }

    /// Read, evaluate, apply. Returns how long to sleep before the next step.
    fn step<D: GpuDevice>(&mut self, device: &mut D) -> Result<Duration, HwError> {
        let cur_temp = device.temperature()?;
        let fan_pct = tmp_to_fan(self.curve, cur_temp);
        log::debug!("current nv temp: {}C, target fan: {}%", cur_temp, fan_pct);

        self.writer.apply(device, fan_pct);
        self.poll.update(cur_temp, fan_pct);

        let delay = self.poll.sleep_duration();
        log::debug!(
            "applied fan: {:?}, high temp mode: {}, sleeping {:?}",
            self.writer.last_applied(),
            self.poll.is_high(),
            delay
        );
        Ok(delay)
    }
}

fn main() -> Result<(), String> {
    logging::setup().map_err(|err| err.to_string())?;

    log::info!("Starting ({})...", VERSION);

    let curve = FanCurve::new(config::CURVE).map_err(|err| StartupError::from(err).to_string())?;

    let stop = StopFlag::new();
    let stop_handler_ref = stop.clone();
    ctrlc::set_handler(move || stop_handler_ref.stop()).expect("Error setting Ctrl-C handler");

    run(nv::init, &curve, PollConfig::default(), &stop).map_err(|err| err.to_string())
}

/// Whole daemon lifetime. Once `init` succeeded the backend is always shut down,
/// once the fans were enumerated the fan is always reset to automatic.
fn run<B, F>(
    init: F,
    curve: &FanCurve,
    poll: PollConfig,
    stop: &StopFlag,
) -> Result<(), StartupError>
where
    B: GpuBackend,
    F: FnOnce() -> Result<B, HwError>,
{
    let backend = init().map_err(StartupError::Init)?;

    let result = control(&backend, curve, poll, stop);

    if let Err(err) = backend.shutdown() {
        log::warn!("NVML shutdown failed: {}", err);
    }
    if result.is_ok() {
        log::info!("fan control stopped, reset to automatic mode");
    }
    result
}

fn control<B: GpuBackend>(
    backend: &B,
    curve: &FanCurve,
    poll: PollConfig,
    stop: &StopFlag,
) -> Result<(), StartupError> {
    let index = config::GPU_INDEX;
    let mut device = backend
        .device_by_index(index)
        .map_err(|source| StartupError::DeviceLookup { index, source })?;

    let fan_count = device
        .fan_count()
        .map_err(|source| StartupError::FanCount { index, source })?;
    if fan_count < 1 {
        return Err(StartupError::NoFans { index });
    }

    let name = device.name().unwrap_or_else(|err| {
        log::debug!("could not read GPU name: {}", err);
        String::from("unknown")
    });
    log::info!(
        "NVIDIA fan control started (GPU {}: {}, {} fans)",
        index,
        name,
        fan_count
    );

    let mut controller = Controller::new(curve, config::FAN_INDEX, poll);

    // main loop
    while !stop.is_stopped() {
        match controller.step(&mut device) {
            Ok(delay) => {
                if stop.wait_timeout(delay) {
                    break;
                }
            }
            Err(err) => {
                // without a reading we can't drive the fan safely, hand it back to the driver
                log::error!("failed to get GPU temperature: {}", err);
                stop.stop();
            }
        }
    }

    log::debug!("resetting fan {} to automatic", config::FAN_INDEX);
    if let Err(err) = device.set_fan_speed_automatic(config::FAN_INDEX) {
        log::warn!("failed to reset fan to automatic mode: {}", err);
    }

    Ok(())
}
