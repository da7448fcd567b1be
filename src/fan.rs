use crate::nv::GpuDevice;

/// Writes fan speeds, skipping the hardware call when the target is what we last applied
#[derive(Debug)]
pub struct FanWriter {
    fan_index: u32,
    last_applied: Option<u32>,
}

impl FanWriter {
    pub fn new(fan_index: u32) -> Self {
        Self {
            fan_index,
            last_applied: None,
        }
    }

    pub fn last_applied(&self) -> Option<u32> {
        self.last_applied
    }

    /// Returns true if a write was issued and succeeded.
    /// On failure the last applied speed is kept, so the next call with the same target retries.
    pub fn apply<D: GpuDevice>(&mut self, device: &mut D, fan_pct: u32) -> bool {
        if self.last_applied == Some(fan_pct) {
            log::trace!("fan speed unchanged: {}%", fan_pct);
            return false;
        }

        match device.set_fan_speed(self.fan_index, fan_pct) {
            Ok(()) => {
                log::info!("updated fan speed: {}%", fan_pct);
                self.last_applied = Some(fan_pct);
                true
            }
            Err(err) => {
                log::warn!(
                    "failed to set fan {} speed to {}%: {}",
                    self.fan_index,
                    fan_pct,
                    err
                );
                false
            }
        }
    }
}
