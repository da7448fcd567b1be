use nvml_wrapper::{enum_wrappers::device::TemperatureSensor, Device, Nvml};

use crate::error::HwError;

/// A loaded GPU management library
pub trait GpuBackend {
    type Device<'a>: GpuDevice
    where
        Self: 'a;

    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, HwError>;

    /// Releases the library, all devices must be dropped by now
    fn shutdown(self) -> Result<(), HwError>;
}

pub trait GpuDevice {
    fn name(&self) -> Result<String, HwError>;

    fn fan_count(&self) -> Result<u32, HwError>;

    /// Core temperature in °C
    fn temperature(&self) -> Result<i32, HwError>;

    fn set_fan_speed(&mut self, fan_index: u32, fan_pct: u32) -> Result<(), HwError>;

    /// Hands the fan back to the driver's own policy
    fn set_fan_speed_automatic(&mut self, fan_index: u32) -> Result<(), HwError>;
}

pub struct NvBackend {
    nvml: Nvml,
}

/// Loads libnvidia-ml and calls nvmlInit
pub fn init() -> Result<NvBackend, HwError> {
    let nvml = Nvml::init()?;
    if let Ok(version) = nvml.sys_driver_version() {
        log::debug!("nvidia driver version: {}", version);
    }
    Ok(NvBackend { nvml })
}

impl GpuBackend for NvBackend {
    type Device<'a> = NvDevice<'a>;

    fn device_by_index(&self, index: u32) -> Result<NvDevice<'_>, HwError> {
        let device = self.nvml.device_by_index(index)?;
        Ok(NvDevice { device })
    }

    fn shutdown(self) -> Result<(), HwError> {
        self.nvml.shutdown()?;
        Ok(())
    }
}

pub struct NvDevice<'nvml> {
    device: Device<'nvml>,
}

impl GpuDevice for NvDevice<'_> {
    fn name(&self) -> Result<String, HwError> {
        Ok(self.device.name()?)
    }

    fn fan_count(&self) -> Result<u32, HwError> {
        Ok(self.device.num_fans()?)
    }

    fn temperature(&self) -> Result<i32, HwError> {
        let temp = self.device.temperature(TemperatureSensor::Gpu)?;
        Ok(i32::try_from(temp).unwrap_or(i32::MAX))
    }

    fn set_fan_speed(&mut self, fan_index: u32, fan_pct: u32) -> Result<(), HwError> {
        self.device.set_fan_speed(fan_index, fan_pct)?;
        Ok(())
    }

    fn set_fan_speed_automatic(&mut self, fan_index: u32) -> Result<(), HwError> {
        self.device.set_default_fan_speed(fan_index)?;
        Ok(())
    }
}
