//! Output devices (BASS_Init and friends).

use std::sync::Arc;

use log::debug;

use super::{probed, DeviceContext, DeviceInfo, RegistryDevice};
use crate::api::{self, BassApi};
use crate::error::{DeviceKind, Result};
use crate::ffi::*;

/// Owned copy of BASS_INFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub flags: DWORD,
    pub min_rate: DWORD,
    pub max_rate: DWORD,
    pub min_buffer_ms: DWORD,
    pub latency_ms: DWORD,
    pub init_flags: DWORD,
    pub speakers: DWORD,
    pub freq: DWORD,
}

/// One output device.
///
/// Core output calls act on the thread's current device, so every
/// operation here selects this device first.
pub struct PlaybackDevice {
    api: Arc<dyn BassApi>,
    index: u32,
}

impl RegistryDevice for PlaybackDevice {
    const KIND: DeviceKind = DeviceKind::Playback;

    fn probe(ctx: &DeviceContext, index: u32) -> Result<Option<Self>> {
        let mut raw = BassDeviceInfo::default();
        if !probed(&*ctx.api, ctx.api.device_info(index, &mut raw))? {
            return Ok(None);
        }
        Ok(Some(Self {
            api: ctx.api.clone(),
            index,
        }))
    }
}

impl PlaybackDevice {
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Current native description (the INIT flag changes over time).
    pub fn info(&self) -> Result<DeviceInfo> {
        let mut raw = BassDeviceInfo::default();
        api::check(&*self.api, self.api.device_info(self.index, &mut raw))?;
        Ok(unsafe { DeviceInfo::from_raw(&raw) })
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.info()?.is_initialized())
    }

    /// Initialize output on this device (BASS_Init).
    pub fn init(&self, freq: u32, flags: DWORD) -> Result<()> {
        api::check(&*self.api, self.api.init(self.index as i32, freq, flags))?;
        debug!("Playback device {} initialized at {} Hz", self.index, freq);
        Ok(())
    }

    /// Release this device (BASS_Free). Its channels are freed with it.
    pub fn free(&self) -> Result<()> {
        self.make_current()?;
        api::check(&*self.api, self.api.free())?;
        debug!("Playback device {} freed", self.index);
        Ok(())
    }

    /// Make this the device used by later calls on this thread.
    pub fn make_current(&self) -> Result<()> {
        api::check(&*self.api, self.api.set_device(self.index))
    }

    pub fn output_info(&self) -> Result<OutputInfo> {
        self.make_current()?;
        let mut raw = BassInfo::default();
        api::check(&*self.api, self.api.info(&mut raw))?;
        Ok(OutputInfo {
            flags: raw.flags,
            min_rate: raw.minrate,
            max_rate: raw.maxrate,
            min_buffer_ms: raw.minbuf,
            latency_ms: raw.latency,
            init_flags: raw.initflags,
            speakers: raw.speakers,
            freq: raw.freq,
        })
    }

    /// Device output volume, 0.0 to 1.0.
    pub fn volume(&self) -> Result<f32> {
        self.make_current()?;
        let volume = self.api.volume();
        if volume < 0.0 {
            return Err(api::last_error(&*self.api));
        }
        Ok(volume)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.make_current()?;
        api::check(&*self.api, self.api.set_volume(volume))
    }

    /// Resume output after [`PlaybackDevice::stop`] or [`PlaybackDevice::pause`].
    pub fn start(&self) -> Result<()> {
        self.make_current()?;
        api::check(&*self.api, self.api.start())
    }

    pub fn stop(&self) -> Result<()> {
        self.make_current()?;
        api::check(&*self.api, self.api.stop())
    }

    pub fn pause(&self) -> Result<()> {
        self.make_current()?;
        api::check(&*self.api, self.api.pause())
    }
}

impl std::fmt::Debug for PlaybackDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackDevice").field("index", &self.index).finish()
    }
}
