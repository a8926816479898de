//! Recording devices and capture channels.

use std::sync::Arc;

use log::{debug, warn};
use ringbuf::traits::{Producer, Split};
use ringbuf::{HeapCons, HeapRb};

use super::{probed, DeviceContext, DeviceInfo, RegistryDevice};
use crate::api::{self, BassApi};
use crate::callbacks::{record_trampoline, CallbackCell, PinnedCallback};
use crate::channel::Channel;
use crate::error::{DeviceKind, Result};
use crate::events::Delivery;
use crate::ffi::*;
use crate::stream;

/// Owned copy of BASS_RECORDINFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInfo {
    pub flags: DWORD,
    pub formats: DWORD,
    pub inputs: u32,
    /// Only one input can be enabled at a time
    pub single_input: bool,
    pub freq: DWORD,
}

/// One input of a recording device (line in, microphone, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub index: i32,
    pub name: String,
    pub flags: DWORD,
    pub volume: f32,
}

impl RecordInput {
    pub fn is_enabled(&self) -> bool {
        self.flags & BASS_INPUT_OFF == 0
    }

    pub fn input_type(&self) -> DWORD {
        self.flags & BASS_INPUT_TYPE_MASK
    }
}

/// A running capture: the recording channel plus the closure that
/// receives its data.
pub struct Recording {
    channel: Channel,
    _proc: PinnedCallback,
}

impl Recording {
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Stop capturing and free the recording channel.
    pub fn stop(self) {
        self.channel.dispose();
    }
}

impl std::fmt::Debug for Recording {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recording").field("channel", &self.channel).finish()
    }
}

/// One recording device.
pub struct RecordDevice {
    api: Arc<dyn BassApi>,
    delivery: Delivery,
    index: u32,
}

impl RegistryDevice for RecordDevice {
    const KIND: DeviceKind = DeviceKind::Record;

    fn probe(ctx: &DeviceContext, index: u32) -> Result<Option<Self>> {
        let mut raw = BassDeviceInfo::default();
        if !probed(&*ctx.api, ctx.api.record_device_info(index, &mut raw))? {
            return Ok(None);
        }
        Ok(Some(Self {
            api: ctx.api.clone(),
            delivery: ctx.delivery.clone(),
            index,
        }))
    }
}

impl RecordDevice {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn info(&self) -> Result<DeviceInfo> {
        let mut raw = BassDeviceInfo::default();
        api::check(&*self.api, self.api.record_device_info(self.index, &mut raw))?;
        Ok(unsafe { DeviceInfo::from_raw(&raw) })
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.info()?.is_initialized())
    }

    pub fn init(&self) -> Result<()> {
        api::check(&*self.api, self.api.record_init(self.index as i32))?;
        debug!("Record device {} initialized", self.index);
        Ok(())
    }

    pub fn free(&self) -> Result<()> {
        self.make_current()?;
        api::check(&*self.api, self.api.record_free())?;
        debug!("Record device {} freed", self.index);
        Ok(())
    }

    pub fn make_current(&self) -> Result<()> {
        api::check(&*self.api, self.api.record_set_device(self.index))
    }

    pub fn record_info(&self) -> Result<RecordInfo> {
        self.make_current()?;
        let mut raw = BassRecordInfo::default();
        api::check(&*self.api, self.api.record_info(&mut raw))?;
        Ok(RecordInfo {
            flags: raw.flags,
            formats: raw.formats,
            inputs: raw.inputs,
            single_input: to_bool(raw.singlein),
            freq: raw.freq,
        })
    }

    /// Every input with its current state.
    pub fn inputs(&self) -> Result<Vec<RecordInput>> {
        let count = self.record_info()?.inputs as i32;
        (0..count)
            .map(|index| {
                let mut volume = 0.0;
                let flags = self.api.record_input(index, &mut volume);
                if flags == DWORD::MAX {
                    return Err(api::last_error(&*self.api));
                }
                let name = self.api.record_input_name(index).unwrap_or_default();
                Ok(RecordInput {
                    index,
                    name,
                    flags,
                    volume,
                })
            })
            .collect()
    }

    /// Enable or disable an input; `volume` is left unchanged when `None`.
    pub fn set_input(&self, input: i32, enabled: bool, volume: Option<f32>) -> Result<()> {
        self.make_current()?;
        let flags = if enabled { BASS_INPUT_ON } else { BASS_INPUT_OFF };
        api::check(&*self.api, self.api.record_set_input(input, flags, volume.unwrap_or(-1.0)))
    }

    /// Start capturing. `f` receives each captured block and returns false
    /// to stop.
    pub fn start<F>(&self, freq: u32, chans: u32, flags: DWORD, f: F) -> Result<Recording>
    where
        F: FnMut(&[u8]) -> bool + Send + 'static,
    {
        self.make_current()?;
        let cell = CallbackCell::new(f);
        let handle = unsafe {
            self.api
                .record_start(freq, chans, flags, Some(record_trampoline::<F>), cell.user_ptr())
        };
        let handle = api::check_handle(&*self.api, handle)?;
        let channel = stream::adopt(&self.api, &self.delivery, handle)?;
        debug!("Recording {:#x} started on device {}", handle, self.index);
        Ok(Recording { channel, _proc: cell })
    }

    /// Start capturing into a ring of `capacity` bytes. Data that does not
    /// fit is discarded.
    pub fn start_buffered(
        &self,
        freq: u32,
        chans: u32,
        flags: DWORD,
        capacity: usize,
    ) -> Result<(Recording, HeapCons<u8>)> {
        let (mut producer, consumer) = HeapRb::<u8>::new(capacity.max(1)).split();
        let recording = self.start(freq, chans, flags, move |data: &[u8]| {
            let pushed = producer.push_slice(data);
            if pushed < data.len() {
                warn!("Record ring full, discarded {} bytes", data.len() - pushed);
            }
            true
        })?;
        Ok((recording, consumer))
    }
}

impl std::fmt::Debug for RecordDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordDevice").field("index", &self.index).finish()
    }
}
