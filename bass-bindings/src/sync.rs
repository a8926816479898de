//! Scoped sync and DSP registrations.
//!
//! A guard owns the closure it registered and removes the native
//! registration before dropping it.

use std::sync::Arc;

use crate::api::{self, BassApi};
use crate::callbacks::{dsp_trampoline, sync_trampoline, CallbackCell, PinnedCallback};
use crate::error::Result;
use crate::ffi::*;

/// Discrete sync types (the `BASS_SYNC_*` low word)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncType {
    Position(QWORD),
    End,
    Meta,
    Slide,
    Stall,
    Download,
    Free,
    SetPosition,
    Attribute(DWORD),
    /// Playback stopped by an error or device failure
    Stop,
    DeviceFormat,
    Raw { sync_type: DWORD, param: QWORD },
}

impl SyncType {
    /// Native type and parameter for BASS_ChannelSetSync.
    pub fn raw(self) -> (DWORD, QWORD) {
        match self {
            SyncType::Position(pos) => (BASS_SYNC_POS, pos),
            SyncType::End => (BASS_SYNC_END, 0),
            SyncType::Meta => (BASS_SYNC_META, 0),
            SyncType::Slide => (BASS_SYNC_SLIDE, 0),
            SyncType::Stall => (BASS_SYNC_STALL, 0),
            SyncType::Download => (BASS_SYNC_DOWNLOAD, 0),
            SyncType::Free => (BASS_SYNC_FREE, 0),
            SyncType::SetPosition => (BASS_SYNC_SETPOS, 0),
            SyncType::Attribute(attrib) => (BASS_SYNC_ATTRIB, attrib as QWORD),
            SyncType::Stop => (BASS_SYNC_STOP, 0),
            SyncType::DeviceFormat => (BASS_SYNC_DEV_FORMAT, 0),
            SyncType::Raw { sync_type, param } => (sync_type, param),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncTarget {
    Channel,
    MixerSource,
}

/// A sync registration owned by Rust code; removed on drop.
pub struct SyncGuard {
    api: Arc<dyn BassApi>,
    channel: DWORD,
    sync: HSYNC,
    target: SyncTarget,
    _callback: PinnedCallback,
}

impl SyncGuard {
    /// Register `f(sync, channel, data)` as a sync on `channel`.
    /// `flags` is ORed into the type (`BASS_SYNC_MIXTIME`, `BASS_SYNC_ONETIME`, ...).
    pub fn register<F>(api: &Arc<dyn BassApi>, channel: DWORD, sync_type: SyncType, flags: DWORD, f: F) -> Result<Self>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        let (ty, param) = sync_type.raw();
        let cell = CallbackCell::new(f);
        let sync = unsafe {
            api.channel_set_sync(channel, ty | flags, param, Some(sync_trampoline::<F>), cell.user_ptr())
        };
        api::check_handle(&**api, sync)?;
        Ok(Self {
            api: api.clone(),
            channel,
            sync,
            target: SyncTarget::Channel,
            _callback: cell,
        })
    }

    /// Register a sync on a mixer source channel (BASS_Mixer_ChannelSetSync).
    pub fn register_mixer<F>(
        api: &Arc<dyn BassApi>,
        channel: DWORD,
        sync_type: SyncType,
        flags: DWORD,
        f: F,
    ) -> Result<Self>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        let mixer = api::require_mixer(&**api)?;
        let (ty, param) = sync_type.raw();
        let cell = CallbackCell::new(f);
        let sync = unsafe {
            mixer.channel_set_sync(channel, ty | flags, param, Some(sync_trampoline::<F>), cell.user_ptr())
        };
        api::check_handle(&**api, sync)?;
        Ok(Self {
            api: api.clone(),
            channel,
            sync,
            target: SyncTarget::MixerSource,
            _callback: cell,
        })
    }

    pub fn handle(&self) -> HSYNC {
        self.sync
    }

    pub fn channel(&self) -> DWORD {
        self.channel
    }
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        // Fails harmlessly once the channel is gone.
        match self.target {
            SyncTarget::Channel => {
                self.api.channel_remove_sync(self.channel, self.sync);
            }
            SyncTarget::MixerSource => {
                if let Some(mixer) = self.api.mixer() {
                    mixer.channel_remove_sync(self.channel, self.sync);
                }
            }
        }
    }
}

/// A DSP registration owned by Rust code; removed on drop.
pub struct DspGuard {
    api: Arc<dyn BassApi>,
    channel: DWORD,
    dsp: HDSP,
    _callback: PinnedCallback,
}

impl DspGuard {
    /// Insert `f(channel, samples)` into `channel`'s DSP chain.
    pub fn register<F>(api: &Arc<dyn BassApi>, channel: DWORD, priority: i32, f: F) -> Result<Self>
    where
        F: FnMut(DWORD, &mut [u8]) + Send + 'static,
    {
        let cell = CallbackCell::new(f);
        let dsp = unsafe { api.channel_set_dsp(channel, Some(dsp_trampoline::<F>), cell.user_ptr(), priority) };
        api::check_handle(&**api, dsp)?;
        Ok(Self {
            api: api.clone(),
            channel,
            dsp,
            _callback: cell,
        })
    }

    pub fn handle(&self) -> HDSP {
        self.dsp
    }
}

impl Drop for DspGuard {
    fn drop(&mut self) {
        self.api.channel_remove_dsp(self.channel, self.dsp);
    }
}
