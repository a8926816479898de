//! Channel wrapper: one native channel handle and its lifecycle.
//!
//! Binding validates the handle with `BASS_ChannelGetInfo` and installs
//! three syncs owned by the wrapper:
//! - `BASS_SYNC_FREE` marks the wrapper disposed and raises `Disposed`
//! - `BASS_SYNC_END` raises `MediaEnded`
//! - `BASS_SYNC_STOP` raises `MediaFailed`
//!
//! Disposal happens once, either through [`Channel::dispose`] (or drop)
//! or when the native free sync fires first. Every accessor re-queries the
//! native layer and fails with [`BassError::Disposed`] afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::api::{self, BassApi};
use crate::error::{BassError, ErrorCode, Result};
use crate::events::{Delivery, HandlerList};
use crate::ffi::*;
use crate::fx::{Effect, EffectParameters};
use crate::sync::{DspGuard, SyncGuard, SyncType};
use crate::tags::{self, TagType, Tags};
use crate::Bass;

/// Owned copy of BASS_CHANNELINFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub freq: u32,
    pub chans: u32,
    pub flags: u32,
    pub ctype: u32,
    pub origres: u32,
    pub plugin: HPLUGIN,
    pub sample: HSAMPLE,
    pub filename: Option<String>,
}

impl ChannelInfo {
    /// # Safety
    /// `raw.filename` must be null or a valid C string.
    pub(crate) unsafe fn from_raw(raw: &BassChannelInfo) -> Self {
        Self {
            freq: raw.freq,
            chans: raw.chans,
            flags: raw.flags,
            ctype: raw.ctype,
            origres: raw.origres,
            plugin: raw.plugin,
            sample: raw.sample,
            filename: copy_cstr(raw.filename),
        }
    }

    pub fn is_float(&self) -> bool {
        self.flags & BASS_SAMPLE_FLOAT != 0
    }

    pub fn is_decode(&self) -> bool {
        self.flags & BASS_STREAM_DECODE != 0
    }
}

/// BASS_ChannelIsActive result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveState {
    Stopped,
    Playing,
    Stalled,
    Paused,
    PausedDevice,
}

impl ActiveState {
    pub fn from_raw(value: DWORD) -> Self {
        match value {
            BASS_ACTIVE_PLAYING => ActiveState::Playing,
            BASS_ACTIVE_STALLED => ActiveState::Stalled,
            BASS_ACTIVE_PAUSED => ActiveState::Paused,
            BASS_ACTIVE_PAUSED_DEVICE => ActiveState::PausedDevice,
            _ => ActiveState::Stopped,
        }
    }
}

/// Events a channel raises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    MediaEnded,
    MediaFailed,
    Disposed,
}

struct ChannelShared {
    handle: DWORD,
    disposed: AtomicBool,
    ended: HandlerList<()>,
    failed: HandlerList<()>,
    on_disposed: HandlerList<()>,
    delivery: Delivery,
}

impl ChannelShared {
    /// True for the first caller only.
    fn mark_disposed(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }

    fn raise(self: &Arc<Self>, event: ChannelEvent) {
        let shared = self.clone();
        self.delivery.deliver(Box::new(move || shared.fire(event)));
    }

    fn fire(&self, event: ChannelEvent) {
        match event {
            ChannelEvent::MediaEnded => self.ended.fire(()),
            ChannelEvent::MediaFailed => self.failed.fire(()),
            ChannelEvent::Disposed => self.on_disposed.fire(()),
        }
    }
}

/// A bound native channel (stream, sample channel, music or recording).
pub struct Channel {
    api: Arc<dyn BassApi>,
    shared: Arc<ChannelShared>,
    _syncs: Vec<SyncGuard>,
}

impl Channel {
    /// Bind a wrapper to an existing native handle.
    ///
    /// Fails with [`BassError::InvalidHandle`] if native code does not know
    /// the handle; nothing is registered in that case.
    pub fn new(bass: &Bass, handle: DWORD) -> Result<Self> {
        Self::bind(bass.api(), bass.delivery().clone(), handle)
    }

    pub(crate) fn bind(api: &Arc<dyn BassApi>, delivery: Delivery, handle: DWORD) -> Result<Self> {
        let mut info = BassChannelInfo::default();
        if !api.channel_info(handle, &mut info) {
            return Err(BassError::InvalidHandle {
                handle,
                code: ErrorCode::from_raw(api.error_code()),
            });
        }

        let shared = Arc::new(ChannelShared {
            handle,
            disposed: AtomicBool::new(false),
            ended: HandlerList::new(),
            failed: HandlerList::new(),
            on_disposed: HandlerList::new(),
            delivery,
        });

        let on_free = shared.clone();
        let on_end = shared.clone();
        let on_stop = shared.clone();
        let syncs = vec![
            SyncGuard::register(api, handle, SyncType::Free, 0, move |_, _, _| {
                if on_free.mark_disposed() {
                    debug!("Channel {:#x} freed natively", on_free.handle);
                    on_free.raise(ChannelEvent::Disposed);
                }
            })?,
            SyncGuard::register(api, handle, SyncType::End, 0, move |_, _, _| {
                on_end.raise(ChannelEvent::MediaEnded);
            })?,
            SyncGuard::register(api, handle, SyncType::Stop, 0, move |_, _, _| {
                on_stop.raise(ChannelEvent::MediaFailed);
            })?,
        ];

        debug!("Channel {:#x} bound (ctype {:#x})", handle, info.ctype);
        Ok(Self {
            api: api.clone(),
            shared,
            _syncs: syncs,
        })
    }

    /// The native handle, valid or not.
    pub fn handle(&self) -> DWORD {
        self.shared.handle
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::SeqCst)
    }

    pub(crate) fn api(&self) -> &Arc<dyn BassApi> {
        &self.api
    }

    pub(crate) fn delivery(&self) -> &Delivery {
        &self.shared.delivery
    }

    /// The handle if still bound.
    pub(crate) fn live(&self) -> Result<DWORD> {
        if self.is_disposed() {
            Err(BassError::Disposed {
                handle: self.shared.handle,
            })
        } else {
            Ok(self.shared.handle)
        }
    }

    fn check(&self, ok: bool) -> Result<()> {
        api::check(&*self.api, ok)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Free the native channel and raise `Disposed`.
    ///
    /// Returns false if the channel was already disposed, by an earlier call
    /// or by the native free sync.
    pub fn dispose(&self) -> bool {
        if !self.shared.mark_disposed() {
            return false;
        }
        if !self.api.channel_free(self.shared.handle) {
            debug!(
                "Channel {:#x} was already gone natively (error {})",
                self.shared.handle,
                self.api.error_code()
            );
        }
        debug!("Channel {:#x} disposed", self.shared.handle);
        self.shared.raise(ChannelEvent::Disposed);
        true
    }

    /// Called when playback reaches the end of the media.
    pub fn on_media_ended(&self, mut handler: impl FnMut() + Send + 'static) {
        self.shared.ended.push(move |()| handler());
    }

    /// Called when playback stops because of an error or device failure.
    pub fn on_media_failed(&self, mut handler: impl FnMut() + Send + 'static) {
        self.shared.failed.push(move |()| handler());
    }

    /// Called once when the channel is disposed.
    pub fn on_disposed(&self, mut handler: impl FnMut() + Send + 'static) {
        self.shared.on_disposed.push(move |()| handler());
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn info(&self) -> Result<ChannelInfo> {
        let handle = self.live()?;
        let mut raw = BassChannelInfo::default();
        self.check(self.api.channel_info(handle, &mut raw))?;
        Ok(unsafe { ChannelInfo::from_raw(&raw) })
    }

    pub fn state(&self) -> Result<ActiveState> {
        let handle = self.live()?;
        Ok(ActiveState::from_raw(self.api.channel_is_active(handle)))
    }

    pub fn is_playing(&self) -> Result<bool> {
        Ok(self.state()? == ActiveState::Playing)
    }

    pub fn play(&self, restart: bool) -> Result<()> {
        let handle = self.live()?;
        self.check(self.api.channel_play(handle, restart))
    }

    pub fn pause(&self) -> Result<()> {
        let handle = self.live()?;
        self.check(self.api.channel_pause(handle))
    }

    pub fn stop(&self) -> Result<()> {
        let handle = self.live()?;
        self.check(self.api.channel_stop(handle))
    }

    // ========================================================================
    // Position and length
    // ========================================================================

    /// Position in bytes.
    pub fn position(&self) -> Result<u64> {
        let handle = self.live()?;
        self.qword(self.api.channel_position(handle, BASS_POS_BYTE))
    }

    pub fn set_position(&self, bytes: u64) -> Result<()> {
        let handle = self.live()?;
        self.check(self.api.channel_set_position(handle, bytes, BASS_POS_BYTE))
    }

    pub fn position_seconds(&self) -> Result<f64> {
        let bytes = self.position()?;
        self.bytes_to_seconds(bytes)
    }

    pub fn set_position_seconds(&self, seconds: f64) -> Result<()> {
        let bytes = self.seconds_to_bytes(seconds)?;
        self.set_position(bytes)
    }

    /// Length in bytes.
    pub fn length(&self) -> Result<u64> {
        let handle = self.live()?;
        self.qword(self.api.channel_length(handle, BASS_POS_BYTE))
    }

    pub fn duration(&self) -> Result<Duration> {
        let seconds = self.bytes_to_seconds(self.length()?)?;
        Ok(Duration::from_secs_f64(seconds))
    }

    pub fn bytes_to_seconds(&self, bytes: u64) -> Result<f64> {
        let handle = self.live()?;
        let seconds = self.api.channel_bytes_to_seconds(handle, bytes);
        if seconds < 0.0 {
            Err(api::last_error(&*self.api))
        } else {
            Ok(seconds)
        }
    }

    pub fn seconds_to_bytes(&self, seconds: f64) -> Result<u64> {
        let handle = self.live()?;
        self.qword(self.api.channel_seconds_to_bytes(handle, seconds))
    }

    fn qword(&self, value: QWORD) -> Result<u64> {
        if value == QWORD::MAX {
            Err(api::last_error(&*self.api))
        } else {
            Ok(value)
        }
    }

    fn dword(&self, value: DWORD) -> Result<u32> {
        if value == DWORD::MAX {
            Err(api::last_error(&*self.api))
        } else {
            Ok(value)
        }
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    pub fn attribute(&self, attrib: DWORD) -> Result<f32> {
        let handle = self.live()?;
        let mut value = 0.0;
        self.check(self.api.channel_attribute(handle, attrib, &mut value))?;
        Ok(value)
    }

    pub fn set_attribute(&self, attrib: DWORD, value: f32) -> Result<()> {
        let handle = self.live()?;
        self.check(self.api.channel_set_attribute(handle, attrib, value))
    }

    /// Slide an attribute to `value` over `time`.
    pub fn slide_attribute(&self, attrib: DWORD, value: f32, time: Duration) -> Result<()> {
        let handle = self.live()?;
        let ms = time.as_millis().min(DWORD::MAX as u128) as DWORD;
        self.check(self.api.channel_slide_attribute(handle, attrib, value, ms))
    }

    pub fn is_sliding(&self, attrib: DWORD) -> Result<bool> {
        let handle = self.live()?;
        Ok(self.api.channel_is_sliding(handle, attrib))
    }

    /// Sample rate in Hz.
    pub fn frequency(&self) -> Result<f32> {
        self.attribute(BASS_ATTRIB_FREQ)
    }

    pub fn set_frequency(&self, hz: f32) -> Result<()> {
        self.set_attribute(BASS_ATTRIB_FREQ, hz)
    }

    /// Volume, 0.0 (silent) to 1.0 (full).
    pub fn volume(&self) -> Result<f32> {
        self.attribute(BASS_ATTRIB_VOL)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.set_attribute(BASS_ATTRIB_VOL, volume)
    }

    /// Panning, -1.0 (left) to 1.0 (right).
    pub fn pan(&self) -> Result<f32> {
        self.attribute(BASS_ATTRIB_PAN)
    }

    pub fn set_pan(&self, pan: f32) -> Result<()> {
        self.set_attribute(BASS_ATTRIB_PAN, pan)
    }

    pub fn flags(&self) -> Result<DWORD> {
        let handle = self.live()?;
        self.dword(self.api.channel_flags(handle, 0, 0))
    }

    /// Set the bits of `flags` selected by `mask`; returns the new flags.
    pub fn set_flags(&self, flags: DWORD, mask: DWORD) -> Result<DWORD> {
        let handle = self.live()?;
        self.dword(self.api.channel_flags(handle, flags, mask))
    }

    pub fn looping(&self) -> Result<bool> {
        Ok(self.flags()? & BASS_SAMPLE_LOOP != 0)
    }

    pub fn set_looping(&self, looping: bool) -> Result<()> {
        let flags = if looping { BASS_SAMPLE_LOOP } else { 0 };
        self.set_flags(flags, BASS_SAMPLE_LOOP).map(|_| ())
    }

    /// Peak level as (left, right), each 0..=32768.
    pub fn level(&self) -> Result<(u16, u16)> {
        let handle = self.live()?;
        let level = self.dword(self.api.channel_level(handle))?;
        Ok(((level & 0xffff) as u16, (level >> 16) as u16))
    }

    pub fn device(&self) -> Result<DWORD> {
        let handle = self.live()?;
        self.dword(self.api.channel_device(handle))
    }

    pub fn set_device(&self, device: DWORD) -> Result<()> {
        let handle = self.live()?;
        self.check(self.api.channel_set_device(handle, device))
    }

    /// Decoded tags of `tag_type`, `None` when the channel has none.
    pub fn tags(&self, tag_type: TagType) -> Result<Option<Tags>> {
        let handle = self.live()?;
        Ok(tags::read(&*self.api, handle, tag_type))
    }

    /// Start/stop/pause `other` together with this channel.
    pub fn link(&self, other: &Channel) -> Result<()> {
        let handle = self.live()?;
        let other = other.live()?;
        self.check(self.api.channel_set_link(handle, other))
    }

    pub fn unlink(&self, other: &Channel) -> Result<()> {
        let handle = self.live()?;
        let other = other.live()?;
        self.check(self.api.channel_remove_link(handle, other))
    }

    // ========================================================================
    // Sample data
    // ========================================================================

    /// Read float sample data into `buffer`; returns samples read.
    /// Buffers of 256 MiB or more are rejected with `IllegalParam`.
    pub fn get_data(&self, buffer: &mut [f32]) -> Result<usize> {
        let handle = self.live()?;
        let bytes = data_length(std::mem::size_of_val(buffer))?;
        let read = unsafe {
            self.api
                .channel_get_data(handle, buffer.as_mut_ptr() as *mut _, bytes | BASS_DATA_FLOAT)
        };
        Ok(self.dword(read)? as usize / std::mem::size_of::<f32>())
    }

    /// Bytes buffered and ready to read.
    pub fn available(&self) -> Result<u32> {
        let handle = self.live()?;
        let read = unsafe { self.api.channel_get_data(handle, std::ptr::null_mut(), BASS_DATA_AVAILABLE) };
        self.dword(read)
    }

    /// FFT magnitudes; `size` is 256, 512, 1024, 2048 or 4096 samples.
    pub fn fft(&self, size: u32) -> Result<Vec<f32>> {
        let handle = self.live()?;
        let flag = match size {
            256 => BASS_DATA_FFT256,
            512 => BASS_DATA_FFT512,
            1024 => BASS_DATA_FFT1024,
            2048 => BASS_DATA_FFT2048,
            4096 => BASS_DATA_FFT4096,
            _ => return Err(BassError::Native(ErrorCode::IllegalParam)),
        };
        let mut bins = vec![0f32; size as usize / 2];
        let read = unsafe { self.api.channel_get_data(handle, bins.as_mut_ptr() as *mut _, flag) };
        self.dword(read)?;
        Ok(bins)
    }

    // ========================================================================
    // Callbacks and effects
    // ========================================================================

    /// Register a sync owned by the returned guard.
    pub fn add_sync<F>(&self, sync_type: SyncType, flags: DWORD, f: F) -> Result<SyncGuard>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        let handle = self.live()?;
        SyncGuard::register(&self.api, handle, sync_type, flags, f)
    }

    /// Insert a DSP function; removed when the guard drops.
    pub fn add_dsp<F>(&self, priority: i32, f: F) -> Result<DspGuard>
    where
        F: FnMut(DWORD, &mut [u8]) + Send + 'static,
    {
        let handle = self.live()?;
        DspGuard::register(&self.api, handle, priority, f)
    }

    /// Insert a DX8 effect; removed when the effect drops.
    pub fn add_effect<P: EffectParameters>(&self, priority: i32) -> Result<Effect<P>> {
        let handle = self.live()?;
        Effect::attach(&self.api, handle, priority)
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("handle", &format_args!("{:#x}", self.shared.handle))
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

const DATA_FLAG_BITS: DWORD = 0xf000_0000;

/// Byte count for BASS_ChannelGetData. The top four bits carry flags,
/// so the length has to fit in the rest.
fn data_length(bytes: usize) -> Result<DWORD> {
    match DWORD::try_from(bytes) {
        Ok(length) if length & DATA_FLAG_BITS == 0 => Ok(length),
        _ => Err(BassError::Native(ErrorCode::IllegalParam)),
    }
}
