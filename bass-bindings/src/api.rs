//! Object-safe call surfaces over the native exports.
//!
//! Each method forwards to exactly one native function. `BOOL` results
//! become `bool`, out-structs are borrowed mutably, and failures are
//! reported the native way: a sentinel return plus [`BassApi::error_code`].
//! Wrappers hold an `Arc<dyn BassApi>`, so the loaded libraries
//! ([`crate::native::NativeApi`]) and the in-memory test double share
//! one seam.
//!
//! Methods that hand a callback and a `user` pointer to native code are
//! `unsafe`: the caller keeps `user` alive until native code lets go of it.

use std::ffi::{c_char, c_void, CStr};
use std::path::Path;

use crate::config::Addon;
use crate::error::{BassError, ErrorCode, Result};
use crate::ffi::cd::BassCdInfo;
use crate::ffi::enc::{EncodeNotifyProc, EncodeProc, HENCODE};
use crate::ffi::midi::{BassMidiFont, BassMidiFontInfo, HSOUNDFONT};
use crate::ffi::wasapi::{BassWasapiDeviceInfo, WasapiNotifyProc, WasapiProc};
use crate::ffi::wma::HWMENCODE;
use crate::ffi::*;

/// Core library (bass): output, streams, samples, music, recording, channels
pub trait BassApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn error_code(&self) -> i32;

    // Output devices
    fn init(&self, device: i32, freq: DWORD, flags: DWORD) -> bool;
    fn free(&self) -> bool;
    fn device_info(&self, device: DWORD, info: &mut BassDeviceInfo) -> bool;
    fn set_device(&self, device: DWORD) -> bool;
    fn current_device(&self) -> DWORD;
    fn info(&self, info: &mut BassInfo) -> bool;
    fn set_config(&self, option: DWORD, value: DWORD) -> bool;
    fn config(&self, option: DWORD) -> DWORD;
    fn set_volume(&self, volume: f32) -> bool;
    fn volume(&self) -> f32;
    fn start(&self) -> bool;
    fn stop(&self) -> bool;
    fn pause(&self) -> bool;
    fn plugin_load(&self, path: &FilePath) -> HPLUGIN;
    fn plugin_free(&self, plugin: HPLUGIN) -> bool;

    // Streams, samples, music
    /// # Safety
    /// `user` must stay valid until the stream is freed.
    unsafe fn stream_create(
        &self,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        proc: Option<StreamProc>,
        user: *mut c_void,
    ) -> HSTREAM;
    fn stream_create_file(&self, path: &FilePath, offset: QWORD, length: QWORD, flags: DWORD) -> HSTREAM;
    fn stream_create_url(&self, url: &CStr, offset: DWORD, flags: DWORD) -> HSTREAM;
    fn stream_free(&self, handle: HSTREAM) -> bool;
    fn sample_load(&self, path: &FilePath, offset: QWORD, length: DWORD, max: DWORD, flags: DWORD) -> HSAMPLE;
    fn sample_get_channel(&self, sample: HSAMPLE, flags: DWORD) -> HCHANNEL;
    fn sample_free(&self, sample: HSAMPLE) -> bool;
    fn music_load(&self, path: &FilePath, offset: QWORD, length: DWORD, flags: DWORD, freq: DWORD) -> HMUSIC;
    fn music_free(&self, handle: HMUSIC) -> bool;

    // Recording
    fn record_init(&self, device: i32) -> bool;
    fn record_free(&self) -> bool;
    fn record_device_info(&self, device: DWORD, info: &mut BassDeviceInfo) -> bool;
    fn record_set_device(&self, device: DWORD) -> bool;
    fn record_current_device(&self) -> DWORD;
    fn record_info(&self, info: &mut BassRecordInfo) -> bool;
    /// Input flags, `DWORD::MAX` on failure.
    fn record_input(&self, input: i32, volume: &mut f32) -> DWORD;
    fn record_set_input(&self, input: i32, flags: DWORD, volume: f32) -> bool;
    fn record_input_name(&self, input: i32) -> Option<String>;
    /// # Safety
    /// `user` must stay valid until the recording channel is freed.
    unsafe fn record_start(
        &self,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        proc: Option<RecordProc>,
        user: *mut c_void,
    ) -> HRECORD;

    // Channels
    fn channel_info(&self, handle: DWORD, info: &mut BassChannelInfo) -> bool;
    fn channel_play(&self, handle: DWORD, restart: bool) -> bool;
    fn channel_stop(&self, handle: DWORD) -> bool;
    fn channel_pause(&self, handle: DWORD) -> bool;
    fn channel_is_active(&self, handle: DWORD) -> DWORD;
    fn channel_free(&self, handle: DWORD) -> bool;
    fn channel_length(&self, handle: DWORD, mode: DWORD) -> QWORD;
    fn channel_position(&self, handle: DWORD, mode: DWORD) -> QWORD;
    fn channel_set_position(&self, handle: DWORD, pos: QWORD, mode: DWORD) -> bool;
    fn channel_bytes_to_seconds(&self, handle: DWORD, bytes: QWORD) -> f64;
    fn channel_seconds_to_bytes(&self, handle: DWORD, seconds: f64) -> QWORD;
    fn channel_attribute(&self, handle: DWORD, attrib: DWORD, value: &mut f32) -> bool;
    fn channel_set_attribute(&self, handle: DWORD, attrib: DWORD, value: f32) -> bool;
    fn channel_slide_attribute(&self, handle: DWORD, attrib: DWORD, value: f32, time_ms: DWORD) -> bool;
    fn channel_is_sliding(&self, handle: DWORD, attrib: DWORD) -> bool;
    fn channel_flags(&self, handle: DWORD, flags: DWORD, mask: DWORD) -> DWORD;
    fn channel_level(&self, handle: DWORD) -> DWORD;
    /// Raw tag block; valid until the next call on the channel or its free.
    fn channel_tags(&self, handle: DWORD, tag: DWORD) -> *const c_char;
    fn channel_device(&self, handle: DWORD) -> DWORD;
    fn channel_set_device(&self, handle: DWORD, device: DWORD) -> bool;
    /// # Safety
    /// `buffer` must be writable for the byte count `length` asks for.
    unsafe fn channel_get_data(&self, handle: DWORD, buffer: *mut c_void, length: DWORD) -> DWORD;
    /// # Safety
    /// `user` must stay valid until the sync is removed or the channel freed.
    unsafe fn channel_set_sync(
        &self,
        handle: DWORD,
        sync_type: DWORD,
        param: QWORD,
        proc: Option<SyncProc>,
        user: *mut c_void,
    ) -> HSYNC;
    fn channel_remove_sync(&self, handle: DWORD, sync: HSYNC) -> bool;
    /// # Safety
    /// `user` must stay valid until the DSP is removed or the channel freed.
    unsafe fn channel_set_dsp(
        &self,
        handle: DWORD,
        proc: Option<DspProc>,
        user: *mut c_void,
        priority: i32,
    ) -> HDSP;
    fn channel_remove_dsp(&self, handle: DWORD, dsp: HDSP) -> bool;
    fn channel_set_fx(&self, handle: DWORD, fx_type: DWORD, priority: i32) -> HFX;
    fn channel_remove_fx(&self, handle: DWORD, fx: HFX) -> bool;
    fn channel_set_link(&self, handle: DWORD, other: DWORD) -> bool;
    fn channel_remove_link(&self, handle: DWORD, other: DWORD) -> bool;

    // DX8 effects; `params` is the raw parameter block for the effect type
    fn fx_set_parameters(&self, fx: HFX, params: &[u8]) -> bool;
    fn fx_get_parameters(&self, fx: HFX, params: &mut [u8]) -> bool;
    fn fx_reset(&self, fx: HFX) -> bool;

    // Add-ons, `None` when the library was not loaded
    fn mixer(&self) -> Option<&dyn MixerApi> {
        None
    }
    fn encoder(&self) -> Option<&dyn EncodeApi> {
        None
    }
    fn midi(&self) -> Option<&dyn MidiApi> {
        None
    }
    fn wasapi(&self) -> Option<&dyn WasapiApi> {
        None
    }
    fn wma(&self) -> Option<&dyn WmaApi> {
        None
    }
    fn cd(&self) -> Option<&dyn CdApi> {
        None
    }
    fn dshow(&self) -> Option<&dyn DshowApi> {
        None
    }
}

/// bassmix
pub trait MixerApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn stream_create(&self, freq: DWORD, chans: DWORD, flags: DWORD) -> HSTREAM;
    fn add_channel(&self, mixer: HSTREAM, channel: DWORD, flags: DWORD) -> bool;
    fn add_channel_ex(&self, mixer: HSTREAM, channel: DWORD, flags: DWORD, start: QWORD, length: QWORD) -> bool;
    fn remove_channel(&self, channel: DWORD) -> bool;
    fn channel_mixer(&self, channel: DWORD) -> HSTREAM;
    fn channel_flags(&self, channel: DWORD, flags: DWORD, mask: DWORD) -> DWORD;
    fn channel_position(&self, channel: DWORD, mode: DWORD) -> QWORD;
    fn channel_set_position(&self, channel: DWORD, pos: QWORD, mode: DWORD) -> bool;
    fn channel_level(&self, channel: DWORD) -> DWORD;
    /// # Safety
    /// `user` must stay valid until the sync is removed or the channel freed.
    unsafe fn channel_set_sync(
        &self,
        channel: DWORD,
        sync_type: DWORD,
        param: QWORD,
        proc: Option<SyncProc>,
        user: *mut c_void,
    ) -> HSYNC;
    fn channel_remove_sync(&self, channel: DWORD, sync: HSYNC) -> bool;
}

/// Arguments of BASS_Encode_CastInit
#[derive(Debug, Clone, Copy)]
pub struct CastRequest<'a> {
    pub server: &'a CStr,
    pub password: &'a CStr,
    pub content: &'a CStr,
    pub name: Option<&'a CStr>,
    pub url: Option<&'a CStr>,
    pub genre: Option<&'a CStr>,
    pub description: Option<&'a CStr>,
    pub headers: Option<&'a CStr>,
    pub bitrate: DWORD,
    pub public: bool,
}

/// bassenc
pub trait EncodeApi: Send + Sync {
    fn version(&self) -> DWORD;
    /// # Safety
    /// `user` must stay valid until the encoder is freed.
    unsafe fn start(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        flags: DWORD,
        proc: Option<EncodeProc>,
        user: *mut c_void,
    ) -> HENCODE;
    /// # Safety
    /// `user` must stay valid until the encoder is freed.
    unsafe fn start_limit(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        flags: DWORD,
        proc: Option<EncodeProc>,
        user: *mut c_void,
        limit: DWORD,
    ) -> HENCODE;
    fn stop(&self, handle: DWORD) -> bool;
    fn stop_ex(&self, handle: DWORD, queue: bool) -> bool;
    fn set_paused(&self, handle: DWORD, paused: bool) -> bool;
    fn is_active(&self, handle: DWORD) -> DWORD;
    fn write(&self, handle: DWORD, data: &[u8]) -> bool;
    /// # Safety
    /// `user` must stay valid until the encoder is freed or the notify replaced.
    unsafe fn set_notify(&self, handle: DWORD, proc: Option<EncodeNotifyProc>, user: *mut c_void) -> bool;
    fn count(&self, handle: DWORD, count: DWORD) -> QWORD;
    fn set_channel(&self, handle: DWORD, channel: DWORD) -> bool;
    fn channel(&self, handle: HENCODE) -> DWORD;
    fn cast_init(&self, handle: HENCODE, request: &CastRequest<'_>) -> bool;
    fn cast_set_title(&self, handle: HENCODE, title: &CStr, url: Option<&CStr>) -> bool;
    fn cast_stats(&self, handle: HENCODE, stats_type: DWORD, password: Option<&CStr>) -> Option<String>;
}

/// bassmidi
pub trait MidiApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn stream_create(&self, chans: DWORD, flags: DWORD, freq: DWORD) -> HSTREAM;
    fn stream_create_file(&self, path: &FilePath, offset: QWORD, length: QWORD, flags: DWORD, freq: DWORD) -> HSTREAM;
    fn stream_event(&self, handle: HSTREAM, chan: DWORD, event: DWORD, param: DWORD) -> bool;
    /// Event value, `DWORD::MAX` on failure.
    fn stream_get_event(&self, handle: HSTREAM, chan: DWORD, event: DWORD) -> DWORD;
    fn stream_set_fonts(&self, handle: HSTREAM, fonts: &[BassMidiFont]) -> bool;
    fn font_init(&self, path: &FilePath, flags: DWORD) -> HSOUNDFONT;
    fn font_free(&self, font: HSOUNDFONT) -> bool;
    fn font_info(&self, font: HSOUNDFONT, info: &mut BassMidiFontInfo) -> bool;
}

/// basswasapi; operations apply to the current device
pub trait WasapiApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn device_info(&self, device: DWORD, info: &mut BassWasapiDeviceInfo) -> bool;
    /// # Safety
    /// `user` must stay valid until the device is freed.
    #[allow(clippy::too_many_arguments)]
    unsafe fn init(
        &self,
        device: i32,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        buffer: f32,
        period: f32,
        proc: Option<WasapiProc>,
        user: *mut c_void,
    ) -> bool;
    fn free(&self) -> bool;
    fn set_device(&self, device: DWORD) -> bool;
    fn current_device(&self) -> DWORD;
    fn start(&self) -> bool;
    fn stop(&self, reset: bool) -> bool;
    fn is_started(&self) -> bool;
    /// Volume, negative on failure.
    fn volume(&self, curve: DWORD) -> f32;
    fn set_volume(&self, curve: DWORD, volume: f32) -> bool;
    /// Mute state, -1 on failure.
    fn mute(&self, mode: DWORD) -> BOOL;
    fn set_mute(&self, mode: DWORD, mute: bool) -> bool;
    fn level(&self) -> DWORD;
    /// # Safety
    /// `user` must stay valid until the notification is replaced.
    unsafe fn set_notify(&self, proc: Option<WasapiNotifyProc>, user: *mut c_void) -> bool;
}

/// basswma
pub trait WmaApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn stream_create_file(&self, path: &FilePath, offset: QWORD, length: QWORD, flags: DWORD) -> HSTREAM;
    fn encode_open_file(&self, freq: DWORD, chans: DWORD, flags: DWORD, bitrate: DWORD, path: &FilePath) -> HWMENCODE;
    fn encode_write(&self, handle: HWMENCODE, data: &[u8]) -> bool;
    fn encode_close(&self, handle: HWMENCODE) -> bool;
    fn encode_set_tag(&self, handle: HWMENCODE, tag: &CStr, value: &CStr, form: DWORD) -> bool;
    /// Supported bitrates, `None` on failure.
    fn encode_rates(&self, freq: DWORD, chans: DWORD, flags: DWORD) -> Option<Vec<DWORD>>;
}

/// basscd
pub trait CdApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn info(&self, drive: DWORD, info: &mut BassCdInfo) -> bool;
    fn is_ready(&self, drive: DWORD) -> bool;
    fn door(&self, drive: DWORD, action: DWORD) -> bool;
    fn door_is_open(&self, drive: DWORD) -> bool;
    fn door_is_locked(&self, drive: DWORD) -> bool;
    /// Track count, `DWORD::MAX` on failure.
    fn tracks(&self, drive: DWORD) -> DWORD;
    /// Track length in bytes, `DWORD::MAX` on failure.
    fn track_length(&self, drive: DWORD, track: DWORD) -> DWORD;
    /// Raw identifier text; `BASS_CDID_TEXT` yields a double-NUL list.
    fn id(&self, drive: DWORD, id: DWORD) -> *const c_char;
    fn stream_create(&self, drive: DWORD, track: DWORD, flags: DWORD) -> HSTREAM;
    fn release(&self, drive: DWORD) -> bool;
}

/// xVideo (DirectShow); keeps its own error state
pub trait DshowApi: Send + Sync {
    fn version(&self) -> DWORD;
    fn error_code(&self) -> i32;
    fn init(&self, flags: DWORD) -> bool;
    fn free(&self) -> bool;
    fn stream_create_file(&self, path: &FilePath, pos: DWORD, flags: DWORD) -> HSTREAM;
}

// ============================================================================
// Helpers shared by the wrappers
// ============================================================================

/// Encode `path` for a native file API.
pub(crate) fn file_path(path: &Path) -> Result<FilePath> {
    FilePath::new(path).map_err(BassError::InvalidPath)
}

/// Error for the last failed call on this thread.
pub(crate) fn last_error(api: &dyn BassApi) -> BassError {
    BassError::Native(ErrorCode::from_raw(api.error_code()))
}

/// Turn a `bool` native result into `Result<()>`.
pub(crate) fn check(api: &dyn BassApi, ok: bool) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(last_error(api))
    }
}

/// Turn a handle result (0 on failure) into `Result<DWORD>`.
pub(crate) fn check_handle(api: &dyn BassApi, handle: DWORD) -> Result<DWORD> {
    if handle == 0 {
        Err(last_error(api))
    } else {
        Ok(handle)
    }
}

pub(crate) fn require_mixer(api: &dyn BassApi) -> Result<&dyn MixerApi> {
    api.mixer().ok_or(BassError::AddonUnavailable(Addon::Mixer))
}

pub(crate) fn require_encoder(api: &dyn BassApi) -> Result<&dyn EncodeApi> {
    api.encoder().ok_or(BassError::AddonUnavailable(Addon::Encoder))
}

pub(crate) fn require_midi(api: &dyn BassApi) -> Result<&dyn MidiApi> {
    api.midi().ok_or(BassError::AddonUnavailable(Addon::Midi))
}

pub(crate) fn require_wasapi(api: &dyn BassApi) -> Result<&dyn WasapiApi> {
    api.wasapi().ok_or(BassError::AddonUnavailable(Addon::Wasapi))
}

pub(crate) fn require_wma(api: &dyn BassApi) -> Result<&dyn WmaApi> {
    api.wma().ok_or(BassError::AddonUnavailable(Addon::Wma))
}

pub(crate) fn require_cd(api: &dyn BassApi) -> Result<&dyn CdApi> {
    api.cd().ok_or(BassError::AddonUnavailable(Addon::Cd))
}

pub(crate) fn require_dshow(api: &dyn BassApi) -> Result<&dyn DshowApi> {
    api.dshow().ok_or(BassError::AddonUnavailable(Addon::DirectShow))
}
