//! BASSWASAPI FFI bindings (basswasapi.h).

use std::ffi::{c_char, c_void};

use super::bass::*;

// Error codes
pub const BASS_ERROR_WASAPI: i32 = 5000;
pub const BASS_ERROR_WASAPI_BUFFER: i32 = 5001;
pub const BASS_ERROR_WASAPI_CATEGORY: i32 = 5002;
pub const BASS_ERROR_WASAPI_DENIED: i32 = 5003;

// Device info flags
pub const BASS_DEVICE_INPUT: DWORD = 16;
pub const BASS_DEVICE_UNPLUGGED: DWORD = 32;
pub const BASS_DEVICE_DISABLED: DWORD = 64;

// Device types
pub const BASS_WASAPI_TYPE_NETWORKDEVICE: DWORD = 0;
pub const BASS_WASAPI_TYPE_SPEAKERS: DWORD = 1;
pub const BASS_WASAPI_TYPE_LINELEVEL: DWORD = 2;
pub const BASS_WASAPI_TYPE_HEADPHONES: DWORD = 3;
pub const BASS_WASAPI_TYPE_MICROPHONE: DWORD = 4;
pub const BASS_WASAPI_TYPE_HEADSET: DWORD = 5;
pub const BASS_WASAPI_TYPE_HANDSET: DWORD = 6;
pub const BASS_WASAPI_TYPE_DIGITAL: DWORD = 7;
pub const BASS_WASAPI_TYPE_SPDIF: DWORD = 8;
pub const BASS_WASAPI_TYPE_HDMI: DWORD = 9;
pub const BASS_WASAPI_TYPE_UNKNOWN: DWORD = 10;

// BASS_WASAPI_Init flags
pub const BASS_WASAPI_EXCLUSIVE: DWORD = 1;
pub const BASS_WASAPI_AUTOFORMAT: DWORD = 2;
pub const BASS_WASAPI_BUFFER: DWORD = 4;
pub const BASS_WASAPI_EVENT: DWORD = 16;
pub const BASS_WASAPI_SAMPLES: DWORD = 32;
pub const BASS_WASAPI_DITHER: DWORD = 64;
pub const BASS_WASAPI_RAW: DWORD = 128;
pub const BASS_WASAPI_ASYNC: DWORD = 0x100;

// Volume curves
pub const BASS_WASAPI_CURVE_DB: DWORD = 0;
pub const BASS_WASAPI_CURVE_LINEAR: DWORD = 1;
pub const BASS_WASAPI_CURVE_WINDOWS: DWORD = 2;
pub const BASS_WASAPI_VOL_SESSION: DWORD = 8;

// Device notifications
pub const BASS_WASAPI_NOTIFY_ENABLED: DWORD = 0;
pub const BASS_WASAPI_NOTIFY_DISABLED: DWORD = 1;
pub const BASS_WASAPI_NOTIFY_DEFOUTPUT: DWORD = 2;
pub const BASS_WASAPI_NOTIFY_DEFINPUT: DWORD = 3;
pub const BASS_WASAPI_NOTIFY_FAIL: DWORD = 0x100;

/// Device info returned by BASS_WASAPI_GetDeviceInfo
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BassWasapiDeviceInfo {
    pub name: *const c_char,
    pub id: *const c_char,
    pub device_type: DWORD,
    pub flags: DWORD,
    pub minperiod: f32,
    pub defperiod: f32,
    pub mixfreq: DWORD,
    pub mixchans: DWORD,
}

impl Default for BassWasapiDeviceInfo {
    fn default() -> Self {
        Self {
            name: std::ptr::null(),
            id: std::ptr::null(),
            device_type: 0,
            flags: 0,
            minperiod: 0.0,
            defperiod: 0.0,
            mixfreq: 0,
            mixchans: 0,
        }
    }
}

/// Device data callback: output fills, input consumes. Returns bytes handled.
pub type WasapiProc = unsafe extern "system" fn(
    buffer: *mut c_void,
    length: DWORD,
    user: *mut c_void,
) -> DWORD;

/// Device change notification callback
pub type WasapiNotifyProc = unsafe extern "system" fn(
    notify: DWORD,
    device: DWORD,
    user: *mut c_void,
);

native_table! {
    /// BASSWASAPI exports
    pub struct WasapiFunctions {
        get_version = "BASS_WASAPI_GetVersion": fn() -> DWORD;
        get_device_info = "BASS_WASAPI_GetDeviceInfo": fn(DWORD, *mut BassWasapiDeviceInfo) -> BOOL;
        init = "BASS_WASAPI_Init": fn(i32, DWORD, DWORD, DWORD, f32, f32, Option<WasapiProc>, *mut c_void) -> BOOL;
        free = "BASS_WASAPI_Free": fn() -> BOOL;
        set_device = "BASS_WASAPI_SetDevice": fn(DWORD) -> BOOL;
        get_device = "BASS_WASAPI_GetDevice": fn() -> DWORD;
        start = "BASS_WASAPI_Start": fn() -> BOOL;
        stop = "BASS_WASAPI_Stop": fn(BOOL) -> BOOL;
        is_started = "BASS_WASAPI_IsStarted": fn() -> BOOL;
        get_volume = "BASS_WASAPI_GetVolume": fn(DWORD) -> f32;
        set_volume = "BASS_WASAPI_SetVolume": fn(DWORD, f32) -> BOOL;
        get_mute = "BASS_WASAPI_GetMute": fn(DWORD) -> BOOL;
        set_mute = "BASS_WASAPI_SetMute": fn(DWORD, BOOL) -> BOOL;
        get_level = "BASS_WASAPI_GetLevel": fn() -> DWORD;
        set_notify = "BASS_WASAPI_SetNotify": fn(Option<WasapiNotifyProc>, *mut c_void) -> BOOL;
    }
}
