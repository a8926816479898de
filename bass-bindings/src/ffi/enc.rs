//! BASSenc FFI bindings (bassenc.h).

use std::ffi::{c_char, c_void};

use super::bass::*;

pub type HENCODE = DWORD;

// Error codes
pub const BASS_ERROR_ACM_CANCEL: i32 = 2000;
pub const BASS_ERROR_CAST_DENIED: i32 = 2100;
pub const BASS_ERROR_SERVER_CERT: i32 = 2101;

// Config options
pub const BASS_CONFIG_ENCODE_PRIORITY: DWORD = 0x10300;
pub const BASS_CONFIG_ENCODE_QUEUE: DWORD = 0x10301;
pub const BASS_CONFIG_ENCODE_CAST_TIMEOUT: DWORD = 0x10310;

// BASS_Encode_Start flags
pub const BASS_ENCODE_NOHEAD: DWORD = 1;
pub const BASS_ENCODE_FP_8BIT: DWORD = 2;
pub const BASS_ENCODE_FP_16BIT: DWORD = 4;
pub const BASS_ENCODE_FP_24BIT: DWORD = 6;
pub const BASS_ENCODE_FP_32BIT: DWORD = 8;
pub const BASS_ENCODE_FP_AUTO: DWORD = 14;
pub const BASS_ENCODE_BIGEND: DWORD = 16;
pub const BASS_ENCODE_PAUSE: DWORD = 32;
pub const BASS_ENCODE_PCM: DWORD = 64;
pub const BASS_ENCODE_RF64: DWORD = 128;
pub const BASS_ENCODE_QUEUE: DWORD = 0x200;
pub const BASS_ENCODE_WFEXT: DWORD = 0x400;
pub const BASS_ENCODE_CAST_NOLIMIT: DWORD = 0x1000;
pub const BASS_ENCODE_LIMIT: DWORD = 0x2000;
pub const BASS_ENCODE_AIFF: DWORD = 0x4000;
pub const BASS_ENCODE_DITHER: DWORD = 0x8000;
pub const BASS_ENCODE_AUTOFREE: DWORD = 0x40000;

// BASS_Encode_GetCount counts
pub const BASS_ENCODE_COUNT_IN: DWORD = 0;
pub const BASS_ENCODE_COUNT_OUT: DWORD = 1;
pub const BASS_ENCODE_COUNT_CAST: DWORD = 2;
pub const BASS_ENCODE_COUNT_QUEUE: DWORD = 3;
pub const BASS_ENCODE_COUNT_QUEUE_LIMIT: DWORD = 4;
pub const BASS_ENCODE_COUNT_QUEUE_FAIL: DWORD = 5;

// BASS_Encode_CastInit content types
pub const BASS_ENCODE_TYPE_MP3: &str = "audio/mpeg";
pub const BASS_ENCODE_TYPE_OGG: &str = "audio/ogg";
pub const BASS_ENCODE_TYPE_AAC: &str = "audio/aacp";

// BASS_Encode_CastGetStats types
pub const BASS_ENCODE_STATS_SHOUT: DWORD = 0;
pub const BASS_ENCODE_STATS_ICE: DWORD = 1;
pub const BASS_ENCODE_STATS_ICESERV: DWORD = 2;

// Encoder notifications
pub const BASS_ENCODE_NOTIFY_ENCODER: DWORD = 1;
pub const BASS_ENCODE_NOTIFY_CAST: DWORD = 2;
pub const BASS_ENCODE_NOTIFY_SERVER: DWORD = 3;
pub const BASS_ENCODE_NOTIFY_FREE: DWORD = 5;
pub const BASS_ENCODE_NOTIFY_CAST_TIMEOUT: DWORD = 0x10000;
pub const BASS_ENCODE_NOTIFY_QUEUE_FULL: DWORD = 0x10001;

/// Encoder output callback
pub type EncodeProc = unsafe extern "system" fn(
    handle: HENCODE,
    channel: DWORD,
    buffer: *const c_void,
    length: DWORD,
    user: *mut c_void,
);

/// Encoder status notification callback
pub type EncodeNotifyProc = unsafe extern "system" fn(
    handle: HENCODE,
    status: DWORD,
    user: *mut c_void,
);

native_table! {
    /// BASSenc exports
    pub struct EncFunctions {
        get_version = "BASS_Encode_GetVersion": fn() -> DWORD;
        start = "BASS_Encode_Start": fn(DWORD, *const c_char, DWORD, Option<EncodeProc>, *mut c_void) -> HENCODE;
        start_limit = "BASS_Encode_StartLimit": fn(DWORD, *const c_char, DWORD, Option<EncodeProc>, *mut c_void, DWORD) -> HENCODE;
        stop = "BASS_Encode_Stop": fn(DWORD) -> BOOL;
        stop_ex = "BASS_Encode_StopEx": fn(DWORD, BOOL) -> BOOL;
        set_paused = "BASS_Encode_SetPaused": fn(DWORD, BOOL) -> BOOL;
        is_active = "BASS_Encode_IsActive": fn(DWORD) -> DWORD;
        write = "BASS_Encode_Write": fn(DWORD, *const c_void, DWORD) -> BOOL;
        set_notify = "BASS_Encode_SetNotify": fn(DWORD, Option<EncodeNotifyProc>, *mut c_void) -> BOOL;
        get_count = "BASS_Encode_GetCount": fn(DWORD, DWORD) -> QWORD;
        set_channel = "BASS_Encode_SetChannel": fn(DWORD, DWORD) -> BOOL;
        get_channel = "BASS_Encode_GetChannel": fn(HENCODE) -> DWORD;
        cast_init = "BASS_Encode_CastInit": fn(HENCODE, *const c_char, *const c_char, *const c_char, *const c_char, *const c_char, *const c_char, *const c_char, *const c_char, DWORD, DWORD) -> BOOL;
        cast_set_title = "BASS_Encode_CastSetTitle": fn(HENCODE, *const c_char, *const c_char) -> BOOL;
        cast_get_stats = "BASS_Encode_CastGetStats": fn(HENCODE, DWORD, *const c_char) -> *const c_char;
    }
}
