//! BASSWMA FFI bindings (basswma.h).

use std::ffi::{c_char, c_void};

use super::bass::*;

pub type HWMENCODE = DWORD;

// Error codes
pub const BASS_ERROR_WMA_LICENSE: i32 = 1000;
pub const BASS_ERROR_WMA: i32 = 1001;
pub const BASS_ERROR_WMA_WM9: i32 = 1002;
pub const BASS_ERROR_WMA_DENIED: i32 = 1003;
pub const BASS_ERROR_WMA_INDIVIDUAL: i32 = 1004;
pub const BASS_ERROR_WMA_PUBINIT: i32 = 1005;

// Config options
pub const BASS_CONFIG_WMA_PREBUF: DWORD = 0x10101;
pub const BASS_CONFIG_WMA_BASSFILE: DWORD = 0x10103;

// Encoder flags
pub const BASS_WMA_ENCODE_TAGS: DWORD = 0x10000;
pub const BASS_WMA_ENCODE_SCRIPT: DWORD = 0x20000;
pub const BASS_WMA_ENCODE_QUEUE: DWORD = 0x40000;
pub const BASS_WMA_ENCODE_SOURCE: DWORD = 0x80000;
pub const BASS_WMA_ENCODE_VOICE: DWORD = 0x100000;
pub const BASS_WMA_ENCODE_24BIT: DWORD = 0x8000;
pub const BASS_WMA_ENCODE_PRO: DWORD = 0x400000;
pub const BASS_WMA_ENCODE_RATES_VBR: DWORD = 0x10000;

// BASS_WMA_EncodeSetTag forms
pub const BASS_WMA_TAG_ANSI: DWORD = 0;
pub const BASS_WMA_TAG_UNICODE: DWORD = 1;
pub const BASS_WMA_TAG_UTF8: DWORD = 2;
pub const BASS_WMA_TAG_BINARY: DWORD = 0x100;

pub const BASS_CTYPE_STREAM_WMA: DWORD = 0x10300;
pub const BASS_CTYPE_STREAM_WMA_MP3: DWORD = 0x10301;

native_table! {
    /// BASSWMA exports
    pub struct WmaFunctions {
        get_version = "BASS_WMA_GetVersion": fn() -> DWORD;
        stream_create_file = "BASS_WMA_StreamCreateFile": fn(BOOL, *const c_void, QWORD, QWORD, DWORD) -> HSTREAM;
        encode_open_file = "BASS_WMA_EncodeOpenFile": fn(DWORD, DWORD, DWORD, DWORD, *const c_void) -> HWMENCODE;
        encode_write = "BASS_WMA_EncodeWrite": fn(HWMENCODE, *const c_void, DWORD) -> BOOL;
        encode_close = "BASS_WMA_EncodeClose": fn(HWMENCODE) -> BOOL;
        encode_set_tag = "BASS_WMA_EncodeSetTag": fn(HWMENCODE, *const c_char, *const c_char, DWORD) -> BOOL;
        encode_get_rates = "BASS_WMA_EncodeGetRates": fn(DWORD, DWORD, DWORD) -> *const DWORD;
    }
}
