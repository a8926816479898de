//! BASSCD FFI bindings (basscd.h).

use std::ffi::c_char;

use super::bass::*;

pub const BASS_ERROR_CDTRACK: i32 = 13;

// Config options
pub const BASS_CONFIG_CD_FREEOLD: DWORD = 0x10200;
pub const BASS_CONFIG_CD_RETRY: DWORD = 0x10201;
pub const BASS_CONFIG_CD_AUTOSPEED: DWORD = 0x10202;
pub const BASS_CONFIG_CD_SKIPERROR: DWORD = 0x10203;

// BASS_CD_Door actions
pub const BASS_CD_DOOR_CLOSE: DWORD = 0;
pub const BASS_CD_DOOR_OPEN: DWORD = 1;
pub const BASS_CD_DOOR_LOCK: DWORD = 2;
pub const BASS_CD_DOOR_UNLOCK: DWORD = 3;

// BASS_CD_GetID ids
pub const BASS_CDID_UPC: DWORD = 1;
pub const BASS_CDID_CDDB: DWORD = 2;
pub const BASS_CDID_CDDB2: DWORD = 3;
pub const BASS_CDID_TEXT: DWORD = 4;
pub const BASS_CDID_CDPLAYER: DWORD = 5;
pub const BASS_CDID_MUSICBRAINZ: DWORD = 6;
pub const BASS_CDID_ISRC: DWORD = 0x100;

pub const BASS_CTYPE_STREAM_CD: DWORD = 0x10200;

/// Drive info returned by BASS_CD_GetInfo
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BassCdInfo {
    pub vendor: *const c_char,
    pub product: *const c_char,
    pub rev: *const c_char,
    pub letter: i32,
    pub rwflags: DWORD,
    pub canopen: BOOL,
    pub canlock: BOOL,
    pub maxspeed: DWORD,
    pub cache: DWORD,
    pub cdtext: BOOL,
}

impl Default for BassCdInfo {
    fn default() -> Self {
        Self {
            vendor: std::ptr::null(),
            product: std::ptr::null(),
            rev: std::ptr::null(),
            letter: -1,
            rwflags: 0,
            canopen: FALSE,
            canlock: FALSE,
            maxspeed: 0,
            cache: 0,
            cdtext: FALSE,
        }
    }
}

native_table! {
    /// BASSCD exports
    pub struct CdFunctions {
        get_version = "BASS_CD_GetVersion": fn() -> DWORD;
        get_info = "BASS_CD_GetInfo": fn(DWORD, *mut BassCdInfo) -> BOOL;
        is_ready = "BASS_CD_IsReady": fn(DWORD) -> BOOL;
        door = "BASS_CD_Door": fn(DWORD, DWORD) -> BOOL;
        door_is_open = "BASS_CD_DoorIsOpen": fn(DWORD) -> BOOL;
        door_is_locked = "BASS_CD_DoorIsLocked": fn(DWORD) -> BOOL;
        get_tracks = "BASS_CD_GetTracks": fn(DWORD) -> DWORD;
        get_track_length = "BASS_CD_GetTrackLength": fn(DWORD, DWORD) -> DWORD;
        get_id = "BASS_CD_GetID": fn(DWORD, DWORD) -> *const c_char;
        stream_create = "BASS_CD_StreamCreate": fn(DWORD, DWORD, DWORD) -> HSTREAM;
        release = "BASS_CD_Release": fn(DWORD) -> BOOL;
    }
}
