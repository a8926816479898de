//! BASSmix FFI bindings (bassmix.h).

use std::ffi::c_void;

use super::bass::*;

// Config options
pub const BASS_CONFIG_MIXER_BUFFER: DWORD = 0x10601;
pub const BASS_CONFIG_MIXER_POSEX: DWORD = 0x10602;
pub const BASS_CONFIG_SPLIT_BUFFER: DWORD = 0x10610;

// Mixer stream flags
pub const BASS_MIXER_RESUME: DWORD = 0x1000;
pub const BASS_MIXER_POSEX: DWORD = 0x2000;
pub const BASS_MIXER_NOSPEAKER: DWORD = 0x4000;
pub const BASS_MIXER_QUEUE: DWORD = 0x8000;
pub const BASS_MIXER_END: DWORD = 0x10000;
pub const BASS_MIXER_NONSTOP: DWORD = 0x20000;

// Mixer source flags
pub const BASS_MIXER_CHAN_ABSOLUTE: DWORD = 0x1000;
pub const BASS_MIXER_CHAN_BUFFER: DWORD = 0x2000;
pub const BASS_MIXER_CHAN_LIMIT: DWORD = 0x4000;
pub const BASS_MIXER_CHAN_MATRIX: DWORD = 0x10000;
pub const BASS_MIXER_CHAN_PAUSE: DWORD = 0x20000;
pub const BASS_MIXER_CHAN_DOWNMIX: DWORD = 0x400000;
pub const BASS_MIXER_CHAN_NORAMPIN: DWORD = 0x800000;

// Mixer syncs
pub const BASS_SYNC_MIXER_ENVELOPE: DWORD = 0x10200;
pub const BASS_SYNC_MIXER_ENVELOPE_NODE: DWORD = 0x10201;

pub const BASS_CTYPE_STREAM_MIXER: DWORD = 0x10800;
pub const BASS_CTYPE_STREAM_SPLIT: DWORD = 0x10801;

native_table! {
    /// BASSmix exports
    pub struct MixFunctions {
        get_version = "BASS_Mixer_GetVersion": fn() -> DWORD;
        stream_create = "BASS_Mixer_StreamCreate": fn(DWORD, DWORD, DWORD) -> HSTREAM;
        stream_add_channel = "BASS_Mixer_StreamAddChannel": fn(HSTREAM, DWORD, DWORD) -> BOOL;
        stream_add_channel_ex = "BASS_Mixer_StreamAddChannelEx": fn(HSTREAM, DWORD, DWORD, QWORD, QWORD) -> BOOL;
        channel_remove = "BASS_Mixer_ChannelRemove": fn(DWORD) -> BOOL;
        channel_get_mixer = "BASS_Mixer_ChannelGetMixer": fn(DWORD) -> HSTREAM;
        channel_flags = "BASS_Mixer_ChannelFlags": fn(DWORD, DWORD, DWORD) -> DWORD;
        channel_get_position = "BASS_Mixer_ChannelGetPosition": fn(DWORD, DWORD) -> QWORD;
        channel_set_position = "BASS_Mixer_ChannelSetPosition": fn(DWORD, QWORD, DWORD) -> BOOL;
        channel_get_level = "BASS_Mixer_ChannelGetLevel": fn(DWORD) -> DWORD;
        channel_set_sync = "BASS_Mixer_ChannelSetSync": fn(DWORD, DWORD, QWORD, Option<SyncProc>, *mut c_void) -> HSYNC;
        channel_remove_sync = "BASS_Mixer_ChannelRemoveSync": fn(DWORD, HSYNC) -> BOOL;
    }
}
