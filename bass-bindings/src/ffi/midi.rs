//! BASSMIDI FFI bindings (bassmidi.h).

use std::ffi::{c_char, c_void};

use super::bass::*;

pub type HSOUNDFONT = DWORD;

pub const BASS_ERROR_MIDI_INCLUDE: i32 = 7000;

// Config options
pub const BASS_CONFIG_MIDI_COMPACT: DWORD = 0x10400;
pub const BASS_CONFIG_MIDI_VOICES: DWORD = 0x10401;
pub const BASS_CONFIG_MIDI_AUTOFONT: DWORD = 0x10402;

// Stream flags
pub const BASS_MIDI_NOSYSRESET: DWORD = 0x800;
pub const BASS_MIDI_DECAYEND: DWORD = 0x1000;
pub const BASS_MIDI_NOFX: DWORD = 0x2000;
pub const BASS_MIDI_DECAYSEEK: DWORD = 0x4000;
pub const BASS_MIDI_NOCROP: DWORD = 0x8000;
pub const BASS_MIDI_NOTEOFF1: DWORD = 0x10000;
pub const BASS_MIDI_SINCINTER: DWORD = 0x800000;

// Soundfont flags
pub const BASS_MIDI_FONT_MEM: DWORD = 0x10000;
pub const BASS_MIDI_FONT_MMAP: DWORD = 0x20000;
pub const BASS_MIDI_FONT_XGDRUMS: DWORD = 0x40000;
pub const BASS_MIDI_FONT_NOFX: DWORD = 0x80000;

// MIDI events (subset)
pub const MIDI_EVENT_NOTE: DWORD = 1;
pub const MIDI_EVENT_PROGRAM: DWORD = 2;
pub const MIDI_EVENT_CHANPRES: DWORD = 3;
pub const MIDI_EVENT_PITCH: DWORD = 4;
pub const MIDI_EVENT_PITCHRANGE: DWORD = 5;
pub const MIDI_EVENT_DRUMS: DWORD = 6;
pub const MIDI_EVENT_FINETUNE: DWORD = 7;
pub const MIDI_EVENT_COARSETUNE: DWORD = 8;
pub const MIDI_EVENT_MASTERVOL: DWORD = 9;
pub const MIDI_EVENT_BANK: DWORD = 10;
pub const MIDI_EVENT_MODULATION: DWORD = 11;
pub const MIDI_EVENT_VOLUME: DWORD = 12;
pub const MIDI_EVENT_PAN: DWORD = 13;
pub const MIDI_EVENT_EXPRESSION: DWORD = 14;
pub const MIDI_EVENT_SUSTAIN: DWORD = 15;
pub const MIDI_EVENT_SOUNDOFF: DWORD = 16;
pub const MIDI_EVENT_RESET: DWORD = 17;
pub const MIDI_EVENT_NOTESOFF: DWORD = 18;
pub const MIDI_EVENT_TEMPO: DWORD = 62;

pub const BASS_CTYPE_STREAM_MIDI: DWORD = 0x10d00;

/// Soundfont binding for BASS_MIDI_StreamSetFonts
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BassMidiFont {
    pub font: HSOUNDFONT,
    pub preset: i32,
    pub bank: i32,
}

/// Soundfont info returned by BASS_MIDI_FontGetInfo
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BassMidiFontInfo {
    pub name: *const c_char,
    pub copyright: *const c_char,
    pub comment: *const c_char,
    pub presets: DWORD,
    pub samsize: DWORD,
    pub samload: DWORD,
    pub samtype: DWORD,
}

impl Default for BassMidiFontInfo {
    fn default() -> Self {
        Self {
            name: std::ptr::null(),
            copyright: std::ptr::null(),
            comment: std::ptr::null(),
            presets: 0,
            samsize: 0,
            samload: 0,
            samtype: 0,
        }
    }
}

native_table! {
    /// BASSMIDI exports
    pub struct MidiFunctions {
        get_version = "BASS_MIDI_GetVersion": fn() -> DWORD;
        stream_create = "BASS_MIDI_StreamCreate": fn(DWORD, DWORD, DWORD) -> HSTREAM;
        stream_create_file = "BASS_MIDI_StreamCreateFile": fn(BOOL, *const c_void, QWORD, QWORD, DWORD, DWORD) -> HSTREAM;
        stream_event = "BASS_MIDI_StreamEvent": fn(HSTREAM, DWORD, DWORD, DWORD) -> BOOL;
        stream_get_event = "BASS_MIDI_StreamGetEvent": fn(HSTREAM, DWORD, DWORD) -> DWORD;
        stream_set_fonts = "BASS_MIDI_StreamSetFonts": fn(HSTREAM, *const c_void, DWORD) -> BOOL;
        font_init = "BASS_MIDI_FontInit": fn(*const c_void, DWORD) -> HSOUNDFONT;
        font_free = "BASS_MIDI_FontFree": fn(HSOUNDFONT) -> BOOL;
        font_get_info = "BASS_MIDI_FontGetInfo": fn(HSOUNDFONT, *mut BassMidiFontInfo) -> BOOL;
    }
}
