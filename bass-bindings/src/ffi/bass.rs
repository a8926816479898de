//! BASS audio library FFI type bindings.
//! These types match the definitions in bass.h from the BASS SDK.

use std::ffi::{c_char, c_void};

// Basic types matching BASS definitions
pub type DWORD = u32;
pub type QWORD = u64;
pub type WORD = u16;
pub type BYTE = u8;
pub type BOOL = i32;
pub type HWND = *mut c_void;

// Handle types
pub type HMUSIC = DWORD;
pub type HSAMPLE = DWORD;
pub type HCHANNEL = DWORD;
pub type HSTREAM = DWORD;
pub type HRECORD = DWORD;
pub type HSYNC = DWORD;
pub type HDSP = DWORD;
pub type HFX = DWORD;
pub type HPLUGIN = DWORD;

// Boolean constants
pub const TRUE: BOOL = 1;
pub const FALSE: BOOL = 0;

// BASS version
pub const BASSVERSION: DWORD = 0x204;
pub const BASSVERSIONTEXT: &str = "2.4";

// Error codes
pub const BASS_OK: i32 = 0;
pub const BASS_ERROR_MEM: i32 = 1;
pub const BASS_ERROR_FILEOPEN: i32 = 2;
pub const BASS_ERROR_DRIVER: i32 = 3;
pub const BASS_ERROR_BUFLOST: i32 = 4;
pub const BASS_ERROR_HANDLE: i32 = 5;
pub const BASS_ERROR_FORMAT: i32 = 6;
pub const BASS_ERROR_POSITION: i32 = 7;
pub const BASS_ERROR_INIT: i32 = 8;
pub const BASS_ERROR_START: i32 = 9;
pub const BASS_ERROR_SSL: i32 = 10;
pub const BASS_ERROR_REINIT: i32 = 11;
pub const BASS_ERROR_ALREADY: i32 = 14;
pub const BASS_ERROR_NOTAUDIO: i32 = 17;
pub const BASS_ERROR_NOCHAN: i32 = 18;
pub const BASS_ERROR_ILLTYPE: i32 = 19;
pub const BASS_ERROR_ILLPARAM: i32 = 20;
pub const BASS_ERROR_NO3D: i32 = 21;
pub const BASS_ERROR_NOEAX: i32 = 22;
pub const BASS_ERROR_DEVICE: i32 = 23;
pub const BASS_ERROR_NOPLAY: i32 = 24;
pub const BASS_ERROR_FREQ: i32 = 25;
pub const BASS_ERROR_NOTFILE: i32 = 27;
pub const BASS_ERROR_NOHW: i32 = 29;
pub const BASS_ERROR_EMPTY: i32 = 31;
pub const BASS_ERROR_NONET: i32 = 32;
pub const BASS_ERROR_CREATE: i32 = 33;
pub const BASS_ERROR_NOFX: i32 = 34;
pub const BASS_ERROR_NOTAVAIL: i32 = 37;
pub const BASS_ERROR_DECODE: i32 = 38;
pub const BASS_ERROR_DX: i32 = 39;
pub const BASS_ERROR_TIMEOUT: i32 = 40;
pub const BASS_ERROR_FILEFORM: i32 = 41;
pub const BASS_ERROR_SPEAKER: i32 = 42;
pub const BASS_ERROR_VERSION: i32 = 43;
pub const BASS_ERROR_CODEC: i32 = 44;
pub const BASS_ERROR_ENDED: i32 = 45;
pub const BASS_ERROR_BUSY: i32 = 46;
pub const BASS_ERROR_UNSTREAMABLE: i32 = 47;
pub const BASS_ERROR_PROTOCOL: i32 = 48;
pub const BASS_ERROR_DENIED: i32 = 49;
pub const BASS_ERROR_UNKNOWN: i32 = -1;

// Config options (BASS_SetConfig)
pub const BASS_CONFIG_BUFFER: DWORD = 0;
pub const BASS_CONFIG_UPDATEPERIOD: DWORD = 1;
pub const BASS_CONFIG_GVOL_SAMPLE: DWORD = 4;
pub const BASS_CONFIG_GVOL_STREAM: DWORD = 5;
pub const BASS_CONFIG_GVOL_MUSIC: DWORD = 6;
pub const BASS_CONFIG_CURVE_VOL: DWORD = 7;
pub const BASS_CONFIG_CURVE_PAN: DWORD = 8;
pub const BASS_CONFIG_FLOATDSP: DWORD = 9;
pub const BASS_CONFIG_3DALGORITHM: DWORD = 10;
pub const BASS_CONFIG_NET_TIMEOUT: DWORD = 11;
pub const BASS_CONFIG_NET_BUFFER: DWORD = 12;
pub const BASS_CONFIG_PAUSE_NOPLAY: DWORD = 13;
pub const BASS_CONFIG_NET_PREBUF: DWORD = 15;
pub const BASS_CONFIG_NET_PASSIVE: DWORD = 18;
pub const BASS_CONFIG_REC_BUFFER: DWORD = 19;
pub const BASS_CONFIG_NET_PLAYLIST: DWORD = 21;
pub const BASS_CONFIG_MUSIC_VIRTUAL: DWORD = 22;
pub const BASS_CONFIG_VERIFY: DWORD = 23;
pub const BASS_CONFIG_UPDATETHREADS: DWORD = 24;
pub const BASS_CONFIG_DEV_BUFFER: DWORD = 27;
pub const BASS_CONFIG_DEV_DEFAULT: DWORD = 36;
pub const BASS_CONFIG_NET_READTIMEOUT: DWORD = 37;
pub const BASS_CONFIG_HANDLES: DWORD = 41;
pub const BASS_CONFIG_UNICODE: DWORD = 42;
pub const BASS_CONFIG_SRC: DWORD = 43;
pub const BASS_CONFIG_SRC_SAMPLE: DWORD = 44;
pub const BASS_CONFIG_ASYNCFILE_BUFFER: DWORD = 45;
pub const BASS_CONFIG_OGG_PRESCAN: DWORD = 47;
pub const BASS_CONFIG_DEV_NONSTOP: DWORD = 50;
pub const BASS_CONFIG_VERIFY_NET: DWORD = 52;
pub const BASS_CONFIG_NET_SEEK: DWORD = 56;
pub const BASS_CONFIG_NET_PLAYLIST_DEPTH: DWORD = 59;
pub const BASS_CONFIG_NET_PREBUF_WAIT: DWORD = 60;

// Device init flags (BASS_Init)
pub const BASS_DEVICE_8BITS: DWORD = 1;
pub const BASS_DEVICE_MONO: DWORD = 2;
pub const BASS_DEVICE_3D: DWORD = 4;
pub const BASS_DEVICE_16BITS: DWORD = 8;
pub const BASS_DEVICE_REINIT: DWORD = 128;
pub const BASS_DEVICE_LATENCY: DWORD = 0x100;
pub const BASS_DEVICE_SPEAKERS: DWORD = 0x800;
pub const BASS_DEVICE_NOSPEAKER: DWORD = 0x1000;
pub const BASS_DEVICE_DMIX: DWORD = 0x2000;
pub const BASS_DEVICE_FREQ: DWORD = 0x4000;
pub const BASS_DEVICE_STEREO: DWORD = 0x8000;
pub const BASS_DEVICE_HOG: DWORD = 0x10000;
pub const BASS_DEVICE_DSOUND: DWORD = 0x40000;
pub const BASS_DEVICE_SOFTWARE: DWORD = 0x80000;

// BASS_DEVICEINFO flags
pub const BASS_DEVICE_ENABLED: DWORD = 1;
pub const BASS_DEVICE_DEFAULT: DWORD = 2;
pub const BASS_DEVICE_INIT: DWORD = 4;
pub const BASS_DEVICE_LOOPBACK: DWORD = 8;
pub const BASS_DEVICE_DEFAULTCOM: DWORD = 128;

pub const BASS_DEVICE_TYPE_MASK: DWORD = 0xff000000;
pub const BASS_DEVICE_TYPE_NETWORK: DWORD = 0x01000000;
pub const BASS_DEVICE_TYPE_SPEAKERS: DWORD = 0x02000000;
pub const BASS_DEVICE_TYPE_LINE: DWORD = 0x03000000;
pub const BASS_DEVICE_TYPE_HEADPHONES: DWORD = 0x04000000;
pub const BASS_DEVICE_TYPE_MICROPHONE: DWORD = 0x05000000;
pub const BASS_DEVICE_TYPE_HEADSET: DWORD = 0x06000000;
pub const BASS_DEVICE_TYPE_HANDSET: DWORD = 0x07000000;
pub const BASS_DEVICE_TYPE_DIGITAL: DWORD = 0x08000000;
pub const BASS_DEVICE_TYPE_SPDIF: DWORD = 0x09000000;
pub const BASS_DEVICE_TYPE_HDMI: DWORD = 0x0a000000;
pub const BASS_DEVICE_TYPE_DISPLAYPORT: DWORD = 0x40000000;

// Sample / stream flags
pub const BASS_SAMPLE_8BITS: DWORD = 1;
pub const BASS_SAMPLE_FLOAT: DWORD = 0x100;
pub const BASS_SAMPLE_MONO: DWORD = 2;
pub const BASS_SAMPLE_LOOP: DWORD = 4;
pub const BASS_SAMPLE_3D: DWORD = 8;
pub const BASS_SAMPLE_SOFTWARE: DWORD = 0x10;
pub const BASS_SAMPLE_FX: DWORD = 0x80;
pub const BASS_SAMPLE_OVER_VOL: DWORD = 0x10000;
pub const BASS_SAMPLE_OVER_POS: DWORD = 0x20000;
pub const BASS_SAMPLE_OVER_DIST: DWORD = 0x30000;

pub const BASS_SAMCHAN_NEW: DWORD = 1;
pub const BASS_SAMCHAN_STREAM: DWORD = 2;

pub const BASS_STREAM_PRESCAN: DWORD = 0x20000;
pub const BASS_STREAM_AUTOFREE: DWORD = 0x40000;
pub const BASS_STREAM_RESTRATE: DWORD = 0x80000;
pub const BASS_STREAM_BLOCK: DWORD = 0x100000;
pub const BASS_STREAM_DECODE: DWORD = 0x200000;
pub const BASS_STREAM_STATUS: DWORD = 0x800000;

pub const BASS_MUSIC_RAMP: DWORD = 0x200;
pub const BASS_MUSIC_RAMPS: DWORD = 0x400;
pub const BASS_MUSIC_SURROUND: DWORD = 0x800;
pub const BASS_MUSIC_POSRESET: DWORD = 0x8000;
pub const BASS_MUSIC_PRESCAN: DWORD = 0x20000;
pub const BASS_MUSIC_STOPBACK: DWORD = 0x80000;
pub const BASS_MUSIC_NOSAMPLE: DWORD = 0x100000;

pub const BASS_ASYNCFILE: DWORD = 0x40000000;
pub const BASS_UNICODE: DWORD = 0x80000000;

// Recording
pub const BASS_RECORD_PAUSE: DWORD = 0x8000;
pub const BASS_INPUT_OFF: DWORD = 0x10000;
pub const BASS_INPUT_ON: DWORD = 0x20000;
pub const BASS_INPUT_TYPE_MASK: DWORD = 0xff000000;

// STREAMPROC return flags
pub const BASS_STREAMPROC_END: DWORD = 0x80000000;

// Position modes
pub const BASS_POS_BYTE: DWORD = 0;
pub const BASS_POS_MUSIC_ORDER: DWORD = 1;
pub const BASS_POS_OGG: DWORD = 3;
pub const BASS_POS_RESET: DWORD = 0x2000000;
pub const BASS_POS_RELATIVE: DWORD = 0x4000000;
pub const BASS_POS_INEXACT: DWORD = 0x8000000;
pub const BASS_POS_DECODE: DWORD = 0x10000000;
pub const BASS_POS_DECODETO: DWORD = 0x20000000;
pub const BASS_POS_SCAN: DWORD = 0x40000000;

// Channel types
pub const BASS_CTYPE_SAMPLE: DWORD = 1;
pub const BASS_CTYPE_RECORD: DWORD = 2;
pub const BASS_CTYPE_STREAM: DWORD = 0x10000;
pub const BASS_CTYPE_STREAM_VORBIS: DWORD = 0x10002;
pub const BASS_CTYPE_STREAM_OGG: DWORD = 0x10002;
pub const BASS_CTYPE_STREAM_MP1: DWORD = 0x10003;
pub const BASS_CTYPE_STREAM_MP2: DWORD = 0x10004;
pub const BASS_CTYPE_STREAM_MP3: DWORD = 0x10005;
pub const BASS_CTYPE_STREAM_AIFF: DWORD = 0x10006;
pub const BASS_CTYPE_STREAM_DUMMY: DWORD = 0x18000;
pub const BASS_CTYPE_STREAM_DEVICE: DWORD = 0x18001;
pub const BASS_CTYPE_STREAM_WAV: DWORD = 0x40000;
pub const BASS_CTYPE_STREAM_WAV_PCM: DWORD = 0x50001;
pub const BASS_CTYPE_STREAM_WAV_FLOAT: DWORD = 0x50003;
pub const BASS_CTYPE_MUSIC_MOD: DWORD = 0x20000;
pub const BASS_CTYPE_MUSIC_MTM: DWORD = 0x20001;
pub const BASS_CTYPE_MUSIC_S3M: DWORD = 0x20002;
pub const BASS_CTYPE_MUSIC_XM: DWORD = 0x20003;
pub const BASS_CTYPE_MUSIC_IT: DWORD = 0x20004;
pub const BASS_CTYPE_MUSIC_MO3: DWORD = 0x00100;

// BASS_ChannelIsActive return values
pub const BASS_ACTIVE_STOPPED: DWORD = 0;
pub const BASS_ACTIVE_PLAYING: DWORD = 1;
pub const BASS_ACTIVE_STALLED: DWORD = 2;
pub const BASS_ACTIVE_PAUSED: DWORD = 3;
pub const BASS_ACTIVE_PAUSED_DEVICE: DWORD = 4;

// Channel attributes
pub const BASS_ATTRIB_FREQ: DWORD = 1;
pub const BASS_ATTRIB_VOL: DWORD = 2;
pub const BASS_ATTRIB_PAN: DWORD = 3;
pub const BASS_ATTRIB_EAXMIX: DWORD = 4;
pub const BASS_ATTRIB_NOBUFFER: DWORD = 5;
pub const BASS_ATTRIB_VBR: DWORD = 6;
pub const BASS_ATTRIB_CPU: DWORD = 7;
pub const BASS_ATTRIB_SRC: DWORD = 8;
pub const BASS_ATTRIB_NET_RESUME: DWORD = 9;
pub const BASS_ATTRIB_SCANINFO: DWORD = 10;
pub const BASS_ATTRIB_NORAMP: DWORD = 11;
pub const BASS_ATTRIB_BITRATE: DWORD = 12;
pub const BASS_ATTRIB_BUFFER: DWORD = 13;
pub const BASS_ATTRIB_GRANULE: DWORD = 14;
pub const BASS_ATTRIB_MUSIC_AMPLIFY: DWORD = 0x100;
pub const BASS_ATTRIB_MUSIC_PANSEP: DWORD = 0x101;
pub const BASS_ATTRIB_MUSIC_PSCALER: DWORD = 0x102;
pub const BASS_ATTRIB_MUSIC_BPM: DWORD = 0x103;
pub const BASS_ATTRIB_MUSIC_SPEED: DWORD = 0x104;
pub const BASS_ATTRIB_MUSIC_VOL_GLOBAL: DWORD = 0x105;

pub const BASS_SLIDE_LOG: DWORD = 0x1000000;

// BASS_ChannelGetData flags
pub const BASS_DATA_AVAILABLE: DWORD = 0;
pub const BASS_DATA_FIXED: DWORD = 0x20000000;
pub const BASS_DATA_FLOAT: DWORD = 0x40000000;
pub const BASS_DATA_FFT256: DWORD = 0x80000000;
pub const BASS_DATA_FFT512: DWORD = 0x80000001;
pub const BASS_DATA_FFT1024: DWORD = 0x80000002;
pub const BASS_DATA_FFT2048: DWORD = 0x80000003;
pub const BASS_DATA_FFT4096: DWORD = 0x80000004;

// Sync types
pub const BASS_SYNC_POS: DWORD = 0;
pub const BASS_SYNC_MUSICINST: DWORD = 1;
pub const BASS_SYNC_END: DWORD = 2;
pub const BASS_SYNC_MUSICFX: DWORD = 3;
pub const BASS_SYNC_META: DWORD = 4;
pub const BASS_SYNC_SLIDE: DWORD = 5;
pub const BASS_SYNC_STALL: DWORD = 6;
pub const BASS_SYNC_DOWNLOAD: DWORD = 7;
pub const BASS_SYNC_FREE: DWORD = 8;
pub const BASS_SYNC_MUSICPOS: DWORD = 10;
pub const BASS_SYNC_SETPOS: DWORD = 11;
pub const BASS_SYNC_OGG_CHANGE: DWORD = 12;
pub const BASS_SYNC_ATTRIB: DWORD = 13;
pub const BASS_SYNC_STOP: DWORD = 14;
pub const BASS_SYNC_DEV_FAIL: DWORD = 14;
pub const BASS_SYNC_DEV_FORMAT: DWORD = 15;
pub const BASS_SYNC_THREAD: DWORD = 0x20000000;
pub const BASS_SYNC_MIXTIME: DWORD = 0x40000000;
pub const BASS_SYNC_ONETIME: DWORD = 0x80000000;

// Tag types (BASS_ChannelGetTags)
pub const BASS_TAG_ID3: DWORD = 0;
pub const BASS_TAG_ID3V2: DWORD = 1;
pub const BASS_TAG_OGG: DWORD = 2;
pub const BASS_TAG_HTTP: DWORD = 3;
pub const BASS_TAG_ICY: DWORD = 4;
pub const BASS_TAG_META: DWORD = 5;
pub const BASS_TAG_APE: DWORD = 6;
pub const BASS_TAG_MP4: DWORD = 7;
pub const BASS_TAG_WMA: DWORD = 8;
pub const BASS_TAG_VENDOR: DWORD = 9;
pub const BASS_TAG_LYRICS3: DWORD = 10;
pub const BASS_TAG_RIFF_INFO: DWORD = 0x100;
pub const BASS_TAG_RIFF_BEXT: DWORD = 0x101;
pub const BASS_TAG_RIFF_CART: DWORD = 0x102;
pub const BASS_TAG_RIFF_DISP: DWORD = 0x103;
pub const BASS_TAG_MUSIC_NAME: DWORD = 0x10000;
pub const BASS_TAG_MUSIC_MESSAGE: DWORD = 0x10001;

// DirectX 8 effect types (BASS_ChannelSetFX)
pub const BASS_FX_DX8_CHORUS: DWORD = 0;
pub const BASS_FX_DX8_COMPRESSOR: DWORD = 1;
pub const BASS_FX_DX8_DISTORTION: DWORD = 2;
pub const BASS_FX_DX8_ECHO: DWORD = 3;
pub const BASS_FX_DX8_FLANGER: DWORD = 4;
pub const BASS_FX_DX8_GARGLE: DWORD = 5;
pub const BASS_FX_DX8_I3DL2REVERB: DWORD = 6;
pub const BASS_FX_DX8_PARAMEQ: DWORD = 7;
pub const BASS_FX_DX8_REVERB: DWORD = 8;
pub const BASS_FX_VOLUME: DWORD = 9;

pub const BASS_DX8_PHASE_NEG_180: i32 = 0;
pub const BASS_DX8_PHASE_NEG_90: i32 = 1;
pub const BASS_DX8_PHASE_ZERO: i32 = 2;
pub const BASS_DX8_PHASE_90: i32 = 3;
pub const BASS_DX8_PHASE_180: i32 = 4;

/// Channel info structure returned by BASS_ChannelGetInfo
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BassChannelInfo {
    pub freq: DWORD,
    pub chans: DWORD,
    pub flags: DWORD,
    pub ctype: DWORD,
    pub origres: DWORD,
    pub plugin: HPLUGIN,
    pub sample: HSAMPLE,
    pub filename: *const c_char,
}

impl Default for BassChannelInfo {
    fn default() -> Self {
        Self {
            freq: 0,
            chans: 0,
            flags: 0,
            ctype: 0,
            origres: 0,
            plugin: 0,
            sample: 0,
            filename: std::ptr::null(),
        }
    }
}

/// Device info structure returned by BASS_GetDeviceInfo / BASS_RecordGetDeviceInfo
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BassDeviceInfo {
    pub name: *const c_char,
    pub driver: *const c_char,
    pub flags: DWORD,
}

impl Default for BassDeviceInfo {
    fn default() -> Self {
        Self {
            name: std::ptr::null(),
            driver: std::ptr::null(),
            flags: 0,
        }
    }
}

/// Output device info returned by BASS_GetInfo
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct BassInfo {
    pub flags: DWORD,
    pub hwsize: DWORD,
    pub hwfree: DWORD,
    pub freesam: DWORD,
    pub free3d: DWORD,
    pub minrate: DWORD,
    pub maxrate: DWORD,
    pub eax: BOOL,
    pub minbuf: DWORD,
    pub dsver: DWORD,
    pub latency: DWORD,
    pub initflags: DWORD,
    pub speakers: DWORD,
    pub freq: DWORD,
}

/// Recording device info returned by BASS_RecordGetInfo
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct BassRecordInfo {
    pub flags: DWORD,
    pub formats: DWORD,
    pub inputs: DWORD,
    pub singlein: BOOL,
    pub freq: DWORD,
}

// DirectX 8 effect parameter blocks (BASS_FXSetParameters)

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Chorus {
    pub f_wet_dry_mix: f32,
    pub f_depth: f32,
    pub f_feedback: f32,
    pub f_frequency: f32,
    pub l_waveform: DWORD,
    pub f_delay: f32,
    pub l_phase: DWORD,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Compressor {
    pub f_gain: f32,
    pub f_attack: f32,
    pub f_release: f32,
    pub f_threshold: f32,
    pub f_ratio: f32,
    pub f_predelay: f32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Distortion {
    pub f_gain: f32,
    pub f_edge: f32,
    pub f_post_eq_center_frequency: f32,
    pub f_post_eq_bandwidth: f32,
    pub f_pre_lowpass_cutoff: f32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Echo {
    pub f_wet_dry_mix: f32,
    pub f_feedback: f32,
    pub f_left_delay: f32,
    pub f_right_delay: f32,
    pub l_pan_delay: BOOL,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Flanger {
    pub f_wet_dry_mix: f32,
    pub f_depth: f32,
    pub f_feedback: f32,
    pub f_frequency: f32,
    pub l_waveform: DWORD,
    pub f_delay: f32,
    pub l_phase: DWORD,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Gargle {
    pub dw_rate_hz: DWORD,
    pub dw_wave_shape: DWORD,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8ParamEq {
    pub f_center: f32,
    pub f_bandwidth: f32,
    pub f_gain: f32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BassDx8Reverb {
    pub f_in_gain: f32,
    pub f_reverb_mix: f32,
    pub f_reverb_time: f32,
    pub f_high_freq_rt_ratio: f32,
}

// Tag blocks. These mirror file-format byte layouts, hence the packing.

/// ID3v1 tag (BASS_TAG_ID3), 128 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TagId3 {
    pub id: [u8; 3],
    pub title: [u8; 30],
    pub artist: [u8; 30],
    pub album: [u8; 30],
    pub year: [u8; 4],
    pub comment: [u8; 30],
    pub genre: BYTE,
}

/// Broadcast Wave BEXT chunk (BASS_TAG_RIFF_BEXT); the NUL-terminated
/// coding history follows the fixed part.
#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct TagBext {
    pub description: [u8; 256],
    pub originator: [u8; 32],
    pub originator_reference: [u8; 32],
    pub origination_date: [u8; 10],
    pub origination_time: [u8; 8],
    pub time_reference: QWORD,
    pub version: WORD,
    pub umid: [u8; 64],
    pub reserved: [u8; 190],
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default)]
pub struct TagCartTimer {
    pub usage: DWORD,
    pub value: DWORD,
}

/// Broadcast Wave CART chunk (BASS_TAG_RIFF_CART); the NUL-terminated tag
/// text follows the fixed part.
#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct TagCart {
    pub version: [u8; 4],
    pub title: [u8; 64],
    pub artist: [u8; 64],
    pub cut_id: [u8; 64],
    pub client_id: [u8; 64],
    pub category: [u8; 64],
    pub classification: [u8; 64],
    pub out_cue: [u8; 64],
    pub start_date: [u8; 10],
    pub start_time: [u8; 8],
    pub end_date: [u8; 10],
    pub end_time: [u8; 8],
    pub producer_app_id: [u8; 64],
    pub producer_app_version: [u8; 64],
    pub user_def: [u8; 64],
    pub level_reference: DWORD,
    pub post_timer: [TagCartTimer; 8],
    pub reserved: [u8; 276],
    pub url: [u8; 1024],
}

/// Stream callback function type
/// Returns number of bytes written, optionally ORed with BASS_STREAMPROC_END
pub type StreamProc = unsafe extern "system" fn(
    handle: HSTREAM,
    buffer: *mut c_void,
    length: DWORD,
    user: *mut c_void,
) -> DWORD;

/// Sync callback function type
pub type SyncProc = unsafe extern "system" fn(
    handle: HSYNC,
    channel: DWORD,
    data: DWORD,
    user: *mut c_void,
);

/// DSP callback function type
pub type DspProc = unsafe extern "system" fn(
    handle: HDSP,
    channel: DWORD,
    buffer: *mut c_void,
    length: DWORD,
    user: *mut c_void,
);

/// Recording callback function type; return FALSE to stop recording
pub type RecordProc = unsafe extern "system" fn(
    handle: HRECORD,
    buffer: *const c_void,
    length: DWORD,
    user: *mut c_void,
) -> BOOL;

/// Download callback function type
pub type DownloadProc = unsafe extern "system" fn(
    buffer: *const c_void,
    length: DWORD,
    user: *mut c_void,
);

native_table! {
    /// Core BASS exports (bass.dll / libbass.so / libbass.dylib)
    pub struct CoreFunctions {
        get_version = "BASS_GetVersion": fn() -> DWORD;
        error_get_code = "BASS_ErrorGetCode": fn() -> i32;
        init = "BASS_Init": fn(i32, DWORD, DWORD, HWND, *const c_void) -> BOOL;
        free = "BASS_Free": fn() -> BOOL;
        get_device_info = "BASS_GetDeviceInfo": fn(DWORD, *mut BassDeviceInfo) -> BOOL;
        set_device = "BASS_SetDevice": fn(DWORD) -> BOOL;
        get_device = "BASS_GetDevice": fn() -> DWORD;
        get_info = "BASS_GetInfo": fn(*mut BassInfo) -> BOOL;
        set_config = "BASS_SetConfig": fn(DWORD, DWORD) -> BOOL;
        get_config = "BASS_GetConfig": fn(DWORD) -> DWORD;
        set_volume = "BASS_SetVolume": fn(f32) -> BOOL;
        get_volume = "BASS_GetVolume": fn() -> f32;
        start = "BASS_Start": fn() -> BOOL;
        stop = "BASS_Stop": fn() -> BOOL;
        pause = "BASS_Pause": fn() -> BOOL;
        plugin_load = "BASS_PluginLoad": fn(*const c_void, DWORD) -> HPLUGIN;
        plugin_free = "BASS_PluginFree": fn(HPLUGIN) -> BOOL;
        stream_create = "BASS_StreamCreate": fn(DWORD, DWORD, DWORD, Option<StreamProc>, *mut c_void) -> HSTREAM;
        stream_create_file = "BASS_StreamCreateFile": fn(BOOL, *const c_void, QWORD, QWORD, DWORD) -> HSTREAM;
        stream_create_url = "BASS_StreamCreateURL": fn(*const c_char, DWORD, DWORD, Option<DownloadProc>, *mut c_void) -> HSTREAM;
        stream_free = "BASS_StreamFree": fn(HSTREAM) -> BOOL;
        sample_load = "BASS_SampleLoad": fn(BOOL, *const c_void, QWORD, DWORD, DWORD, DWORD) -> HSAMPLE;
        sample_get_channel = "BASS_SampleGetChannel": fn(HSAMPLE, DWORD) -> HCHANNEL;
        sample_free = "BASS_SampleFree": fn(HSAMPLE) -> BOOL;
        music_load = "BASS_MusicLoad": fn(BOOL, *const c_void, QWORD, DWORD, DWORD, DWORD) -> HMUSIC;
        music_free = "BASS_MusicFree": fn(HMUSIC) -> BOOL;
        record_init = "BASS_RecordInit": fn(i32) -> BOOL;
        record_free = "BASS_RecordFree": fn() -> BOOL;
        record_get_device_info = "BASS_RecordGetDeviceInfo": fn(DWORD, *mut BassDeviceInfo) -> BOOL;
        record_set_device = "BASS_RecordSetDevice": fn(DWORD) -> BOOL;
        record_get_device = "BASS_RecordGetDevice": fn() -> DWORD;
        record_get_info = "BASS_RecordGetInfo": fn(*mut BassRecordInfo) -> BOOL;
        record_get_input = "BASS_RecordGetInput": fn(i32, *mut f32) -> DWORD;
        record_set_input = "BASS_RecordSetInput": fn(i32, DWORD, f32) -> BOOL;
        record_get_input_name = "BASS_RecordGetInputName": fn(i32) -> *const c_char;
        record_start = "BASS_RecordStart": fn(DWORD, DWORD, DWORD, Option<RecordProc>, *mut c_void) -> HRECORD;
        channel_get_info = "BASS_ChannelGetInfo": fn(DWORD, *mut BassChannelInfo) -> BOOL;
        channel_play = "BASS_ChannelPlay": fn(DWORD, BOOL) -> BOOL;
        channel_stop = "BASS_ChannelStop": fn(DWORD) -> BOOL;
        channel_pause = "BASS_ChannelPause": fn(DWORD) -> BOOL;
        channel_is_active = "BASS_ChannelIsActive": fn(DWORD) -> DWORD;
        channel_free = "BASS_ChannelFree": fn(DWORD) -> BOOL;
        channel_get_length = "BASS_ChannelGetLength": fn(DWORD, DWORD) -> QWORD;
        channel_get_position = "BASS_ChannelGetPosition": fn(DWORD, DWORD) -> QWORD;
        channel_set_position = "BASS_ChannelSetPosition": fn(DWORD, QWORD, DWORD) -> BOOL;
        channel_bytes2seconds = "BASS_ChannelBytes2Seconds": fn(DWORD, QWORD) -> f64;
        channel_seconds2bytes = "BASS_ChannelSeconds2Bytes": fn(DWORD, f64) -> QWORD;
        channel_get_attribute = "BASS_ChannelGetAttribute": fn(DWORD, DWORD, *mut f32) -> BOOL;
        channel_set_attribute = "BASS_ChannelSetAttribute": fn(DWORD, DWORD, f32) -> BOOL;
        channel_slide_attribute = "BASS_ChannelSlideAttribute": fn(DWORD, DWORD, f32, DWORD) -> BOOL;
        channel_is_sliding = "BASS_ChannelIsSliding": fn(DWORD, DWORD) -> BOOL;
        channel_flags = "BASS_ChannelFlags": fn(DWORD, DWORD, DWORD) -> DWORD;
        channel_get_level = "BASS_ChannelGetLevel": fn(DWORD) -> DWORD;
        channel_get_tags = "BASS_ChannelGetTags": fn(DWORD, DWORD) -> *const c_char;
        channel_get_device = "BASS_ChannelGetDevice": fn(DWORD) -> DWORD;
        channel_set_device = "BASS_ChannelSetDevice": fn(DWORD, DWORD) -> BOOL;
        channel_get_data = "BASS_ChannelGetData": fn(DWORD, *mut c_void, DWORD) -> DWORD;
        channel_set_sync = "BASS_ChannelSetSync": fn(DWORD, DWORD, QWORD, Option<SyncProc>, *mut c_void) -> HSYNC;
        channel_remove_sync = "BASS_ChannelRemoveSync": fn(DWORD, HSYNC) -> BOOL;
        channel_set_dsp = "BASS_ChannelSetDSP": fn(DWORD, Option<DspProc>, *mut c_void, i32) -> HDSP;
        channel_remove_dsp = "BASS_ChannelRemoveDSP": fn(DWORD, HDSP) -> BOOL;
        channel_set_fx = "BASS_ChannelSetFX": fn(DWORD, DWORD, i32) -> HFX;
        channel_remove_fx = "BASS_ChannelRemoveFX": fn(DWORD, HFX) -> BOOL;
        channel_set_link = "BASS_ChannelSetLink": fn(DWORD, DWORD) -> BOOL;
        channel_remove_link = "BASS_ChannelRemoveLink": fn(DWORD, DWORD) -> BOOL;
        fx_set_parameters = "BASS_FXSetParameters": fn(HFX, *const c_void) -> BOOL;
        fx_get_parameters = "BASS_FXGetParameters": fn(HFX, *mut c_void) -> BOOL;
        fx_reset = "BASS_FXReset": fn(HFX) -> BOOL;
    }
}
