//! Error types for the binding layer.
//!
//! Native calls report failure through a sentinel return value and a
//! per-thread error code. Wrappers turn that pair into [`BassError::Native`]
//! carrying an [`ErrorCode`].

use std::ffi::NulError;

use thiserror::Error;

use crate::config::Addon;
use crate::ffi;

pub type Result<T> = std::result::Result<T, BassError>;

/// Errors raised by the wrapper layer
#[derive(Error, Debug)]
pub enum BassError {
    #[error("Failed to load native library: {0}")]
    Library(#[from] libloading::Error),

    #[error("Unsupported BASS version {found:#010x} (need 2.4.x)")]
    LibraryVersion { found: u32 },

    #[error("Add-on {0:?} is not loaded")]
    AddonUnavailable(Addon),

    #[error("Native call failed: {0}")]
    Native(ErrorCode),

    #[error("Invalid handle {handle:#x}: {code}")]
    InvalidHandle { handle: u32, code: ErrorCode },

    #[error("Invalid {kind} device index {index}")]
    InvalidDevice { kind: DeviceKind, index: u32 },

    #[error("Handle {handle:#x} has been disposed")]
    Disposed { handle: u32 },

    #[error("String contains an interior NUL: {0}")]
    InvalidString(#[from] NulError),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl BassError {
    /// Native error code, when the failure came from the native layer.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            BassError::Native(code) | BassError::InvalidHandle { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, BassError::Disposed { .. })
    }
}

/// Which device registry an index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Playback,
    Record,
    Wasapi,
    Cd,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeviceKind::Playback => "playback",
            DeviceKind::Record => "record",
            DeviceKind::Wasapi => "WASAPI",
            DeviceKind::Cd => "CD",
        };
        f.write_str(name)
    }
}

/// Native error codes (BASS_ErrorGetCode and the add-on ranges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Ok,
    Memory,
    FileOpen,
    Driver,
    BufferLost,
    Handle,
    Format,
    Position,
    Init,
    Start,
    Ssl,
    Reinit,
    CdTrack,
    Already,
    NotAudio,
    NoChannel,
    IllegalType,
    IllegalParam,
    No3d,
    NoEax,
    Device,
    NoPlay,
    Frequency,
    NotFile,
    NoHardware,
    Empty,
    NoNet,
    Create,
    NoFx,
    NotAvailable,
    Decode,
    DirectX,
    Timeout,
    FileFormat,
    Speaker,
    Version,
    Codec,
    Ended,
    Busy,
    Unstreamable,
    Protocol,
    Denied,
    Unknown,
    // basswma
    WmaLicense,
    Wma,
    WmaWm9,
    WmaDenied,
    WmaIndividual,
    WmaPublishInit,
    // bassenc
    AcmCancel,
    CastDenied,
    ServerCert,
    // basswasapi
    Wasapi,
    WasapiBuffer,
    WasapiCategory,
    WasapiDenied,
    // bassmidi
    MidiInclude,
    Other(i32),
}

impl ErrorCode {
    pub fn from_raw(code: i32) -> Self {
        use crate::ffi::cd::BASS_ERROR_CDTRACK;
        use crate::ffi::enc::*;
        use crate::ffi::midi::BASS_ERROR_MIDI_INCLUDE;
        use crate::ffi::wasapi::*;
        use crate::ffi::wma::*;

        match code {
            ffi::BASS_OK => ErrorCode::Ok,
            ffi::BASS_ERROR_MEM => ErrorCode::Memory,
            ffi::BASS_ERROR_FILEOPEN => ErrorCode::FileOpen,
            ffi::BASS_ERROR_DRIVER => ErrorCode::Driver,
            ffi::BASS_ERROR_BUFLOST => ErrorCode::BufferLost,
            ffi::BASS_ERROR_HANDLE => ErrorCode::Handle,
            ffi::BASS_ERROR_FORMAT => ErrorCode::Format,
            ffi::BASS_ERROR_POSITION => ErrorCode::Position,
            ffi::BASS_ERROR_INIT => ErrorCode::Init,
            ffi::BASS_ERROR_START => ErrorCode::Start,
            ffi::BASS_ERROR_SSL => ErrorCode::Ssl,
            ffi::BASS_ERROR_REINIT => ErrorCode::Reinit,
            BASS_ERROR_CDTRACK => ErrorCode::CdTrack,
            ffi::BASS_ERROR_ALREADY => ErrorCode::Already,
            ffi::BASS_ERROR_NOTAUDIO => ErrorCode::NotAudio,
            ffi::BASS_ERROR_NOCHAN => ErrorCode::NoChannel,
            ffi::BASS_ERROR_ILLTYPE => ErrorCode::IllegalType,
            ffi::BASS_ERROR_ILLPARAM => ErrorCode::IllegalParam,
            ffi::BASS_ERROR_NO3D => ErrorCode::No3d,
            ffi::BASS_ERROR_NOEAX => ErrorCode::NoEax,
            ffi::BASS_ERROR_DEVICE => ErrorCode::Device,
            ffi::BASS_ERROR_NOPLAY => ErrorCode::NoPlay,
            ffi::BASS_ERROR_FREQ => ErrorCode::Frequency,
            ffi::BASS_ERROR_NOTFILE => ErrorCode::NotFile,
            ffi::BASS_ERROR_NOHW => ErrorCode::NoHardware,
            ffi::BASS_ERROR_EMPTY => ErrorCode::Empty,
            ffi::BASS_ERROR_NONET => ErrorCode::NoNet,
            ffi::BASS_ERROR_CREATE => ErrorCode::Create,
            ffi::BASS_ERROR_NOFX => ErrorCode::NoFx,
            ffi::BASS_ERROR_NOTAVAIL => ErrorCode::NotAvailable,
            ffi::BASS_ERROR_DECODE => ErrorCode::Decode,
            ffi::BASS_ERROR_DX => ErrorCode::DirectX,
            ffi::BASS_ERROR_TIMEOUT => ErrorCode::Timeout,
            ffi::BASS_ERROR_FILEFORM => ErrorCode::FileFormat,
            ffi::BASS_ERROR_SPEAKER => ErrorCode::Speaker,
            ffi::BASS_ERROR_VERSION => ErrorCode::Version,
            ffi::BASS_ERROR_CODEC => ErrorCode::Codec,
            ffi::BASS_ERROR_ENDED => ErrorCode::Ended,
            ffi::BASS_ERROR_BUSY => ErrorCode::Busy,
            ffi::BASS_ERROR_UNSTREAMABLE => ErrorCode::Unstreamable,
            ffi::BASS_ERROR_PROTOCOL => ErrorCode::Protocol,
            ffi::BASS_ERROR_DENIED => ErrorCode::Denied,
            ffi::BASS_ERROR_UNKNOWN => ErrorCode::Unknown,
            BASS_ERROR_WMA_LICENSE => ErrorCode::WmaLicense,
            BASS_ERROR_WMA => ErrorCode::Wma,
            BASS_ERROR_WMA_WM9 => ErrorCode::WmaWm9,
            BASS_ERROR_WMA_DENIED => ErrorCode::WmaDenied,
            BASS_ERROR_WMA_INDIVIDUAL => ErrorCode::WmaIndividual,
            BASS_ERROR_WMA_PUBINIT => ErrorCode::WmaPublishInit,
            BASS_ERROR_ACM_CANCEL => ErrorCode::AcmCancel,
            BASS_ERROR_CAST_DENIED => ErrorCode::CastDenied,
            BASS_ERROR_SERVER_CERT => ErrorCode::ServerCert,
            BASS_ERROR_WASAPI => ErrorCode::Wasapi,
            BASS_ERROR_WASAPI_BUFFER => ErrorCode::WasapiBuffer,
            BASS_ERROR_WASAPI_CATEGORY => ErrorCode::WasapiCategory,
            BASS_ERROR_WASAPI_DENIED => ErrorCode::WasapiDenied,
            BASS_ERROR_MIDI_INCLUDE => ErrorCode::MidiInclude,
            other => ErrorCode::Other(other),
        }
    }

    pub fn raw(self) -> i32 {
        use crate::ffi::cd::BASS_ERROR_CDTRACK;
        use crate::ffi::enc::*;
        use crate::ffi::midi::BASS_ERROR_MIDI_INCLUDE;
        use crate::ffi::wasapi::*;
        use crate::ffi::wma::*;

        match self {
            ErrorCode::Ok => ffi::BASS_OK,
            ErrorCode::Memory => ffi::BASS_ERROR_MEM,
            ErrorCode::FileOpen => ffi::BASS_ERROR_FILEOPEN,
            ErrorCode::Driver => ffi::BASS_ERROR_DRIVER,
            ErrorCode::BufferLost => ffi::BASS_ERROR_BUFLOST,
            ErrorCode::Handle => ffi::BASS_ERROR_HANDLE,
            ErrorCode::Format => ffi::BASS_ERROR_FORMAT,
            ErrorCode::Position => ffi::BASS_ERROR_POSITION,
            ErrorCode::Init => ffi::BASS_ERROR_INIT,
            ErrorCode::Start => ffi::BASS_ERROR_START,
            ErrorCode::Ssl => ffi::BASS_ERROR_SSL,
            ErrorCode::Reinit => ffi::BASS_ERROR_REINIT,
            ErrorCode::CdTrack => BASS_ERROR_CDTRACK,
            ErrorCode::Already => ffi::BASS_ERROR_ALREADY,
            ErrorCode::NotAudio => ffi::BASS_ERROR_NOTAUDIO,
            ErrorCode::NoChannel => ffi::BASS_ERROR_NOCHAN,
            ErrorCode::IllegalType => ffi::BASS_ERROR_ILLTYPE,
            ErrorCode::IllegalParam => ffi::BASS_ERROR_ILLPARAM,
            ErrorCode::No3d => ffi::BASS_ERROR_NO3D,
            ErrorCode::NoEax => ffi::BASS_ERROR_NOEAX,
            ErrorCode::Device => ffi::BASS_ERROR_DEVICE,
            ErrorCode::NoPlay => ffi::BASS_ERROR_NOPLAY,
            ErrorCode::Frequency => ffi::BASS_ERROR_FREQ,
            ErrorCode::NotFile => ffi::BASS_ERROR_NOTFILE,
            ErrorCode::NoHardware => ffi::BASS_ERROR_NOHW,
            ErrorCode::Empty => ffi::BASS_ERROR_EMPTY,
            ErrorCode::NoNet => ffi::BASS_ERROR_NONET,
            ErrorCode::Create => ffi::BASS_ERROR_CREATE,
            ErrorCode::NoFx => ffi::BASS_ERROR_NOFX,
            ErrorCode::NotAvailable => ffi::BASS_ERROR_NOTAVAIL,
            ErrorCode::Decode => ffi::BASS_ERROR_DECODE,
            ErrorCode::DirectX => ffi::BASS_ERROR_DX,
            ErrorCode::Timeout => ffi::BASS_ERROR_TIMEOUT,
            ErrorCode::FileFormat => ffi::BASS_ERROR_FILEFORM,
            ErrorCode::Speaker => ffi::BASS_ERROR_SPEAKER,
            ErrorCode::Version => ffi::BASS_ERROR_VERSION,
            ErrorCode::Codec => ffi::BASS_ERROR_CODEC,
            ErrorCode::Ended => ffi::BASS_ERROR_ENDED,
            ErrorCode::Busy => ffi::BASS_ERROR_BUSY,
            ErrorCode::Unstreamable => ffi::BASS_ERROR_UNSTREAMABLE,
            ErrorCode::Protocol => ffi::BASS_ERROR_PROTOCOL,
            ErrorCode::Denied => ffi::BASS_ERROR_DENIED,
            ErrorCode::Unknown => ffi::BASS_ERROR_UNKNOWN,
            ErrorCode::WmaLicense => BASS_ERROR_WMA_LICENSE,
            ErrorCode::Wma => BASS_ERROR_WMA,
            ErrorCode::WmaWm9 => BASS_ERROR_WMA_WM9,
            ErrorCode::WmaDenied => BASS_ERROR_WMA_DENIED,
            ErrorCode::WmaIndividual => BASS_ERROR_WMA_INDIVIDUAL,
            ErrorCode::WmaPublishInit => BASS_ERROR_WMA_PUBINIT,
            ErrorCode::AcmCancel => BASS_ERROR_ACM_CANCEL,
            ErrorCode::CastDenied => BASS_ERROR_CAST_DENIED,
            ErrorCode::ServerCert => BASS_ERROR_SERVER_CERT,
            ErrorCode::Wasapi => BASS_ERROR_WASAPI,
            ErrorCode::WasapiBuffer => BASS_ERROR_WASAPI_BUFFER,
            ErrorCode::WasapiCategory => BASS_ERROR_WASAPI_CATEGORY,
            ErrorCode::WasapiDenied => BASS_ERROR_WASAPI_DENIED,
            ErrorCode::MidiInclude => BASS_ERROR_MIDI_INCLUDE,
            ErrorCode::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, self.raw())
    }
}
