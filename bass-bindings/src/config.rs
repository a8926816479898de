//! Load-time configuration and native config options.

use std::path::PathBuf;

use crate::ffi::{self, DWORD};

/// Optional native add-on libraries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addon {
    Encoder,
    Mixer,
    Midi,
    Wasapi,
    Wma,
    Cd,
    DirectShow,
}

impl Addon {
    pub const ALL: [Addon; 7] = [
        Addon::Encoder,
        Addon::Mixer,
        Addon::Midi,
        Addon::Wasapi,
        Addon::Wma,
        Addon::Cd,
        Addon::DirectShow,
    ];

    /// Library stem passed to `libloading::library_filename`.
    pub fn library_stem(self) -> &'static str {
        match self {
            Addon::Encoder => "bassenc",
            Addon::Mixer => "bassmix",
            Addon::Midi => "bassmidi",
            Addon::Wasapi => "basswasapi",
            Addon::Wma => "basswma",
            Addon::Cd => "basscd",
            Addon::DirectShow => "xVideo",
        }
    }
}

/// Native configuration options (BASS_SetConfig / BASS_GetConfig)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    Buffer,
    UpdatePeriod,
    GlobalSampleVolume,
    GlobalStreamVolume,
    GlobalMusicVolume,
    LogarithmicVolume,
    LogarithmicPan,
    FloatDsp,
    NetTimeout,
    NetBuffer,
    PauseNoPlay,
    NetPrebuffer,
    NetPassive,
    RecordBuffer,
    NetPlaylist,
    Verify,
    UpdateThreads,
    DeviceBuffer,
    DeviceDefault,
    NetReadTimeout,
    Handles,
    Unicode,
    Src,
    SrcSample,
    AsyncFileBuffer,
    OggPrescan,
    DeviceNonStop,
    // add-ons
    EncodePriority,
    EncodeQueue,
    EncodeCastTimeout,
    MixerBuffer,
    MixerPositionEx,
    SplitBuffer,
    MidiCompact,
    MidiVoices,
    MidiAutoFont,
    WmaPrebuffer,
    WmaBassFile,
    CdFreeOld,
    CdRetry,
    CdAutoSpeed,
    CdSkipError,
    /// Any option not covered above
    Raw(DWORD),
}

impl ConfigOption {
    pub fn raw(self) -> DWORD {
        use crate::ffi::{cd, enc, midi, mix, wma};

        match self {
            ConfigOption::Buffer => ffi::BASS_CONFIG_BUFFER,
            ConfigOption::UpdatePeriod => ffi::BASS_CONFIG_UPDATEPERIOD,
            ConfigOption::GlobalSampleVolume => ffi::BASS_CONFIG_GVOL_SAMPLE,
            ConfigOption::GlobalStreamVolume => ffi::BASS_CONFIG_GVOL_STREAM,
            ConfigOption::GlobalMusicVolume => ffi::BASS_CONFIG_GVOL_MUSIC,
            ConfigOption::LogarithmicVolume => ffi::BASS_CONFIG_CURVE_VOL,
            ConfigOption::LogarithmicPan => ffi::BASS_CONFIG_CURVE_PAN,
            ConfigOption::FloatDsp => ffi::BASS_CONFIG_FLOATDSP,
            ConfigOption::NetTimeout => ffi::BASS_CONFIG_NET_TIMEOUT,
            ConfigOption::NetBuffer => ffi::BASS_CONFIG_NET_BUFFER,
            ConfigOption::PauseNoPlay => ffi::BASS_CONFIG_PAUSE_NOPLAY,
            ConfigOption::NetPrebuffer => ffi::BASS_CONFIG_NET_PREBUF,
            ConfigOption::NetPassive => ffi::BASS_CONFIG_NET_PASSIVE,
            ConfigOption::RecordBuffer => ffi::BASS_CONFIG_REC_BUFFER,
            ConfigOption::NetPlaylist => ffi::BASS_CONFIG_NET_PLAYLIST,
            ConfigOption::Verify => ffi::BASS_CONFIG_VERIFY,
            ConfigOption::UpdateThreads => ffi::BASS_CONFIG_UPDATETHREADS,
            ConfigOption::DeviceBuffer => ffi::BASS_CONFIG_DEV_BUFFER,
            ConfigOption::DeviceDefault => ffi::BASS_CONFIG_DEV_DEFAULT,
            ConfigOption::NetReadTimeout => ffi::BASS_CONFIG_NET_READTIMEOUT,
            ConfigOption::Handles => ffi::BASS_CONFIG_HANDLES,
            ConfigOption::Unicode => ffi::BASS_CONFIG_UNICODE,
            ConfigOption::Src => ffi::BASS_CONFIG_SRC,
            ConfigOption::SrcSample => ffi::BASS_CONFIG_SRC_SAMPLE,
            ConfigOption::AsyncFileBuffer => ffi::BASS_CONFIG_ASYNCFILE_BUFFER,
            ConfigOption::OggPrescan => ffi::BASS_CONFIG_OGG_PRESCAN,
            ConfigOption::DeviceNonStop => ffi::BASS_CONFIG_DEV_NONSTOP,
            ConfigOption::EncodePriority => enc::BASS_CONFIG_ENCODE_PRIORITY,
            ConfigOption::EncodeQueue => enc::BASS_CONFIG_ENCODE_QUEUE,
            ConfigOption::EncodeCastTimeout => enc::BASS_CONFIG_ENCODE_CAST_TIMEOUT,
            ConfigOption::MixerBuffer => mix::BASS_CONFIG_MIXER_BUFFER,
            ConfigOption::MixerPositionEx => mix::BASS_CONFIG_MIXER_POSEX,
            ConfigOption::SplitBuffer => mix::BASS_CONFIG_SPLIT_BUFFER,
            ConfigOption::MidiCompact => midi::BASS_CONFIG_MIDI_COMPACT,
            ConfigOption::MidiVoices => midi::BASS_CONFIG_MIDI_VOICES,
            ConfigOption::MidiAutoFont => midi::BASS_CONFIG_MIDI_AUTOFONT,
            ConfigOption::WmaPrebuffer => wma::BASS_CONFIG_WMA_PREBUF,
            ConfigOption::WmaBassFile => wma::BASS_CONFIG_WMA_BASSFILE,
            ConfigOption::CdFreeOld => cd::BASS_CONFIG_CD_FREEOLD,
            ConfigOption::CdRetry => cd::BASS_CONFIG_CD_RETRY,
            ConfigOption::CdAutoSpeed => cd::BASS_CONFIG_CD_AUTOSPEED,
            ConfigOption::CdSkipError => cd::BASS_CONFIG_CD_SKIPERROR,
            ConfigOption::Raw(value) => value,
        }
    }
}

/// Options for [`crate::Bass::load`].
///
/// The default loads only the core library from the platform search path
/// and delivers wrapper events on the native callback thread.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Folder holding the native libraries; `None` uses the search path
    pub folder: Option<PathBuf>,
    /// Add-ons to load next to the core library
    pub addons: Vec<Addon>,
    /// Config values applied right after loading
    pub config: Vec<(ConfigOption, DWORD)>,
    /// Capacity of the event queue; `None` delivers events immediately
    pub event_queue: Option<usize>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn addon(mut self, addon: Addon) -> Self {
        if !self.addons.contains(&addon) {
            self.addons.push(addon);
        }
        self
    }

    pub fn all_addons(mut self) -> Self {
        self.addons = Addon::ALL.to_vec();
        self
    }

    pub fn config(mut self, option: ConfigOption, value: DWORD) -> Self {
        self.config.push((option, value));
        self
    }

    pub fn event_queue(mut self, capacity: usize) -> Self {
        self.event_queue = Some(capacity);
        self
    }
}
