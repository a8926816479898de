//! MIDI streams and soundfonts (bassmidi).

use std::path::Path;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::api::{self, BassApi, MidiApi};
use crate::channel::Channel;
use crate::error::Result;
use crate::ffi::midi::*;
use crate::ffi::*;
use crate::stream;
use crate::Bass;

/// Owned copy of BASS_MIDI_FONTINFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    pub name: String,
    pub copyright: String,
    pub comment: String,
    pub presets: u32,
    /// Total sample data size in bytes
    pub sample_size: u32,
    /// Sample data currently loaded
    pub sample_loaded: u32,
    pub sample_type: DWORD,
}

/// A soundfont; freed on drop.
pub struct SoundFont {
    api: Arc<dyn BassApi>,
    handle: HSOUNDFONT,
}

impl SoundFont {
    /// Open an SF2/SFZ file (BASS_MIDI_FontInit).
    pub fn load(bass: &Bass, path: impl AsRef<Path>, flags: DWORD) -> Result<Arc<Self>> {
        let api = bass.api();
        let midi = api::require_midi(&**api)?;
        let path = api::file_path(path.as_ref())?;
        let handle = api::check_handle(&**api, midi.font_init(&path, flags | path.flags()))?;
        debug!("Soundfont {} loaded as {:#x}", path.to_string_lossy(), handle);
        Ok(Arc::new(Self {
            api: api.clone(),
            handle,
        }))
    }

    pub fn handle(&self) -> HSOUNDFONT {
        self.handle
    }

    pub fn info(&self) -> Result<FontInfo> {
        let midi = api::require_midi(&*self.api)?;
        let mut raw = BassMidiFontInfo::default();
        api::check(&*self.api, midi.font_info(self.handle, &mut raw))?;
        let text = |ptr| unsafe { copy_cstr(ptr) }.unwrap_or_default();
        Ok(FontInfo {
            name: text(raw.name),
            copyright: text(raw.copyright),
            comment: text(raw.comment),
            presets: raw.presets,
            sample_size: raw.samsize,
            sample_loaded: raw.samload,
            sample_type: raw.samtype,
        })
    }
}

impl Drop for SoundFont {
    fn drop(&mut self) {
        if let Some(midi) = self.api.midi() {
            midi.font_free(self.handle);
        }
    }
}

impl std::fmt::Debug for SoundFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundFont")
            .field("handle", &format_args!("{:#x}", self.handle))
            .finish()
    }
}

/// A soundfont mapped onto a stream. `preset`/`bank` -1 map every preset.
#[derive(Debug, Clone)]
pub struct FontBinding {
    pub font: Arc<SoundFont>,
    pub preset: i32,
    pub bank: i32,
}

impl FontBinding {
    /// Use every preset of `font`.
    pub fn all(font: Arc<SoundFont>) -> Self {
        Self {
            font,
            preset: -1,
            bank: 0,
        }
    }
}

/// MIDI events (the `MIDI_EVENT_*` types)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    Note,
    Program,
    ChannelPressure,
    Pitch,
    PitchRange,
    Drums,
    FineTune,
    CoarseTune,
    MasterVolume,
    Bank,
    Modulation,
    Volume,
    Pan,
    Expression,
    Sustain,
    SoundOff,
    Reset,
    NotesOff,
    Tempo,
    Raw(DWORD),
}

impl MidiEvent {
    pub fn raw(self) -> DWORD {
        match self {
            MidiEvent::Note => MIDI_EVENT_NOTE,
            MidiEvent::Program => MIDI_EVENT_PROGRAM,
            MidiEvent::ChannelPressure => MIDI_EVENT_CHANPRES,
            MidiEvent::Pitch => MIDI_EVENT_PITCH,
            MidiEvent::PitchRange => MIDI_EVENT_PITCHRANGE,
            MidiEvent::Drums => MIDI_EVENT_DRUMS,
            MidiEvent::FineTune => MIDI_EVENT_FINETUNE,
            MidiEvent::CoarseTune => MIDI_EVENT_COARSETUNE,
            MidiEvent::MasterVolume => MIDI_EVENT_MASTERVOL,
            MidiEvent::Bank => MIDI_EVENT_BANK,
            MidiEvent::Modulation => MIDI_EVENT_MODULATION,
            MidiEvent::Volume => MIDI_EVENT_VOLUME,
            MidiEvent::Pan => MIDI_EVENT_PAN,
            MidiEvent::Expression => MIDI_EVENT_EXPRESSION,
            MidiEvent::Sustain => MIDI_EVENT_SUSTAIN,
            MidiEvent::SoundOff => MIDI_EVENT_SOUNDOFF,
            MidiEvent::Reset => MIDI_EVENT_RESET,
            MidiEvent::NotesOff => MIDI_EVENT_NOTESOFF,
            MidiEvent::Tempo => MIDI_EVENT_TEMPO,
            MidiEvent::Raw(event) => event,
        }
    }
}

/// A MIDI stream, either fed live through events or playing a file.
///
/// The soundfonts bound with [`MidiStream::set_fonts`] are kept alive as
/// long as the stream uses them.
pub struct MidiStream {
    channel: Channel,
    fonts: Mutex<Vec<FontBinding>>,
}

impl MidiStream {
    /// A live stream with `chans` MIDI channels. `freq` 0 = output rate.
    pub fn new(bass: &Bass, chans: u32, flags: DWORD, freq: u32) -> Result<Self> {
        let api = bass.api();
        let midi = api::require_midi(&**api)?;
        let handle = api::check_handle(&**api, midi.stream_create(chans, flags, freq))?;
        Self::adopt(bass, handle)
    }

    /// Play a MIDI file.
    pub fn open(bass: &Bass, path: impl AsRef<Path>, flags: DWORD, freq: u32) -> Result<Self> {
        let api = bass.api();
        let midi = api::require_midi(&**api)?;
        let path = api::file_path(path.as_ref())?;
        let handle = api::check_handle(&**api, midi.stream_create_file(&path, 0, 0, flags | path.flags(), freq))?;
        Self::adopt(bass, handle)
    }

    fn adopt(bass: &Bass, handle: HSTREAM) -> Result<Self> {
        Ok(Self {
            channel: stream::adopt(bass.api(), bass.delivery(), handle)?,
            fonts: Mutex::new(Vec::new()),
        })
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    fn midi(&self) -> Result<(&dyn MidiApi, HSTREAM)> {
        let handle = self.channel.live()?;
        Ok((api::require_midi(&**self.channel.api())?, handle))
    }

    /// Replace the stream's soundfonts. Earlier bindings win on overlap.
    pub fn set_fonts(&self, fonts: &[FontBinding]) -> Result<()> {
        let (midi, handle) = self.midi()?;
        let raw: Vec<BassMidiFont> = fonts
            .iter()
            .map(|b| BassMidiFont {
                font: b.font.handle(),
                preset: b.preset,
                bank: b.bank,
            })
            .collect();
        api::check(&**self.channel.api(), midi.stream_set_fonts(handle, &raw))?;
        // Old fonts are released only after native code stopped using them
        let previous = std::mem::replace(&mut *self.fonts.lock(), fonts.to_vec());
        drop(previous);
        Ok(())
    }

    pub fn fonts(&self) -> Vec<FontBinding> {
        self.fonts.lock().clone()
    }

    /// Send an event to MIDI channel `chan`.
    pub fn send_event(&self, chan: u32, event: MidiEvent, param: DWORD) -> Result<()> {
        let (midi, handle) = self.midi()?;
        api::check(&**self.channel.api(), midi.stream_event(handle, chan, event.raw(), param))
    }

    pub fn note_on(&self, chan: u32, key: u8, velocity: u8) -> Result<()> {
        self.send_event(chan, MidiEvent::Note, key as DWORD | (velocity as DWORD) << 8)
    }

    pub fn note_off(&self, chan: u32, key: u8) -> Result<()> {
        self.send_event(chan, MidiEvent::Note, key as DWORD)
    }

    /// Current value of an event on `chan`.
    pub fn event(&self, chan: u32, event: MidiEvent) -> Result<DWORD> {
        let (midi, handle) = self.midi()?;
        let value = midi.stream_get_event(handle, chan, event.raw());
        if value == DWORD::MAX {
            return Err(api::last_error(&**self.channel.api()));
        }
        Ok(value)
    }
}

impl std::fmt::Debug for MidiStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidiStream")
            .field("channel", &self.channel)
            .field("fonts", &self.fonts.lock().len())
            .finish()
    }
}
