//! Mixer streams (bassmix).
//!
//! Sources must be decoding channels (`BASS_STREAM_DECODE`); the mixer
//! pulls their data. Per-source calls go through the mixer add-on, which
//! also owns syncs on sources.

use std::sync::Arc;

use log::debug;

use crate::api::{self, BassApi, MixerApi};
use crate::channel::Channel;
use crate::error::Result;
use crate::ffi::*;
use crate::stream;
use crate::sync::{SyncGuard, SyncType};
use crate::Bass;

/// A mixer stream and the sources plugged into it.
pub struct Mixer {
    channel: Channel,
}

impl Mixer {
    /// Create a mixer (BASS_Mixer_StreamCreate). `flags` takes the
    /// `BASS_MIXER_*` and stream flags.
    pub fn new(bass: &Bass, freq: u32, chans: u32, flags: DWORD) -> Result<Self> {
        let api = bass.api();
        let mixer = api::require_mixer(&**api)?;
        let handle = api::check_handle(&**api, mixer.stream_create(freq, chans, flags))?;
        debug!("Mixer {:#x} created ({} Hz, {} ch)", handle, freq, chans);
        Ok(Self {
            channel: stream::adopt(api, bass.delivery(), handle)?,
        })
    }

    /// The mixer's own output channel.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    fn parts(&self) -> Result<(&Arc<dyn BassApi>, &dyn MixerApi, HSTREAM)> {
        let api = self.channel.api();
        let handle = self.channel.live()?;
        Ok((api, api::require_mixer(&**api)?, handle))
    }

    /// Plug `source` in with `BASS_MIXER_CHAN_*` flags.
    pub fn add(&self, source: &Channel, flags: DWORD) -> Result<()> {
        let (api, mixer, handle) = self.parts()?;
        let source = source.live()?;
        api::check(&**api, mixer.add_channel(handle, source, flags))
    }

    /// Plug `source` in, starting `start` bytes into the mix and playing at
    /// most `length` bytes (0 = all).
    pub fn add_range(&self, source: &Channel, flags: DWORD, start: u64, length: u64) -> Result<()> {
        let (api, mixer, handle) = self.parts()?;
        let source = source.live()?;
        api::check(&**api, mixer.add_channel_ex(handle, source, flags, start, length))
    }

    pub fn remove(&self, source: &Channel) -> Result<()> {
        let (api, mixer, _) = self.parts()?;
        api::check(&**api, mixer.remove_channel(source.live()?))
    }

    /// Whether `source` is currently plugged into this mixer.
    pub fn contains(&self, source: &Channel) -> Result<bool> {
        let (_, mixer, handle) = self.parts()?;
        Ok(mixer.channel_mixer(source.live()?) == handle)
    }

    /// Set the source's mixer flags under `mask`; returns the new flags.
    pub fn set_source_flags(&self, source: &Channel, flags: DWORD, mask: DWORD) -> Result<DWORD> {
        let (api, mixer, _) = self.parts()?;
        let value = mixer.channel_flags(source.live()?, flags, mask);
        if value == DWORD::MAX {
            return Err(api::last_error(&**api));
        }
        Ok(value)
    }

    pub fn source_flags(&self, source: &Channel) -> Result<DWORD> {
        self.set_source_flags(source, 0, 0)
    }

    /// Source position in bytes, accounting for what the mixer buffered.
    pub fn source_position(&self, source: &Channel) -> Result<u64> {
        let (api, mixer, _) = self.parts()?;
        let pos = mixer.channel_position(source.live()?, BASS_POS_BYTE);
        if pos == QWORD::MAX {
            return Err(api::last_error(&**api));
        }
        Ok(pos)
    }

    pub fn set_source_position(&self, source: &Channel, bytes: u64) -> Result<()> {
        let (api, mixer, _) = self.parts()?;
        api::check(&**api, mixer.channel_set_position(source.live()?, bytes, BASS_POS_BYTE))
    }

    /// Source peak levels (left, right) as heard in the mix.
    pub fn source_level(&self, source: &Channel) -> Result<(u16, u16)> {
        let (api, mixer, _) = self.parts()?;
        let level = mixer.channel_level(source.live()?);
        if level == DWORD::MAX {
            return Err(api::last_error(&**api));
        }
        Ok(((level & 0xffff) as u16, (level >> 16) as u16))
    }

    /// Sync on a source, timed against the mixer's output.
    pub fn source_sync<F>(&self, source: &Channel, sync_type: SyncType, flags: DWORD, f: F) -> Result<SyncGuard>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        self.parts()?;
        SyncGuard::register_mixer(self.channel.api(), source.live()?, sync_type, flags, f)
    }
}

impl std::fmt::Debug for Mixer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mixer").field("channel", &self.channel).finish()
    }
}
