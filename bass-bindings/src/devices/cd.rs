//! CD drives (basscd).

use std::sync::Arc;

use log::debug;

use super::{probed, DeviceContext, RegistryDevice};
use crate::api::{self, BassApi, CdApi};
use crate::channel::Channel;
use crate::error::{DeviceKind, Result};
use crate::events::Delivery;
use crate::ffi::cd::*;
use crate::ffi::*;
use crate::stream;
use crate::tags;

/// Owned copy of BASS_CD_INFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdInfo {
    pub vendor: String,
    pub product: String,
    pub revision: String,
    /// Drive letter, `None` where drives have no letters
    pub letter: Option<char>,
    pub rw_flags: DWORD,
    pub can_open: bool,
    pub can_lock: bool,
    /// Maximum read speed in KB/s
    pub max_speed: DWORD,
    /// Cache size in KB
    pub cache: DWORD,
    pub cd_text: bool,
}

/// Door actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdDoor {
    Open,
    Close,
    Lock,
    Unlock,
}

impl CdDoor {
    fn raw(self) -> DWORD {
        match self {
            CdDoor::Open => BASS_CD_DOOR_OPEN,
            CdDoor::Close => BASS_CD_DOOR_CLOSE,
            CdDoor::Lock => BASS_CD_DOOR_LOCK,
            CdDoor::Unlock => BASS_CD_DOOR_UNLOCK,
        }
    }
}

/// Disc identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdId {
    Upc,
    Cddb,
    /// CDDB2 query string
    Cddb2,
    CdPlayer,
    MusicBrainz,
    /// ISRC of a track
    Isrc(u32),
}

impl CdId {
    fn raw(self) -> DWORD {
        match self {
            CdId::Upc => BASS_CDID_UPC,
            CdId::Cddb => BASS_CDID_CDDB,
            CdId::Cddb2 => BASS_CDID_CDDB2,
            CdId::CdPlayer => BASS_CDID_CDPLAYER,
            CdId::MusicBrainz => BASS_CDID_MUSICBRAINZ,
            CdId::Isrc(track) => BASS_CDID_ISRC + track,
        }
    }
}

/// One CD drive.
pub struct CdDrive {
    api: Arc<dyn BassApi>,
    delivery: Delivery,
    index: u32,
}

impl RegistryDevice for CdDrive {
    const KIND: DeviceKind = DeviceKind::Cd;

    fn probe(ctx: &DeviceContext, index: u32) -> Result<Option<Self>> {
        let cd = api::require_cd(&*ctx.api)?;
        let mut raw = BassCdInfo::default();
        if !probed(&*ctx.api, cd.info(index, &mut raw))? {
            return Ok(None);
        }
        Ok(Some(Self {
            api: ctx.api.clone(),
            delivery: ctx.delivery.clone(),
            index,
        }))
    }
}

impl CdDrive {
    fn cd(&self) -> Result<&dyn CdApi> {
        api::require_cd(&*self.api)
    }

    /// Native failure value `DWORD::MAX` to an error.
    fn dword(&self, value: DWORD) -> Result<DWORD> {
        if value == DWORD::MAX {
            Err(api::last_error(&*self.api))
        } else {
            Ok(value)
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn info(&self) -> Result<CdInfo> {
        let mut raw = BassCdInfo::default();
        api::check(&*self.api, self.cd()?.info(self.index, &mut raw))?;
        let text = |ptr| unsafe { copy_cstr(ptr) }.unwrap_or_default();
        Ok(CdInfo {
            vendor: text(raw.vendor),
            product: text(raw.product),
            revision: text(raw.rev),
            letter: u8::try_from(raw.letter).ok().map(|l| char::from(b'A' + l)),
            rw_flags: raw.rwflags,
            can_open: to_bool(raw.canopen),
            can_lock: to_bool(raw.canlock),
            max_speed: raw.maxspeed,
            cache: raw.cache,
            cd_text: to_bool(raw.cdtext),
        })
    }

    /// A readable disc is in the drive.
    pub fn is_ready(&self) -> Result<bool> {
        Ok(self.cd()?.is_ready(self.index))
    }

    pub fn door(&self, action: CdDoor) -> Result<()> {
        api::check(&*self.api, self.cd()?.door(self.index, action.raw()))?;
        debug!("CD drive {} door: {:?}", self.index, action);
        Ok(())
    }

    pub fn is_door_open(&self) -> Result<bool> {
        Ok(self.cd()?.door_is_open(self.index))
    }

    pub fn is_door_locked(&self) -> Result<bool> {
        Ok(self.cd()?.door_is_locked(self.index))
    }

    pub fn tracks(&self) -> Result<u32> {
        self.dword(self.cd()?.tracks(self.index))
    }

    /// Track length in bytes.
    pub fn track_length(&self, track: u32) -> Result<u32> {
        self.dword(self.cd()?.track_length(self.index, track))
    }

    /// A disc identifier as text.
    pub fn id(&self, id: CdId) -> Result<String> {
        let ptr = self.cd()?.id(self.index, id.raw());
        match unsafe { copy_cstr(ptr) } {
            Some(value) => Ok(value),
            None => Err(api::last_error(&*self.api)),
        }
    }

    /// CD-TEXT entries ("TITLE0=...", "PERFORMER1=...").
    pub fn cd_text(&self) -> Result<Vec<String>> {
        let ptr = self.cd()?.id(self.index, BASS_CDID_TEXT);
        if ptr.is_null() {
            return Err(api::last_error(&*self.api));
        }
        Ok(unsafe { tags::read_string_list(ptr) })
    }

    /// Open a stream reading `track`.
    pub fn stream(&self, track: u32, flags: DWORD) -> Result<Channel> {
        let handle = api::check_handle(&*self.api, self.cd()?.stream_create(self.index, track, flags))?;
        stream::adopt(&self.api, &self.delivery, handle)
    }

    /// Let other applications use the drive.
    pub fn release(&self) -> Result<()> {
        api::check(&*self.api, self.cd()?.release(self.index))
    }
}

impl std::fmt::Debug for CdDrive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdDrive").field("index", &self.index).finish()
    }
}
