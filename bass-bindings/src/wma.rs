//! Windows Media Audio streams and file encoding (basswma).

use std::ffi::CString;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::api::{self, BassApi, WmaApi};
use crate::channel::Channel;
use crate::error::Result;
use crate::ffi::wma::*;
use crate::ffi::*;
use crate::stream;
use crate::Bass;

/// Open a WMA file for playback or decoding.
pub fn open_stream(bass: &Bass, path: impl AsRef<Path>, flags: DWORD) -> Result<Channel> {
    let api = bass.api();
    let wma = api::require_wma(&**api)?;
    let path = api::file_path(path.as_ref())?;
    let handle = api::check_handle(&**api, wma.stream_create_file(&path, 0, 0, flags | path.flags()))?;
    stream::adopt(api, bass.delivery(), handle)
}

/// Bitrates the encoder offers for a sample format.
pub fn supported_rates(bass: &Bass, freq: u32, chans: u32, flags: DWORD) -> Result<Vec<u32>> {
    let api = bass.api();
    let wma = api::require_wma(&**api)?;
    wma.encode_rates(freq, chans, flags).ok_or_else(|| api::last_error(&**api))
}

/// Encodes PCM written to it into a WMA file. The file is finished when
/// the encoder is closed or dropped.
pub struct WmaEncoder {
    api: Arc<dyn BassApi>,
    handle: HWMENCODE,
    open: bool,
}

impl WmaEncoder {
    /// Start a file. `bitrate` must be one of [`supported_rates`].
    pub fn create(
        bass: &Bass,
        path: impl AsRef<Path>,
        freq: u32,
        chans: u32,
        flags: DWORD,
        bitrate: u32,
    ) -> Result<Self> {
        let api = bass.api();
        let wma = api::require_wma(&**api)?;
        let path = api::file_path(path.as_ref())?;
        let handle = api::check_handle(
            &**api,
            wma.encode_open_file(freq, chans, flags | path.flags(), bitrate, &path),
        )?;
        debug!("WMA encoder {:#x} writing {} at {} bps", handle, path.to_string_lossy(), bitrate);
        Ok(Self {
            api: api.clone(),
            handle,
            open: true,
        })
    }

    pub fn handle(&self) -> HWMENCODE {
        self.handle
    }

    fn wma(&self) -> Result<&dyn WmaApi> {
        api::require_wma(&*self.api)
    }

    /// Encode a block of sample data in the format given at creation.
    pub fn write(&self, data: &[u8]) -> Result<()> {
        api::check(&*self.api, self.wma()?.encode_write(self.handle, data))
    }

    /// Set a header tag ("Title", "Author", ...). Tags go in before the
    /// first [`WmaEncoder::write`].
    pub fn set_tag(&self, tag: &str, value: &str) -> Result<()> {
        let tag = CString::new(tag)?;
        let value = CString::new(value)?;
        api::check(
            &*self.api,
            self.wma()?.encode_set_tag(self.handle, &tag, &value, BASS_WMA_TAG_UTF8),
        )
    }

    /// Finish the file.
    pub fn close(mut self) -> Result<()> {
        self.open = false;
        api::check(&*self.api, self.wma()?.encode_close(self.handle))
    }
}

impl Drop for WmaEncoder {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        if let Some(wma) = self.api.wma() {
            if !wma.encode_close(self.handle) {
                warn!("Closing WMA encoder {:#x} failed (error {})", self.handle, self.api.error_code());
            }
        }
    }
}

impl std::fmt::Debug for WmaEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WmaEncoder")
            .field("handle", &format_args!("{:#x}", self.handle))
            .field("open", &self.open)
            .finish()
    }
}
