//! Video file audio through DirectShow (xVideo).
//!
//! The add-on keeps its own error state, so failures here are read from
//! it rather than from the core library.

use std::path::Path;

use log::debug;

use crate::api::{self, DshowApi};
use crate::channel::Channel;
use crate::error::{BassError, ErrorCode, Result};
use crate::ffi::*;
use crate::stream;
use crate::Bass;

fn dshow_error(dshow: &dyn DshowApi) -> BassError {
    BassError::Native(ErrorCode::from_raw(dshow.error_code()))
}

/// Initialize the add-on (`XVIDEO_INIT_*` flags).
pub fn init(bass: &Bass, flags: DWORD) -> Result<()> {
    let dshow = api::require_dshow(&**bass.api())?;
    if !dshow.init(flags) {
        return Err(dshow_error(dshow));
    }
    debug!("xVideo {:#x} initialized", dshow.version());
    Ok(())
}

pub fn free(bass: &Bass) -> Result<()> {
    let dshow = api::require_dshow(&**bass.api())?;
    if !dshow.free() {
        return Err(dshow_error(dshow));
    }
    Ok(())
}

/// Open the audio of a video file as a stream. Needs [`init`] first.
pub fn create_stream(bass: &Bass, path: impl AsRef<Path>, flags: DWORD) -> Result<Channel> {
    let api = bass.api();
    let dshow = api::require_dshow(&**api)?;
    let path = api::file_path(path.as_ref())?;
    let handle = dshow.stream_create_file(&path, 0, flags | path.flags());
    if handle == 0 {
        return Err(dshow_error(dshow));
    }
    stream::adopt(api, bass.delivery(), handle)
}
