//! Add-on traits implemented directly on their function tables.

use std::ffi::{c_char, c_void, CStr};
use std::ptr;

use crate::api::*;
use crate::ffi::cd::{BassCdInfo, CdFunctions};
use crate::ffi::dshow::DshowFunctions;
use crate::ffi::enc::{EncFunctions, EncodeNotifyProc, EncodeProc, HENCODE};
use crate::ffi::midi::{BassMidiFont, BassMidiFontInfo, MidiFunctions, HSOUNDFONT};
use crate::ffi::mix::MixFunctions;
use crate::ffi::wasapi::{BassWasapiDeviceInfo, WasapiFunctions, WasapiNotifyProc, WasapiProc};
use crate::ffi::wma::{WmaFunctions, HWMENCODE};
use crate::ffi::*;

fn opt_ptr(s: Option<&CStr>) -> *const c_char {
    s.map_or(ptr::null(), CStr::as_ptr)
}

// ============================================================================
// bassmix
// ============================================================================

impl MixerApi for MixFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    fn stream_create(&self, freq: DWORD, chans: DWORD, flags: DWORD) -> HSTREAM {
        unsafe { (self.stream_create)(freq, chans, flags) }
    }

    fn add_channel(&self, mixer: HSTREAM, channel: DWORD, flags: DWORD) -> bool {
        unsafe { to_bool((self.stream_add_channel)(mixer, channel, flags)) }
    }

    fn add_channel_ex(&self, mixer: HSTREAM, channel: DWORD, flags: DWORD, start: QWORD, length: QWORD) -> bool {
        unsafe { to_bool((self.stream_add_channel_ex)(mixer, channel, flags, start, length)) }
    }

    fn remove_channel(&self, channel: DWORD) -> bool {
        unsafe { to_bool((self.channel_remove)(channel)) }
    }

    fn channel_mixer(&self, channel: DWORD) -> HSTREAM {
        unsafe { (self.channel_get_mixer)(channel) }
    }

    fn channel_flags(&self, channel: DWORD, flags: DWORD, mask: DWORD) -> DWORD {
        unsafe { (self.channel_flags)(channel, flags, mask) }
    }

    fn channel_position(&self, channel: DWORD, mode: DWORD) -> QWORD {
        unsafe { (self.channel_get_position)(channel, mode) }
    }

    fn channel_set_position(&self, channel: DWORD, pos: QWORD, mode: DWORD) -> bool {
        unsafe { to_bool((self.channel_set_position)(channel, pos, mode)) }
    }

    fn channel_level(&self, channel: DWORD) -> DWORD {
        unsafe { (self.channel_get_level)(channel) }
    }

    unsafe fn channel_set_sync(
        &self,
        channel: DWORD,
        sync_type: DWORD,
        param: QWORD,
        proc: Option<SyncProc>,
        user: *mut c_void,
    ) -> HSYNC {
        (self.channel_set_sync)(channel, sync_type, param, proc, user)
    }

    fn channel_remove_sync(&self, channel: DWORD, sync: HSYNC) -> bool {
        unsafe { to_bool((self.channel_remove_sync)(channel, sync)) }
    }
}

// ============================================================================
// bassenc
// ============================================================================

impl EncodeApi for EncFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    unsafe fn start(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        flags: DWORD,
        proc: Option<EncodeProc>,
        user: *mut c_void,
    ) -> HENCODE {
        (self.start)(channel, opt_ptr(cmdline), flags, proc, user)
    }

    unsafe fn start_limit(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        flags: DWORD,
        proc: Option<EncodeProc>,
        user: *mut c_void,
        limit: DWORD,
    ) -> HENCODE {
        (self.start_limit)(channel, opt_ptr(cmdline), flags, proc, user, limit)
    }

    fn stop(&self, handle: DWORD) -> bool {
        unsafe { to_bool((self.stop)(handle)) }
    }

    fn stop_ex(&self, handle: DWORD, queue: bool) -> bool {
        unsafe { to_bool((self.stop_ex)(handle, from_bool(queue))) }
    }

    fn set_paused(&self, handle: DWORD, paused: bool) -> bool {
        unsafe { to_bool((self.set_paused)(handle, from_bool(paused))) }
    }

    fn is_active(&self, handle: DWORD) -> DWORD {
        unsafe { (self.is_active)(handle) }
    }

    fn write(&self, handle: DWORD, data: &[u8]) -> bool {
        unsafe { to_bool((self.write)(handle, data.as_ptr() as *const c_void, data.len() as DWORD)) }
    }

    unsafe fn set_notify(&self, handle: DWORD, proc: Option<EncodeNotifyProc>, user: *mut c_void) -> bool {
        to_bool((self.set_notify)(handle, proc, user))
    }

    fn count(&self, handle: DWORD, count: DWORD) -> QWORD {
        unsafe { (self.get_count)(handle, count) }
    }

    fn set_channel(&self, handle: DWORD, channel: DWORD) -> bool {
        unsafe { to_bool((self.set_channel)(handle, channel)) }
    }

    fn channel(&self, handle: HENCODE) -> DWORD {
        unsafe { (self.get_channel)(handle) }
    }

    fn cast_init(&self, handle: HENCODE, request: &CastRequest<'_>) -> bool {
        unsafe {
            to_bool((self.cast_init)(
                handle,
                request.server.as_ptr(),
                request.password.as_ptr(),
                request.content.as_ptr(),
                opt_ptr(request.name),
                opt_ptr(request.url),
                opt_ptr(request.genre),
                opt_ptr(request.description),
                opt_ptr(request.headers),
                request.bitrate,
                from_bool(request.public) as DWORD,
            ))
        }
    }

    fn cast_set_title(&self, handle: HENCODE, title: &CStr, url: Option<&CStr>) -> bool {
        unsafe { to_bool((self.cast_set_title)(handle, title.as_ptr(), opt_ptr(url))) }
    }

    fn cast_stats(&self, handle: HENCODE, stats_type: DWORD, password: Option<&CStr>) -> Option<String> {
        unsafe { copy_cstr((self.cast_get_stats)(handle, stats_type, opt_ptr(password))) }
    }
}

// ============================================================================
// bassmidi
// ============================================================================

impl MidiApi for MidiFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    fn stream_create(&self, chans: DWORD, flags: DWORD, freq: DWORD) -> HSTREAM {
        unsafe { (self.stream_create)(chans, flags, freq) }
    }

    fn stream_create_file(&self, path: &FilePath, offset: QWORD, length: QWORD, flags: DWORD, freq: DWORD) -> HSTREAM {
        unsafe { (self.stream_create_file)(FALSE, path.as_ptr(), offset, length, flags | path.flags(), freq) }
    }

    fn stream_event(&self, handle: HSTREAM, chan: DWORD, event: DWORD, param: DWORD) -> bool {
        unsafe { to_bool((self.stream_event)(handle, chan, event, param)) }
    }

    fn stream_get_event(&self, handle: HSTREAM, chan: DWORD, event: DWORD) -> DWORD {
        unsafe { (self.stream_get_event)(handle, chan, event) }
    }

    fn stream_set_fonts(&self, handle: HSTREAM, fonts: &[BassMidiFont]) -> bool {
        unsafe {
            to_bool((self.stream_set_fonts)(
                handle,
                fonts.as_ptr() as *const c_void,
                fonts.len() as DWORD,
            ))
        }
    }

    fn font_init(&self, path: &FilePath, flags: DWORD) -> HSOUNDFONT {
        unsafe { (self.font_init)(path.as_ptr(), flags | path.flags()) }
    }

    fn font_free(&self, font: HSOUNDFONT) -> bool {
        unsafe { to_bool((self.font_free)(font)) }
    }

    fn font_info(&self, font: HSOUNDFONT, info: &mut BassMidiFontInfo) -> bool {
        unsafe { to_bool((self.font_get_info)(font, info)) }
    }
}

// ============================================================================
// basswasapi
// ============================================================================

impl WasapiApi for WasapiFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    fn device_info(&self, device: DWORD, info: &mut BassWasapiDeviceInfo) -> bool {
        unsafe { to_bool((self.get_device_info)(device, info)) }
    }

    unsafe fn init(
        &self,
        device: i32,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        buffer: f32,
        period: f32,
        proc: Option<WasapiProc>,
        user: *mut c_void,
    ) -> bool {
        to_bool((self.init)(device, freq, chans, flags, buffer, period, proc, user))
    }

    fn free(&self) -> bool {
        unsafe { to_bool((self.free)()) }
    }

    fn set_device(&self, device: DWORD) -> bool {
        unsafe { to_bool((self.set_device)(device)) }
    }

    fn current_device(&self) -> DWORD {
        unsafe { (self.get_device)() }
    }

    fn start(&self) -> bool {
        unsafe { to_bool((self.start)()) }
    }

    fn stop(&self, reset: bool) -> bool {
        unsafe { to_bool((self.stop)(from_bool(reset))) }
    }

    fn is_started(&self) -> bool {
        unsafe { to_bool((self.is_started)()) }
    }

    fn volume(&self, curve: DWORD) -> f32 {
        unsafe { (self.get_volume)(curve) }
    }

    fn set_volume(&self, curve: DWORD, volume: f32) -> bool {
        unsafe { to_bool((self.set_volume)(curve, volume)) }
    }

    fn mute(&self, mode: DWORD) -> BOOL {
        unsafe { (self.get_mute)(mode) }
    }

    fn set_mute(&self, mode: DWORD, mute: bool) -> bool {
        unsafe { to_bool((self.set_mute)(mode, from_bool(mute))) }
    }

    fn level(&self) -> DWORD {
        unsafe { (self.get_level)() }
    }

    unsafe fn set_notify(&self, proc: Option<WasapiNotifyProc>, user: *mut c_void) -> bool {
        to_bool((self.set_notify)(proc, user))
    }
}

// ============================================================================
// basswma
// ============================================================================

impl WmaApi for WmaFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    fn stream_create_file(&self, path: &FilePath, offset: QWORD, length: QWORD, flags: DWORD) -> HSTREAM {
        unsafe { (self.stream_create_file)(FALSE, path.as_ptr(), offset, length, flags | path.flags()) }
    }

    fn encode_open_file(&self, freq: DWORD, chans: DWORD, flags: DWORD, bitrate: DWORD, path: &FilePath) -> HWMENCODE {
        unsafe { (self.encode_open_file)(freq, chans, flags | path.flags(), bitrate, path.as_ptr()) }
    }

    fn encode_write(&self, handle: HWMENCODE, data: &[u8]) -> bool {
        unsafe { to_bool((self.encode_write)(handle, data.as_ptr() as *const c_void, data.len() as DWORD)) }
    }

    fn encode_close(&self, handle: HWMENCODE) -> bool {
        unsafe { to_bool((self.encode_close)(handle)) }
    }

    fn encode_set_tag(&self, handle: HWMENCODE, tag: &CStr, value: &CStr, form: DWORD) -> bool {
        unsafe { to_bool((self.encode_set_tag)(handle, tag.as_ptr(), value.as_ptr(), form)) }
    }

    fn encode_rates(&self, freq: DWORD, chans: DWORD, flags: DWORD) -> Option<Vec<DWORD>> {
        unsafe {
            let mut cursor = (self.encode_get_rates)(freq, chans, flags);
            if cursor.is_null() {
                return None;
            }
            // 0-terminated array owned by basswma
            let mut rates = Vec::new();
            while *cursor != 0 {
                rates.push(*cursor);
                cursor = cursor.add(1);
            }
            Some(rates)
        }
    }
}

// ============================================================================
// basscd
// ============================================================================

impl CdApi for CdFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    fn info(&self, drive: DWORD, info: &mut BassCdInfo) -> bool {
        unsafe { to_bool((self.get_info)(drive, info)) }
    }

    fn is_ready(&self, drive: DWORD) -> bool {
        unsafe { to_bool((self.is_ready)(drive)) }
    }

    fn door(&self, drive: DWORD, action: DWORD) -> bool {
        unsafe { to_bool((self.door)(drive, action)) }
    }

    fn door_is_open(&self, drive: DWORD) -> bool {
        unsafe { to_bool((self.door_is_open)(drive)) }
    }

    fn door_is_locked(&self, drive: DWORD) -> bool {
        unsafe { to_bool((self.door_is_locked)(drive)) }
    }

    fn tracks(&self, drive: DWORD) -> DWORD {
        unsafe { (self.get_tracks)(drive) }
    }

    fn track_length(&self, drive: DWORD, track: DWORD) -> DWORD {
        unsafe { (self.get_track_length)(drive, track) }
    }

    fn id(&self, drive: DWORD, id: DWORD) -> *const c_char {
        unsafe { (self.get_id)(drive, id) }
    }

    fn stream_create(&self, drive: DWORD, track: DWORD, flags: DWORD) -> HSTREAM {
        unsafe { (self.stream_create)(drive, track, flags) }
    }

    fn release(&self, drive: DWORD) -> bool {
        unsafe { to_bool((self.release)(drive)) }
    }
}

// ============================================================================
// xVideo
// ============================================================================

impl DshowApi for DshowFunctions {
    fn version(&self) -> DWORD {
        unsafe { (self.get_version)() }
    }

    fn error_code(&self) -> i32 {
        unsafe { (self.error_get_code)() }
    }

    fn init(&self, flags: DWORD) -> bool {
        unsafe { to_bool((self.init)(ptr::null_mut(), flags)) }
    }

    fn free(&self) -> bool {
        unsafe { to_bool((self.free)()) }
    }

    fn stream_create_file(&self, path: &FilePath, pos: DWORD, flags: DWORD) -> HSTREAM {
        unsafe { (self.stream_create_file)(path.as_ptr(), pos, ptr::null_mut(), flags | path.flags()) }
    }
}
