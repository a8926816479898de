//! `BassApi` over the core function table.

use std::ffi::{c_char, c_void, CStr};
use std::ptr;

use super::NativeApi;
use crate::api::*;
use crate::ffi::*;

impl BassApi for NativeApi {
    fn version(&self) -> DWORD {
        unsafe { (self.core.get_version)() }
    }

    fn error_code(&self) -> i32 {
        unsafe { (self.core.error_get_code)() }
    }

    fn init(&self, device: i32, freq: DWORD, flags: DWORD) -> bool {
        unsafe { to_bool((self.core.init)(device, freq, flags, ptr::null_mut(), ptr::null())) }
    }

    fn free(&self) -> bool {
        unsafe { to_bool((self.core.free)()) }
    }

    fn device_info(&self, device: DWORD, info: &mut BassDeviceInfo) -> bool {
        unsafe { to_bool((self.core.get_device_info)(device, info)) }
    }

    fn set_device(&self, device: DWORD) -> bool {
        unsafe { to_bool((self.core.set_device)(device)) }
    }

    fn current_device(&self) -> DWORD {
        unsafe { (self.core.get_device)() }
    }

    fn info(&self, info: &mut BassInfo) -> bool {
        unsafe { to_bool((self.core.get_info)(info)) }
    }

    fn set_config(&self, option: DWORD, value: DWORD) -> bool {
        unsafe { to_bool((self.core.set_config)(option, value)) }
    }

    fn config(&self, option: DWORD) -> DWORD {
        unsafe { (self.core.get_config)(option) }
    }

    fn set_volume(&self, volume: f32) -> bool {
        unsafe { to_bool((self.core.set_volume)(volume)) }
    }

    fn volume(&self) -> f32 {
        unsafe { (self.core.get_volume)() }
    }

    fn start(&self) -> bool {
        unsafe { to_bool((self.core.start)()) }
    }

    fn stop(&self) -> bool {
        unsafe { to_bool((self.core.stop)()) }
    }

    fn pause(&self) -> bool {
        unsafe { to_bool((self.core.pause)()) }
    }

    fn plugin_load(&self, path: &FilePath) -> HPLUGIN {
        unsafe { (self.core.plugin_load)(path.as_ptr(), path.flags()) }
    }

    fn plugin_free(&self, plugin: HPLUGIN) -> bool {
        unsafe { to_bool((self.core.plugin_free)(plugin)) }
    }

    unsafe fn stream_create(
        &self,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        proc: Option<StreamProc>,
        user: *mut c_void,
    ) -> HSTREAM {
        (self.core.stream_create)(freq, chans, flags, proc, user)
    }

    fn stream_create_file(&self, path: &FilePath, offset: QWORD, length: QWORD, flags: DWORD) -> HSTREAM {
        unsafe { (self.core.stream_create_file)(FALSE, path.as_ptr(), offset, length, flags | path.flags()) }
    }

    fn stream_create_url(&self, url: &CStr, offset: DWORD, flags: DWORD) -> HSTREAM {
        // URLs go through as UTF-8; BASS_UNICODE is not set.
        unsafe { (self.core.stream_create_url)(url.as_ptr(), offset, flags, None, ptr::null_mut()) }
    }

    fn stream_free(&self, handle: HSTREAM) -> bool {
        unsafe { to_bool((self.core.stream_free)(handle)) }
    }

    fn sample_load(&self, path: &FilePath, offset: QWORD, length: DWORD, max: DWORD, flags: DWORD) -> HSAMPLE {
        unsafe { (self.core.sample_load)(FALSE, path.as_ptr(), offset, length, max, flags | path.flags()) }
    }

    fn sample_get_channel(&self, sample: HSAMPLE, flags: DWORD) -> HCHANNEL {
        unsafe { (self.core.sample_get_channel)(sample, flags) }
    }

    fn sample_free(&self, sample: HSAMPLE) -> bool {
        unsafe { to_bool((self.core.sample_free)(sample)) }
    }

    fn music_load(&self, path: &FilePath, offset: QWORD, length: DWORD, flags: DWORD, freq: DWORD) -> HMUSIC {
        unsafe { (self.core.music_load)(FALSE, path.as_ptr(), offset, length, flags | path.flags(), freq) }
    }

    fn music_free(&self, handle: HMUSIC) -> bool {
        unsafe { to_bool((self.core.music_free)(handle)) }
    }

    fn record_init(&self, device: i32) -> bool {
        unsafe { to_bool((self.core.record_init)(device)) }
    }

    fn record_free(&self) -> bool {
        unsafe { to_bool((self.core.record_free)()) }
    }

    fn record_device_info(&self, device: DWORD, info: &mut BassDeviceInfo) -> bool {
        unsafe { to_bool((self.core.record_get_device_info)(device, info)) }
    }

    fn record_set_device(&self, device: DWORD) -> bool {
        unsafe { to_bool((self.core.record_set_device)(device)) }
    }

    fn record_current_device(&self) -> DWORD {
        unsafe { (self.core.record_get_device)() }
    }

    fn record_info(&self, info: &mut BassRecordInfo) -> bool {
        unsafe { to_bool((self.core.record_get_info)(info)) }
    }

    fn record_input(&self, input: i32, volume: &mut f32) -> DWORD {
        unsafe { (self.core.record_get_input)(input, volume) }
    }

    fn record_set_input(&self, input: i32, flags: DWORD, volume: f32) -> bool {
        unsafe { to_bool((self.core.record_set_input)(input, flags, volume)) }
    }

    fn record_input_name(&self, input: i32) -> Option<String> {
        unsafe { copy_cstr((self.core.record_get_input_name)(input)) }
    }

    unsafe fn record_start(
        &self,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        proc: Option<RecordProc>,
        user: *mut c_void,
    ) -> HRECORD {
        (self.core.record_start)(freq, chans, flags, proc, user)
    }

    fn channel_info(&self, handle: DWORD, info: &mut BassChannelInfo) -> bool {
        unsafe { to_bool((self.core.channel_get_info)(handle, info)) }
    }

    fn channel_play(&self, handle: DWORD, restart: bool) -> bool {
        unsafe { to_bool((self.core.channel_play)(handle, from_bool(restart))) }
    }

    fn channel_stop(&self, handle: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_stop)(handle)) }
    }

    fn channel_pause(&self, handle: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_pause)(handle)) }
    }

    fn channel_is_active(&self, handle: DWORD) -> DWORD {
        unsafe { (self.core.channel_is_active)(handle) }
    }

    fn channel_free(&self, handle: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_free)(handle)) }
    }

    fn channel_length(&self, handle: DWORD, mode: DWORD) -> QWORD {
        unsafe { (self.core.channel_get_length)(handle, mode) }
    }

    fn channel_position(&self, handle: DWORD, mode: DWORD) -> QWORD {
        unsafe { (self.core.channel_get_position)(handle, mode) }
    }

    fn channel_set_position(&self, handle: DWORD, pos: QWORD, mode: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_set_position)(handle, pos, mode)) }
    }

    fn channel_bytes_to_seconds(&self, handle: DWORD, bytes: QWORD) -> f64 {
        unsafe { (self.core.channel_bytes2seconds)(handle, bytes) }
    }

    fn channel_seconds_to_bytes(&self, handle: DWORD, seconds: f64) -> QWORD {
        unsafe { (self.core.channel_seconds2bytes)(handle, seconds) }
    }

    fn channel_attribute(&self, handle: DWORD, attrib: DWORD, value: &mut f32) -> bool {
        unsafe { to_bool((self.core.channel_get_attribute)(handle, attrib, value)) }
    }

    fn channel_set_attribute(&self, handle: DWORD, attrib: DWORD, value: f32) -> bool {
        unsafe { to_bool((self.core.channel_set_attribute)(handle, attrib, value)) }
    }

    fn channel_slide_attribute(&self, handle: DWORD, attrib: DWORD, value: f32, time_ms: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_slide_attribute)(handle, attrib, value, time_ms)) }
    }

    fn channel_is_sliding(&self, handle: DWORD, attrib: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_is_sliding)(handle, attrib)) }
    }

    fn channel_flags(&self, handle: DWORD, flags: DWORD, mask: DWORD) -> DWORD {
        unsafe { (self.core.channel_flags)(handle, flags, mask) }
    }

    fn channel_level(&self, handle: DWORD) -> DWORD {
        unsafe { (self.core.channel_get_level)(handle) }
    }

    fn channel_tags(&self, handle: DWORD, tag: DWORD) -> *const c_char {
        unsafe { (self.core.channel_get_tags)(handle, tag) }
    }

    fn channel_device(&self, handle: DWORD) -> DWORD {
        unsafe { (self.core.channel_get_device)(handle) }
    }

    fn channel_set_device(&self, handle: DWORD, device: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_set_device)(handle, device)) }
    }

    unsafe fn channel_get_data(&self, handle: DWORD, buffer: *mut c_void, length: DWORD) -> DWORD {
        (self.core.channel_get_data)(handle, buffer, length)
    }

    unsafe fn channel_set_sync(
        &self,
        handle: DWORD,
        sync_type: DWORD,
        param: QWORD,
        proc: Option<SyncProc>,
        user: *mut c_void,
    ) -> HSYNC {
        (self.core.channel_set_sync)(handle, sync_type, param, proc, user)
    }

    fn channel_remove_sync(&self, handle: DWORD, sync: HSYNC) -> bool {
        unsafe { to_bool((self.core.channel_remove_sync)(handle, sync)) }
    }

    unsafe fn channel_set_dsp(
        &self,
        handle: DWORD,
        proc: Option<DspProc>,
        user: *mut c_void,
        priority: i32,
    ) -> HDSP {
        (self.core.channel_set_dsp)(handle, proc, user, priority)
    }

    fn channel_remove_dsp(&self, handle: DWORD, dsp: HDSP) -> bool {
        unsafe { to_bool((self.core.channel_remove_dsp)(handle, dsp)) }
    }

    fn channel_set_fx(&self, handle: DWORD, fx_type: DWORD, priority: i32) -> HFX {
        unsafe { (self.core.channel_set_fx)(handle, fx_type, priority) }
    }

    fn channel_remove_fx(&self, handle: DWORD, fx: HFX) -> bool {
        unsafe { to_bool((self.core.channel_remove_fx)(handle, fx)) }
    }

    fn channel_set_link(&self, handle: DWORD, other: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_set_link)(handle, other)) }
    }

    fn channel_remove_link(&self, handle: DWORD, other: DWORD) -> bool {
        unsafe { to_bool((self.core.channel_remove_link)(handle, other)) }
    }

    fn fx_set_parameters(&self, fx: HFX, params: &[u8]) -> bool {
        unsafe { to_bool((self.core.fx_set_parameters)(fx, params.as_ptr() as *const c_void)) }
    }

    fn fx_get_parameters(&self, fx: HFX, params: &mut [u8]) -> bool {
        unsafe { to_bool((self.core.fx_get_parameters)(fx, params.as_mut_ptr() as *mut c_void)) }
    }

    fn fx_reset(&self, fx: HFX) -> bool {
        unsafe { to_bool((self.core.fx_reset)(fx)) }
    }

    fn mixer(&self) -> Option<&dyn MixerApi> {
        self.mix.as_ref().map(|t| t as &dyn MixerApi)
    }

    fn encoder(&self) -> Option<&dyn EncodeApi> {
        self.enc.as_ref().map(|t| t as &dyn EncodeApi)
    }

    fn midi(&self) -> Option<&dyn MidiApi> {
        self.midi.as_ref().map(|t| t as &dyn MidiApi)
    }

    fn wasapi(&self) -> Option<&dyn WasapiApi> {
        self.wasapi.as_ref().map(|t| t as &dyn WasapiApi)
    }

    fn wma(&self) -> Option<&dyn WmaApi> {
        self.wma.as_ref().map(|t| t as &dyn WmaApi)
    }

    fn cd(&self) -> Option<&dyn CdApi> {
        self.cd.as_ref().map(|t| t as &dyn CdApi)
    }

    fn dshow(&self) -> Option<&dyn DshowApi> {
        self.dshow.as_ref().map(|t| t as &dyn DshowApi)
    }
}
