//! In-memory stand-in for the native libraries, used by the unit tests.
//!
//! Handles, syncs, DSPs, devices and add-on state live in one locked
//! [`MockState`]. Callbacks are copied out and invoked after the lock is
//! released, the way native code calls back from its own threads.

use std::collections::{HashMap, HashSet};
use std::ffi::{c_char, c_void, CStr, CString};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::{BassApi, CastRequest, CdApi, DshowApi, EncodeApi, MidiApi, MixerApi, WasapiApi, WmaApi};
use crate::ffi::cd::*;
use crate::ffi::enc::*;
use crate::ffi::midi::*;
use crate::ffi::mix::*;
use crate::ffi::wasapi::*;
use crate::ffi::wma::*;
use crate::ffi::*;

const SYNC_FLAG_MASK: DWORD = BASS_SYNC_MIXTIME | BASS_SYNC_ONETIME | BASS_SYNC_THREAD;
const MOCK_VERSION: DWORD = 0x0204_1100;

struct MockChannel {
    freq: DWORD,
    chans: DWORD,
    flags: DWORD,
    ctype: DWORD,
    sample: HSAMPLE,
    filename: Option<CString>,
    attribs: HashMap<DWORD, f32>,
    sliding: HashSet<DWORD>,
    position: QWORD,
    length: QWORD,
    active: DWORD,
    level: DWORD,
    device: DWORD,
    tags: HashMap<DWORD, Vec<u8>>,
    links: HashSet<DWORD>,
    stream_proc: Option<(StreamProc, usize)>,
    record_proc: Option<(RecordProc, usize)>,
    mixer: Option<HSTREAM>,
    mixer_flags: DWORD,
    midi_fonts: Vec<BassMidiFont>,
    midi_events: HashMap<(DWORD, DWORD), DWORD>,
}

impl MockChannel {
    fn new(freq: DWORD, chans: DWORD, flags: DWORD, ctype: DWORD) -> Self {
        let mut channel = Self {
            freq,
            chans,
            flags,
            ctype,
            sample: 0,
            filename: None,
            attribs: HashMap::new(),
            sliding: HashSet::new(),
            position: 0,
            length: 0,
            active: BASS_ACTIVE_STOPPED,
            level: 0,
            device: 1,
            tags: HashMap::new(),
            links: HashSet::new(),
            stream_proc: None,
            record_proc: None,
            mixer: None,
            mixer_flags: 0,
            midi_fonts: Vec::new(),
            midi_events: HashMap::new(),
        };
        channel.length = channel.bytes_per_second() * 10;
        channel.attribs.insert(BASS_ATTRIB_FREQ, freq as f32);
        channel.attribs.insert(BASS_ATTRIB_VOL, 1.0);
        channel.attribs.insert(BASS_ATTRIB_PAN, 0.0);
        channel
    }

    fn bytes_per_second(&self) -> QWORD {
        let width = if self.flags & BASS_SAMPLE_FLOAT != 0 { 4 } else { 2 };
        (self.freq * self.chans * width) as QWORD
    }
}

struct MockSync {
    channel: DWORD,
    sync_type: DWORD,
    flags: DWORD,
    proc: SyncProc,
    user: usize,
    mixer: bool,
}

struct MockDsp {
    channel: DWORD,
    proc: DspProc,
    user: usize,
    priority: i32,
}

struct MockDevice {
    name: CString,
    driver: CString,
    flags: DWORD,
}

struct MockInput {
    name: String,
    flags: DWORD,
    volume: f32,
}

struct MockEncoder {
    channel: DWORD,
    cmdline: Option<String>,
    proc: Option<(EncodeProc, usize)>,
    notify: Option<(EncodeNotifyProc, usize)>,
    paused: bool,
    bytes_in: QWORD,
    bytes_out: QWORD,
    cast_server: Option<String>,
    cast_title: Option<String>,
    stats: Option<CString>,
}

struct MockWasapiDevice {
    name: CString,
    id: CString,
    device_type: DWORD,
    flags: DWORD,
    mixfreq: DWORD,
    mixchans: DWORD,
    volume: f32,
    mute: bool,
    started: bool,
    proc: Option<(WasapiProc, usize)>,
}

struct MockCdDrive {
    vendor: CString,
    product: CString,
    rev: CString,
    letter: i32,
    tracks: Vec<DWORD>,
    ready: bool,
    open: bool,
    locked: bool,
    ids: HashMap<DWORD, Vec<u8>>,
}

struct MockFont {
    name: CString,
    copyright: CString,
    comment: CString,
    presets: DWORD,
}

struct MockWma {
    tags: Vec<(String, String, DWORD)>,
    written: usize,
}

/// Everything the mock tracks, behind one lock
struct MockState {
    next_handle: DWORD,
    next_sync: DWORD,
    channels: HashMap<DWORD, MockChannel>,
    samples: HashMap<HSAMPLE, (DWORD, Vec<HCHANNEL>)>,
    syncs: HashMap<HSYNC, MockSync>,
    dsps: HashMap<HDSP, MockDsp>,
    fx: HashMap<HFX, (DWORD, DWORD, Vec<u8>)>,
    plugins: HashSet<HPLUGIN>,
    config: HashMap<DWORD, DWORD>,
    volume: f32,
    devices: Vec<MockDevice>,
    initialized: HashSet<DWORD>,
    current_device: Option<DWORD>,
    record_devices: Vec<MockDevice>,
    record_initialized: HashSet<DWORD>,
    current_record: Option<DWORD>,
    inputs: Vec<MockInput>,
    encoders: HashMap<HENCODE, MockEncoder>,
    wasapi_devices: Vec<MockWasapiDevice>,
    wasapi_initialized: HashSet<DWORD>,
    current_wasapi: Option<DWORD>,
    wasapi_notify: Option<(WasapiNotifyProc, usize)>,
    cd_drives: Vec<MockCdDrive>,
    fonts: HashMap<HSOUNDFONT, MockFont>,
    wma_encoders: HashMap<HWMENCODE, MockWma>,
    dshow_initialized: bool,
}

fn device(name: &str, driver: &str, flags: DWORD) -> MockDevice {
    MockDevice {
        name: cstring(name),
        driver: cstring(driver),
        flags,
    }
}

fn cstring(text: &str) -> CString {
    CString::new(text).unwrap()
}

/// Double-NUL terminated list as native code lays it out.
pub(crate) fn string_list(items: &[&str]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for item in items {
        bytes.extend_from_slice(item.as_bytes());
        bytes.push(0);
    }
    bytes.push(0);
    bytes
}

impl MockState {
    fn new() -> Self {
        Self {
            next_handle: 0x10000,
            next_sync: 1,
            channels: HashMap::new(),
            samples: HashMap::new(),
            syncs: HashMap::new(),
            dsps: HashMap::new(),
            fx: HashMap::new(),
            plugins: HashSet::new(),
            config: HashMap::new(),
            volume: 1.0,
            devices: vec![
                device("No sound", "", BASS_DEVICE_ENABLED),
                device(
                    "Speakers",
                    "spk0",
                    BASS_DEVICE_ENABLED | BASS_DEVICE_DEFAULT | BASS_DEVICE_TYPE_SPEAKERS,
                ),
            ],
            initialized: HashSet::new(),
            current_device: None,
            record_devices: vec![device(
                "Microphone",
                "mic0",
                BASS_DEVICE_ENABLED | BASS_DEVICE_DEFAULT | BASS_DEVICE_TYPE_MICROPHONE,
            )],
            record_initialized: HashSet::new(),
            current_record: None,
            inputs: vec![
                MockInput {
                    name: "Line In".into(),
                    flags: 0,
                    volume: 0.5,
                },
                MockInput {
                    name: "Mic".into(),
                    flags: 0,
                    volume: 1.0,
                },
            ],
            encoders: HashMap::new(),
            wasapi_devices: vec![
                MockWasapiDevice {
                    name: cstring("Speakers (WASAPI)"),
                    id: cstring("{0.0.0.00000000}.{spk}"),
                    device_type: BASS_WASAPI_TYPE_SPEAKERS,
                    flags: BASS_DEVICE_ENABLED | BASS_DEVICE_DEFAULT,
                    mixfreq: 48000,
                    mixchans: 2,
                    volume: 1.0,
                    mute: false,
                    started: false,
                    proc: None,
                },
                MockWasapiDevice {
                    name: cstring("Microphone (WASAPI)"),
                    id: cstring("{0.0.1.00000000}.{mic}"),
                    device_type: BASS_WASAPI_TYPE_MICROPHONE,
                    flags: BASS_DEVICE_ENABLED | BASS_DEVICE_DEFAULT | BASS_DEVICE_INPUT,
                    mixfreq: 48000,
                    mixchans: 1,
                    volume: 1.0,
                    mute: false,
                    started: false,
                    proc: None,
                },
            ],
            wasapi_initialized: HashSet::new(),
            current_wasapi: None,
            wasapi_notify: None,
            cd_drives: vec![MockCdDrive {
                vendor: cstring("ACME"),
                product: cstring("CD-ROM 52x"),
                rev: cstring("1.0"),
                letter: 3,
                tracks: vec![1_764_000, 3_528_000, 5_292_000],
                ready: true,
                open: false,
                locked: false,
                ids: HashMap::from([
                    (BASS_CDID_CDDB, b"1f02e004\0".to_vec()),
                    (BASS_CDID_TEXT, string_list(&["TITLE0=Album", "PERFORMER0=Band", "TITLE1=Intro"])),
                ]),
            }],
            fonts: HashMap::new(),
            wma_encoders: HashMap::new(),
            dshow_initialized: false,
        }
    }

    fn alloc_handle(&mut self) -> DWORD {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn add_channel(&mut self, channel: MockChannel) -> DWORD {
        let handle = self.alloc_handle();
        self.channels.insert(handle, channel);
        handle
    }
}

type FreeSync = (SyncProc, HSYNC, usize);
type FreeNotify = (EncodeNotifyProc, HENCODE, usize);

/// In-memory implementation of every API trait
pub(crate) struct MockApi {
    state: Mutex<MockState>,
    error: AtomicI32,
    dshow_error: AtomicI32,
    addons: bool,
}

impl MockApi {
    /// Core plus every add-on.
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState::new()),
            error: AtomicI32::new(BASS_OK),
            dshow_error: AtomicI32::new(BASS_OK),
            addons: true,
        })
    }

    /// Core library only; every add-on accessor returns `None`.
    pub(crate) fn core_only() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState::new()),
            error: AtomicI32::new(BASS_OK),
            dshow_error: AtomicI32::new(BASS_OK),
            addons: false,
        })
    }

    fn fail(&self, code: i32) {
        self.error.store(code, Ordering::SeqCst);
    }

    fn ok(&self) {
        self.error.store(BASS_OK, Ordering::SeqCst);
    }

    /// `ok` as a native BOOL result, setting `code` on failure.
    fn result(&self, ok: bool, code: i32) -> bool {
        if ok {
            self.ok();
        } else {
            self.fail(code);
        }
        ok
    }

    fn handle_or_fail(&self, handle: Option<DWORD>, code: i32) -> DWORD {
        match handle {
            Some(h) => {
                self.ok();
                h
            }
            None => {
                self.fail(code);
                0
            }
        }
    }

    fn with_channel<R>(&self, handle: DWORD, fallback: R, f: impl FnOnce(&mut MockChannel) -> R) -> R {
        let mut state = self.state.lock();
        match state.channels.get_mut(&handle) {
            Some(channel) => {
                self.ok();
                f(channel)
            }
            None => {
                self.fail(BASS_ERROR_HANDLE);
                fallback
            }
        }
    }

    fn path_fails(path: &FilePath) -> Option<i32> {
        let path = path.to_string_lossy();
        if path.contains("missing") {
            Some(BASS_ERROR_FILEOPEN)
        } else if path.ends_with(".txt") {
            Some(BASS_ERROR_FILEFORM)
        } else {
            None
        }
    }

    // ========================================================================
    // Test controls
    // ========================================================================

    /// A plain 44.1 kHz stereo 16-bit stream, 10 seconds long.
    pub(crate) fn add_stream(&self) -> HSTREAM {
        self.add_stream_with(44100, 2, 0)
    }

    pub(crate) fn add_stream_with(&self, freq: DWORD, chans: DWORD, flags: DWORD) -> HSTREAM {
        self.state
            .lock()
            .add_channel(MockChannel::new(freq, chans, flags, BASS_CTYPE_STREAM))
    }

    pub(crate) fn exists(&self, handle: DWORD) -> bool {
        self.state.lock().channels.contains_key(&handle)
    }

    /// Free `handle` the way native code does: remove it, then run its
    /// free syncs and encoder free notifications.
    pub(crate) fn free_channel(&self, handle: DWORD) -> bool {
        let (syncs, notifies) = {
            let mut state = self.state.lock();
            if state.channels.remove(&handle).is_none() {
                return false;
            }
            let ids: Vec<HSYNC> = state
                .syncs
                .iter()
                .filter(|(_, s)| s.channel == handle)
                .map(|(id, _)| *id)
                .collect();
            let mut free_syncs: Vec<FreeSync> = Vec::new();
            for id in ids {
                if let Some(sync) = state.syncs.remove(&id) {
                    if sync.sync_type == BASS_SYNC_FREE {
                        free_syncs.push((sync.proc, id, sync.user));
                    }
                }
            }
            state.dsps.retain(|_, d| d.channel != handle);
            state.fx.retain(|_, (ch, _, _)| *ch != handle);
            for channel in state.channels.values_mut() {
                channel.links.remove(&handle);
                if channel.mixer == Some(handle) {
                    channel.mixer = None;
                }
            }
            let encoders: Vec<HENCODE> = state
                .encoders
                .iter()
                .filter(|(_, e)| e.channel == handle)
                .map(|(id, _)| *id)
                .collect();
            let mut notifies: Vec<FreeNotify> = Vec::new();
            for id in encoders {
                if let Some(encoder) = state.encoders.remove(&id) {
                    if let Some((proc, user)) = encoder.notify {
                        notifies.push((proc, id, user));
                    }
                }
            }
            (free_syncs, notifies)
        };

        for (proc, sync, user) in syncs {
            unsafe { proc(sync, handle, 0, user as *mut c_void) };
        }
        for (proc, encoder, user) in notifies {
            unsafe { proc(encoder, BASS_ENCODE_NOTIFY_FREE, user as *mut c_void) };
        }
        true
    }

    /// Fire every sync of `sync_type` on `handle`.
    pub(crate) fn fire_sync(&self, handle: DWORD, sync_type: DWORD, data: DWORD) {
        let due: Vec<(SyncProc, HSYNC, usize, bool)> = {
            let mut state = self.state.lock();
            let mut due = Vec::new();
            for (id, sync) in state.syncs.iter() {
                if sync.channel == handle && sync.sync_type == sync_type {
                    due.push((sync.proc, *id, sync.user, sync.flags & BASS_SYNC_ONETIME != 0));
                }
            }
            for (_, id, _, onetime) in &due {
                if *onetime {
                    state.syncs.remove(id);
                }
            }
            due
        };
        for (proc, sync, user, onetime) in due {
            // An earlier sync may have removed this one
            if !onetime && !self.state.lock().syncs.contains_key(&sync) {
                continue;
            }
            unsafe { proc(sync, handle, data, user as *mut c_void) };
        }
    }

    pub(crate) fn sync_count(&self, handle: DWORD, sync_type: DWORD) -> usize {
        self.state
            .lock()
            .syncs
            .values()
            .filter(|s| s.channel == handle && s.sync_type == sync_type)
            .count()
    }

    pub(crate) fn total_syncs(&self) -> usize {
        self.state.lock().syncs.len()
    }

    pub(crate) fn mixer_sync_count(&self, handle: DWORD) -> usize {
        self.state
            .lock()
            .syncs
            .values()
            .filter(|s| s.channel == handle && s.mixer)
            .count()
    }

    /// Run the DSP chain of `handle` over `data`, highest priority first.
    pub(crate) fn run_dsp(&self, handle: DWORD, data: &mut Vec<u8>) {
        let mut chain: Vec<(i32, DspProc, HDSP, usize)> = {
            let state = self.state.lock();
            state
                .dsps
                .iter()
                .filter(|(_, d)| d.channel == handle)
                .map(|(id, d)| (d.priority, d.proc, *id, d.user))
                .collect()
        };
        chain.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, proc, dsp, user) in chain {
            if !self.state.lock().dsps.contains_key(&dsp) {
                continue;
            }
            unsafe {
                proc(
                    dsp,
                    handle,
                    data.as_mut_ptr() as *mut c_void,
                    data.len() as DWORD,
                    user as *mut c_void,
                )
            };
        }
    }

    pub(crate) fn dsp_count(&self, handle: DWORD) -> usize {
        self.state.lock().dsps.values().filter(|d| d.channel == handle).count()
    }

    /// Ask the STREAMPROC of `handle` for `length` bytes.
    pub(crate) fn pull_stream(&self, handle: DWORD, length: usize) -> Option<(Vec<u8>, DWORD)> {
        let (proc, user) = self.state.lock().channels.get(&handle)?.stream_proc?;
        let mut buffer = vec![0u8; length];
        let ret = unsafe {
            proc(
                handle,
                buffer.as_mut_ptr() as *mut c_void,
                length as DWORD,
                user as *mut c_void,
            )
        };
        Some((buffer, ret))
    }

    /// Hand captured bytes to the RECORDPROC of `handle`.
    pub(crate) fn feed_record(&self, handle: DWORD, data: &[u8]) -> Option<bool> {
        let (proc, user) = self.state.lock().channels.get(&handle)?.record_proc?;
        let keep = unsafe {
            proc(
                handle,
                data.as_ptr() as *const c_void,
                data.len() as DWORD,
                user as *mut c_void,
            )
        };
        if !to_bool(keep) {
            if let Some(channel) = self.state.lock().channels.get_mut(&handle) {
                channel.active = BASS_ACTIVE_STOPPED;
            }
        }
        Some(to_bool(keep))
    }

    pub(crate) fn set_attribute_raw(&self, handle: DWORD, attrib: DWORD, value: f32) {
        if let Some(channel) = self.state.lock().channels.get_mut(&handle) {
            channel.attribs.insert(attrib, value);
        }
    }

    pub(crate) fn set_level(&self, handle: DWORD, level: DWORD) {
        if let Some(channel) = self.state.lock().channels.get_mut(&handle) {
            channel.level = level;
        }
    }

    pub(crate) fn set_tag(&self, handle: DWORD, tag: DWORD, bytes: Vec<u8>) {
        if let Some(channel) = self.state.lock().channels.get_mut(&handle) {
            channel.tags.insert(tag, bytes);
        }
    }

    pub(crate) fn is_linked(&self, handle: DWORD, other: DWORD) -> bool {
        self.state
            .lock()
            .channels
            .get(&handle)
            .map_or(false, |c| c.links.contains(&other))
    }

    pub(crate) fn fx_count(&self, handle: DWORD) -> usize {
        self.state.lock().fx.values().filter(|(ch, _, _)| *ch == handle).count()
    }

    pub(crate) fn add_device(&self, name: &str, flags: DWORD) {
        self.state.lock().devices.push(device(name, "", flags));
    }

    pub(crate) fn is_initialized(&self, device: DWORD) -> bool {
        self.state.lock().initialized.contains(&device)
    }

    pub(crate) fn input_volume(&self, input: usize) -> f32 {
        self.state.lock().inputs[input].volume
    }

    pub(crate) fn mixer_of(&self, handle: DWORD) -> Option<HSTREAM> {
        self.state.lock().channels.get(&handle).and_then(|c| c.mixer)
    }

    pub(crate) fn encoder_exists(&self, encoder: HENCODE) -> bool {
        self.state.lock().encoders.contains_key(&encoder)
    }

    pub(crate) fn encoder_cmdline(&self, encoder: HENCODE) -> Option<String> {
        self.state.lock().encoders.get(&encoder).and_then(|e| e.cmdline.clone())
    }

    pub(crate) fn cast_title(&self, encoder: HENCODE) -> Option<String> {
        self.state.lock().encoders.get(&encoder).and_then(|e| e.cast_title.clone())
    }

    /// Run the notify callback of `encoder` with `status`.
    pub(crate) fn notify_encoder(&self, encoder: HENCODE, status: DWORD) {
        let notify = self.state.lock().encoders.get(&encoder).and_then(|e| e.notify);
        if let Some((proc, user)) = notify {
            unsafe { proc(encoder, status, user as *mut c_void) };
        }
    }

    /// Run the WASAPI notification callback.
    pub(crate) fn notify_wasapi(&self, notify: DWORD, device: DWORD) {
        let callback = self.state.lock().wasapi_notify;
        if let Some((proc, user)) = callback {
            unsafe { proc(notify, device, user as *mut c_void) };
        }
    }

    pub(crate) fn has_wasapi_notify(&self) -> bool {
        self.state.lock().wasapi_notify.is_some()
    }

    /// Ask the WASAPIPROC of `device` to handle `length` bytes.
    pub(crate) fn pull_wasapi(&self, device: DWORD, length: usize) -> Option<(Vec<u8>, DWORD)> {
        let (proc, user) = self.state.lock().wasapi_devices.get(device as usize)?.proc?;
        let mut buffer = vec![0u8; length];
        let ret = unsafe { proc(buffer.as_mut_ptr() as *mut c_void, length as DWORD, user as *mut c_void) };
        Some((buffer, ret))
    }

    pub(crate) fn set_wasapi_flags(&self, device: DWORD, flags: DWORD) {
        if let Some(d) = self.state.lock().wasapi_devices.get_mut(device as usize) {
            d.flags = flags;
        }
    }

    pub(crate) fn midi_fonts(&self, handle: HSTREAM) -> Vec<BassMidiFont> {
        self.state
            .lock()
            .channels
            .get(&handle)
            .map(|c| c.midi_fonts.clone())
            .unwrap_or_default()
    }

    pub(crate) fn font_exists(&self, font: HSOUNDFONT) -> bool {
        self.state.lock().fonts.contains_key(&font)
    }

    pub(crate) fn wma_written(&self, handle: HWMENCODE) -> Option<usize> {
        self.state.lock().wma_encoders.get(&handle).map(|w| w.written)
    }

    pub(crate) fn wma_tags(&self, handle: HWMENCODE) -> Vec<(String, String, DWORD)> {
        self.state
            .lock()
            .wma_encoders
            .get(&handle)
            .map(|w| w.tags.clone())
            .unwrap_or_default()
    }

    pub(crate) fn plugin_count(&self) -> usize {
        self.state.lock().plugins.len()
    }
}

// ============================================================================
// Core
// ============================================================================

impl BassApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn error_code(&self) -> i32 {
        self.error.load(Ordering::SeqCst)
    }

    fn init(&self, device: i32, _freq: DWORD, _flags: DWORD) -> bool {
        let mut state = self.state.lock();
        let device = if device < 0 { 1 } else { device as DWORD };
        if device as usize >= state.devices.len() {
            return self.result(false, BASS_ERROR_DEVICE);
        }
        if !state.initialized.insert(device) {
            return self.result(false, BASS_ERROR_ALREADY);
        }
        state.current_device = Some(device);
        self.result(true, BASS_OK)
    }

    fn free(&self) -> bool {
        let mut state = self.state.lock();
        match state.current_device.take() {
            Some(device) => {
                state.initialized.remove(&device);
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn device_info(&self, device: DWORD, info: &mut BassDeviceInfo) -> bool {
        let state = self.state.lock();
        match state.devices.get(device as usize) {
            Some(d) => {
                info.name = d.name.as_ptr();
                info.driver = d.driver.as_ptr();
                info.flags = d.flags;
                if state.initialized.contains(&device) {
                    info.flags |= BASS_DEVICE_INIT;
                }
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_DEVICE),
        }
    }

    fn set_device(&self, device: DWORD) -> bool {
        let mut state = self.state.lock();
        if device as usize >= state.devices.len() {
            return self.result(false, BASS_ERROR_DEVICE);
        }
        if !state.initialized.contains(&device) {
            return self.result(false, BASS_ERROR_INIT);
        }
        state.current_device = Some(device);
        self.result(true, BASS_OK)
    }

    fn current_device(&self) -> DWORD {
        let current = self.state.lock().current_device;
        match current {
            Some(device) => {
                self.ok();
                device
            }
            None => {
                self.fail(BASS_ERROR_INIT);
                DWORD::MAX
            }
        }
    }

    fn info(&self, info: &mut BassInfo) -> bool {
        if self.state.lock().current_device.is_none() {
            return self.result(false, BASS_ERROR_INIT);
        }
        info.freq = 48000;
        info.latency = 10;
        info.speakers = 2;
        self.result(true, BASS_OK)
    }

    fn set_config(&self, option: DWORD, value: DWORD) -> bool {
        self.state.lock().config.insert(option, value);
        self.result(true, BASS_OK)
    }

    fn config(&self, option: DWORD) -> DWORD {
        let value = self.state.lock().config.get(&option).copied();
        match value {
            Some(v) => {
                self.ok();
                v
            }
            None => {
                self.fail(BASS_ERROR_ILLTYPE);
                DWORD::MAX
            }
        }
    }

    fn set_volume(&self, volume: f32) -> bool {
        if !(0.0..=1.0).contains(&volume) {
            return self.result(false, BASS_ERROR_ILLPARAM);
        }
        self.state.lock().volume = volume;
        self.result(true, BASS_OK)
    }

    fn volume(&self) -> f32 {
        self.ok();
        self.state.lock().volume
    }

    fn start(&self) -> bool {
        let ok = self.state.lock().current_device.is_some();
        self.result(ok, BASS_ERROR_INIT)
    }

    fn stop(&self) -> bool {
        BassApi::start(self)
    }

    fn pause(&self) -> bool {
        BassApi::start(self)
    }

    fn plugin_load(&self, path: &FilePath) -> HPLUGIN {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        let mut state = self.state.lock();
        let handle = state.alloc_handle();
        state.plugins.insert(handle);
        self.ok();
        handle
    }

    fn plugin_free(&self, plugin: HPLUGIN) -> bool {
        let removed = self.state.lock().plugins.remove(&plugin);
        self.result(removed, BASS_ERROR_HANDLE)
    }

    unsafe fn stream_create(
        &self,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        proc: Option<StreamProc>,
        user: *mut c_void,
    ) -> HSTREAM {
        if freq == 0 || chans == 0 {
            self.fail(BASS_ERROR_FORMAT);
            return 0;
        }
        let mut channel = MockChannel::new(freq, chans, flags, BASS_CTYPE_STREAM);
        channel.stream_proc = proc.map(|p| (p, user as usize));
        channel.length = QWORD::MAX;
        let handle = self.state.lock().add_channel(channel);
        self.ok();
        handle
    }

    fn stream_create_file(&self, path: &FilePath, _offset: QWORD, _length: QWORD, flags: DWORD) -> HSTREAM {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        let mut channel = MockChannel::new(44100, 2, flags & !BASS_UNICODE, BASS_CTYPE_STREAM_WAV_PCM);
        channel.filename = CString::new(path.to_string_lossy()).ok();
        let handle = self.state.lock().add_channel(channel);
        self.ok();
        handle
    }

    fn stream_create_url(&self, url: &CStr, _offset: DWORD, flags: DWORD) -> HSTREAM {
        let text = url.to_string_lossy();
        if !(text.starts_with("http://") || text.starts_with("https://")) {
            self.fail(BASS_ERROR_FILEOPEN);
            return 0;
        }
        let mut channel = MockChannel::new(44100, 2, flags, BASS_CTYPE_STREAM_MP3);
        channel.filename = Some(url.to_owned());
        channel.tags.insert(
            BASS_TAG_HTTP,
            string_list(&["HTTP/1.0 200 OK", "Content-Type: audio/mpeg"]),
        );
        let handle = self.state.lock().add_channel(channel);
        self.ok();
        handle
    }

    fn stream_free(&self, handle: HSTREAM) -> bool {
        self.channel_free(handle)
    }

    fn sample_load(&self, path: &FilePath, _offset: QWORD, _length: DWORD, max: DWORD, _flags: DWORD) -> HSAMPLE {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        if max == 0 {
            self.fail(BASS_ERROR_ILLPARAM);
            return 0;
        }
        let mut state = self.state.lock();
        let handle = state.alloc_handle();
        state.samples.insert(handle, (max, Vec::new()));
        self.ok();
        handle
    }

    fn sample_get_channel(&self, sample: HSAMPLE, flags: DWORD) -> HCHANNEL {
        let mut state = self.state.lock();
        let live: Vec<HCHANNEL> = match state.samples.get(&sample) {
            Some((_, chans)) => chans.iter().copied().filter(|c| state.channels.contains_key(c)).collect(),
            None => {
                self.fail(BASS_ERROR_HANDLE);
                return 0;
            }
        };
        let max = state.samples.get(&sample).map_or(0, |(max, _)| *max);
        if live.len() as DWORD >= max {
            self.fail(BASS_ERROR_NOCHAN);
            return 0;
        }
        let mut channel = MockChannel::new(44100, 2, flags, BASS_CTYPE_SAMPLE);
        channel.sample = sample;
        let handle = state.add_channel(channel);
        if let Some((_, chans)) = state.samples.get_mut(&sample) {
            *chans = live;
            chans.push(handle);
        }
        self.ok();
        handle
    }

    fn sample_free(&self, sample: HSAMPLE) -> bool {
        let removed = self.state.lock().samples.remove(&sample);
        match removed {
            Some((_, chans)) => {
                for channel in chans {
                    self.free_channel(channel);
                }
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn music_load(&self, path: &FilePath, _offset: QWORD, _length: DWORD, flags: DWORD, freq: DWORD) -> HMUSIC {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        let freq = if freq == 0 { 44100 } else { freq };
        let handle = self
            .state
            .lock()
            .add_channel(MockChannel::new(freq, 2, flags, BASS_CTYPE_MUSIC_MOD));
        self.ok();
        handle
    }

    fn music_free(&self, handle: HMUSIC) -> bool {
        self.channel_free(handle)
    }

    fn record_init(&self, device: i32) -> bool {
        let mut state = self.state.lock();
        let device = if device < 0 { 0 } else { device as DWORD };
        if device as usize >= state.record_devices.len() {
            return self.result(false, BASS_ERROR_DEVICE);
        }
        if !state.record_initialized.insert(device) {
            return self.result(false, BASS_ERROR_ALREADY);
        }
        state.current_record = Some(device);
        self.result(true, BASS_OK)
    }

    fn record_free(&self) -> bool {
        let mut state = self.state.lock();
        match state.current_record.take() {
            Some(device) => {
                state.record_initialized.remove(&device);
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn record_device_info(&self, device: DWORD, info: &mut BassDeviceInfo) -> bool {
        let state = self.state.lock();
        match state.record_devices.get(device as usize) {
            Some(d) => {
                info.name = d.name.as_ptr();
                info.driver = d.driver.as_ptr();
                info.flags = d.flags;
                if state.record_initialized.contains(&device) {
                    info.flags |= BASS_DEVICE_INIT;
                }
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_DEVICE),
        }
    }

    fn record_set_device(&self, device: DWORD) -> bool {
        let mut state = self.state.lock();
        if !state.record_initialized.contains(&device) {
            return self.result(false, BASS_ERROR_INIT);
        }
        state.current_record = Some(device);
        self.result(true, BASS_OK)
    }

    fn record_current_device(&self) -> DWORD {
        let current = self.state.lock().current_record;
        current.map_or_else(
            || {
                self.fail(BASS_ERROR_INIT);
                DWORD::MAX
            },
            |d| {
                self.ok();
                d
            },
        )
    }

    fn record_info(&self, info: &mut BassRecordInfo) -> bool {
        let state = self.state.lock();
        if state.current_record.is_none() {
            return self.result(false, BASS_ERROR_INIT);
        }
        info.inputs = state.inputs.len() as DWORD;
        info.freq = 48000;
        info.singlein = TRUE;
        self.result(true, BASS_OK)
    }

    fn record_input(&self, input: i32, volume: &mut f32) -> DWORD {
        let state = self.state.lock();
        match state.inputs.get(input as usize).filter(|_| input >= 0) {
            Some(i) => {
                *volume = i.volume;
                self.ok();
                i.flags
            }
            None => {
                self.fail(BASS_ERROR_ILLPARAM);
                DWORD::MAX
            }
        }
    }

    fn record_set_input(&self, input: i32, flags: DWORD, volume: f32) -> bool {
        let mut state = self.state.lock();
        if input < 0 {
            return self.result(false, BASS_ERROR_ILLPARAM);
        }
        match state.inputs.get_mut(input as usize) {
            Some(i) => {
                i.flags = flags;
                if volume >= 0.0 {
                    i.volume = volume;
                }
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_ILLPARAM),
        }
    }

    fn record_input_name(&self, input: i32) -> Option<String> {
        let state = self.state.lock();
        let name = state.inputs.get(input as usize).filter(|_| input >= 0).map(|i| i.name.clone());
        if name.is_none() {
            self.fail(BASS_ERROR_ILLPARAM);
        }
        name
    }

    unsafe fn record_start(
        &self,
        freq: DWORD,
        chans: DWORD,
        flags: DWORD,
        proc: Option<RecordProc>,
        user: *mut c_void,
    ) -> HRECORD {
        let mut state = self.state.lock();
        if state.current_record.is_none() {
            self.fail(BASS_ERROR_INIT);
            return 0;
        }
        let mut channel = MockChannel::new(freq, chans, flags, BASS_CTYPE_RECORD);
        channel.record_proc = proc.map(|p| (p, user as usize));
        channel.active = if flags & BASS_RECORD_PAUSE != 0 {
            BASS_ACTIVE_PAUSED
        } else {
            BASS_ACTIVE_PLAYING
        };
        let handle = state.add_channel(channel);
        self.ok();
        handle
    }

    fn channel_info(&self, handle: DWORD, info: &mut BassChannelInfo) -> bool {
        self.with_channel(handle, false, |c| {
            info.freq = c.freq;
            info.chans = c.chans;
            info.flags = c.flags;
            info.ctype = c.ctype;
            info.origres = 16;
            info.sample = c.sample;
            info.filename = c.filename.as_ref().map_or(std::ptr::null(), |f| f.as_ptr());
            true
        })
    }

    fn channel_play(&self, handle: DWORD, restart: bool) -> bool {
        let mut state = self.state.lock();
        let Some(channel) = state.channels.get_mut(&handle) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        if channel.flags & BASS_STREAM_DECODE != 0 {
            return self.result(false, BASS_ERROR_DECODE);
        }
        if restart {
            channel.position = 0;
        }
        channel.active = BASS_ACTIVE_PLAYING;
        self.result(true, BASS_OK)
    }

    fn channel_stop(&self, handle: DWORD) -> bool {
        self.with_channel(handle, false, |c| {
            c.active = BASS_ACTIVE_STOPPED;
            true
        })
    }

    fn channel_pause(&self, handle: DWORD) -> bool {
        let mut state = self.state.lock();
        let Some(channel) = state.channels.get_mut(&handle) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        if channel.active != BASS_ACTIVE_PLAYING {
            return self.result(false, BASS_ERROR_NOPLAY);
        }
        channel.active = BASS_ACTIVE_PAUSED;
        self.result(true, BASS_OK)
    }

    fn channel_is_active(&self, handle: DWORD) -> DWORD {
        self.with_channel(handle, BASS_ACTIVE_STOPPED, |c| c.active)
    }

    fn channel_free(&self, handle: DWORD) -> bool {
        let freed = self.free_channel(handle);
        self.result(freed, BASS_ERROR_HANDLE)
    }

    fn channel_length(&self, handle: DWORD, mode: DWORD) -> QWORD {
        if mode != BASS_POS_BYTE {
            self.fail(BASS_ERROR_NOTAVAIL);
            return QWORD::MAX;
        }
        self.with_channel(handle, QWORD::MAX, |c| c.length)
    }

    fn channel_position(&self, handle: DWORD, mode: DWORD) -> QWORD {
        if mode != BASS_POS_BYTE {
            self.fail(BASS_ERROR_NOTAVAIL);
            return QWORD::MAX;
        }
        self.with_channel(handle, QWORD::MAX, |c| c.position)
    }

    fn channel_set_position(&self, handle: DWORD, pos: QWORD, mode: DWORD) -> bool {
        let mut state = self.state.lock();
        let Some(channel) = state.channels.get_mut(&handle) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        if mode != BASS_POS_BYTE || pos > channel.length {
            return self.result(false, BASS_ERROR_POSITION);
        }
        channel.position = pos;
        self.result(true, BASS_OK)
    }

    fn channel_bytes_to_seconds(&self, handle: DWORD, bytes: QWORD) -> f64 {
        self.with_channel(handle, -1.0, |c| bytes as f64 / c.bytes_per_second() as f64)
    }

    fn channel_seconds_to_bytes(&self, handle: DWORD, seconds: f64) -> QWORD {
        if seconds < 0.0 {
            self.fail(BASS_ERROR_ILLPARAM);
            return QWORD::MAX;
        }
        self.with_channel(handle, QWORD::MAX, |c| {
            let block = (c.bytes_per_second() / c.freq as QWORD).max(1);
            let bytes = (seconds * c.bytes_per_second() as f64).round() as QWORD;
            bytes - bytes % block
        })
    }

    fn channel_attribute(&self, handle: DWORD, attrib: DWORD, value: &mut f32) -> bool {
        let mut state = self.state.lock();
        let Some(channel) = state.channels.get_mut(&handle) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        match channel.attribs.get(&attrib) {
            Some(v) => {
                *value = *v;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_ILLTYPE),
        }
    }

    fn channel_set_attribute(&self, handle: DWORD, attrib: DWORD, value: f32) -> bool {
        self.with_channel(handle, false, |c| {
            c.attribs.insert(attrib, value);
            true
        })
    }

    fn channel_slide_attribute(&self, handle: DWORD, attrib: DWORD, value: f32, _time_ms: DWORD) -> bool {
        self.with_channel(handle, false, |c| {
            c.attribs.insert(attrib & !BASS_SLIDE_LOG, value);
            c.sliding.insert(attrib & !BASS_SLIDE_LOG);
            true
        })
    }

    fn channel_is_sliding(&self, handle: DWORD, attrib: DWORD) -> bool {
        self.with_channel(handle, false, |c| c.sliding.contains(&attrib))
    }

    fn channel_flags(&self, handle: DWORD, flags: DWORD, mask: DWORD) -> DWORD {
        self.with_channel(handle, DWORD::MAX, |c| {
            c.flags = (c.flags & !mask) | (flags & mask);
            c.flags
        })
    }

    fn channel_level(&self, handle: DWORD) -> DWORD {
        self.with_channel(handle, DWORD::MAX, |c| c.level)
    }

    fn channel_tags(&self, handle: DWORD, tag: DWORD) -> *const c_char {
        let mut state = self.state.lock();
        let Some(channel) = state.channels.get_mut(&handle) else {
            self.fail(BASS_ERROR_HANDLE);
            return std::ptr::null();
        };
        match channel.tags.get(&tag) {
            Some(bytes) => {
                self.ok();
                bytes.as_ptr() as *const c_char
            }
            None => {
                self.fail(BASS_ERROR_NOTAVAIL);
                std::ptr::null()
            }
        }
    }

    fn channel_device(&self, handle: DWORD) -> DWORD {
        self.with_channel(handle, DWORD::MAX, |c| c.device)
    }

    fn channel_set_device(&self, handle: DWORD, device: DWORD) -> bool {
        let mut state = self.state.lock();
        if !state.initialized.contains(&device) {
            return self.result(false, BASS_ERROR_INIT);
        }
        let Some(channel) = state.channels.get_mut(&handle) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        channel.device = device;
        self.result(true, BASS_OK)
    }

    unsafe fn channel_get_data(&self, handle: DWORD, buffer: *mut c_void, length: DWORD) -> DWORD {
        let mut state = self.state.lock();
        let Some(channel) = state.channels.get_mut(&handle) else {
            self.fail(BASS_ERROR_HANDLE);
            return DWORD::MAX;
        };
        self.ok();
        if length == BASS_DATA_AVAILABLE {
            return 0;
        }
        if length & 0x8000_0000 != 0 {
            let bins = (256usize << (length & 0x7)) / 2;
            if !buffer.is_null() {
                std::ptr::write_bytes(buffer as *mut f32, 0, bins);
            }
            return (bins * 4) as DWORD;
        }
        let wanted = (length & 0x0fff_ffff) as QWORD;
        let remaining = channel.length.saturating_sub(channel.position);
        let count = wanted.min(remaining);
        if !buffer.is_null() {
            std::ptr::write_bytes(buffer as *mut u8, 0, count as usize);
        }
        channel.position += count;
        count as DWORD
    }

    unsafe fn channel_set_sync(
        &self,
        handle: DWORD,
        sync_type: DWORD,
        _param: QWORD,
        proc: Option<SyncProc>,
        user: *mut c_void,
    ) -> HSYNC {
        let mut state = self.state.lock();
        if !state.channels.contains_key(&handle) {
            self.fail(BASS_ERROR_HANDLE);
            return 0;
        }
        let Some(proc) = proc else {
            self.fail(BASS_ERROR_ILLPARAM);
            return 0;
        };
        let id = state.next_sync;
        state.next_sync += 1;
        state.syncs.insert(
            id,
            MockSync {
                channel: handle,
                sync_type: sync_type & !SYNC_FLAG_MASK,
                flags: sync_type & SYNC_FLAG_MASK,
                proc,
                user: user as usize,
                mixer: false,
            },
        );
        self.ok();
        id
    }

    fn channel_remove_sync(&self, handle: DWORD, sync: HSYNC) -> bool {
        let mut state = self.state.lock();
        let owned = state.syncs.get(&sync).map_or(false, |s| s.channel == handle && !s.mixer);
        if owned {
            state.syncs.remove(&sync);
        }
        self.result(owned, BASS_ERROR_HANDLE)
    }

    unsafe fn channel_set_dsp(&self, handle: DWORD, proc: Option<DspProc>, user: *mut c_void, priority: i32) -> HDSP {
        let mut state = self.state.lock();
        if !state.channels.contains_key(&handle) {
            self.fail(BASS_ERROR_HANDLE);
            return 0;
        }
        let Some(proc) = proc else {
            self.fail(BASS_ERROR_ILLPARAM);
            return 0;
        };
        let id = state.next_sync;
        state.next_sync += 1;
        state.dsps.insert(
            id,
            MockDsp {
                channel: handle,
                proc,
                user: user as usize,
                priority,
            },
        );
        self.ok();
        id
    }

    fn channel_remove_dsp(&self, handle: DWORD, dsp: HDSP) -> bool {
        let mut state = self.state.lock();
        let owned = state.dsps.get(&dsp).map_or(false, |d| d.channel == handle);
        if owned {
            state.dsps.remove(&dsp);
        }
        self.result(owned, BASS_ERROR_HANDLE)
    }

    fn channel_set_fx(&self, handle: DWORD, fx_type: DWORD, _priority: i32) -> HFX {
        let size = match fx_type {
            BASS_FX_DX8_CHORUS | BASS_FX_DX8_FLANGER => 28,
            BASS_FX_DX8_COMPRESSOR => 24,
            BASS_FX_DX8_DISTORTION | BASS_FX_DX8_ECHO => 20,
            BASS_FX_DX8_GARGLE => 8,
            BASS_FX_DX8_PARAMEQ => 12,
            BASS_FX_DX8_REVERB => 16,
            _ => {
                self.fail(BASS_ERROR_ILLTYPE);
                return 0;
            }
        };
        let mut state = self.state.lock();
        if !state.channels.contains_key(&handle) {
            self.fail(BASS_ERROR_HANDLE);
            return 0;
        }
        let id = state.alloc_handle();
        state.fx.insert(id, (handle, fx_type, vec![0u8; size]));
        self.ok();
        id
    }

    fn channel_remove_fx(&self, handle: DWORD, fx: HFX) -> bool {
        let mut state = self.state.lock();
        let owned = state.fx.get(&fx).map_or(false, |(ch, _, _)| *ch == handle);
        if owned {
            state.fx.remove(&fx);
        }
        self.result(owned, BASS_ERROR_HANDLE)
    }

    fn channel_set_link(&self, handle: DWORD, other: DWORD) -> bool {
        let mut state = self.state.lock();
        if !state.channels.contains_key(&other) {
            return self.result(false, BASS_ERROR_HANDLE);
        }
        let Some(channel) = state.channels.get_mut(&handle) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        if !channel.links.insert(other) {
            return self.result(false, BASS_ERROR_ALREADY);
        }
        self.result(true, BASS_OK)
    }

    fn channel_remove_link(&self, handle: DWORD, other: DWORD) -> bool {
        self.with_channel(handle, false, |c| c.links.remove(&other))
    }

    fn fx_set_parameters(&self, fx: HFX, params: &[u8]) -> bool {
        let mut state = self.state.lock();
        match state.fx.get_mut(&fx) {
            Some((_, _, stored)) if stored.len() == params.len() => {
                stored.copy_from_slice(params);
                self.result(true, BASS_OK)
            }
            Some(_) => self.result(false, BASS_ERROR_ILLPARAM),
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn fx_get_parameters(&self, fx: HFX, params: &mut [u8]) -> bool {
        let state = self.state.lock();
        match state.fx.get(&fx) {
            Some((_, _, stored)) if stored.len() == params.len() => {
                params.copy_from_slice(stored);
                self.result(true, BASS_OK)
            }
            Some(_) => self.result(false, BASS_ERROR_ILLPARAM),
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn fx_reset(&self, fx: HFX) -> bool {
        let known = self.state.lock().fx.contains_key(&fx);
        self.result(known, BASS_ERROR_HANDLE)
    }

    fn mixer(&self) -> Option<&dyn MixerApi> {
        self.addons.then_some(self as &dyn MixerApi)
    }

    fn encoder(&self) -> Option<&dyn EncodeApi> {
        self.addons.then_some(self as &dyn EncodeApi)
    }

    fn midi(&self) -> Option<&dyn MidiApi> {
        self.addons.then_some(self as &dyn MidiApi)
    }

    fn wasapi(&self) -> Option<&dyn WasapiApi> {
        self.addons.then_some(self as &dyn WasapiApi)
    }

    fn wma(&self) -> Option<&dyn WmaApi> {
        self.addons.then_some(self as &dyn WmaApi)
    }

    fn cd(&self) -> Option<&dyn CdApi> {
        self.addons.then_some(self as &dyn CdApi)
    }

    fn dshow(&self) -> Option<&dyn DshowApi> {
        self.addons.then_some(self as &dyn DshowApi)
    }
}

// ============================================================================
// Add-ons
// ============================================================================

impl MixerApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn stream_create(&self, freq: DWORD, chans: DWORD, flags: DWORD) -> HSTREAM {
        let mut channel = MockChannel::new(freq, chans, flags, BASS_CTYPE_STREAM_MIXER);
        channel.length = QWORD::MAX;
        let handle = self.state.lock().add_channel(channel);
        self.ok();
        handle
    }

    fn add_channel(&self, mixer: HSTREAM, channel: DWORD, flags: DWORD) -> bool {
        let mut state = self.state.lock();
        let is_mixer = state
            .channels
            .get(&mixer)
            .map_or(false, |c| c.ctype == BASS_CTYPE_STREAM_MIXER);
        if !is_mixer {
            return self.result(false, BASS_ERROR_HANDLE);
        }
        let Some(source) = state.channels.get_mut(&channel) else {
            return self.result(false, BASS_ERROR_HANDLE);
        };
        if source.flags & BASS_STREAM_DECODE == 0 {
            return self.result(false, BASS_ERROR_DECODE);
        }
        if source.mixer.is_some() {
            return self.result(false, BASS_ERROR_ALREADY);
        }
        source.mixer = Some(mixer);
        source.mixer_flags = flags;
        self.result(true, BASS_OK)
    }

    fn add_channel_ex(&self, mixer: HSTREAM, channel: DWORD, flags: DWORD, _start: QWORD, _length: QWORD) -> bool {
        MixerApi::add_channel(self, mixer, channel, flags)
    }

    fn remove_channel(&self, channel: DWORD) -> bool {
        self.with_channel(channel, false, |c| c.mixer.take().is_some())
    }

    fn channel_mixer(&self, channel: DWORD) -> HSTREAM {
        let mixer = self.state.lock().channels.get(&channel).and_then(|c| c.mixer);
        self.handle_or_fail(mixer, BASS_ERROR_HANDLE)
    }

    fn channel_flags(&self, channel: DWORD, flags: DWORD, mask: DWORD) -> DWORD {
        let mut state = self.state.lock();
        match state.channels.get_mut(&channel).filter(|c| c.mixer.is_some()) {
            Some(c) => {
                c.mixer_flags = (c.mixer_flags & !mask) | (flags & mask);
                self.ok();
                c.mixer_flags
            }
            None => {
                self.fail(BASS_ERROR_HANDLE);
                DWORD::MAX
            }
        }
    }

    fn channel_position(&self, channel: DWORD, mode: DWORD) -> QWORD {
        BassApi::channel_position(self, channel, mode)
    }

    fn channel_set_position(&self, channel: DWORD, pos: QWORD, mode: DWORD) -> bool {
        BassApi::channel_set_position(self, channel, pos, mode)
    }

    fn channel_level(&self, channel: DWORD) -> DWORD {
        BassApi::channel_level(self, channel)
    }

    unsafe fn channel_set_sync(
        &self,
        channel: DWORD,
        sync_type: DWORD,
        _param: QWORD,
        proc: Option<SyncProc>,
        user: *mut c_void,
    ) -> HSYNC {
        let mut state = self.state.lock();
        let plugged = state.channels.get(&channel).map_or(false, |c| c.mixer.is_some());
        if !plugged {
            self.fail(BASS_ERROR_HANDLE);
            return 0;
        }
        let Some(proc) = proc else {
            self.fail(BASS_ERROR_ILLPARAM);
            return 0;
        };
        let id = state.next_sync;
        state.next_sync += 1;
        state.syncs.insert(
            id,
            MockSync {
                channel,
                sync_type: sync_type & !SYNC_FLAG_MASK,
                flags: sync_type & SYNC_FLAG_MASK,
                proc,
                user: user as usize,
                mixer: true,
            },
        );
        self.ok();
        id
    }

    fn channel_remove_sync(&self, channel: DWORD, sync: HSYNC) -> bool {
        let mut state = self.state.lock();
        let owned = state.syncs.get(&sync).map_or(false, |s| s.channel == channel && s.mixer);
        if owned {
            state.syncs.remove(&sync);
        }
        self.result(owned, BASS_ERROR_HANDLE)
    }
}

impl MockApi {
    fn start_encoder(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        proc: Option<EncodeProc>,
        user: *mut c_void,
    ) -> HENCODE {
        let mut state = self.state.lock();
        if !state.channels.contains_key(&channel) {
            self.fail(BASS_ERROR_HANDLE);
            return 0;
        }
        if cmdline.map_or(false, |c| c.to_bytes().is_empty()) {
            self.fail(BASS_ERROR_FILEOPEN);
            return 0;
        }
        let handle = state.alloc_handle();
        state.encoders.insert(
            handle,
            MockEncoder {
                channel,
                cmdline: cmdline.map(|c| c.to_string_lossy().into_owned()),
                proc: proc.map(|p| (p, user as usize)),
                notify: None,
                paused: false,
                bytes_in: 0,
                bytes_out: 0,
                cast_server: None,
                cast_title: None,
                stats: None,
            },
        );
        self.ok();
        handle
    }
}

impl EncodeApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    unsafe fn start(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        _flags: DWORD,
        proc: Option<EncodeProc>,
        user: *mut c_void,
    ) -> HENCODE {
        self.start_encoder(channel, cmdline, proc, user)
    }

    unsafe fn start_limit(
        &self,
        channel: DWORD,
        cmdline: Option<&CStr>,
        _flags: DWORD,
        proc: Option<EncodeProc>,
        user: *mut c_void,
        _limit: DWORD,
    ) -> HENCODE {
        self.start_encoder(channel, cmdline, proc, user)
    }

    fn stop(&self, handle: DWORD) -> bool {
        let mut state = self.state.lock();
        let before = state.encoders.len();
        state.encoders.retain(|id, e| *id != handle && e.channel != handle);
        let stopped = state.encoders.len() != before;
        self.result(stopped, BASS_ERROR_HANDLE)
    }

    fn stop_ex(&self, handle: DWORD, _queue: bool) -> bool {
        EncodeApi::stop(self, handle)
    }

    fn set_paused(&self, handle: DWORD, paused: bool) -> bool {
        let mut state = self.state.lock();
        match state.encoders.get_mut(&handle) {
            Some(e) => {
                e.paused = paused;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn is_active(&self, handle: DWORD) -> DWORD {
        let state = self.state.lock();
        match state.encoders.get(&handle) {
            Some(e) if e.paused => BASS_ACTIVE_PAUSED,
            Some(_) => BASS_ACTIVE_PLAYING,
            None => BASS_ACTIVE_STOPPED,
        }
    }

    fn write(&self, handle: DWORD, data: &[u8]) -> bool {
        let proc = {
            let mut state = self.state.lock();
            let Some(encoder) = state.encoders.get_mut(&handle) else {
                return self.result(false, BASS_ERROR_HANDLE);
            };
            encoder.bytes_in += data.len() as QWORD;
            encoder.bytes_out += data.len() as QWORD;
            encoder.proc.map(|(p, u)| (p, u, encoder.channel))
        };
        if let Some((proc, user, channel)) = proc {
            unsafe {
                proc(
                    handle,
                    channel,
                    data.as_ptr() as *const c_void,
                    data.len() as DWORD,
                    user as *mut c_void,
                )
            };
        }
        self.result(true, BASS_OK)
    }

    unsafe fn set_notify(&self, handle: DWORD, proc: Option<EncodeNotifyProc>, user: *mut c_void) -> bool {
        let mut state = self.state.lock();
        match state.encoders.get_mut(&handle) {
            Some(e) => {
                e.notify = proc.map(|p| (p, user as usize));
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn count(&self, handle: DWORD, count: DWORD) -> QWORD {
        let state = self.state.lock();
        let Some(encoder) = state.encoders.get(&handle) else {
            self.fail(BASS_ERROR_HANDLE);
            return QWORD::MAX;
        };
        match count {
            BASS_ENCODE_COUNT_IN => encoder.bytes_in,
            BASS_ENCODE_COUNT_OUT => encoder.bytes_out,
            BASS_ENCODE_COUNT_CAST if encoder.cast_server.is_some() => encoder.bytes_out,
            _ => {
                self.fail(BASS_ERROR_NOTAVAIL);
                QWORD::MAX
            }
        }
    }

    fn set_channel(&self, handle: DWORD, channel: DWORD) -> bool {
        let mut state = self.state.lock();
        if !state.channels.contains_key(&channel) {
            return self.result(false, BASS_ERROR_HANDLE);
        }
        match state.encoders.get_mut(&handle) {
            Some(e) => {
                e.channel = channel;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn channel(&self, handle: HENCODE) -> DWORD {
        let channel = self.state.lock().encoders.get(&handle).map(|e| e.channel);
        self.handle_or_fail(channel, BASS_ERROR_HANDLE)
    }

    fn cast_init(&self, handle: HENCODE, request: &CastRequest<'_>) -> bool {
        if request.server.to_bytes().is_empty() {
            return self.result(false, BASS_ERROR_ILLPARAM);
        }
        if request.password.to_bytes() == b"wrong" {
            return self.result(false, BASS_ERROR_CAST_DENIED);
        }
        let mut state = self.state.lock();
        match state.encoders.get_mut(&handle) {
            Some(e) => {
                e.cast_server = Some(request.server.to_string_lossy().into_owned());
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn cast_set_title(&self, handle: HENCODE, title: &CStr, _url: Option<&CStr>) -> bool {
        let mut state = self.state.lock();
        match state.encoders.get_mut(&handle).filter(|e| e.cast_server.is_some()) {
            Some(e) => {
                e.cast_title = Some(title.to_string_lossy().into_owned());
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn cast_stats(&self, handle: HENCODE, stats_type: DWORD, _password: Option<&CStr>) -> Option<String> {
        let mut state = self.state.lock();
        let Some(encoder) = state.encoders.get_mut(&handle).filter(|e| e.cast_server.is_some()) else {
            self.fail(BASS_ERROR_HANDLE);
            return None;
        };
        let stats = cstring(&format!("<stats type=\"{}\"><listeners>3</listeners></stats>", stats_type));
        let text = stats.to_string_lossy().into_owned();
        encoder.stats = Some(stats);
        self.ok();
        Some(text)
    }
}

impl MidiApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn stream_create(&self, chans: DWORD, flags: DWORD, freq: DWORD) -> HSTREAM {
        if chans == 0 {
            self.fail(BASS_ERROR_ILLPARAM);
            return 0;
        }
        let freq = if freq == 0 { 44100 } else { freq };
        let handle = self
            .state
            .lock()
            .add_channel(MockChannel::new(freq, 2, flags, BASS_CTYPE_STREAM_MIDI));
        self.ok();
        handle
    }

    fn stream_create_file(&self, path: &FilePath, _offset: QWORD, _length: QWORD, flags: DWORD, freq: DWORD) -> HSTREAM {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        MidiApi::stream_create(self, 16, flags & !BASS_UNICODE, freq)
    }

    fn stream_event(&self, handle: HSTREAM, chan: DWORD, event: DWORD, param: DWORD) -> bool {
        self.with_channel(handle, false, |c| {
            c.midi_events.insert((chan, event), param);
            true
        })
    }

    fn stream_get_event(&self, handle: HSTREAM, chan: DWORD, event: DWORD) -> DWORD {
        self.with_channel(handle, DWORD::MAX, |c| {
            c.midi_events.get(&(chan, event)).copied().unwrap_or(0)
        })
    }

    fn stream_set_fonts(&self, handle: HSTREAM, fonts: &[BassMidiFont]) -> bool {
        let mut state = self.state.lock();
        if fonts.iter().any(|f| !state.fonts.contains_key(&f.font)) {
            return self.result(false, BASS_ERROR_HANDLE);
        }
        match state.channels.get_mut(&handle) {
            Some(c) => {
                c.midi_fonts = fonts.to_vec();
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn font_init(&self, path: &FilePath, _flags: DWORD) -> HSOUNDFONT {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        let name = path.to_string_lossy();
        let stem = std::path::Path::new(&name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut state = self.state.lock();
        let handle = state.alloc_handle();
        state.fonts.insert(
            handle,
            MockFont {
                name: cstring(&stem),
                copyright: cstring("(c) Mock"),
                comment: cstring(""),
                presets: 128,
            },
        );
        self.ok();
        handle
    }

    fn font_free(&self, font: HSOUNDFONT) -> bool {
        let removed = self.state.lock().fonts.remove(&font).is_some();
        self.result(removed, BASS_ERROR_HANDLE)
    }

    fn font_info(&self, font: HSOUNDFONT, info: &mut BassMidiFontInfo) -> bool {
        let state = self.state.lock();
        match state.fonts.get(&font) {
            Some(f) => {
                info.name = f.name.as_ptr();
                info.copyright = f.copyright.as_ptr();
                info.comment = f.comment.as_ptr();
                info.presets = f.presets;
                info.samsize = 1 << 20;
                info.samload = 0;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }
}

impl WasapiApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn device_info(&self, device: DWORD, info: &mut BassWasapiDeviceInfo) -> bool {
        let state = self.state.lock();
        match state.wasapi_devices.get(device as usize) {
            Some(d) => {
                info.name = d.name.as_ptr();
                info.id = d.id.as_ptr();
                info.device_type = d.device_type;
                info.flags = d.flags;
                if state.wasapi_initialized.contains(&device) {
                    info.flags |= BASS_DEVICE_INIT;
                }
                info.minperiod = 0.003;
                info.defperiod = 0.01;
                info.mixfreq = d.mixfreq;
                info.mixchans = d.mixchans;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_DEVICE),
        }
    }

    unsafe fn init(
        &self,
        device: i32,
        _freq: DWORD,
        _chans: DWORD,
        _flags: DWORD,
        _buffer: f32,
        _period: f32,
        proc: Option<WasapiProc>,
        user: *mut c_void,
    ) -> bool {
        let mut state = self.state.lock();
        let device = if device < 0 { 0 } else { device as DWORD };
        if device as usize >= state.wasapi_devices.len() {
            return self.result(false, BASS_ERROR_DEVICE);
        }
        if !state.wasapi_initialized.insert(device) {
            return self.result(false, BASS_ERROR_ALREADY);
        }
        state.wasapi_devices[device as usize].proc = proc.map(|p| (p, user as usize));
        state.current_wasapi = Some(device);
        self.result(true, BASS_OK)
    }

    fn free(&self) -> bool {
        let mut state = self.state.lock();
        match state.current_wasapi.take() {
            Some(device) => {
                state.wasapi_initialized.remove(&device);
                let d = &mut state.wasapi_devices[device as usize];
                d.proc = None;
                d.started = false;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn set_device(&self, device: DWORD) -> bool {
        let mut state = self.state.lock();
        if !state.wasapi_initialized.contains(&device) {
            return self.result(false, BASS_ERROR_INIT);
        }
        state.current_wasapi = Some(device);
        self.result(true, BASS_OK)
    }

    fn current_device(&self) -> DWORD {
        let current = self.state.lock().current_wasapi;
        current.map_or_else(
            || {
                self.fail(BASS_ERROR_INIT);
                DWORD::MAX
            },
            |d| {
                self.ok();
                d
            },
        )
    }

    fn start(&self) -> bool {
        let mut state = self.state.lock();
        match state.current_wasapi {
            Some(device) => {
                state.wasapi_devices[device as usize].started = true;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn stop(&self, _reset: bool) -> bool {
        let mut state = self.state.lock();
        match state.current_wasapi {
            Some(device) => {
                state.wasapi_devices[device as usize].started = false;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn is_started(&self) -> bool {
        let state = self.state.lock();
        state
            .current_wasapi
            .map_or(false, |d| state.wasapi_devices[d as usize].started)
    }

    fn volume(&self, _curve: DWORD) -> f32 {
        let state = self.state.lock();
        match state.current_wasapi {
            Some(device) => {
                self.ok();
                state.wasapi_devices[device as usize].volume
            }
            None => {
                self.fail(BASS_ERROR_INIT);
                -1.0
            }
        }
    }

    fn set_volume(&self, _curve: DWORD, volume: f32) -> bool {
        let mut state = self.state.lock();
        match state.current_wasapi {
            Some(device) => {
                state.wasapi_devices[device as usize].volume = volume;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn mute(&self, _mode: DWORD) -> BOOL {
        let state = self.state.lock();
        match state.current_wasapi {
            Some(device) => {
                self.ok();
                from_bool(state.wasapi_devices[device as usize].mute)
            }
            None => {
                self.fail(BASS_ERROR_INIT);
                -1
            }
        }
    }

    fn set_mute(&self, _mode: DWORD, mute: bool) -> bool {
        let mut state = self.state.lock();
        match state.current_wasapi {
            Some(device) => {
                state.wasapi_devices[device as usize].mute = mute;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_INIT),
        }
    }

    fn level(&self) -> DWORD {
        let initialized = self.state.lock().current_wasapi.is_some();
        if initialized {
            self.ok();
            0
        } else {
            self.fail(BASS_ERROR_INIT);
            DWORD::MAX
        }
    }

    unsafe fn set_notify(&self, proc: Option<WasapiNotifyProc>, user: *mut c_void) -> bool {
        self.state.lock().wasapi_notify = proc.map(|p| (p, user as usize));
        self.result(true, BASS_OK)
    }
}

impl WmaApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn stream_create_file(&self, path: &FilePath, _offset: QWORD, _length: QWORD, flags: DWORD) -> HSTREAM {
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        let handle = self
            .state
            .lock()
            .add_channel(MockChannel::new(44100, 2, flags & !BASS_UNICODE, BASS_CTYPE_STREAM_WMA));
        self.ok();
        handle
    }

    fn encode_open_file(&self, freq: DWORD, chans: DWORD, flags: DWORD, bitrate: DWORD, path: &FilePath) -> HWMENCODE {
        let rates = self.encode_rates(freq, chans, flags).unwrap_or_default();
        if !rates.contains(&bitrate) {
            self.fail(BASS_ERROR_NOTAVAIL);
            return 0;
        }
        if let Some(code) = Self::path_fails(path) {
            self.fail(code);
            return 0;
        }
        let mut state = self.state.lock();
        let handle = state.alloc_handle();
        state.wma_encoders.insert(
            handle,
            MockWma {
                tags: Vec::new(),
                written: 0,
            },
        );
        self.ok();
        handle
    }

    fn encode_write(&self, handle: HWMENCODE, data: &[u8]) -> bool {
        let mut state = self.state.lock();
        match state.wma_encoders.get_mut(&handle) {
            Some(w) => {
                w.written += data.len();
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn encode_close(&self, handle: HWMENCODE) -> bool {
        let removed = self.state.lock().wma_encoders.remove(&handle).is_some();
        self.result(removed, BASS_ERROR_HANDLE)
    }

    fn encode_set_tag(&self, handle: HWMENCODE, tag: &CStr, value: &CStr, form: DWORD) -> bool {
        let mut state = self.state.lock();
        match state.wma_encoders.get_mut(&handle) {
            Some(w) => {
                w.tags.push((
                    tag.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                    form,
                ));
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_HANDLE),
        }
    }

    fn encode_rates(&self, freq: DWORD, chans: DWORD, _flags: DWORD) -> Option<Vec<DWORD>> {
        if (freq == 44100 || freq == 48000) && (chans == 1 || chans == 2) {
            self.ok();
            Some(vec![64000, 128000, 192000])
        } else {
            self.fail(BASS_ERROR_FORMAT);
            None
        }
    }
}

impl CdApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn info(&self, drive: DWORD, info: &mut BassCdInfo) -> bool {
        let state = self.state.lock();
        match state.cd_drives.get(drive as usize) {
            Some(d) => {
                info.vendor = d.vendor.as_ptr();
                info.product = d.product.as_ptr();
                info.rev = d.rev.as_ptr();
                info.letter = d.letter;
                info.canopen = TRUE;
                info.canlock = TRUE;
                info.maxspeed = 7056;
                info.cache = 2048;
                info.cdtext = TRUE;
                self.result(true, BASS_OK)
            }
            None => self.result(false, BASS_ERROR_DEVICE),
        }
    }

    fn is_ready(&self, drive: DWORD) -> bool {
        self.state.lock().cd_drives.get(drive as usize).map_or(false, |d| d.ready)
    }

    fn door(&self, drive: DWORD, action: DWORD) -> bool {
        let mut state = self.state.lock();
        let Some(d) = state.cd_drives.get_mut(drive as usize) else {
            return self.result(false, BASS_ERROR_DEVICE);
        };
        match action {
            BASS_CD_DOOR_OPEN if d.locked => return self.result(false, BASS_ERROR_NOTAVAIL),
            BASS_CD_DOOR_OPEN => {
                d.open = true;
                d.ready = false;
            }
            BASS_CD_DOOR_CLOSE => {
                d.open = false;
                d.ready = true;
            }
            BASS_CD_DOOR_LOCK => d.locked = true,
            BASS_CD_DOOR_UNLOCK => d.locked = false,
            _ => return self.result(false, BASS_ERROR_ILLPARAM),
        }
        self.result(true, BASS_OK)
    }

    fn door_is_open(&self, drive: DWORD) -> bool {
        self.state.lock().cd_drives.get(drive as usize).map_or(false, |d| d.open)
    }

    fn door_is_locked(&self, drive: DWORD) -> bool {
        self.state.lock().cd_drives.get(drive as usize).map_or(false, |d| d.locked)
    }

    fn tracks(&self, drive: DWORD) -> DWORD {
        let state = self.state.lock();
        match state.cd_drives.get(drive as usize) {
            Some(d) if d.ready => {
                self.ok();
                d.tracks.len() as DWORD
            }
            Some(_) => {
                self.fail(BASS_ERROR_NOTAVAIL);
                DWORD::MAX
            }
            None => {
                self.fail(BASS_ERROR_DEVICE);
                DWORD::MAX
            }
        }
    }

    fn track_length(&self, drive: DWORD, track: DWORD) -> DWORD {
        let state = self.state.lock();
        match state.cd_drives.get(drive as usize).and_then(|d| d.tracks.get(track as usize)) {
            Some(length) => {
                self.ok();
                *length
            }
            None => {
                self.fail(BASS_ERROR_CDTRACK);
                DWORD::MAX
            }
        }
    }

    fn id(&self, drive: DWORD, id: DWORD) -> *const c_char {
        let state = self.state.lock();
        match state.cd_drives.get(drive as usize).and_then(|d| d.ids.get(&id)) {
            Some(bytes) => {
                self.ok();
                bytes.as_ptr() as *const c_char
            }
            None => {
                self.fail(BASS_ERROR_NOTAVAIL);
                std::ptr::null()
            }
        }
    }

    fn stream_create(&self, drive: DWORD, track: DWORD, flags: DWORD) -> HSTREAM {
        let length = self.track_length(drive, track);
        if length == DWORD::MAX {
            return 0;
        }
        let mut channel = MockChannel::new(44100, 2, flags, BASS_CTYPE_STREAM_CD);
        channel.length = length as QWORD;
        let handle = self.state.lock().add_channel(channel);
        self.ok();
        handle
    }

    fn release(&self, drive: DWORD) -> bool {
        let known = (drive as usize) < self.state.lock().cd_drives.len();
        self.result(known, BASS_ERROR_DEVICE)
    }
}

impl DshowApi for MockApi {
    fn version(&self) -> DWORD {
        MOCK_VERSION
    }

    fn error_code(&self) -> i32 {
        self.dshow_error.load(Ordering::SeqCst)
    }

    fn init(&self, _flags: DWORD) -> bool {
        self.state.lock().dshow_initialized = true;
        self.dshow_error.store(BASS_OK, Ordering::SeqCst);
        true
    }

    fn free(&self) -> bool {
        self.state.lock().dshow_initialized = false;
        true
    }

    fn stream_create_file(&self, path: &FilePath, _pos: DWORD, flags: DWORD) -> HSTREAM {
        if !self.state.lock().dshow_initialized {
            self.dshow_error.store(BASS_ERROR_INIT, Ordering::SeqCst);
            return 0;
        }
        if let Some(code) = Self::path_fails(path) {
            self.dshow_error.store(code, Ordering::SeqCst);
            return 0;
        }
        let handle = self
            .state
            .lock()
            .add_channel(MockChannel::new(48000, 2, flags & !BASS_UNICODE, BASS_CTYPE_STREAM));
        self.dshow_error.store(BASS_OK, Ordering::SeqCst);
        handle
    }
}
