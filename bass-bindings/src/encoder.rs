//! Encoders on a channel (bassenc), including Shoutcast/Icecast casting.
//!
//! An [`Encoder`] owns its ENCODEPROC and notification closures. Native
//! code frees an encoder together with its channel; the notification
//! marks the wrapper disposed before any handler runs.

use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::api::{self, BassApi, CastRequest, EncodeApi};
use crate::callbacks::{encode_notify_trampoline, encode_trampoline, CallbackCell, PinnedCallback};
use crate::channel::{ActiveState, Channel};
use crate::error::{BassError, Result};
use crate::events::{Delivery, HandlerList};
use crate::ffi::enc::*;
use crate::ffi::*;

/// Encoder status notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeNotify {
    /// The encoder process died
    EncoderDied,
    /// The cast server connection died
    CastDied,
    /// The server connection died
    ServerDied,
    /// The encoder was freed
    Freed,
    /// Cast data could not be sent in time
    CastTimeout,
    /// The queue is full
    QueueFull,
    Other(DWORD),
}

impl EncodeNotify {
    pub fn from_raw(status: DWORD) -> Self {
        match status {
            BASS_ENCODE_NOTIFY_ENCODER => EncodeNotify::EncoderDied,
            BASS_ENCODE_NOTIFY_CAST => EncodeNotify::CastDied,
            BASS_ENCODE_NOTIFY_SERVER => EncodeNotify::ServerDied,
            BASS_ENCODE_NOTIFY_FREE => EncodeNotify::Freed,
            BASS_ENCODE_NOTIFY_CAST_TIMEOUT => EncodeNotify::CastTimeout,
            BASS_ENCODE_NOTIFY_QUEUE_FULL => EncodeNotify::QueueFull,
            other => EncodeNotify::Other(other),
        }
    }
}

/// Byte counters of BASS_Encode_GetCount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeCount {
    In,
    Out,
    Cast,
    Queue,
    QueueLimit,
    QueueFail,
}

impl EncodeCount {
    fn raw(self) -> DWORD {
        match self {
            EncodeCount::In => BASS_ENCODE_COUNT_IN,
            EncodeCount::Out => BASS_ENCODE_COUNT_OUT,
            EncodeCount::Cast => BASS_ENCODE_COUNT_CAST,
            EncodeCount::Queue => BASS_ENCODE_COUNT_QUEUE,
            EncodeCount::QueueLimit => BASS_ENCODE_COUNT_QUEUE_LIMIT,
            EncodeCount::QueueFail => BASS_ENCODE_COUNT_QUEUE_FAIL,
        }
    }
}

/// Server statistics flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastStats {
    Shoutcast,
    /// Icecast mount statistics
    Icecast,
    /// Icecast server statistics (needs the admin password)
    IcecastServer,
}

impl CastStats {
    fn raw(self) -> DWORD {
        match self {
            CastStats::Shoutcast => BASS_ENCODE_STATS_SHOUT,
            CastStats::Icecast => BASS_ENCODE_STATS_ICE,
            CastStats::IcecastServer => BASS_ENCODE_STATS_ICESERV,
        }
    }
}

/// Shoutcast/Icecast server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastConfig {
    /// "host:port" (Shoutcast) or "host:port/mount" (Icecast)
    pub server: String,
    pub password: String,
    /// MIME type, e.g. `BASS_ENCODE_TYPE_MP3`
    pub content: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    /// Extra HTTP headers, each ending in "\r\n"
    pub headers: Option<String>,
    /// kbps, 0 = unknown
    pub bitrate: u32,
    /// List the stream in the server directory
    pub public: bool,
}

impl CastConfig {
    pub fn new(server: impl Into<String>, password: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            password: password.into(),
            content: content.into(),
            name: None,
            url: None,
            genre: None,
            description: None,
            headers: None,
            bitrate: 0,
            public: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn bitrate(mut self, kbps: u32) -> Self {
        self.bitrate = kbps;
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }
}

/// ENCODEPROC type for encoders without a callback
type RawOutput = fn(HENCODE, DWORD, &[u8]);

fn optional(value: &Option<String>) -> Result<Option<CString>> {
    Ok(value.as_deref().map(CString::new).transpose()?)
}

/// An encoder fed by a channel; stopped on drop.
pub struct Encoder {
    api: Arc<dyn BassApi>,
    handle: HENCODE,
    disposed: Arc<AtomicBool>,
    notify: Arc<HandlerList<EncodeNotify>>,
    _proc: Option<PinnedCallback>,
    _notify_proc: Option<PinnedCallback>,
}

impl Encoder {
    /// Start a command-line encoder (`cmdline` runs with the channel's
    /// audio on its stdin).
    pub fn start(channel: &Channel, cmdline: &str, flags: DWORD) -> Result<Self> {
        let cmdline = CString::new(cmdline)?;
        Self::launch(channel, Some(cmdline.as_c_str()), flags, None, None::<RawOutput>)
    }

    /// Like [`Encoder::start`], delaying the channel when the encoder
    /// falls more than `limit` bytes per second behind.
    pub fn start_limited(channel: &Channel, cmdline: &str, flags: DWORD, limit: u32) -> Result<Self> {
        let cmdline = CString::new(cmdline)?;
        Self::launch(channel, Some(cmdline.as_c_str()), flags | BASS_ENCODE_LIMIT, Some(limit), None::<RawOutput>)
    }

    /// Start an encoder whose output goes to `f`. Without a command line
    /// `f` receives the channel's PCM data (written as WAV unless
    /// `BASS_ENCODE_PCM` or `BASS_ENCODE_NOHEAD` is set).
    pub fn with_callback<F>(channel: &Channel, cmdline: Option<&str>, flags: DWORD, mut f: F) -> Result<Self>
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        let cmdline = cmdline.map(CString::new).transpose()?;
        let output = move |_: HENCODE, _: DWORD, data: &[u8]| f(data);
        Self::launch(channel, cmdline.as_deref(), flags, None, Some(output))
    }

    fn launch<F>(channel: &Channel, cmdline: Option<&CStr>, flags: DWORD, limit: Option<u32>, f: Option<F>) -> Result<Self>
    where
        F: FnMut(HENCODE, DWORD, &[u8]) + Send + 'static,
    {
        let api = channel.api();
        let enc = api::require_encoder(&**api)?;
        let source = channel.live()?;

        let cell = f.map(CallbackCell::new);
        let (proc, user) = match &cell {
            Some(cell) => (Some(encode_trampoline::<F> as EncodeProc), cell.user_ptr()),
            None => (None, ptr::null_mut()),
        };
        let handle = unsafe {
            match limit {
                Some(limit) => enc.start_limit(source, cmdline, flags, proc, user, limit),
                None => enc.start(source, cmdline, flags, proc, user),
            }
        };
        let handle = api::check_handle(&**api, handle)?;
        debug!("Encoder {:#x} started on {:#x}", handle, source);

        let mut encoder = Self {
            api: api.clone(),
            handle,
            disposed: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(HandlerList::new()),
            _proc: cell.map(|cell| cell as PinnedCallback),
            _notify_proc: None,
        };
        encoder.install_notify(enc, channel.delivery().clone());
        Ok(encoder)
    }

    fn install_notify(&mut self, enc: &dyn EncodeApi, delivery: Delivery) {
        let disposed = self.disposed.clone();
        let handlers = self.notify.clone();
        let on_status = move |handle: HENCODE, status: DWORD| {
            let event = EncodeNotify::from_raw(status);
            if event == EncodeNotify::Freed && disposed.swap(true, Ordering::SeqCst) {
                return;
            }
            debug!("Encoder {:#x}: {:?}", handle, event);
            let handlers = handlers.clone();
            delivery.deliver(Box::new(move || handlers.fire(event)));
        };
        let cell = CallbackCell::new(on_status);
        let ok = unsafe { enc.set_notify(self.handle, Some(notify_trampoline_for(&cell)), cell.user_ptr()) };
        if ok {
            self._notify_proc = Some(cell as PinnedCallback);
        } else {
            warn!(
                "Encoder {:#x} notification not installed (error {})",
                self.handle,
                self.api.error_code()
            );
        }
    }

    pub fn handle(&self) -> HENCODE {
        self.handle
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn live(&self) -> Result<(&dyn EncodeApi, HENCODE)> {
        if self.is_disposed() {
            return Err(BassError::Disposed { handle: self.handle });
        }
        Ok((api::require_encoder(&*self.api)?, self.handle))
    }

    fn check(&self, ok: bool) -> Result<()> {
        api::check(&*self.api, ok)
    }

    /// The channel currently feeding the encoder.
    pub fn channel(&self) -> Result<DWORD> {
        let (enc, handle) = self.live()?;
        api::check_handle(&*self.api, enc.channel(handle))
    }

    /// Move the encoder to another channel.
    pub fn set_channel(&self, channel: &Channel) -> Result<()> {
        let (enc, handle) = self.live()?;
        self.check(enc.set_channel(handle, channel.live()?))
    }

    pub fn state(&self) -> Result<ActiveState> {
        let (enc, handle) = self.live()?;
        Ok(ActiveState::from_raw(enc.is_active(handle)))
    }

    pub fn set_paused(&self, paused: bool) -> Result<()> {
        let (enc, handle) = self.live()?;
        self.check(enc.set_paused(handle, paused))
    }

    /// Feed sample data directly (for encoders on decoding channels).
    pub fn write(&self, data: &[u8]) -> Result<()> {
        let (enc, handle) = self.live()?;
        self.check(enc.write(handle, data))
    }

    pub fn count(&self, counter: EncodeCount) -> Result<u64> {
        let (enc, handle) = self.live()?;
        let value = enc.count(handle, counter.raw());
        if value == QWORD::MAX {
            return Err(api::last_error(&*self.api));
        }
        Ok(value)
    }

    /// Called for every status notification, including the final `Freed`.
    pub fn on_notify(&self, handler: impl FnMut(EncodeNotify) + Send + 'static) {
        self.notify.push(handler);
    }

    /// Stop and free the encoder. Returns false if it was already gone.
    pub fn stop(&self) -> bool {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Some(enc) = self.api.encoder() {
            enc.stop(self.handle);
        }
        debug!("Encoder {:#x} stopped", self.handle);
        true
    }

    // ========================================================================
    // Casting
    // ========================================================================

    /// Connect to a Shoutcast/Icecast server and send the encoder output.
    pub fn cast_init(&self, config: &CastConfig) -> Result<()> {
        let (enc, handle) = self.live()?;
        let server = CString::new(config.server.as_str())?;
        let password = CString::new(config.password.as_str())?;
        let content = CString::new(config.content.as_str())?;
        let name = optional(&config.name)?;
        let url = optional(&config.url)?;
        let genre = optional(&config.genre)?;
        let description = optional(&config.description)?;
        let headers = optional(&config.headers)?;

        let request = CastRequest {
            server: &server,
            password: &password,
            content: &content,
            name: name.as_deref(),
            url: url.as_deref(),
            genre: genre.as_deref(),
            description: description.as_deref(),
            headers: headers.as_deref(),
            bitrate: config.bitrate,
            public: config.public,
        };
        self.check(enc.cast_init(handle, &request))?;
        debug!("Encoder {:#x} casting to {}", handle, config.server);
        Ok(())
    }

    /// Update the stream title shown by the server.
    pub fn cast_set_title(&self, title: &str, url: Option<&str>) -> Result<()> {
        let (enc, handle) = self.live()?;
        let title = CString::new(title)?;
        let url = url.map(CString::new).transpose()?;
        self.check(enc.cast_set_title(handle, &title, url.as_deref()))
    }

    /// Server statistics XML.
    pub fn cast_stats(&self, kind: CastStats, password: Option<&str>) -> Result<String> {
        let (enc, handle) = self.live()?;
        let password = password.map(CString::new).transpose()?;
        enc.cast_stats(handle, kind.raw(), password.as_deref())
            .ok_or_else(|| api::last_error(&*self.api))
    }
}

fn notify_trampoline_for<F>(_: &CallbackCell<F>) -> EncodeNotifyProc
where
    F: FnMut(HENCODE, DWORD) + Send + 'static,
{
    encode_notify_trampoline::<F>
}

impl Drop for Encoder {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("handle", &format_args!("{:#x}", self.handle))
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
