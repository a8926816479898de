//! Bindings for the BASS audio library and its add-ons.
//!
//! - `ffi`: raw declarations (function tables, struct mirrors, flags)
//! - `api`: object-safe traits over the native exports
//! - wrappers (`Channel`, `Mixer`, `Encoder`, device wrappers, ...) that
//!   own a native handle and the closures registered on it
//!
//! Everything hangs off a [`Bass`] context: it owns the loaded libraries,
//! the reference holder for raw-handle callbacks, the device registries and
//! the event delivery mode.

pub mod api;
pub mod callbacks;
pub mod channel;
pub mod config;
pub mod devices;
pub mod dshow;
pub mod encoder;
pub mod error;
pub mod events;
pub mod ffi;
pub mod fx;
pub mod midi;
pub mod mixer;
pub mod native;
pub mod stream;
pub mod sync;
pub mod tags;
pub mod wma;

#[cfg(test)]
mod mock;

pub use api::BassApi;
pub use callbacks::{CallbackKey, CallbackTable, PinnedCallback};
pub use channel::{ActiveState, Channel, ChannelEvent, ChannelInfo};
pub use config::{Addon, ConfigOption, LoadOptions};
pub use devices::{
    CdDrive, DeviceInfo, DeviceRegistry, DeviceType, PlaybackDevice, RecordDevice, Recording, WasapiDevice,
    WasapiNotify,
};
pub use encoder::{CastConfig, EncodeNotify, Encoder};
pub use error::{BassError, DeviceKind, ErrorCode, Result};
pub use events::{Delivery, EventPump, EventSender};
pub use fx::{Effect, EffectParameters};
pub use midi::{FontBinding, MidiEvent, MidiStream, SoundFont};
pub use mixer::Mixer;
pub use stream::{PushStream, Sample};
pub use sync::{DspGuard, SyncGuard, SyncType};
pub use tags::{TagType, Tags};
pub use wma::WmaEncoder;

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;

use callbacks::{dsp_trampoline, sync_trampoline, CallbackCell};
use devices::DeviceContext;
use ffi::*;
use native::NativeApi;

/// The loaded engine and everything that lives as long as it does.
pub struct Bass {
    api: Arc<dyn BassApi>,
    delivery: Delivery,
    pump: Mutex<Option<EventPump>>,
    callbacks: CallbackTable,
    playback: DeviceRegistry<PlaybackDevice>,
    record: DeviceRegistry<RecordDevice>,
    wasapi: Arc<DeviceRegistry<WasapiDevice>>,
    cd: DeviceRegistry<CdDrive>,
    wasapi_notify: Mutex<Option<PinnedCallback>>,
}

impl Bass {
    /// Load the native libraries described by `options`.
    pub fn load(options: &LoadOptions) -> Result<Self> {
        let api: Arc<dyn BassApi> = Arc::new(NativeApi::load(options)?);

        let (delivery, pump) = match options.event_queue {
            Some(capacity) => {
                let (sender, pump) = events::queue(capacity);
                (Delivery::Queued(sender), Some(pump))
            }
            None => (Delivery::Immediate, None),
        };

        let bass = Self::build(api, delivery, pump);
        for &(option, value) in &options.config {
            bass.set_config(option, value)?;
        }
        Ok(bass)
    }

    /// Build a context over an existing API implementation.
    pub fn with_api(api: Arc<dyn BassApi>, delivery: Delivery) -> Self {
        Self::build(api, delivery, None)
    }

    fn build(api: Arc<dyn BassApi>, delivery: Delivery, pump: Option<EventPump>) -> Self {
        let ctx = DeviceContext {
            api: api.clone(),
            delivery: delivery.clone(),
        };
        let wasapi = Arc::new(DeviceRegistry::new(ctx.clone()));

        let wasapi_notify = if api.wasapi().is_some() {
            match devices::install_wasapi_notify(&*api, &wasapi) {
                Ok(cell) => Some(cell),
                Err(e) => {
                    warn!("WASAPI device notifications unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            callbacks: CallbackTable::new(api.clone()),
            playback: DeviceRegistry::new(ctx.clone()),
            record: DeviceRegistry::new(ctx.clone()),
            cd: DeviceRegistry::new(ctx),
            wasapi,
            wasapi_notify: Mutex::new(wasapi_notify),
            pump: Mutex::new(pump),
            delivery,
            api,
        }
    }

    pub fn api(&self) -> &Arc<dyn BassApi> {
        &self.api
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// The pump for queued delivery. Returned once; `None` afterwards and
    /// when events are delivered immediately.
    pub fn take_event_pump(&self) -> Option<EventPump> {
        self.pump.lock().take()
    }

    /// Reference holder for closures registered on raw handles.
    pub fn callbacks(&self) -> &CallbackTable {
        &self.callbacks
    }

    /// Core library version (`0x02041100` = 2.4.17.0).
    pub fn version(&self) -> u32 {
        self.api.version()
    }

    // ------------------------------------------------------------------
    // Devices
    // ------------------------------------------------------------------

    pub fn playback(&self) -> &DeviceRegistry<PlaybackDevice> {
        &self.playback
    }

    pub fn record(&self) -> &DeviceRegistry<RecordDevice> {
        &self.record
    }

    pub fn wasapi(&self) -> &DeviceRegistry<WasapiDevice> {
        &self.wasapi
    }

    pub fn cd_drives(&self) -> &DeviceRegistry<CdDrive> {
        &self.cd
    }

    // ------------------------------------------------------------------
    // Configuration and plugins
    // ------------------------------------------------------------------

    pub fn set_config(&self, option: ConfigOption, value: DWORD) -> Result<()> {
        api::check(&*self.api, self.api.set_config(option.raw(), value))?;
        debug!("Config {:?} = {}", option, value);
        Ok(())
    }

    pub fn config(&self, option: ConfigOption) -> Result<DWORD> {
        let value = self.api.config(option.raw());
        if value == DWORD::MAX {
            return Err(api::last_error(&*self.api));
        }
        Ok(value)
    }

    /// Load a format plugin (BASS_PluginLoad).
    pub fn load_plugin(&self, path: impl AsRef<Path>) -> Result<HPLUGIN> {
        let path = api::file_path(path.as_ref())?;
        let plugin = api::check_handle(&*self.api, self.api.plugin_load(&path))?;
        debug!("Plugin {} loaded as {:#x}", path.to_string_lossy(), plugin);
        Ok(plugin)
    }

    pub fn free_plugin(&self, plugin: HPLUGIN) -> Result<()> {
        api::check(&*self.api, self.api.plugin_free(plugin))
    }

    // ------------------------------------------------------------------
    // Output of the current device
    // ------------------------------------------------------------------

    /// Master output volume, 0.0 to 1.0.
    pub fn master_volume(&self) -> Result<f32> {
        let volume = self.api.volume();
        if volume < 0.0 {
            return Err(api::last_error(&*self.api));
        }
        Ok(volume)
    }

    pub fn set_master_volume(&self, volume: f32) -> Result<()> {
        api::check(&*self.api, self.api.set_volume(volume.clamp(0.0, 1.0)))
    }

    pub fn start(&self) -> Result<()> {
        api::check(&*self.api, self.api.start())
    }

    pub fn stop(&self) -> Result<()> {
        api::check(&*self.api, self.api.stop())
    }

    pub fn pause(&self) -> Result<()> {
        api::check(&*self.api, self.api.pause())
    }

    // ------------------------------------------------------------------
    // Raw-handle callbacks, kept alive by the reference holder
    // ------------------------------------------------------------------

    /// Set a sync on a raw handle. The closure lives until
    /// [`Bass::remove_sync`] or until the handle is freed.
    pub fn set_sync<F>(&self, handle: DWORD, sync_type: SyncType, flags: DWORD, f: F) -> Result<HSYNC>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        self.pin_sync(handle, sync_type, flags, f, SyncTarget::Channel)
    }

    fn pin_sync<F>(&self, owner: DWORD, sync_type: SyncType, flags: DWORD, mut f: F, target: SyncTarget) -> Result<HSYNC>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        let (ty, param) = sync_type.raw();
        let key = target.key();
        if ty != BASS_SYNC_FREE {
            let (sync, cell) = self.register_sync(owner, ty | flags, param, f, target)?;
            self.callbacks.add(owner, key(sync), Some(cell));
            return Ok(sync);
        }

        // The owner's free hook may run before this sync does.
        let releaser = self.callbacks.releaser();
        let releasing = move |sync: HSYNC, channel: DWORD, data: DWORD| {
            let _release = releaser.release_on_exit(owner, key(sync));
            f(sync, channel, data)
        };
        let (sync, cell) = self.register_sync(owner, ty | flags, param, releasing, target)?;
        self.callbacks.add_self_released(owner, key(sync), cell);
        Ok(sync)
    }

    fn register_sync<F>(
        &self,
        owner: DWORD,
        ty: DWORD,
        param: QWORD,
        f: F,
        target: SyncTarget,
    ) -> Result<(HSYNC, PinnedCallback)>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        let cell = CallbackCell::new(f);
        let sync = match target {
            SyncTarget::Channel => unsafe {
                self.api
                    .channel_set_sync(owner, ty, param, Some(sync_trampoline::<F>), cell.user_ptr())
            },
            SyncTarget::MixerSource => unsafe {
                api::require_mixer(&*self.api)?.channel_set_sync(
                    owner,
                    ty,
                    param,
                    Some(sync_trampoline::<F>),
                    cell.user_ptr(),
                )
            },
        };
        let sync = api::check_handle(&*self.api, sync)?;
        Ok((sync, cell as PinnedCallback))
    }

    /// Remove a sync set with [`Bass::set_sync`]. May be called from inside
    /// the sync's own closure.
    pub fn remove_sync(&self, handle: DWORD, sync: HSYNC) -> Result<()> {
        let ok = self.api.channel_remove_sync(handle, sync);
        self.callbacks.remove(handle, CallbackKey::Sync(sync));
        api::check(&*self.api, ok)
    }

    /// Insert a DSP on a raw handle; `f(channel, samples)`.
    pub fn set_dsp<F>(&self, handle: DWORD, priority: i32, f: F) -> Result<HDSP>
    where
        F: FnMut(DWORD, &mut [u8]) + Send + 'static,
    {
        let cell = CallbackCell::new(f);
        let dsp = unsafe {
            self.api
                .channel_set_dsp(handle, Some(dsp_trampoline::<F>), cell.user_ptr(), priority)
        };
        let dsp = api::check_handle(&*self.api, dsp)?;
        self.callbacks
            .add(handle, CallbackKey::Dsp(dsp), Some(cell as PinnedCallback));
        Ok(dsp)
    }

    pub fn remove_dsp(&self, handle: DWORD, dsp: HDSP) -> Result<()> {
        let ok = self.api.channel_remove_dsp(handle, dsp);
        self.callbacks.remove(handle, CallbackKey::Dsp(dsp));
        api::check(&*self.api, ok)
    }

    /// Create a user stream fed by `f(buffer) -> bytes written`
    /// (`| BASS_STREAMPROC_END` to end). Returns the raw handle; the
    /// closure is released when the stream is freed.
    pub fn create_stream<F>(&self, freq: u32, chans: u32, flags: DWORD, f: F) -> Result<HSTREAM>
    where
        F: FnMut(&mut [u8]) -> DWORD + Send + 'static,
    {
        let (handle, proc) = stream::user_stream(&*self.api, freq, chans, flags, f)?;
        self.callbacks.add(handle, CallbackKey::Stream, Some(proc));
        Ok(handle)
    }

    /// Sync on a mixer source, timed against the mixer's output.
    pub fn mixer_set_sync<F>(&self, source: DWORD, sync_type: SyncType, flags: DWORD, f: F) -> Result<HSYNC>
    where
        F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
    {
        self.pin_sync(source, sync_type, flags, f, SyncTarget::MixerSource)
    }

    pub fn mixer_remove_sync(&self, source: DWORD, sync: HSYNC) -> Result<()> {
        let mixer = api::require_mixer(&*self.api)?;
        let ok = mixer.channel_remove_sync(source, sync);
        self.callbacks.remove(source, CallbackKey::MixerSync(sync));
        api::check(&*self.api, ok)
    }
}

#[derive(Clone, Copy)]
enum SyncTarget {
    Channel,
    MixerSource,
}

impl SyncTarget {
    fn key(self) -> fn(HSYNC) -> CallbackKey {
        match self {
            SyncTarget::Channel => CallbackKey::Sync,
            SyncTarget::MixerSource => CallbackKey::MixerSync,
        }
    }
}

impl Drop for Bass {
    fn drop(&mut self) {
        if let Some(cell) = self.wasapi_notify.lock().take() {
            devices::remove_wasapi_notify(&*self.api);
            drop(cell);
        }
        self.wasapi.clear();
        self.playback.clear();
        self.record.clear();
        self.cd.clear();
        debug!("BASS context released");
    }
}

impl std::fmt::Debug for Bass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bass")
            .field("delivery", &self.delivery)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
