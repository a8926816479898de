//! WASAPI devices (basswasapi).
//!
//! basswasapi calls act on the current device, like the core output
//! calls, so each operation selects its device first. The WASAPIPROC
//! closure given to [`WasapiDevice::init`] is owned by the wrapper and
//! released after the device is freed.

use std::ptr;
use std::sync::{Arc, Weak};

use log::{debug, warn};
use parking_lot::Mutex;

use super::{probed, DeviceContext, DeviceRegistry, DeviceType, RegistryDevice};
use crate::api::{self, BassApi, WasapiApi};
use crate::callbacks::{wasapi_notify_trampoline, wasapi_trampoline, CallbackCell, PinnedCallback};
use crate::error::{DeviceKind, Result};
use crate::events::{Delivery, HandlerList};
use crate::ffi::wasapi::*;
use crate::ffi::*;

/// Owned copy of BASS_WASAPI_DEVICEINFO
#[derive(Debug, Clone, PartialEq)]
pub struct WasapiDeviceInfo {
    pub name: String,
    pub id: String,
    pub device_type: DeviceType,
    pub flags: DWORD,
    pub min_period: f32,
    pub default_period: f32,
    pub mix_freq: DWORD,
    pub mix_chans: DWORD,
}

impl WasapiDeviceInfo {
    pub fn is_enabled(&self) -> bool {
        self.flags & BASS_DEVICE_ENABLED != 0
    }

    pub fn is_default(&self) -> bool {
        self.flags & BASS_DEVICE_DEFAULT != 0
    }

    pub fn is_initialized(&self) -> bool {
        self.flags & BASS_DEVICE_INIT != 0
    }

    pub fn is_loopback(&self) -> bool {
        self.flags & BASS_DEVICE_LOOPBACK != 0
    }

    pub fn is_input(&self) -> bool {
        self.flags & BASS_DEVICE_INPUT != 0
    }

    pub fn is_unplugged(&self) -> bool {
        self.flags & BASS_DEVICE_UNPLUGGED != 0
    }

    pub fn is_disabled(&self) -> bool {
        self.flags & BASS_DEVICE_DISABLED != 0
    }
}

fn device_type(raw: DWORD) -> DeviceType {
    match raw {
        BASS_WASAPI_TYPE_NETWORKDEVICE => DeviceType::Network,
        BASS_WASAPI_TYPE_SPEAKERS => DeviceType::Speakers,
        BASS_WASAPI_TYPE_LINELEVEL => DeviceType::Line,
        BASS_WASAPI_TYPE_HEADPHONES => DeviceType::Headphones,
        BASS_WASAPI_TYPE_MICROPHONE => DeviceType::Microphone,
        BASS_WASAPI_TYPE_HEADSET => DeviceType::Headset,
        BASS_WASAPI_TYPE_HANDSET => DeviceType::Handset,
        BASS_WASAPI_TYPE_DIGITAL => DeviceType::Digital,
        BASS_WASAPI_TYPE_SPDIF => DeviceType::Spdif,
        BASS_WASAPI_TYPE_HDMI => DeviceType::Hdmi,
        _ => DeviceType::Unknown,
    }
}

/// BASS_WASAPI_Init arguments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasapiInit {
    /// 0 = the device's mix format
    pub freq: u32,
    pub chans: u32,
    pub flags: DWORD,
    /// Buffer length in seconds
    pub buffer: f32,
    /// Update period in seconds, 0 = default
    pub period: f32,
}

impl Default for WasapiInit {
    fn default() -> Self {
        Self {
            freq: 0,
            chans: 0,
            flags: 0,
            buffer: 0.1,
            period: 0.0,
        }
    }
}

impl WasapiInit {
    pub fn format(mut self, freq: u32, chans: u32) -> Self {
        self.freq = freq;
        self.chans = chans;
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.flags |= BASS_WASAPI_EXCLUSIVE;
        self
    }

    pub fn event_driven(mut self) -> Self {
        self.flags |= BASS_WASAPI_EVENT;
        self
    }

    pub fn buffer(mut self, seconds: f32) -> Self {
        self.buffer = seconds;
        self
    }
}

/// Device change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasapiNotify {
    Enabled,
    Disabled,
    DefaultOutput,
    DefaultInput,
    /// The device failed and was freed
    Failed,
}

impl WasapiNotify {
    pub fn from_raw(value: DWORD) -> Option<Self> {
        match value {
            BASS_WASAPI_NOTIFY_ENABLED => Some(WasapiNotify::Enabled),
            BASS_WASAPI_NOTIFY_DISABLED => Some(WasapiNotify::Disabled),
            BASS_WASAPI_NOTIFY_DEFOUTPUT => Some(WasapiNotify::DefaultOutput),
            BASS_WASAPI_NOTIFY_DEFINPUT => Some(WasapiNotify::DefaultInput),
            BASS_WASAPI_NOTIFY_FAIL => Some(WasapiNotify::Failed),
            _ => None,
        }
    }
}

/// One WASAPI endpoint.
pub struct WasapiDevice {
    api: Arc<dyn BassApi>,
    delivery: Delivery,
    index: u32,
    proc: Mutex<Option<PinnedCallback>>,
    notify: Arc<HandlerList<WasapiNotify>>,
}

impl RegistryDevice for WasapiDevice {
    const KIND: DeviceKind = DeviceKind::Wasapi;

    fn probe(ctx: &DeviceContext, index: u32) -> Result<Option<Self>> {
        let wasapi = api::require_wasapi(&*ctx.api)?;
        let mut raw = BassWasapiDeviceInfo::default();
        if !probed(&*ctx.api, wasapi.device_info(index, &mut raw))? {
            return Ok(None);
        }
        Ok(Some(Self {
            api: ctx.api.clone(),
            delivery: ctx.delivery.clone(),
            index,
            proc: Mutex::new(None),
            notify: Arc::new(HandlerList::new()),
        }))
    }
}

impl WasapiDevice {
    fn wasapi(&self) -> Result<&dyn WasapiApi> {
        api::require_wasapi(&*self.api)
    }

    fn check(&self, ok: bool) -> Result<()> {
        api::check(&*self.api, ok)
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn info(&self) -> Result<WasapiDeviceInfo> {
        let mut raw = BassWasapiDeviceInfo::default();
        self.check(self.wasapi()?.device_info(self.index, &mut raw))?;
        Ok(WasapiDeviceInfo {
            name: unsafe { copy_cstr(raw.name) }.unwrap_or_default(),
            id: unsafe { copy_cstr(raw.id) }.unwrap_or_default(),
            device_type: device_type(raw.device_type),
            flags: raw.flags,
            min_period: raw.minperiod,
            default_period: raw.defperiod,
            mix_freq: raw.mixfreq,
            mix_chans: raw.mixchans,
        })
    }

    /// Initialize the device. For output devices `f` fills the buffer
    /// and returns the bytes written; for input devices it consumes the
    /// captured bytes.
    pub fn init<F>(&self, params: &WasapiInit, f: F) -> Result<()>
    where
        F: FnMut(&mut [u8]) -> DWORD + Send + 'static,
    {
        let wasapi = self.wasapi()?;
        let cell = CallbackCell::new(f);
        let ok = unsafe {
            wasapi.init(
                self.index as i32,
                params.freq,
                params.chans,
                params.flags,
                params.buffer,
                params.period,
                Some(wasapi_trampoline::<F>),
                cell.user_ptr(),
            )
        };
        self.check(ok)?;
        *self.proc.lock() = Some(cell as PinnedCallback);
        debug!("WASAPI device {} initialized", self.index);
        Ok(())
    }

    /// Free the device and release its callback.
    pub fn free(&self) -> Result<()> {
        let wasapi = self.wasapi()?;
        self.make_current()?;
        self.check(wasapi.free())?;
        let released = self.proc.lock().take();
        drop(released);
        debug!("WASAPI device {} freed", self.index);
        Ok(())
    }

    pub fn make_current(&self) -> Result<()> {
        self.check(self.wasapi()?.set_device(self.index))
    }

    pub fn start(&self) -> Result<()> {
        self.make_current()?;
        self.check(self.wasapi()?.start())
    }

    /// Stop the device; `reset` also flushes its buffer.
    pub fn stop(&self, reset: bool) -> Result<()> {
        self.make_current()?;
        self.check(self.wasapi()?.stop(reset))
    }

    pub fn is_started(&self) -> Result<bool> {
        self.make_current()?;
        Ok(self.wasapi()?.is_started())
    }

    /// Endpoint volume on the linear curve, 0.0 to 1.0.
    pub fn volume(&self) -> Result<f32> {
        self.make_current()?;
        let volume = self.wasapi()?.volume(BASS_WASAPI_CURVE_LINEAR);
        if volume < 0.0 {
            return Err(api::last_error(&*self.api));
        }
        Ok(volume)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.make_current()?;
        self.check(self.wasapi()?.set_volume(BASS_WASAPI_CURVE_LINEAR, volume))
    }

    pub fn is_muted(&self) -> Result<bool> {
        self.make_current()?;
        match self.wasapi()?.mute(0) {
            -1 => Err(api::last_error(&*self.api)),
            muted => Ok(to_bool(muted)),
        }
    }

    pub fn set_mute(&self, mute: bool) -> Result<()> {
        self.make_current()?;
        self.check(self.wasapi()?.set_mute(0, mute))
    }

    /// Peak levels (left, right).
    pub fn level(&self) -> Result<(u16, u16)> {
        self.make_current()?;
        let level = self.wasapi()?.level();
        if level == DWORD::MAX {
            return Err(api::last_error(&*self.api));
        }
        Ok(((level & 0xffff) as u16, (level >> 16) as u16))
    }

    /// Called on device changes for this endpoint.
    pub fn on_notify(&self, handler: impl FnMut(WasapiNotify) + Send + 'static) {
        self.notify.push(handler);
    }

    fn raise(&self, event: WasapiNotify) {
        if event == WasapiNotify::Failed {
            warn!("WASAPI device {} failed", self.index);
        }
        let handlers = self.notify.clone();
        self.delivery.deliver(Box::new(move || handlers.fire(event)));
    }
}

impl Drop for WasapiDevice {
    fn drop(&mut self) {
        if self.proc.get_mut().is_none() {
            return;
        }
        // Native code still points at the closure
        if let Some(wasapi) = self.api.wasapi() {
            if wasapi.set_device(self.index) {
                wasapi.free();
            }
        }
    }
}

impl std::fmt::Debug for WasapiDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WasapiDevice")
            .field("index", &self.index)
            .field("initialized", &self.proc.lock().is_some())
            .finish()
    }
}

/// Install the process-wide notification callback, routing each
/// notification to the cached wrapper of its device. Devices nobody
/// looked up yet are skipped.
pub(crate) fn install_notify(
    api: &dyn BassApi,
    registry: &Arc<DeviceRegistry<WasapiDevice>>,
) -> Result<PinnedCallback> {
    let wasapi = api::require_wasapi(api)?;
    let registry: Weak<DeviceRegistry<WasapiDevice>> = Arc::downgrade(registry);
    let route = move |notify: DWORD, device: DWORD| {
        let Some(event) = WasapiNotify::from_raw(notify) else {
            return;
        };
        if let Some(target) = registry.upgrade().and_then(|r| r.cached(device)) {
            target.raise(event);
        }
    };
    let cell = CallbackCell::new(route);
    let ok = unsafe { wasapi.set_notify(Some(wasapi_notify_trampoline_for(&cell)), cell.user_ptr()) };
    api::check(api, ok)?;
    Ok(cell as PinnedCallback)
}

fn wasapi_notify_trampoline_for<F>(_: &CallbackCell<F>) -> WasapiNotifyProc
where
    F: FnMut(DWORD, DWORD) + Send + 'static,
{
    wasapi_notify_trampoline::<F>
}

/// Unset the notification callback before its closure is dropped.
pub(crate) fn remove_notify(api: &dyn BassApi) {
    if let Some(wasapi) = api.wasapi() {
        unsafe { wasapi.set_notify(None, ptr::null_mut()) };
    }
}
