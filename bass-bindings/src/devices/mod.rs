//! Device wrappers and the registries that cache them.
//!
//! A [`DeviceRegistry`] hands out one shared wrapper per device index.
//! Registries belong to the [`crate::Bass`] context and are torn down with
//! it (or explicitly through [`DeviceRegistry::clear`]).

mod cd;
mod playback;
mod record;
mod wasapi;

pub use cd::{CdDoor, CdDrive, CdId, CdInfo};
pub use playback::{OutputInfo, PlaybackDevice};
pub use record::{RecordDevice, RecordInput, RecordInfo, Recording};
pub use wasapi::{WasapiDevice, WasapiDeviceInfo, WasapiInit, WasapiNotify};
pub(crate) use wasapi::{install_notify as install_wasapi_notify, remove_notify as remove_wasapi_notify};

use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::api::{self, BassApi};
use crate::error::{BassError, DeviceKind, ErrorCode, Result};
use crate::events::Delivery;
use crate::ffi::*;

/// What device wrappers are built from
#[derive(Clone)]
pub(crate) struct DeviceContext {
    pub(crate) api: Arc<dyn BassApi>,
    pub(crate) delivery: Delivery,
}

/// A wrapper type a [`DeviceRegistry`] can cache.
pub trait RegistryDevice: Sized + Send + Sync + 'static {
    const KIND: DeviceKind;

    /// Build the wrapper for `index`, or `None` past the last device.
    #[doc(hidden)]
    fn probe(ctx: &DeviceContext, index: u32) -> Result<Option<Self>>;
}

/// Index → shared wrapper cache
pub struct DeviceRegistry<D: RegistryDevice> {
    ctx: DeviceContext,
    slots: RwLock<Vec<Option<Arc<D>>>>,
}

impl<D: RegistryDevice> DeviceRegistry<D> {
    pub(crate) fn new(ctx: DeviceContext) -> Self {
        Self {
            ctx,
            slots: RwLock::new(Vec::new()),
        }
    }

    /// The wrapper for `index`, created on first use.
    ///
    /// Repeated calls return the same `Arc`. Fails with
    /// [`BassError::InvalidDevice`] if native code reports no such device.
    pub fn get_by_index(&self, index: u32) -> Result<Arc<D>> {
        if let Some(device) = self.cached(index) {
            return Ok(device);
        }

        // Probe without the lock; native info calls can be slow
        let device = D::probe(&self.ctx, index)?.ok_or(BassError::InvalidDevice { kind: D::KIND, index })?;

        let mut slots = self.slots.write();
        let slot = index as usize;
        if slots.len() <= slot {
            slots.resize_with(slot + 1, || None);
        }
        let entry = slots[slot].get_or_insert_with(|| {
            debug!("Cached {} device {}", D::KIND, index);
            Arc::new(device)
        });
        Ok(entry.clone())
    }

    /// The wrapper for `index` if one was already created.
    pub fn cached(&self, index: u32) -> Option<Arc<D>> {
        self.slots.read().get(index as usize).and_then(|slot| slot.clone())
    }

    /// Every device, probing from index 0 up to the first invalid one.
    pub fn enumerate(&self) -> Result<Vec<Arc<D>>> {
        let mut devices = Vec::new();
        for index in 0.. {
            match self.get_by_index(index) {
                Ok(device) => devices.push(device),
                Err(BassError::InvalidDevice { .. }) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(devices)
    }

    pub fn cached_count(&self) -> usize {
        self.slots.read().iter().flatten().count()
    }

    /// Drop every cached wrapper. Wrappers still shared elsewhere stay
    /// alive; later lookups create new ones.
    pub fn clear(&self) {
        let slots = std::mem::take(&mut *self.slots.write());
        debug!("Cleared {} {} device(s)", slots.iter().flatten().count(), D::KIND);
        drop(slots);
    }
}

/// Interpret a device info call made while probing: `Ok(false)` when
/// native code rejected the index itself.
pub(crate) fn probed(api: &dyn BassApi, ok: bool) -> Result<bool> {
    if ok {
        return Ok(true);
    }
    match api::last_error(api) {
        BassError::Native(ErrorCode::Device) => Ok(false),
        e => Err(e),
    }
}

// ============================================================================
// Shared device description
// ============================================================================

/// Device kind reported in the device flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Network,
    Speakers,
    Line,
    Headphones,
    Microphone,
    Headset,
    Handset,
    Digital,
    Spdif,
    Hdmi,
    DisplayPort,
    Unknown,
}

impl DeviceType {
    /// From the `BASS_DEVICE_TYPE_*` bits of BASS_DEVICEINFO flags.
    pub fn from_flags(flags: DWORD) -> Self {
        match flags & BASS_DEVICE_TYPE_MASK {
            BASS_DEVICE_TYPE_NETWORK => DeviceType::Network,
            BASS_DEVICE_TYPE_SPEAKERS => DeviceType::Speakers,
            BASS_DEVICE_TYPE_LINE => DeviceType::Line,
            BASS_DEVICE_TYPE_HEADPHONES => DeviceType::Headphones,
            BASS_DEVICE_TYPE_MICROPHONE => DeviceType::Microphone,
            BASS_DEVICE_TYPE_HEADSET => DeviceType::Headset,
            BASS_DEVICE_TYPE_HANDSET => DeviceType::Handset,
            BASS_DEVICE_TYPE_DIGITAL => DeviceType::Digital,
            BASS_DEVICE_TYPE_SPDIF => DeviceType::Spdif,
            BASS_DEVICE_TYPE_HDMI => DeviceType::Hdmi,
            BASS_DEVICE_TYPE_DISPLAYPORT => DeviceType::DisplayPort,
            _ => DeviceType::Unknown,
        }
    }
}

/// Owned copy of BASS_DEVICEINFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub driver: String,
    pub flags: DWORD,
}

impl DeviceInfo {
    /// # Safety
    /// The string fields must be null or valid C strings.
    pub(crate) unsafe fn from_raw(raw: &BassDeviceInfo) -> Self {
        Self {
            name: copy_cstr(raw.name).unwrap_or_default(),
            driver: copy_cstr(raw.driver).unwrap_or_default(),
            flags: raw.flags,
        }
    }

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

    pub fn device_type(&self) -> DeviceType {
        DeviceType::from_flags(self.flags)
    }
}
