//! Runtime-loaded native libraries.
//!
//! The core library is required. Add-ons are optional: one that fails to
//! load is logged and reported as `AddonUnavailable` when first used.

mod addons;
mod bass;

use std::path::Path;

use libloading::Library;
use log::{debug, warn};

use crate::config::{Addon, LoadOptions};
use crate::error::{BassError, Result};
use crate::ffi::cd::CdFunctions;
use crate::ffi::dshow::DshowFunctions;
use crate::ffi::enc::EncFunctions;
use crate::ffi::midi::MidiFunctions;
use crate::ffi::mix::MixFunctions;
use crate::ffi::wasapi::WasapiFunctions;
use crate::ffi::wma::WmaFunctions;
use crate::ffi::{CoreFunctions, BASSVERSION};

/// Function tables resolved from the loaded libraries.
pub struct NativeApi {
    core: CoreFunctions,
    enc: Option<EncFunctions>,
    mix: Option<MixFunctions>,
    midi: Option<MidiFunctions>,
    wasapi: Option<WasapiFunctions>,
    wma: Option<WmaFunctions>,
    cd: Option<CdFunctions>,
    dshow: Option<DshowFunctions>,
    // Keeps every table above valid; dropped last.
    _libs: Vec<Library>,
}

// Function pointers into libraries that live as long as this value.
unsafe impl Send for NativeApi {}
unsafe impl Sync for NativeApi {}

impl NativeApi {
    /// Load the core library and the requested add-ons.
    pub fn load(options: &LoadOptions) -> Result<Self> {
        let folder = options.folder.as_deref();

        let core_lib = open_library(folder, "bass")?;
        let core = unsafe { CoreFunctions::load(&core_lib)? };

        let version = unsafe { (core.get_version)() };
        if version >> 16 != BASSVERSION {
            return Err(BassError::LibraryVersion { found: version });
        }
        debug!("Loaded BASS {}", format_version(version));

        let mut api = NativeApi {
            core,
            enc: None,
            mix: None,
            midi: None,
            wasapi: None,
            wma: None,
            cd: None,
            dshow: None,
            _libs: vec![core_lib],
        };

        for &addon in &options.addons {
            if let Err(e) = api.load_addon(folder, addon) {
                warn!("Add-on {:?} unavailable: {}", addon, e);
            }
        }

        Ok(api)
    }

    fn load_addon(&mut self, folder: Option<&Path>, addon: Addon) -> Result<()> {
        let lib = open_library(folder, addon.library_stem())?;
        let version = unsafe {
            match addon {
                Addon::Encoder => {
                    let table = EncFunctions::load(&lib)?;
                    self.enc = Some(table);
                    (table.get_version)()
                }
                Addon::Mixer => {
                    let table = MixFunctions::load(&lib)?;
                    self.mix = Some(table);
                    (table.get_version)()
                }
                Addon::Midi => {
                    let table = MidiFunctions::load(&lib)?;
                    self.midi = Some(table);
                    (table.get_version)()
                }
                Addon::Wasapi => {
                    let table = WasapiFunctions::load(&lib)?;
                    self.wasapi = Some(table);
                    (table.get_version)()
                }
                Addon::Wma => {
                    let table = WmaFunctions::load(&lib)?;
                    self.wma = Some(table);
                    (table.get_version)()
                }
                Addon::Cd => {
                    let table = CdFunctions::load(&lib)?;
                    self.cd = Some(table);
                    (table.get_version)()
                }
                Addon::DirectShow => {
                    let table = DshowFunctions::load(&lib)?;
                    self.dshow = Some(table);
                    (table.get_version)()
                }
            }
        };
        debug!("Loaded {} {}", addon.library_stem(), format_version(version));
        self._libs.push(lib);
        Ok(())
    }

    /// Whether `addon` was loaded.
    pub fn has_addon(&self, addon: Addon) -> bool {
        match addon {
            Addon::Encoder => self.enc.is_some(),
            Addon::Mixer => self.mix.is_some(),
            Addon::Midi => self.midi.is_some(),
            Addon::Wasapi => self.wasapi.is_some(),
            Addon::Wma => self.wma.is_some(),
            Addon::Cd => self.cd.is_some(),
            Addon::DirectShow => self.dshow.is_some(),
        }
    }
}

/// Open `stem` from `folder` first, then from the default search path.
fn open_library(folder: Option<&Path>, stem: &str) -> Result<Library> {
    let file_name = libloading::library_filename(stem);

    if let Some(dir) = folder {
        let path = dir.join(&file_name);
        match unsafe { Library::new(&path) } {
            Ok(lib) => return Ok(lib),
            Err(e) => debug!("{} not loadable ({}), trying search path", path.display(), e),
        }
    }

    Ok(unsafe { Library::new(&file_name)? })
}

/// 0x02041100 -> "2.4.17.0"
pub fn format_version(version: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        version >> 24,
        (version >> 16) & 0xff,
        (version >> 8) & 0xff,
        version & 0xff
    )
}
