//! FFI module for BASS audio library bindings.
//! One file per native library: types, constants, `#[repr(C)]` mirrors,
//! callback signatures and the function table resolved at load time.

// Allow unused code in FFI modules - constants kept for API completeness
#![allow(dead_code)]
#![allow(non_camel_case_types)]

use std::ffi::{c_void, CStr, CString};
use std::path::Path;

/// Declares a table of native exports and a `load` function resolving every
/// entry by name. A missing export fails the whole table.
macro_rules! native_table {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident = $sym:literal : fn($($arg:ty),*) $(-> $ret:ty)?; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name {
            $( pub $field: unsafe extern "system" fn($($arg),*) $(-> $ret)?, )*
        }

        impl $name {
            /// Resolve every export of this table from `lib`.
            ///
            /// # Safety
            /// The library must export each symbol with the declared signature.
            pub unsafe fn load(lib: &libloading::Library) -> Result<Self, libloading::Error> {
                Ok(Self {
                    $( $field: *lib.get::<unsafe extern "system" fn($($arg),*) $(-> $ret)?>(
                        concat!($sym, "\0").as_bytes(),
                    )?, )*
                })
            }
        }
    };
}

pub mod bass;
pub mod cd;
pub mod dshow;
pub mod enc;
pub mod midi;
pub mod mix;
pub mod wasapi;
pub mod wma;

pub use bass::*;

/// Native-encoded file name plus the flag telling BASS how to read it.
/// Windows builds pass UTF-16 with `BASS_UNICODE`, other platforms UTF-8.
#[derive(Debug, Clone)]
pub struct FilePath {
    #[cfg(windows)]
    wide: Vec<u16>,
    #[cfg(not(windows))]
    narrow: CString,
}

impl FilePath {
    pub fn new(path: &Path) -> Result<Self, String> {
        #[cfg(windows)]
        {
            use std::os::windows::ffi::OsStrExt;
            let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
            if wide.contains(&0) {
                return Err(format!("path contains NUL: {}", path.display()));
            }
            wide.push(0);
            Ok(Self { wide })
        }
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            CString::new(path.as_os_str().as_bytes())
                .map(|narrow| Self { narrow })
                .map_err(|e| e.to_string())
        }
        #[cfg(not(any(windows, unix)))]
        {
            CString::new(path.to_string_lossy().into_owned())
                .map(|narrow| Self { narrow })
                .map_err(|e| e.to_string())
        }
    }

    pub fn as_ptr(&self) -> *const c_void {
        #[cfg(windows)]
        {
            self.wide.as_ptr() as *const c_void
        }
        #[cfg(not(windows))]
        {
            self.narrow.as_ptr() as *const c_void
        }
    }

    /// Flags to OR into the call taking this path.
    pub fn flags(&self) -> DWORD {
        if cfg!(windows) {
            BASS_UNICODE
        } else {
            0
        }
    }

    pub fn to_string_lossy(&self) -> String {
        #[cfg(windows)]
        {
            String::from_utf16_lossy(&self.wide[..self.wide.len() - 1])
        }
        #[cfg(not(windows))]
        {
            self.narrow.to_string_lossy().into_owned()
        }
    }
}

/// Copy a NUL-terminated native string. Null yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn copy_cstr(ptr: *const std::ffi::c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

pub fn to_bool(value: BOOL) -> bool {
    value != FALSE
}

pub fn from_bool(value: bool) -> BOOL {
    if value {
        TRUE
    } else {
        FALSE
    }
}
