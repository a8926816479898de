//! DirectShow video stream add-on (xVideo) FFI bindings.
//! xVideo keeps its own error state, queried with xVideo_ErrorGetCode.

use std::ffi::c_void;

use super::bass::*;

// xVideo_Init flags
pub const XVIDEO_INIT_DEFAULT: DWORD = 0;

// xVideo_StreamCreateFile flags (BASS stream flags apply as well)
pub const XVIDEO_STREAM_AUTOFREE: DWORD = BASS_STREAM_AUTOFREE;
pub const XVIDEO_STREAM_DECODE: DWORD = BASS_STREAM_DECODE;

native_table! {
    /// xVideo exports
    pub struct DshowFunctions {
        get_version = "xVideo_GetVersion": fn() -> DWORD;
        error_get_code = "xVideo_ErrorGetCode": fn() -> i32;
        init = "xVideo_Init": fn(HWND, DWORD) -> BOOL;
        free = "xVideo_Free": fn() -> BOOL;
        stream_create_file = "xVideo_StreamCreateFile": fn(*const c_void, DWORD, HWND, DWORD) -> HSTREAM;
    }
}
