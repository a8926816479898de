//! DirectX 8 effects on a channel (BASS_ChannelSetFX).

use std::marker::PhantomData;
use std::sync::Arc;

use log::debug;

use crate::api::{self, BassApi};
use crate::error::Result;
use crate::ffi::*;

/// Parameter block of one DX8 effect type.
///
/// # Safety
/// Implementors must be `#[repr(C)]` without padding, valid for any bit
/// pattern, and match the native layout for `FX_TYPE`.
pub unsafe trait EffectParameters: Copy + Default + Send + 'static {
    const FX_TYPE: DWORD;
}

unsafe impl EffectParameters for BassDx8Chorus {
    const FX_TYPE: DWORD = BASS_FX_DX8_CHORUS;
}

unsafe impl EffectParameters for BassDx8Compressor {
    const FX_TYPE: DWORD = BASS_FX_DX8_COMPRESSOR;
}

unsafe impl EffectParameters for BassDx8Distortion {
    const FX_TYPE: DWORD = BASS_FX_DX8_DISTORTION;
}

unsafe impl EffectParameters for BassDx8Echo {
    const FX_TYPE: DWORD = BASS_FX_DX8_ECHO;
}

unsafe impl EffectParameters for BassDx8Flanger {
    const FX_TYPE: DWORD = BASS_FX_DX8_FLANGER;
}

unsafe impl EffectParameters for BassDx8Gargle {
    const FX_TYPE: DWORD = BASS_FX_DX8_GARGLE;
}

unsafe impl EffectParameters for BassDx8ParamEq {
    const FX_TYPE: DWORD = BASS_FX_DX8_PARAMEQ;
}

unsafe impl EffectParameters for BassDx8Reverb {
    const FX_TYPE: DWORD = BASS_FX_DX8_REVERB;
}

fn as_bytes<P: EffectParameters>(params: &P) -> &[u8] {
    unsafe { std::slice::from_raw_parts(params as *const P as *const u8, std::mem::size_of::<P>()) }
}

fn as_bytes_mut<P: EffectParameters>(params: &mut P) -> &mut [u8] {
    unsafe { std::slice::from_raw_parts_mut(params as *mut P as *mut u8, std::mem::size_of::<P>()) }
}

/// An effect inserted on a channel; removed on drop.
pub struct Effect<P: EffectParameters> {
    api: Arc<dyn BassApi>,
    channel: DWORD,
    fx: HFX,
    _params: PhantomData<P>,
}

impl<P: EffectParameters> Effect<P> {
    pub(crate) fn attach(api: &Arc<dyn BassApi>, channel: DWORD, priority: i32) -> Result<Self> {
        let fx = api::check_handle(&**api, api.channel_set_fx(channel, P::FX_TYPE, priority))?;
        debug!("Effect {} attached to {:#x} as {:#x}", P::FX_TYPE, channel, fx);
        Ok(Self {
            api: api.clone(),
            channel,
            fx,
            _params: PhantomData,
        })
    }

    pub fn handle(&self) -> HFX {
        self.fx
    }

    pub fn parameters(&self) -> Result<P> {
        let mut params = P::default();
        api::check(&*self.api, self.api.fx_get_parameters(self.fx, as_bytes_mut(&mut params)))?;
        Ok(params)
    }

    pub fn set_parameters(&self, params: &P) -> Result<()> {
        api::check(&*self.api, self.api.fx_set_parameters(self.fx, as_bytes(params)))
    }

    /// Clear the effect's internal state (delay lines and the like).
    pub fn reset(&self) -> Result<()> {
        api::check(&*self.api, self.api.fx_reset(self.fx))
    }
}

impl<P: EffectParameters> Drop for Effect<P> {
    fn drop(&mut self) {
        self.api.channel_remove_fx(self.channel, self.fx);
    }
}

impl<P: EffectParameters> std::fmt::Debug for Effect<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("type", &P::FX_TYPE)
            .field("channel", &format_args!("{:#x}", self.channel))
            .field("fx", &format_args!("{:#x}", self.fx))
            .finish()
    }
}
