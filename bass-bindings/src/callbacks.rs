//! Callback trampolines and the reference holder.
//!
//! A Rust closure handed to native code lives in a [`CallbackCell`]; the
//! address of its shared slot is the `user` pointer and a monomorphized
//! `extern "system"` trampoline turns the raw arguments back into a call.
//! Whoever owns the cell owns the registration: a guard in `sync.rs`, a
//! wrapper object, or the [`CallbackTable`] for raw handles.
//!
//! A trampoline takes its own reference to the slot for the length of the
//! call, so the owner may drop the cell while the closure is running (a
//! sync removing itself, or a removal racing a mixer-thread callback).

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use log::{debug, error, warn};
use parking_lot::Mutex;

use crate::api::BassApi;
use crate::ffi::enc::HENCODE;
use crate::ffi::*;

/// Type-erased owner of a closure registered with native code.
pub type PinnedCallback = Box<dyn Any + Send + Sync>;

/// Owner of a closure whose shared slot is passed to native code as `user`.
pub(crate) struct CallbackCell<F> {
    slot: Arc<Mutex<F>>,
}

impl<F: Send + 'static> CallbackCell<F> {
    pub(crate) fn new(f: F) -> Box<Self> {
        Box::new(Self {
            slot: Arc::new(Mutex::new(f)),
        })
    }

    pub(crate) fn user_ptr(self: &Box<Self>) -> *mut c_void {
        Arc::as_ptr(&self.slot) as *mut c_void
    }
}

/// Take a reference to the slot behind `user` for the length of a call.
///
/// # Safety
/// `user` must come from [`CallbackCell::user_ptr`] of a cell that is still
/// registered with native code.
unsafe fn hold<F>(user: *mut c_void) -> Arc<Mutex<F>> {
    let slot = user as *const Mutex<F>;
    Arc::increment_strong_count(slot);
    Arc::from_raw(slot)
}

/// Run a user closure, keeping panics on this side of the FFI boundary.
fn guarded<R>(what: &str, fallback: R, f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(r) => r,
        Err(_) => {
            error!("Panic in {} callback", what);
            fallback
        }
    }
}

// ============================================================================
// Trampolines
// ============================================================================

/// SYNCPROC: `f(sync, channel, data)`
pub(crate) unsafe extern "system" fn sync_trampoline<F>(
    handle: HSYNC,
    channel: DWORD,
    data: DWORD,
    user: *mut c_void,
) where
    F: FnMut(HSYNC, DWORD, DWORD) + Send + 'static,
{
    if user.is_null() {
        return;
    }
    let slot = hold::<F>(user);
    guarded("SYNCPROC", (), || {
        let mut f = slot.lock();
        (*f)(handle, channel, data)
    })
}

/// DSPPROC: `f(channel, samples)` with the buffer to modify in place
pub(crate) unsafe extern "system" fn dsp_trampoline<F>(
    _handle: HDSP,
    channel: DWORD,
    buffer: *mut c_void,
    length: DWORD,
    user: *mut c_void,
) where
    F: FnMut(DWORD, &mut [u8]) + Send + 'static,
{
    if user.is_null() || buffer.is_null() {
        return;
    }
    let slot = hold::<F>(user);
    let data = std::slice::from_raw_parts_mut(buffer as *mut u8, length as usize);
    guarded("DSPPROC", (), || {
        let mut f = slot.lock();
        (*f)(channel, data)
    })
}

/// STREAMPROC: `f(buffer)` returns bytes written, optionally
/// ORed with `BASS_STREAMPROC_END`
pub(crate) unsafe extern "system" fn stream_trampoline<F>(
    _handle: HSTREAM,
    buffer: *mut c_void,
    length: DWORD,
    user: *mut c_void,
) -> DWORD
where
    F: FnMut(&mut [u8]) -> DWORD + Send + 'static,
{
    if user.is_null() || buffer.is_null() {
        return BASS_STREAMPROC_END;
    }
    let slot = hold::<F>(user);
    let data = std::slice::from_raw_parts_mut(buffer as *mut u8, length as usize);
    guarded("STREAMPROC", BASS_STREAMPROC_END, || {
        let mut f = slot.lock();
        (*f)(data)
    })
}

/// RECORDPROC: `f(captured)` returns false to stop recording
pub(crate) unsafe extern "system" fn record_trampoline<F>(
    _handle: HRECORD,
    buffer: *const c_void,
    length: DWORD,
    user: *mut c_void,
) -> BOOL
where
    F: FnMut(&[u8]) -> bool + Send + 'static,
{
    if user.is_null() {
        return FALSE;
    }
    let slot = hold::<F>(user);
    let data: &[u8] = if buffer.is_null() {
        &[]
    } else {
        std::slice::from_raw_parts(buffer as *const u8, length as usize)
    };
    guarded("RECORDPROC", FALSE, || {
        let mut f = slot.lock();
        from_bool((*f)(data))
    })
}

/// ENCODEPROC: `f(encoder, channel, encoded)`
pub(crate) unsafe extern "system" fn encode_trampoline<F>(
    handle: HENCODE,
    channel: DWORD,
    buffer: *const c_void,
    length: DWORD,
    user: *mut c_void,
) where
    F: FnMut(HENCODE, DWORD, &[u8]) + Send + 'static,
{
    if user.is_null() || buffer.is_null() {
        return;
    }
    let slot = hold::<F>(user);
    let data = std::slice::from_raw_parts(buffer as *const u8, length as usize);
    guarded("ENCODEPROC", (), || {
        let mut f = slot.lock();
        (*f)(handle, channel, data)
    })
}

/// ENCODENOTIFYPROC: `f(encoder, status)`
pub(crate) unsafe extern "system" fn encode_notify_trampoline<F>(
    handle: HENCODE,
    status: DWORD,
    user: *mut c_void,
) where
    F: FnMut(HENCODE, DWORD) + Send + 'static,
{
    if user.is_null() {
        return;
    }
    let slot = hold::<F>(user);
    guarded("ENCODENOTIFYPROC", (), || {
        let mut f = slot.lock();
        (*f)(handle, status)
    })
}

/// WASAPIPROC: `f(buffer)` returns bytes handled
pub(crate) unsafe extern "system" fn wasapi_trampoline<F>(
    buffer: *mut c_void,
    length: DWORD,
    user: *mut c_void,
) -> DWORD
where
    F: FnMut(&mut [u8]) -> DWORD + Send + 'static,
{
    if user.is_null() || buffer.is_null() {
        return 0;
    }
    let slot = hold::<F>(user);
    let data = std::slice::from_raw_parts_mut(buffer as *mut u8, length as usize);
    guarded("WASAPIPROC", 0, || {
        let mut f = slot.lock();
        (*f)(data)
    })
}

/// WASAPINOTIFYPROC: `f(notify, device)`
pub(crate) unsafe extern "system" fn wasapi_notify_trampoline<F>(
    notify: DWORD,
    device: DWORD,
    user: *mut c_void,
) where
    F: FnMut(DWORD, DWORD) + Send + 'static,
{
    if user.is_null() {
        return;
    }
    let slot = hold::<F>(user);
    guarded("WASAPINOTIFYPROC", (), || {
        let mut f = slot.lock();
        (*f)(notify, device)
    })
}

// ============================================================================
// Reference holder
// ============================================================================

/// Secondary key of a pinned callback under its owner handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKey {
    Sync(HSYNC),
    Dsp(HDSP),
    /// The STREAMPROC of a user stream
    Stream,
    /// The RECORDPROC of a recording channel
    Record,
    Encode(HENCODE),
    EncodeNotify(HENCODE),
    MixerSync(HSYNC),
}

/// Keeps closures registered on raw handles alive until the owner's
/// `BASS_SYNC_FREE` fires.
///
/// The first entry for an owner installs a free hook on that owner; when
/// the hook fires every entry for the owner is released along with the
/// hook itself. Dropping the table unregisters whatever is still pinned.
///
/// `BASS_SYNC_FREE` syncs of an owner run in no fixed order, so the hook
/// cannot release another FREE sync's closure. Those are pinned with
/// [`CallbackTable::add_self_released`] and release themselves once their
/// own call returns.
pub struct CallbackTable {
    inner: Arc<TableInner>,
}

struct TableInner {
    api: Arc<dyn BassApi>,
    state: Mutex<TableState>,
}

#[derive(Default)]
struct TableState {
    entries: HashMap<(DWORD, CallbackKey), PinnedCallback>,
    /// Entries the free hook leaves alone
    self_released: HashSet<(DWORD, CallbackKey)>,
    hooks: HashMap<DWORD, FreeHookEntry>,
}

struct FreeHookEntry {
    sync: HSYNC,
    _hook: Box<FreeHook>,
}

/// `user` data of the free hook. Read-only, so no lock is needed when it fires.
struct FreeHook {
    table: Weak<TableInner>,
    owner: DWORD,
}

unsafe extern "system" fn free_hook_trampoline(
    _handle: HSYNC,
    _channel: DWORD,
    _data: DWORD,
    user: *mut c_void,
) {
    if user.is_null() {
        return;
    }
    // Copy out first: releasing the owner drops the hook this points into.
    let (table, owner) = {
        let hook = &*(user as *const FreeHook);
        (hook.table.clone(), hook.owner)
    };
    guarded("free hook", (), || {
        if let Some(inner) = table.upgrade() {
            inner.release_owner(owner);
        }
    })
}

impl CallbackTable {
    pub fn new(api: Arc<dyn BassApi>) -> Self {
        Self {
            inner: Arc::new(TableInner {
                api,
                state: Mutex::new(TableState::default()),
            }),
        }
    }

    /// Pin `callback` under `(owner, key)`, replacing any previous entry.
    /// `None` removes the entry instead.
    pub fn add(&self, owner: DWORD, key: CallbackKey, callback: Option<PinnedCallback>) {
        let Some(callback) = callback else {
            self.remove(owner, key);
            return;
        };

        let (replaced, needs_hook) = {
            let mut state = self.inner.state.lock();
            let replaced = state.entries.insert((owner, key), callback);
            (replaced, !state.hooks.contains_key(&owner))
        };
        drop(replaced);

        if needs_hook {
            self.install_hook(owner);
        }
    }

    /// Pin the closure of a `BASS_SYNC_FREE` sync on `owner`. The owner's
    /// free hook skips it; the closure is wrapped with
    /// [`CallbackTable::release_on_exit`] to drop the entry after it ran.
    pub(crate) fn add_self_released(&self, owner: DWORD, key: CallbackKey, callback: PinnedCallback) {
        let replaced = {
            let mut state = self.inner.state.lock();
            state.self_released.insert((owner, key));
            state.entries.insert((owner, key), callback)
        };
        drop(replaced);
    }

    /// Handle for a closure to release its own entry. The table is held
    /// weakly so a closure never keeps the table alive.
    pub(crate) fn releaser(&self) -> TableRef {
        TableRef {
            table: Arc::downgrade(&self.inner),
        }
    }

    /// Drop the entry for `(owner, key)`. Returns whether one existed.
    pub fn remove(&self, owner: DWORD, key: CallbackKey) -> bool {
        self.inner.remove_entry(owner, key)
    }

    pub fn contains(&self, owner: DWORD, key: CallbackKey) -> bool {
        self.inner.state.lock().entries.contains_key(&(owner, key))
    }

    /// Keys currently pinned under `owner`.
    pub fn entries_for(&self, owner: DWORD) -> Vec<CallbackKey> {
        let state = self.inner.state.lock();
        state
            .entries
            .keys()
            .filter(|(o, _)| *o == owner)
            .map(|(_, k)| *k)
            .collect()
    }

    /// Owners with at least one pinned entry.
    pub fn owners(&self) -> Vec<DWORD> {
        let state = self.inner.state.lock();
        let mut owners: Vec<DWORD> = state.entries.keys().map(|(o, _)| *o).collect();
        owners.sort_unstable();
        owners.dedup();
        owners
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a free hook is installed on `owner`.
    pub fn has_free_hook(&self, owner: DWORD) -> bool {
        self.inner.state.lock().hooks.contains_key(&owner)
    }

    fn install_hook(&self, owner: DWORD) {
        let hook = Box::new(FreeHook {
            table: Arc::downgrade(&self.inner),
            owner,
        });
        let user = &*hook as *const FreeHook as *mut c_void;

        let sync = unsafe {
            self.inner
                .api
                .channel_set_sync(owner, BASS_SYNC_FREE, 0, Some(free_hook_trampoline), user)
        };
        if sync == 0 {
            warn!(
                "Free hook on {:#x} failed (error {}); entries stay pinned until the table is dropped",
                owner,
                self.inner.api.error_code()
            );
            return;
        }

        let previous = self
            .inner
            .state
            .lock()
            .hooks
            .insert(owner, FreeHookEntry { sync, _hook: hook });
        if let Some(previous) = previous {
            // Lost a race with another add() for the same owner.
            self.inner.api.channel_remove_sync(owner, previous.sync);
        }
    }
}

/// Weak reference to a [`CallbackTable`], carried by self-releasing closures.
#[derive(Clone)]
pub(crate) struct TableRef {
    table: Weak<TableInner>,
}

impl TableRef {
    /// Guard that drops `(owner, key)` from the table when it goes out of
    /// scope, panics included.
    pub(crate) fn release_on_exit(&self, owner: DWORD, key: CallbackKey) -> ReleaseOnExit {
        ReleaseOnExit {
            table: self.table.clone(),
            owner,
            key,
        }
    }
}

pub(crate) struct ReleaseOnExit {
    table: Weak<TableInner>,
    owner: DWORD,
    key: CallbackKey,
}

impl Drop for ReleaseOnExit {
    fn drop(&mut self) {
        if let Some(inner) = self.table.upgrade() {
            inner.remove_entry(self.owner, self.key);
        }
    }
}

impl TableInner {
    fn remove_entry(&self, owner: DWORD, key: CallbackKey) -> bool {
        let removed = {
            let mut state = self.state.lock();
            state.self_released.remove(&(owner, key));
            state.entries.remove(&(owner, key))
        };
        removed.is_some()
    }

    /// Drop the free hook for `owner` and every entry except self-released ones.
    fn release_owner(&self, owner: DWORD) {
        let (released, hook) = {
            let mut state = self.state.lock();
            let keys: Vec<_> = state
                .entries
                .keys()
                .filter(|k| k.0 == owner && !state.self_released.contains(k))
                .copied()
                .collect();
            let released: Vec<PinnedCallback> =
                keys.iter().filter_map(|k| state.entries.remove(k)).collect();
            (released, state.hooks.remove(&owner))
        };
        debug!("Handle {:#x} freed, released {} callback(s)", owner, released.len());
        drop(released);
        drop(hook);
    }

    /// Undo the native registration behind an entry.
    fn unregister(&self, owner: DWORD, key: CallbackKey) {
        let api = &*self.api;
        match key {
            CallbackKey::Sync(sync) => {
                api.channel_remove_sync(owner, sync);
            }
            CallbackKey::Dsp(dsp) => {
                api.channel_remove_dsp(owner, dsp);
            }
            CallbackKey::MixerSync(sync) => {
                if let Some(mixer) = api.mixer() {
                    mixer.channel_remove_sync(owner, sync);
                }
            }
            CallbackKey::Encode(encoder) | CallbackKey::EncodeNotify(encoder) => {
                if let Some(enc) = api.encoder() {
                    enc.stop(encoder);
                }
            }
            CallbackKey::Stream | CallbackKey::Record => {
                api.channel_free(owner);
            }
        }
    }
}

impl Drop for CallbackTable {
    fn drop(&mut self) {
        let (entries, hooks) = {
            let mut state = self.inner.state.lock();
            state.self_released.clear();
            (
                std::mem::take(&mut state.entries),
                std::mem::take(&mut state.hooks),
            )
        };

        for (owner, hook) in &hooks {
            self.inner.api.channel_remove_sync(*owner, hook.sync);
        }
        drop(hooks);

        for (owner, key) in entries.keys() {
            self.inner.unregister(*owner, *key);
        }
        drop(entries);
    }
}
