//! Stream constructors, samples and push streams.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::api::{self, BassApi};
use crate::callbacks::{stream_trampoline, CallbackCell, PinnedCallback};
use crate::channel::Channel;
use crate::error::Result;
use crate::events::Delivery;
use crate::ffi::*;
use crate::Bass;

/// Bind a freshly created handle, freeing it if binding fails.
pub(crate) fn adopt(api: &Arc<dyn BassApi>, delivery: &Delivery, handle: DWORD) -> Result<Channel> {
    Channel::bind(api, delivery.clone(), handle).map_err(|e| {
        api.channel_free(handle);
        e
    })
}

/// Create a user stream fed by `f`. The returned box must outlive the stream.
pub(crate) fn user_stream<F>(
    api: &dyn BassApi,
    freq: DWORD,
    chans: DWORD,
    flags: DWORD,
    f: F,
) -> Result<(HSTREAM, PinnedCallback)>
where
    F: FnMut(&mut [u8]) -> DWORD + Send + 'static,
{
    let cell = CallbackCell::new(f);
    let handle = unsafe { api.stream_create(freq, chans, flags, Some(stream_trampoline::<F>), cell.user_ptr()) };
    let handle = api::check_handle(api, handle)?;
    Ok((handle, cell as PinnedCallback))
}

impl Channel {
    /// Open a file stream (BASS_StreamCreateFile).
    pub fn from_file(bass: &Bass, path: impl AsRef<Path>, flags: DWORD) -> Result<Self> {
        let api = bass.api();
        let path = api::file_path(path.as_ref())?;
        let handle = api::check_handle(&**api, api.stream_create_file(&path, 0, 0, flags | path.flags()))?;
        debug!("Opened {} as {:#x}", path.to_string_lossy(), handle);
        adopt(api, bass.delivery(), handle)
    }

    /// Open an internet stream (BASS_StreamCreateURL).
    pub fn from_url(bass: &Bass, url: &str, flags: DWORD) -> Result<Self> {
        let api = bass.api();
        let url = std::ffi::CString::new(url)?;
        let handle = api::check_handle(&**api, api.stream_create_url(&url, 0, flags))?;
        adopt(api, bass.delivery(), handle)
    }

    /// Load a MOD/XM/IT/S3M/MTM music file (BASS_MusicLoad).
    pub fn music(bass: &Bass, path: impl AsRef<Path>, flags: DWORD) -> Result<Self> {
        let api = bass.api();
        let path = api::file_path(path.as_ref())?;
        let handle = api::check_handle(&**api, api.music_load(&path, 0, 0, flags | path.flags(), 0))?;
        adopt(api, bass.delivery(), handle)
    }
}

// ============================================================================
// Samples
// ============================================================================

/// A sample loaded into memory; its playback channels are [`Channel`]s.
/// Freeing the sample (on drop) frees every channel playing it.
pub struct Sample {
    api: Arc<dyn BassApi>,
    delivery: Delivery,
    handle: HSAMPLE,
}

impl Sample {
    /// Load a sample that can play on up to `max` channels at once.
    pub fn load(bass: &Bass, path: impl AsRef<Path>, max: u32, flags: DWORD) -> Result<Self> {
        let api = bass.api();
        let path = api::file_path(path.as_ref())?;
        let handle = api::check_handle(&**api, api.sample_load(&path, 0, 0, max, flags | path.flags()))?;
        Ok(Self {
            api: api.clone(),
            delivery: bass.delivery().clone(),
            handle,
        })
    }

    pub fn handle(&self) -> HSAMPLE {
        self.handle
    }

    /// A new playback channel for this sample.
    pub fn channel(&self, flags: DWORD) -> Result<Channel> {
        let handle = api::check_handle(&*self.api, self.api.sample_get_channel(self.handle, flags))?;
        Channel::bind(&self.api, self.delivery.clone(), handle)
    }
}

impl Drop for Sample {
    fn drop(&mut self) {
        self.api.sample_free(self.handle);
    }
}

// ============================================================================
// Push streams
// ============================================================================

const SCRATCH_SAMPLES: usize = 512;

/// A float stream played from samples the application pushes.
///
/// The STREAMPROC drains a lock-free ring; the producer side sits behind a
/// mutex so any thread can push. After [`PushStream::finish`] the stream
/// ends once the ring runs dry.
pub struct PushStream {
    channel: Channel,
    producer: Mutex<HeapProd<f32>>,
    finished: Arc<AtomicBool>,
    _proc: PinnedCallback,
}

impl PushStream {
    /// Create a stream with room for `capacity` interleaved samples.
    pub fn new(bass: &Bass, freq: u32, chans: u32, capacity: usize, flags: DWORD) -> Result<Self> {
        let rb = HeapRb::<f32>::new(capacity.max(chans as usize));
        let (producer, consumer) = rb.split();
        let finished = Arc::new(AtomicBool::new(false));

        let api = bass.api();
        let (handle, proc) = user_stream(
            &**api,
            freq,
            chans,
            flags | BASS_SAMPLE_FLOAT,
            drain(consumer, finished.clone()),
        )?;
        let channel = adopt(api, bass.delivery(), handle)?;

        Ok(Self {
            channel,
            producer: Mutex::new(producer),
            finished,
            _proc: proc,
        })
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Queue interleaved samples. Returns how many fit.
    pub fn push(&self, samples: &[f32]) -> usize {
        self.producer.lock().push_slice(samples)
    }

    /// Samples waiting to be played.
    pub fn queued(&self) -> usize {
        self.producer.lock().occupied_len()
    }

    /// Room left in the ring.
    pub fn free_space(&self) -> usize {
        self.producer.lock().vacant_len()
    }

    /// End the stream once everything queued has played.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for PushStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushStream")
            .field("channel", &self.channel)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// STREAMPROC body: copy queued samples into the native buffer.
fn drain(mut consumer: HeapCons<f32>, finished: Arc<AtomicBool>) -> impl FnMut(&mut [u8]) -> DWORD + Send + 'static {
    let mut scratch = [0f32; SCRATCH_SAMPLES];
    move |buffer: &mut [u8]| {
        let wanted = buffer.len() / 4;
        let mut filled = 0;
        while filled < wanted {
            let n = (wanted - filled).min(SCRATCH_SAMPLES);
            let got = consumer.pop_slice(&mut scratch[..n]);
            let out = &mut buffer[filled * 4..(filled + got) * 4];
            for (dst, sample) in out.chunks_exact_mut(4).zip(&scratch[..got]) {
                dst.copy_from_slice(&sample.to_ne_bytes());
            }
            filled += got;
            if got < n {
                break;
            }
        }

        let written = (filled * 4) as DWORD;
        if finished.load(Ordering::SeqCst) && consumer.is_empty() {
            written | BASS_STREAMPROC_END
        } else {
            written
        }
    }
}
