//! Event delivery from native callback threads.
//!
//! Wrappers raise their events either right on the native thread
//! ([`Delivery::Immediate`]) or through a bounded queue drained by an
//! [`EventPump`] on whichever thread the application picks.
//!
//! Queue policy:
//! - FIFO per producing thread.
//! - Producers never block. When the queue is full the new event is
//!   dropped, counted, and logged.
//! - Wrapper state (the disposed flag) is updated before an event is
//!   queued, so a dropped event never leaves stale state behind.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use log::{debug, error, warn};
use parking_lot::Mutex;

/// Deferred handler invocation
pub type Event = Box<dyn FnOnce() + Send>;

/// Where wrapper events run
#[derive(Clone, Default)]
pub enum Delivery {
    /// On the native callback thread
    #[default]
    Immediate,
    /// On the thread driving the matching [`EventPump`]
    Queued(EventSender),
}

impl Delivery {
    pub(crate) fn deliver(&self, event: Event) {
        match self {
            Delivery::Immediate => event(),
            Delivery::Queued(sender) => {
                sender.post(event);
            }
        }
    }
}

impl std::fmt::Debug for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delivery::Immediate => f.write_str("Immediate"),
            Delivery::Queued(sender) => write!(f, "Queued(capacity {})", sender.capacity),
        }
    }
}

/// Producer side of the event queue. Cheap to clone.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<Event>,
    dropped: Arc<AtomicU64>,
    capacity: usize,
}

impl EventSender {
    /// Queue `event` without blocking. Returns false when it was dropped.
    pub fn post(&self, event: Event) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!("Event queue full ({}), dropped event (total dropped: {})", self.capacity, total);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("Event pump gone, event discarded");
                false
            }
        }
    }
}

/// Consumer side of the event queue
pub struct EventPump {
    rx: Receiver<Event>,
    dropped: Arc<AtomicU64>,
}

impl EventPump {
    /// Run every queued event. Returns how many ran.
    pub fn dispatch_pending(&self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.rx.try_recv() {
            event();
            count += 1;
        }
        count
    }

    /// Wait up to `timeout` for an event, then run everything queued.
    pub fn dispatch_timeout(&self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                event();
                1 + self.dispatch_pending()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Events waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Events dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Create a bounded event queue.
pub fn queue(capacity: usize) -> (EventSender, EventPump) {
    let capacity = capacity.max(1);
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    let dropped = Arc::new(AtomicU64::new(0));
    (
        EventSender {
            tx,
            dropped: dropped.clone(),
            capacity,
        },
        EventPump { rx, dropped },
    )
}

// ============================================================================
// Handler lists
// ============================================================================

type Handler<T> = Arc<Mutex<dyn FnMut(T) + Send>>;

/// Registered handlers for one event.
///
/// Firing runs a snapshot of the handlers without holding the list lock,
/// so a handler may register further handlers; those run from the next
/// firing on. A panicking handler is logged and the rest still run.
pub(crate) struct HandlerList<T> {
    handlers: Mutex<Vec<Handler<T>>>,
}

impl<T: Copy> HandlerList<T> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push(&self, handler: impl FnMut(T) + Send + 'static) {
        self.handlers.lock().push(Arc::new(Mutex::new(handler)));
    }

    pub(crate) fn fire(&self, arg: T) {
        let snapshot: Vec<Handler<T>> = self.handlers.lock().clone();
        for handler in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let mut handler = handler.lock();
                (*handler)(arg)
            }));
            if outcome.is_err() {
                error!("Event handler panicked");
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.lock().len()
    }
}
