//! One-shot, broadcast cancellation.
//!
//! A [`CancelSignal`] pairs an atomic flag (cheap polling) with a channel that
//! never carries a message: firing the signal drops the only sender, which
//! disconnects the channel and makes every pending or future
//! `recv(signal.listener())` arm of a `crossbeam_channel::select!` ready at
//! once. Firing twice is a no-op.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct CancelSignal {
    inner: Arc<Inner>,
}

struct Inner {
    fired: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    listener: Receiver<()>,
}

impl CancelSignal {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            inner: Arc::new(Inner {
                fired: AtomicBool::new(false),
                trigger: Mutex::new(Some(tx)),
                listener: rx,
            }),
        }
    }

    /// Fire the signal. Safe from any thread, any number of times.
    pub fn cancel(&self) {
        self.inner.fired.store(true, Ordering::SeqCst);
        let mut trigger = self
            .inner
            .trigger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        trigger.take();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.fired.load(Ordering::SeqCst)
    }

    /// Receiver that becomes ready (with a disconnect) once the signal fires.
    /// Meant for `select!`; it never yields a value.
    #[must_use]
    pub fn listener(&self) -> &Receiver<()> {
        &self.inner.listener
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelSignal")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
