//! Per-registrar tracing callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::RegistrarEvent;

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistrarEvent` every time the
/// registrar is interacted with. It must be thread-safe because singletons are
/// shared across threads.
pub type TraceCallback = dyn Fn(&RegistrarEvent) + Send + Sync + 'static;

/// Holds an optional tracing callback for one decorator application.
///
/// Every emitted event is also logged at `TRACE` level through `tracing`,
/// whether or not a callback is installed. With no callback installed,
/// emitting never touches a lock.
pub struct TraceHook {
    installed: AtomicBool,
    callback: RwLock<Option<Arc<TraceCallback>>>,
}

impl TraceHook {
    /// Creates an empty hook. Usable in `static` initializers.
    pub const fn new() -> Self {
        TraceHook {
            installed: AtomicBool::new(false),
            callback: RwLock::new(None),
        }
    }

    /// Installs `callback`, replacing any previous one.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the hook lock is poisoned, the inner value is recovered. Trace
    /// operations are non-critical.
    pub fn set(&self, callback: impl Fn(&RegistrarEvent) + Send + Sync + 'static) {
        let mut guard = self.callback.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
        self.installed.store(true, Ordering::Release);
    }

    /// Removes the callback. Later events are only logged.
    pub fn clear(&self) {
        let mut guard = self.callback.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
        self.installed.store(false, Ordering::Release);
    }

    /// Returns `true` if a callback is installed.
    pub fn is_set(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    /// Logs `event` and hands it to the current callback, if any.
    ///
    /// The callback is cloned out of the hook and invoked with no lock held,
    /// so a slow callback never blocks other callers, and the callback may
    /// construct the same singleton or replace itself.
    ///
    /// # Panics
    ///
    /// A panic inside the callback propagates to the caller. The registrar
    /// guard is never held while events are emitted.
    pub fn emit(&self, event: &RegistrarEvent) {
        tracing::trace!(%event, "registrar event");

        if !self.is_set() {
            return;
        }

        let callback = self
            .callback
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl Default for TraceHook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TraceHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceHook")
            .field("is_set", &self.is_set())
            .finish()
    }
}
