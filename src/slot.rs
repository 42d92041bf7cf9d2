//! Slot-backed registrar used by [`singleton_class!`](crate::singleton_class).
//!
//! Each decorated type owns one `SingletonSlot`: a `OnceLock` holding the
//! instance and a dedicated guard mutex. The first check reads the `OnceLock`
//! without locking. The slot also keeps [`SingletonInfo`] about the decorated
//! type and its allocator.

use std::any::type_name;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use crate::{Acquired, Lifecycle, Registrar, TraceHook};

/// Static description of a decorated type, captured at the decoration site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingletonInfo {
    type_name: &'static str,
    module_path: &'static str,
    allocator: &'static str,
}

impl SingletonInfo {
    /// Metadata for a slot-backed type and the allocator it wraps.
    ///
    /// `singleton_class!` fills this in with `stringify!` and `module_path!`.
    pub const fn new(
        type_name: &'static str,
        module_path: &'static str,
        allocator: &'static str,
    ) -> Self {
        SingletonInfo {
            type_name,
            module_path,
            allocator,
        }
    }

    /// The type as written at the decoration site.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `module_path!()` of the decoration site.
    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// The wrapped allocation step, e.g. `Logger::allocate`.
    pub fn allocator(&self) -> &'static str {
        self.allocator
    }

    /// `module_path::type_name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module_path, self.type_name)
    }
}

impl fmt::Display for SingletonInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} (via {})", self.module_path, self.type_name, self.allocator)
    }
}

/// One-shot storage for the instance of a decorated type.
pub struct SingletonSlot<T> {
    cell: OnceLock<Arc<T>>,
    guard: Mutex<()>,
    trace: TraceHook,
    info: SingletonInfo,
}

impl<T> SingletonSlot<T> {
    /// Creates an empty slot. Usable in `static` initializers.
    pub const fn new(info: SingletonInfo) -> Self {
        SingletonSlot {
            cell: OnceLock::new(),
            guard: Mutex::new(()),
            trace: TraceHook::new(),
            info,
        }
    }
}

impl<T: Lifecycle> Registrar<T> for SingletonSlot<T> {
    fn acquire(&self, args: &T::Args) -> Result<Acquired<T>, T::Error> {
        if let Some(instance) = self.cell.get() {
            tracing::trace!(type_name = self.info.type_name, "singleton cache hit");
            return Ok(Acquired::Cached(Arc::clone(instance)));
        }

        // A panic in `T::allocate` poisons the guard but leaves the cell empty.
        let _guard = self.guard.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(instance) = self.cell.get() {
            tracing::trace!(type_name = self.info.type_name, "singleton cache hit");
            return Ok(Acquired::Cached(Arc::clone(instance)));
        }

        let instance = match T::allocate(args) {
            Ok(value) => Arc::new(value),
            Err(err) => {
                tracing::debug!(
                    type_name = self.info.type_name,
                    allocator = self.info.allocator,
                    "singleton allocation failed"
                );
                return Err(err);
            }
        };

        // Only writer, and the cell was empty under the guard.
        let stored = Arc::clone(self.cell.get_or_init(|| instance));

        tracing::debug!(
            type_name = self.info.type_name,
            allocator = self.info.allocator,
            "allocated singleton instance"
        );
        Ok(Acquired::Allocated(stored))
    }

    fn peek(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    fn trace(&self) -> &TraceHook {
        &self.trace
    }

    fn info(&self) -> Option<&SingletonInfo> {
        Some(&self.info)
    }
}

impl<T> fmt::Debug for SingletonSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonSlot")
            .field("type_name", &type_name::<T>())
            .field("initialized", &self.cell.get().is_some())
            .field("info", &self.info)
            .field("trace", &self.trace)
            .finish()
    }
}
