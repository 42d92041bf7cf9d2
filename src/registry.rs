//! Registry-backed registrar used by [`singleton!`](crate::singleton).
//!
//! The registry maps `TypeId` to the stored `Arc<T>`. The first check takes the
//! shared read lock; the write lock is the guard for the second check and the
//! allocation.
//!
//! # Examples
//!
//! ```
//! use singleton_registrar::{singleton, Lifecycle, Singleton};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! struct AppConfig {
//!     debug: bool,
//!     timeout: u32,
//! }
//!
//! impl Lifecycle for AppConfig {
//!     type Args = ();
//!     type Error = Infallible;
//!
//!     fn allocate(_: &()) -> Result<Self, Infallible> {
//!         Ok(AppConfig { debug: true, timeout: 30 })
//!     }
//! }
//!
//! singleton!(AppConfig);
//!
//! let config1 = AppConfig::instance(()).unwrap();
//! let config2 = AppConfig::instance(()).unwrap();
//! assert!(Arc::ptr_eq(&config1, &config2));
//! assert!(config2.debug);
//! assert_eq!(config2.timeout, 30);
//! ```

use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock, RwLock},
};

use crate::{Acquired, Lifecycle, Registrar, TraceHook};

type Entries<T> = RwLock<HashMap<TypeId, Arc<T>>>;

fn empty<T>() -> Entries<T> {
    RwLock::new(HashMap::new())
}

/// Thread-safe registry storing the instance of a decorated type.
///
/// The map is created lazily through a `LazyLock`, so a `Registry` can live in
/// a `static`.
pub struct Registry<T> {
    entries: LazyLock<Entries<T>, fn() -> Entries<T>>,
    trace: TraceHook,
}

impl<T> Registry<T> {
    /// Creates an empty registry. Usable in `static` initializers.
    pub const fn new() -> Self {
        Registry {
            entries: LazyLock::new(empty::<T>),
            trace: TraceHook::new(),
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Lifecycle> Registrar<T> for Registry<T> {
    /// Double-checked lookup of `T`'s entry.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// A panic in `T::allocate` poisons the write lock before anything is
    /// inserted, so the inner map is recovered and used as is.
    fn acquire(&self, args: &T::Args) -> Result<Acquired<T>, T::Error> {
        let key = TypeId::of::<T>();

        let cached = self
            .entries
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(&key)
            .cloned();

        if let Some(instance) = cached {
            tracing::trace!(type_name = type_name::<T>(), "singleton cache hit");
            return Ok(Acquired::Cached(instance));
        }

        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());

        // Another caller may have allocated between the read and the write lock.
        if let Some(instance) = entries.get(&key) {
            tracing::trace!(type_name = type_name::<T>(), "singleton cache hit");
            return Ok(Acquired::Cached(Arc::clone(instance)));
        }

        let instance = match T::allocate(args) {
            Ok(value) => Arc::new(value),
            Err(err) => {
                tracing::debug!(type_name = type_name::<T>(), "singleton allocation failed");
                return Err(err);
            }
        };
        entries.insert(key, Arc::clone(&instance));
        drop(entries);

        tracing::debug!(type_name = type_name::<T>(), "allocated singleton instance");
        Ok(Acquired::Allocated(instance))
    }

    fn peek(&self) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(&TypeId::of::<T>())
            .cloned()
    }

    fn trace(&self) -> &TraceHook {
        &self.trace
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .entries
            .read()
            .map(|m| m.len())
            .unwrap_or_else(|p| p.into_inner().len());
        f.debug_struct("Registry")
            .field("type_name", &type_name::<T>())
            .field("entries", &len)
            .field("trace", &self.trace)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
