//! Core traits defining singleton behavior.
//!
//! [`Registrar`] is the storage seam: it hands out the cached-or-new instance of
//! one decorated type using double-checked locking. Two implementations ship
//! with the crate, [`Registry`](crate::Registry) and
//! [`SingletonSlot`](crate::SingletonSlot).
//!
//! [`Singleton`] is the per-type surface. It only needs the `registrar`
//! accessor; construction, peeking and tracing come from default methods.

use std::any::type_name;
use std::sync::Arc;

use crate::{Lifecycle, RegistrarEvent, SingletonInfo, TraceHook};

/// Outcome of [`Registrar::acquire`].
#[derive(Debug)]
pub enum Acquired<T> {
    /// This call allocated and stored the instance.
    Allocated(Arc<T>),
    /// The instance was already stored.
    Cached(Arc<T>),
}

impl<T> Acquired<T> {
    /// Returns the shared instance.
    pub fn into_inner(self) -> Arc<T> {
        match self {
            Acquired::Allocated(instance) | Acquired::Cached(instance) => instance,
        }
    }

    /// Whether this call performed the allocation.
    pub fn is_allocated(&self) -> bool {
        matches!(self, Acquired::Allocated(_))
    }
}

/// Storage and guard for the single instance of `T`.
pub trait Registrar<T: Lifecycle>: Send + Sync {
    /// Returns the stored instance, allocating it with `T::allocate(args)` if
    /// none exists yet.
    ///
    /// Implementations check for an entry without the guard, then re-check
    /// under the guard before allocating. The guard is released before this
    /// method returns, on every path. An allocation error is returned as is and
    /// leaves nothing stored.
    fn acquire(&self, args: &T::Args) -> Result<Acquired<T>, T::Error>;

    /// Returns the stored instance without allocating.
    fn peek(&self) -> Option<Arc<T>>;

    /// The trace hook of this registrar.
    fn trace(&self) -> &TraceHook;

    /// Introspection metadata about the decorated type, if the registrar keeps any.
    fn info(&self) -> Option<&SingletonInfo> {
        None
    }
}

/// A type with at most one live instance per process.
///
/// Implemented by the [`singleton!`](crate::singleton) and
/// [`singleton_class!`](crate::singleton_class) macros, or by hand (see the
/// `manual_registrar` demo).
pub trait Singleton: Lifecycle {
    /// The registrar implementation backing this type.
    type Registrar: Registrar<Self> + 'static;

    /// Access the registrar static.
    ///
    /// This method must be implemented to provide access to the type's storage.
    fn registrar() -> &'static Self::Registrar;

    // -------------------------------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------------------------------

    /// The construction call.
    ///
    /// Returns the shared instance, allocating it on the first successful call,
    /// then runs [`Lifecycle::setup`] with `args` against it. Setup runs on
    /// every call and outside the guard, so concurrent callers may run setup
    /// concurrently on the same instance.
    ///
    /// # Errors
    ///
    /// - `Self::allocate` failed: nothing is stored, a later call may retry
    /// - `Self::setup` failed: the instance stays stored
    fn instance(args: Self::Args) -> Result<Arc<Self>, Self::Error> {
        let registrar = Self::registrar();
        let acquired = registrar.acquire(&args)?;
        let type_name = type_name::<Self>();

        registrar.trace().emit(&if acquired.is_allocated() {
            RegistrarEvent::Allocate { type_name }
        } else {
            RegistrarEvent::Reuse { type_name }
        });

        let instance = acquired.into_inner();
        let outcome = instance.setup(args);

        registrar.trace().emit(&RegistrarEvent::Setup {
            type_name,
            ok: outcome.is_ok(),
        });

        outcome.map(|()| instance)
    }

    /// Returns the stored instance, if any. Never allocates or runs setup.
    fn peek() -> Option<Arc<Self>> {
        let registrar = Self::registrar();
        let found = registrar.peek();

        registrar.trace().emit(&RegistrarEvent::Get {
            type_name: type_name::<Self>(),
            found: found.is_some(),
        });

        found
    }

    /// Returns `true` once an instance has been stored.
    fn is_initialized() -> bool {
        let registrar = Self::registrar();
        let found = registrar.peek().is_some();

        registrar.trace().emit(&RegistrarEvent::Contains {
            type_name: type_name::<Self>(),
            found,
        });

        found
    }

    /// Introspection metadata kept by the registrar, if any.
    fn info() -> Option<&'static SingletonInfo> {
        Self::registrar().info()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for this type's registrar operations.
    ///
    /// The callback runs with no registrar or hook lock held. Constructing or
    /// peeking the same type from inside it emits further events, so guard
    /// against unbounded recursion.
    fn set_trace_callback(callback: impl Fn(&RegistrarEvent) + Send + Sync + 'static) {
        Self::registrar().trace().set(callback);
    }

    /// Clear the tracing callback.
    ///
    /// This does not affect the stored instance, only the tracing callback.
    fn clear_trace_callback() {
        Self::registrar().trace().clear();
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
