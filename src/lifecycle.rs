//! The construction protocol wrapped by the registrars.
//!
//! A type takes part in singleton construction by splitting its creation into
//! two steps:
//!
//! - [`Lifecycle::allocate`] builds the value. It runs at most once per
//!   decorated type, while the registrar's guard is held.
//! - [`Lifecycle::setup`] runs on *every* construction call against the shared
//!   instance, outside the guard.
//!
//! Because the shared instance is handed out as `Arc<Self>`, `setup` only gets
//! `&self`. Fields that setup rewrites need interior mutability.

/// Allocation and per-call setup of a singleton type.
///
/// # Examples
///
/// ```rust
/// use singleton_registrar::{singleton, Lifecycle, Singleton};
/// use std::convert::Infallible;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// struct Hits(AtomicU32);
///
/// impl Lifecycle for Hits {
///     type Args = ();
///     type Error = Infallible;
///
///     fn allocate(_: &()) -> Result<Self, Infallible> {
///         Ok(Hits(AtomicU32::new(0)))
///     }
///
///     fn setup(&self, _: ()) -> Result<(), Infallible> {
///         self.0.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
/// }
///
/// singleton!(Hits);
///
/// let first = Hits::instance(()).unwrap();
/// let second = Hits::instance(()).unwrap();
/// assert_eq!(second.0.load(Ordering::SeqCst), 2);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub trait Lifecycle: Sized + Send + Sync + 'static {
    /// Arguments of a construction call. Use a tuple for several values.
    type Args;

    /// Error returned by `allocate` or `setup`; passed to the caller unchanged.
    /// Use [`std::convert::Infallible`] when neither step can fail.
    type Error;

    /// Builds the instance. Only the first successful call is ever stored.
    ///
    /// Do not construct `Self` through its registrar from here: the guard is
    /// not reentrant and the call deadlocks.
    fn allocate(args: &Self::Args) -> Result<Self, Self::Error>;

    /// Runs on every construction call, including cache hits.
    ///
    /// The default does nothing. An error leaves the instance cached with
    /// whatever this method already changed.
    fn setup(&self, _args: Self::Args) -> Result<(), Self::Error> {
        Ok(())
    }
}
