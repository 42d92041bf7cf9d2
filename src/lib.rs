//! # Singleton Registrar
//!
//! Thread-safe, lazily initialized singletons for Rust types.
//!
//! A type describes how it is built through [`Lifecycle`]: an `allocate` step
//! that runs once, and a `setup` step that runs on every construction call.
//! Applying [`singleton!`] or [`singleton_class!`] to the type makes
//! `T::instance(args)` return the same `Arc<T>` for the lifetime of the process.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_registrar::{singleton, Lifecycle, Singleton};
//! use std::convert::Infallible;
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use std::sync::Arc;
//!
//! struct Counter {
//!     value: AtomicI32,
//! }
//!
//! impl Lifecycle for Counter {
//!     type Args = ();
//!     type Error = Infallible;
//!
//!     fn allocate(_: &()) -> Result<Self, Infallible> {
//!         Ok(Counter { value: AtomicI32::new(0) })
//!     }
//! }
//!
//! singleton!(Counter);
//!
//! let c1 = Counter::instance(()).unwrap();
//! let c2 = Counter::instance(()).unwrap();
//! c1.value.fetch_add(1, Ordering::SeqCst);
//!
//! assert!(Arc::ptr_eq(&c1, &c2));
//! assert_eq!(c2.value.load(Ordering::SeqCst), 1);
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: double-checked locking, allocation happens at most once
//! - **Setup on every call**: `setup` re-runs against the shared instance, so the
//!   latest call's arguments win unless the type guards its own setup
//! - **Errors pass through**: the type's own error comes back unchanged
//! - **Tracing support**: per-type callback plus `tracing` log events
//!
//! ## Main Items
//!
//! - [`singleton!`] - registry-backed decoration
//! - [`singleton_class!`] - slot-backed decoration with [`SingletonInfo`]
//! - [`Singleton`] - `instance`, `peek`, `is_initialized`, `info`, tracing
//! - [`Lifecycle`] - the allocate/setup protocol

mod lifecycle;
mod macros;
mod registrar_event;
mod registrar_trait;
mod registry;
mod slot;
mod trace;

pub use lifecycle::Lifecycle;
pub use registrar_event::RegistrarEvent;
pub use registrar_trait::{Acquired, Registrar, Singleton};
pub use registry::Registry;
pub use slot::{SingletonInfo, SingletonSlot};
pub use trace::{TraceCallback, TraceHook};
