//! Decorator macros turning a [`Lifecycle`](crate::Lifecycle) type into a
//! [`Singleton`](crate::Singleton).
//!
//! Both macros produce the same observable behavior. They differ only in the
//! registrar they wire in: `singleton!` uses a [`Registry`](crate::Registry),
//! `singleton_class!` uses a [`SingletonSlot`](crate::SingletonSlot), which
//! also records [`SingletonInfo`](crate::SingletonInfo) about the type.
//!
//! The decorated type must be a concrete (non-generic) type.

/// Makes a type a registry-backed singleton.
///
/// The macro generates an `impl Singleton` with a hidden `static` registry, so
/// every construction call goes through one guard owned by this decoration.
///
/// # Examples
///
/// ```rust
/// use singleton_registrar::{singleton, Lifecycle, Singleton};
/// use std::convert::Infallible;
/// use std::sync::atomic::{AtomicU16, Ordering};
/// use std::sync::{Arc, Mutex};
///
/// struct DatabaseConnection {
///     host: Mutex<String>,
///     port: AtomicU16,
/// }
///
/// impl Lifecycle for DatabaseConnection {
///     type Args = (&'static str, u16);
///     type Error = Infallible;
///
///     fn allocate(_: &Self::Args) -> Result<Self, Infallible> {
///         Ok(DatabaseConnection {
///             host: Mutex::new(String::new()),
///             port: AtomicU16::new(0),
///         })
///     }
///
///     fn setup(&self, (host, port): Self::Args) -> Result<(), Infallible> {
///         *self.host.lock().unwrap() = host.to_string();
///         self.port.store(port, Ordering::SeqCst);
///         Ok(())
///     }
/// }
///
/// singleton!(DatabaseConnection);
///
/// let db1 = DatabaseConnection::instance(("server1", 5432)).unwrap();
/// let db2 = DatabaseConnection::instance(("server2", 3306)).unwrap();
///
/// // Same instance, setup ran again with the latest arguments.
/// assert!(Arc::ptr_eq(&db1, &db2));
/// assert_eq!(*db1.host.lock().unwrap(), "server2");
/// assert_eq!(db1.port.load(Ordering::SeqCst), 3306);
/// ```
#[macro_export]
macro_rules! singleton {
    ($ty:ty) => {
        impl $crate::Singleton for $ty {
            type Registrar = $crate::Registry<$ty>;

            fn registrar() -> &'static $crate::Registry<$ty> {
                static REGISTRY: $crate::Registry<$ty> = $crate::Registry::new();
                &REGISTRY
            }
        }
    };
}

/// Makes a type a slot-backed singleton that keeps introspection metadata.
///
/// Behaves exactly like [`singleton!`]; additionally `T::info()` describes the
/// decorated type and its allocation step.
///
/// # Examples
///
/// ```rust
/// use singleton_registrar::{singleton_class, Lifecycle, Singleton};
/// use std::convert::Infallible;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::{Arc, Mutex};
///
/// struct Logger {
///     level: Mutex<String>,
///     logs: Mutex<Vec<String>>,
/// }
///
/// impl Lifecycle for Logger {
///     type Args = &'static str;
///     type Error = Infallible;
///
///     fn allocate(_: &&'static str) -> Result<Self, Infallible> {
///         Ok(Logger {
///             level: Mutex::new(String::new()),
///             logs: Mutex::new(Vec::new()),
///         })
///     }
///
///     fn setup(&self, level: &'static str) -> Result<(), Infallible> {
///         *self.level.lock().unwrap() = level.to_string();
///         Ok(())
///     }
/// }
///
/// impl Logger {
///     fn log(&self, message: &str) {
///         let level = self.level.lock().unwrap().clone();
///         self.logs.lock().unwrap().push(format!("[{}] {}", level, message));
///     }
/// }
///
/// singleton_class!(Logger);
///
/// let logger1 = Logger::instance("DEBUG").unwrap();
/// logger1.log("first message");
/// let logger2 = Logger::instance("ERROR").unwrap();
///
/// assert!(Arc::ptr_eq(&logger1, &logger2));
/// assert_eq!(*logger2.level.lock().unwrap(), "ERROR");
/// assert_eq!(logger2.logs.lock().unwrap().len(), 1);
/// assert_eq!(Logger::info().unwrap().allocator(), "Logger::allocate");
/// ```
#[macro_export]
macro_rules! singleton_class {
    ($ty:ty) => {
        impl $crate::Singleton for $ty {
            type Registrar = $crate::SingletonSlot<$ty>;

            fn registrar() -> &'static $crate::SingletonSlot<$ty> {
                static SLOT: $crate::SingletonSlot<$ty> =
                    $crate::SingletonSlot::new($crate::SingletonInfo::new(
                        stringify!($ty),
                        module_path!(),
                        concat!(stringify!($ty), "::allocate"),
                    ));
                &SLOT
            }
        }
    };
}
