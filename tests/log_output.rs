//! Integration tests for `tracing` log output.
//!
//! A `tracing-subscriber` fmt layer writes into an in-memory buffer for the
//! duration of each test.

use singleton_registrar::{singleton, singleton_class, Lifecycle, Singleton};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> String {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[derive(Debug, thiserror::Error)]
#[error("unreachable backend")]
struct Unreachable;

#[test]
fn test_allocation_is_logged() {
    struct Database;

    impl Lifecycle for Database {
        type Args = ();
        type Error = Unreachable;

        fn allocate(_: &()) -> Result<Self, Unreachable> {
            Ok(Database)
        }
    }

    singleton!(Database);

    let output = capture(|| {
        let _ = Database::instance(()).unwrap();
        let _ = Database::instance(()).unwrap();
    });

    assert!(output.contains("allocated singleton instance"));
    assert!(output.contains("singleton cache hit"));
    assert!(output.contains("Database"));
    assert_eq!(output.matches("allocated singleton instance").count(), 1);
}

#[test]
fn test_allocation_failure_is_logged() {
    struct Backend;

    impl Lifecycle for Backend {
        type Args = ();
        type Error = Unreachable;

        fn allocate(_: &()) -> Result<Self, Unreachable> {
            Err(Unreachable)
        }
    }

    singleton_class!(Backend);

    let output = capture(|| {
        assert!(Backend::instance(()).is_err());
    });

    assert!(output.contains("singleton allocation failed"));
    assert!(output.contains("Backend::allocate"));
    assert!(!output.contains("allocated singleton instance"));
}

#[test]
fn test_registrar_events_are_logged() {
    struct Mailer;

    impl Lifecycle for Mailer {
        type Args = ();
        type Error = Unreachable;

        fn allocate(_: &()) -> Result<Self, Unreachable> {
            Ok(Mailer)
        }
    }

    singleton!(Mailer);

    let output = capture(|| {
        let _ = Mailer::instance(()).unwrap();
    });

    assert!(output.contains("registrar event"));
    assert!(output.contains("allocate { type_name: "));
    assert!(output.contains("ok: true"));
}
