//! Basic usage example for singleton-registrar.
//!
//! Demonstrates:
//! - Decorating a type with `singleton!`
//! - Repeated construction calls returning the same `Arc<T>`
//! - Setup re-running with the latest arguments
//! - Checking initialization with `is_initialized()` and `peek()`
//!
//! Run with: `RUST_LOG=singleton_registrar=trace cargo run --example basic_usage`

use singleton_registrar::{singleton, Lifecycle, Singleton};
use std::convert::Infallible;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A connection whose target is rewritten by every construction call.
struct DatabaseConnection {
    host: Mutex<String>,
    port: AtomicU16,
}

impl Lifecycle for DatabaseConnection {
    type Args = (&'static str, u16);
    type Error = Infallible;

    fn allocate(_: &Self::Args) -> Result<Self, Infallible> {
        Ok(DatabaseConnection {
            host: Mutex::new("localhost".to_string()),
            port: AtomicU16::new(5432),
        })
    }

    fn setup(&self, (host, port): Self::Args) -> Result<(), Infallible> {
        println!("   connecting to database: {}:{}", host, port);
        *self.host.lock().unwrap_or_else(|p| p.into_inner()) = host.to_string();
        self.port.store(port, Ordering::SeqCst);
        Ok(())
    }
}

impl DatabaseConnection {
    fn describe(&self) -> String {
        format!(
            "{}:{}",
            self.host.lock().unwrap_or_else(|p| p.into_inner()),
            self.port.load(Ordering::SeqCst)
        )
    }
}

singleton!(DatabaseConnection);

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "singleton_registrar=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== singleton-registrar: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Nothing exists before the first construction call
    // -------------------------------------------------------------------------
    println!("1. Before construction...");
    println!("   is_initialized() = {}", DatabaseConnection::is_initialized());

    // -------------------------------------------------------------------------
    // 2. First construction call allocates
    // -------------------------------------------------------------------------
    println!("\n2. First construction call...");

    let db1 = DatabaseConnection::instance(("server1", 5432)).unwrap();
    println!("   db1 -> {}", db1.describe());

    // -------------------------------------------------------------------------
    // 3. Second call returns the same instance, setup runs again
    // -------------------------------------------------------------------------
    println!("\n3. Second construction call with other arguments...");

    let db2 = DatabaseConnection::instance(("server2", 3306)).unwrap();
    println!("   db2 -> {}", db2.describe());
    println!("   same instance: {}", Arc::ptr_eq(&db1, &db2));
    println!("   db1 now sees:  {}", db1.describe());

    // -------------------------------------------------------------------------
    // 4. Peek without constructing
    // -------------------------------------------------------------------------
    println!("\n4. Peeking...");

    if let Some(db) = DatabaseConnection::peek() {
        println!("   peek() -> {}", db.describe());
    }
    println!("   is_initialized() = {}", DatabaseConnection::is_initialized());

    println!("\n=== Example Complete ===");
}
