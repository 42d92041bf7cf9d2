//! Manual wiring example for singleton-registrar.
//!
//! Demonstrates:
//! - Implementing `Singleton` by hand with a `static` `Registry`
//! - An allocation step that can fail, and a retry that succeeds
//! - Reading the registrar static directly
//!
//! Run with: `cargo run --example manual_registrar`

use singleton_registrar::{Lifecycle, Registrar, Registry, Singleton};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, thiserror::Error)]
enum PoolError {
    #[error("pool size must be positive, got {0}")]
    InvalidSize(u32),
}

/// Connection pool sized once, at allocation.
struct ConnectionPool {
    size: u32,
    checkouts: AtomicU32,
}

impl Lifecycle for ConnectionPool {
    type Args = u32;
    type Error = PoolError;

    fn allocate(size: &u32) -> Result<Self, PoolError> {
        if *size == 0 {
            return Err(PoolError::InvalidSize(*size));
        }
        Ok(ConnectionPool {
            size: *size,
            checkouts: AtomicU32::new(0),
        })
    }

    fn setup(&self, _: u32) -> Result<(), PoolError> {
        self.checkouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

static POOL: Registry<ConnectionPool> = Registry::new();

impl Singleton for ConnectionPool {
    type Registrar = Registry<ConnectionPool>;

    fn registrar() -> &'static Registry<ConnectionPool> {
        &POOL
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== singleton-registrar: Manual Registrar ===\n");

    // -------------------------------------------------------------------------
    // 1. Allocation failure leaves nothing behind
    // -------------------------------------------------------------------------
    println!("1. Allocating with an invalid size...");

    match ConnectionPool::instance(0) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }
    println!("   POOL.peek().is_some() = {}", POOL.peek().is_some());

    // -------------------------------------------------------------------------
    // 2. Retry succeeds; later sizes are ignored by allocation
    // -------------------------------------------------------------------------
    println!("\n2. Allocating with a valid size...");

    let pool = ConnectionPool::instance(8).unwrap();
    let again = ConnectionPool::instance(64).unwrap();

    println!("   size: {}", again.size);
    println!("   checkouts: {}", pool.checkouts.load(Ordering::SeqCst));
    println!("   registry: {:?}", POOL);

    println!("\n=== Example Complete ===");
}
