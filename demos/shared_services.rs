//! Shared services example for singleton-registrar.
//!
//! Demonstrates:
//! - `singleton_class!` and the `SingletonInfo` it records
//! - A logger whose setup is guarded so the first level sticks
//! - A mail service shared by worker threads
//! - Watching construction through a trace callback
//!
//! Run with: `cargo run --example shared_services`

use singleton_registrar::{singleton_class, Lifecycle, Singleton};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::thread;

/// Logger that only honours the level of the first construction call.
struct Logger {
    level: Mutex<String>,
    initialized: AtomicBool,
    logs: Mutex<Vec<String>>,
}

impl Lifecycle for Logger {
    type Args = &'static str;
    type Error = Infallible;

    fn allocate(_: &&'static str) -> Result<Self, Infallible> {
        Ok(Logger {
            level: Mutex::new("INFO".to_string()),
            initialized: AtomicBool::new(false),
            logs: Mutex::new(Vec::new()),
        })
    }

    fn setup(&self, level: &'static str) -> Result<(), Infallible> {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            *self.level.lock().unwrap_or_else(|p| p.into_inner()) = level.to_string();
        }
        Ok(())
    }
}

impl Logger {
    fn log(&self, message: &str) {
        let level = self.level.lock().unwrap_or_else(|p| p.into_inner()).clone();
        self.logs
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(format!("[{}] {}", level, message));
    }
}

singleton_class!(Logger);

/// Mail service counting what every caller sent.
struct EmailService {
    smtp_server: String,
    sent_count: AtomicU32,
}

impl Lifecycle for EmailService {
    type Args = &'static str;
    type Error = Infallible;

    fn allocate(smtp_server: &&'static str) -> Result<Self, Infallible> {
        Ok(EmailService {
            smtp_server: smtp_server.to_string(),
            sent_count: AtomicU32::new(0),
        })
    }
}

impl EmailService {
    fn send(&self, to: &str) -> String {
        self.sent_count.fetch_add(1, Ordering::SeqCst);
        format!("mail sent to {} via {}", to, self.smtp_server)
    }
}

singleton_class!(EmailService);

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== singleton-registrar: Shared Services ===\n");

    // -------------------------------------------------------------------------
    // 1. Metadata recorded by singleton_class!
    // -------------------------------------------------------------------------
    println!("1. Decoration metadata...");

    if let Some(info) = Logger::info() {
        println!("   Logger:       {}", info);
    }
    if let Some(info) = EmailService::info() {
        println!("   EmailService: {}", info);
    }

    // -------------------------------------------------------------------------
    // 2. Guarded setup keeps the first level
    // -------------------------------------------------------------------------
    println!("\n2. Logger with guarded setup...");

    Logger::set_trace_callback(|event| println!("   [trace] {}", event));

    let logger1 = Logger::instance("DEBUG").unwrap();
    logger1.log("first message");
    let logger2 = Logger::instance("ERROR").unwrap();
    logger2.log("second message");

    Logger::clear_trace_callback();

    for line in logger1.logs.lock().unwrap_or_else(|p| p.into_inner()).iter() {
        println!("   {}", line);
    }

    // -------------------------------------------------------------------------
    // 3. Worker threads share one mail service
    // -------------------------------------------------------------------------
    println!("\n3. Mail service shared across threads...");

    let workers: Vec<_> = ["alice@example.com", "bob@example.com", "carol@example.com"]
        .into_iter()
        .map(|to| {
            thread::spawn(move || {
                let service = EmailService::instance("smtp.example.com").unwrap();
                service.send(to)
            })
        })
        .collect();

    for worker in workers {
        println!("   {}", worker.join().unwrap());
    }

    let service = EmailService::instance("smtp.ignored.com").unwrap();
    println!("   total sent: {}", service.sent_count.load(Ordering::SeqCst));

    println!("\n=== Example Complete ===");
}
