//! Singleton proxy example for singleton-proxy.
//!
//! Demonstrates:
//! - Lazy construction on first use
//! - A proxy handle that keeps working across resets
//! - Old `Arc` references staying valid after a reset
//!
//! Run with: `cargo run --example proxy_handle`

use singleton_proxy::{
    set_trace_callback, Creation, InfallibleSingleton, Singleton, SingletonProxy,
};
use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

static VERSION: AtomicU32 = AtomicU32::new(1);

/// Application settings that might be reloaded.
struct AppSettings {
    api_endpoint: Mutex<String>,
    version: u32,
}

impl Singleton for AppSettings {
    type Error = Infallible;

    fn create(_: Creation<'_, Self>) -> Result<Self, Self::Error> {
        let version = VERSION.fetch_add(1, Ordering::SeqCst);
        Ok(AppSettings {
            api_endpoint: Mutex::new(format!("https://api.v{version}.example.com")),
            version,
        })
    }
}

impl fmt::Display for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self.api_endpoint.lock().unwrap_or_else(|p| p.into_inner());
        write!(f, "v{} -> {}", self.version, endpoint)
    }
}

/// Handle injected into the rest of the application.
static SETTINGS: SingletonProxy<AppSettings> = SingletonProxy::new();

fn describe(settings: SingletonProxy<AppSettings>) -> String {
    format!("{settings}")
}

fn main() {
    println!("=== singleton-proxy: Proxy Handle ===\n");

    set_trace_callback(|event| println!("   [trace] {event}"));

    // -------------------------------------------------------------------------
    // 1. First use constructs the instance
    // -------------------------------------------------------------------------
    println!("1. Reading settings through the proxy...");
    println!("   Current: {}", describe(SETTINGS));

    // -------------------------------------------------------------------------
    // 2. Mutate through the proxy, observe directly
    // -------------------------------------------------------------------------
    println!("\n2. Overriding the endpoint through the proxy...");
    SETTINGS.with(|s| *s.api_endpoint.lock().unwrap() = "http://localhost:8080".to_string());
    println!("   Direct view: {}", AppSettings::instance());

    // -------------------------------------------------------------------------
    // 3. Reset, keeping an old reference
    // -------------------------------------------------------------------------
    println!("\n3. Holding a reference and resetting...");
    let held: Arc<AppSettings> = SETTINGS.instance();
    SETTINGS.reset_instance();

    println!("   Held reference: {held}");
    println!("   Proxy now:      {}", describe(SETTINGS));
    println!(
        "   Same instance:  {}",
        Arc::ptr_eq(&held, &AppSettings::instance())
    );
}
