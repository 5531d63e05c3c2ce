//! # Singleton Proxy
//!
//! Lazily created, per-type singletons with explicit reset, and a forwarding proxy that
//! always talks to whatever the current instance is.
//!
//! A type opts in by implementing [`Singleton`] (or via the [`singleton!`] macro). Its one
//! instance is built on the first [`Singleton::get_instance`] call, shared as an `Arc`,
//! and discarded by [`Singleton::reset_instance`]. A [`SingletonProxy`] is a zero-sized
//! handle that resolves the instance again for every operation, so it never goes stale.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_proxy::{singleton, InfallibleSingleton, Singleton};
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Memory {
//!     items: Mutex<Vec<i32>>,
//! }
//! singleton!(Memory);
//!
//! let memory = Memory::proxy();
//! memory.with(|m| m.items.lock().unwrap().push(12));
//! assert_eq!(*Memory::instance().items.lock().unwrap(), vec![12]);
//!
//! memory.reset_instance();
//! assert!(memory.with(|m| m.items.lock().unwrap().is_empty()));
//! ```
//!
//! ## Features
//!
//! - **Per-type slots**: each concrete type, including each generic instantiation, owns one slot
//! - **Guarded construction**: only the registry can call [`Singleton::create`]
//! - **Transparent proxy**: member access, `Display`/`Debug`, [`Members`], [`Iterable`] and [`Cursor`]
//! - **Tracing support**: optional callback receiving a [`SingletonEvent`] per registry operation
//!
//! ## Threading
//!
//! The contract is single-threaded correctness. Instances must be `Send + Sync` because
//! they live in a process-wide static, but no construction lock is taken: two threads
//! racing on first use may both run `create`, and only the first stored value survives.

mod capability;
mod macros;
mod proxy;
pub mod registry;
mod singleton;
mod singleton_event;

// Re-export the main public API
pub use capability::{Cursor, Iterable, Members};
pub use proxy::SingletonProxy;
pub use registry::{clear_trace_callback, set_trace_callback, TraceCallback};
pub use singleton::{Creation, InfallibleSingleton, Singleton};
pub use singleton_event::SingletonEvent;
