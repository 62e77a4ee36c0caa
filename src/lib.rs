//! # Lazy Singleton
//!
//! Lazily-initialized, process-wide singletons: one contract, five
//! interchangeable initialization strategies with different locking
//! granularity and failure policies.
//!
//! Every strategy is a cell type implementing the [`Singleton`] trait. The
//! first call to [`Singleton::instance`] constructs the value; every call
//! after that, from any thread, returns a handle to the same instance, and
//! no caller ever observes a partially constructed value.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazy_singleton::{define_singleton, Singleton};
//!
//! define_singleton! {
//!     /// Parsed once, shared by every thread afterwards.
//!     pub static CONFIG: Vec<String> = vec!["verbose".to_string()];
//! }
//!
//! let config = CONFIG.instance().unwrap();
//! assert_eq!(config[0], "verbose");
//! ```
//!
//! ## Choosing a strategy
//!
//! - [`OnDemandLazy`] - delegates to `std::sync::LazyLock`; simplest and
//!   least error-prone, use it by default (infallible constructor only)
//! - [`SharedLazy`] - run-once slot handing out `Arc<T>`; fallible and
//!   retry-capable, and the instance is dropped with the last reference
//!   instead of leaked
//! - [`DoubleCheckedLazy`] - lock-free acquire load after initialization,
//!   lock only during the first-call race window; fallible, retry-capable
//! - [`LockedLazy`] - takes a mutex on every call; correct but serializes
//!   all access, kept for comparison against the cheaper strategies
//! - [`RacyLazy`] - no exclusion at all; the broken baseline that shows why
//!   the others exist. Not for production use.
//!
//! ## Tracing
//!
//! Initialization is a process-wide side effect, so the crate can report it:
//! [`set_trace_callback`] installs a callback invoked whenever a cell
//! constructs its instance or a construction attempt fails.

mod double_checked;
mod error;
mod event;
mod locked;
mod macros;
mod on_demand;
mod racy;
mod shared;
mod singleton;

pub use double_checked::DoubleCheckedLazy;
pub use error::ConstructionError;
pub use event::{clear_trace_callback, set_trace_callback, SingletonEvent, TraceCallback};
pub use locked::LockedLazy;
pub use on_demand::OnDemandLazy;
pub use racy::RacyLazy;
pub use shared::SharedLazy;
pub use singleton::Singleton;
