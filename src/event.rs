//! Trace events emitted on singleton state transitions.
//!
//! Events fire only when a cell changes state (a constructor ran, or a
//! construction attempt failed). The post-initialization fast path emits
//! nothing, so tracing never adds synchronization to the hot read side.

use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};

/// Events emitted by singleton cells during initialization.
///
/// These events are passed to the tracing callback set via
/// [`set_trace_callback`]. The `Clone` derive allows callbacks to store or
/// forward events if needed.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::SingletonEvent;
///
/// let event = SingletonEvent::Constructed { type_name: "i32", strategy: "locked" };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone)]
pub enum SingletonEvent {
    /// A constructor ran to completion and the instance was published.
    Constructed {
        /// The type name of the constructed instance (e.g., "i32")
        type_name: &'static str,
        /// Short name of the strategy that performed the initialization
        strategy: &'static str,
    },

    /// A construction attempt returned an error; the cell stays empty.
    ConstructionFailed {
        /// The type name that failed to construct
        type_name: &'static str,
        /// Short name of the strategy whose attempt failed
        strategy: &'static str,
    },
}

impl fmt::Display for SingletonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingletonEvent::Constructed {
                type_name,
                strategy,
            } => {
                write!(
                    f,
                    "constructed {{ type_name: {type_name}, strategy: {strategy} }}"
                )
            }
            SingletonEvent::ConstructionFailed {
                type_name,
                strategy,
            } => {
                write!(
                    f,
                    "construction_failed {{ type_name: {type_name}, strategy: {strategy} }}"
                )
            }
        }
    }
}

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `SingletonEvent` on every state
/// transition. It must be thread-safe because initialization may happen on
/// any thread.
pub type TraceCallback = dyn Fn(&SingletonEvent) + Send + Sync + 'static;

/// Holds an optional user-defined tracing callback.
static TRACE_CALLBACK: LazyLock<Mutex<Option<Arc<TraceCallback>>>> =
    LazyLock::new(|| Mutex::new(None));

/// Sets a tracing callback invoked on every singleton state transition.
///
/// Call [`clear_trace_callback`] to disable tracing again.
///
/// # Safety Restrictions
///
/// The callback must NOT call `instance` on the cell that emitted the event:
/// lock-based strategies emit while still holding their initialization lock,
/// and re-entering would deadlock.
///
/// # Example
/// ```rust
/// use lazy_singleton::set_trace_callback;
///
/// set_trace_callback(|event| println!("[singleton-trace] {:?}", event));
/// # lazy_singleton::clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&SingletonEvent) + Send + Sync + 'static) {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = Some(Arc::new(callback));
}

/// Clears the tracing callback (disables singleton tracing).
pub fn clear_trace_callback() {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = None;
}

/// Convenience wrapper to emit an event using the current callback.
pub(crate) fn emit(event: &SingletonEvent) {
    // lock poisoning unlikely; if poisoned, keep emitting with recovered lock
    let guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(callback) = guard.as_ref() {
        callback(event);
    }
}
