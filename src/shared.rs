//! Run-once strategy with reference-counted shared ownership.

use std::sync::{Arc, Mutex, OnceLock};

use crate::event::{emit, SingletonEvent};
use crate::{ConstructionError, Singleton};

/// Lazy cell combining a run-once slot with `Arc` handles.
///
/// The instance lives in a [`OnceLock`], the standard run-once primitive:
/// the slot is written at most once, the write happens-before every read
/// that observes it, and the already-initialized path is a single check with
/// no lock. Unlike the other strategies, callers receive an [`Arc<T>`], so
/// the instance is also properly *owned* rather than leaked: it is dropped
/// when the last handle goes away, which in practice is process teardown
/// since the cell itself keeps one reference.
///
/// # Failure policy
///
/// Bare [`std::sync::Once`] has a sharp edge: a failed attempt poisons it
/// and it never re-arms. This cell deliberately avoids that behavior by
/// serializing fallible construction attempts through a side mutex and only
/// writing the slot on success. A constructor error propagates to the
/// calling thread, the slot stays empty, and a later call may retry.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{SharedLazy, Singleton};
///
/// static POOL: SharedLazy<Vec<String>> = SharedLazy::new(|| Ok(Vec::new()));
///
/// let a = POOL.instance().unwrap();
/// let b = POOL.instance().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub struct SharedLazy<T, F = fn() -> Result<T, ConstructionError>> {
    slot: OnceLock<Arc<T>>,
    init_lock: Mutex<()>,
    ctor: F,
}

impl<T, F> SharedLazy<T, F> {
    /// Creates an empty cell with the given constructor.
    pub const fn new(ctor: F) -> Self {
        Self {
            slot: OnceLock::new(),
            init_lock: Mutex::new(()),
            ctor,
        }
    }
}

impl<T, F> Singleton<T> for SharedLazy<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, ConstructionError>,
{
    const STRATEGY: &'static str = "shared-once";

    type Handle<'a>
        = Arc<T>
    where
        Self: 'a,
        T: 'a;

    /// # Lock Poisoning Recovery
    ///
    /// If the attempt lock is poisoned (a constructor panicked while holding
    /// it), the lock is recovered. The slot is only written after a
    /// constructor returns successfully, so a poisoned lock always means an
    /// empty slot and retrying is safe.
    fn instance(&self) -> Result<Arc<T>, ConstructionError> {
        // Already-initialized path: one synchronized check, no lock.
        if let Some(existing) = self.slot.get() {
            return Ok(Arc::clone(existing));
        }

        let _guard = self.init_lock.lock().unwrap_or_else(|p| p.into_inner());

        // Another attempt may have completed while we waited for the lock.
        if let Some(existing) = self.slot.get() {
            return Ok(Arc::clone(existing));
        }

        let value = match (self.ctor)() {
            Ok(value) => value,
            Err(err) => {
                emit(&SingletonEvent::ConstructionFailed {
                    type_name: std::any::type_name::<T>(),
                    strategy: Self::STRATEGY,
                });
                return Err(err);
            }
        };

        let handle = Arc::new(value);
        // Cannot fail: the attempt lock is held and the slot was empty.
        let _ = self.slot.set(Arc::clone(&handle));

        emit(&SingletonEvent::Constructed {
            type_name: std::any::type_name::<T>(),
            strategy: Self::STRATEGY,
        });

        Ok(handle)
    }

    fn peek(&self) -> Option<Arc<T>> {
        self.slot.get().map(Arc::clone)
    }
}
