//! Strategy that holds a mutex on every access.

use std::sync::Mutex;

use crate::event::{emit, SingletonEvent};
use crate::{ConstructionError, Singleton};

/// Lazy cell guarded by a mutex held for the duration of every call.
///
/// Correct under any interleaving: the lock makes the emptiness check and
/// the construction one critical section, so exactly one thread constructs
/// and everyone else blocks until the slot is filled. The price is paid
/// forever: every call after initialization still acquires the lock, which
/// serializes all readers. Prefer [`DoubleCheckedLazy`] or [`SharedLazy`]
/// when the cell sits on a hot path.
///
/// The instance is leaked via [`Box::leak`] and lives until process exit;
/// this cell never frees it. A constructor error leaves the slot empty, so
/// a later call may retry construction.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{LockedLazy, Singleton};
///
/// static ANSWER: LockedLazy<u32> = LockedLazy::new(|| Ok(42));
///
/// assert_eq!(*ANSWER.instance().unwrap(), 42);
/// ```
///
/// [`DoubleCheckedLazy`]: crate::DoubleCheckedLazy
/// [`SharedLazy`]: crate::SharedLazy
pub struct LockedLazy<T: 'static, F = fn() -> Result<T, ConstructionError>> {
    slot: Mutex<Option<&'static T>>,
    ctor: F,
}

impl<T: 'static, F> LockedLazy<T, F> {
    /// Creates an empty cell with the given constructor.
    pub const fn new(ctor: F) -> Self {
        Self {
            slot: Mutex::new(None),
            ctor,
        }
    }
}

impl<T, F> Singleton<T> for LockedLazy<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, ConstructionError>,
{
    const STRATEGY: &'static str = "locked";

    type Handle<'a>
        = &'a T
    where
        Self: 'a,
        T: 'a;

    /// # Lock Poisoning Recovery
    ///
    /// If the slot's lock is poisoned (a constructor panicked while holding
    /// it), the lock is recovered and the slot is still empty. The panicking
    /// attempt published nothing, so retrying is safe.
    fn instance(&self) -> Result<&T, ConstructionError> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(existing) = *slot {
            return Ok(existing);
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

        // Owned for the process lifetime; the cell never releases it.
        let leaked: &'static T = Box::leak(Box::new(value));
        *slot = Some(leaked);

        emit(&SingletonEvent::Constructed {
            type_name: std::any::type_name::<T>(),
            strategy: Self::STRATEGY,
        });

        Ok(leaked)
    }

    fn peek(&self) -> Option<&T> {
        // Pays the lock like every other call on this strategy.
        let slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        *slot
    }
}
