//! Strategy with no mutual exclusion at all. Broken on purpose.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::event::{emit, SingletonEvent};
use crate::{ConstructionError, Singleton};

/// Lazy cell with an unsynchronized check and no exclusion on construction.
///
/// This is the naive baseline: the emptiness check and the construction are
/// not atomic with respect to each other, so two threads racing the first
/// call can both observe an empty cell and both run the constructor. The
/// last store wins and earlier winners' allocations are abandoned; racing
/// callers may walk away holding *different* instances.
///
/// The pointer itself is still published with release/acquire ordering. A
/// plain (non-atomic) pointer would make the race undefined behavior rather
/// than merely wrong, and the point of this type is to show the wrong
/// *semantics*, not to corrupt memory. Do not use it outside of comparisons
/// and tests; every other strategy in this crate is a correct replacement.
pub struct RacyLazy<T, F = fn() -> Result<T, ConstructionError>> {
    ptr: AtomicPtr<T>,
    ctor: F,
}

impl<T, F> RacyLazy<T, F> {
    /// Creates an empty cell with the given constructor.
    pub const fn new(ctor: F) -> Self {
        Self {
            ptr: AtomicPtr::new(ptr::null_mut()),
            ctor,
        }
    }
}

impl<T, F> Singleton<T> for RacyLazy<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, ConstructionError>,
{
    const STRATEGY: &'static str = "racy";

    type Handle<'a>
        = &'a T
    where
        Self: 'a,
        T: 'a;

    fn instance(&self) -> Result<&T, ConstructionError> {
        let existing = self.ptr.load(Ordering::Acquire);
        if !existing.is_null() {
            return Ok(unsafe { &*existing });
        }

        // Race window: any number of threads can reach this point before the
        // first store below becomes visible.
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

        let fresh = Box::into_raw(Box::new(value));
        // Plain store, not compare-exchange: the last writer overwrites any
        // earlier winner, whose allocation is leaked. Never freed either way.
        self.ptr.store(fresh, Ordering::Release);

        emit(&SingletonEvent::Constructed {
            type_name: std::any::type_name::<T>(),
            strategy: Self::STRATEGY,
        });

        Ok(unsafe { &*fresh })
    }

    fn peek(&self) -> Option<&T> {
        let existing = self.ptr.load(Ordering::Acquire);
        if existing.is_null() {
            None
        } else {
            Some(unsafe { &*existing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RacyLazy;
    use crate::{ConstructionError, Singleton};

    #[test]
    fn test_single_threaded_init_once() {
        let cell: RacyLazy<u32, _> = RacyLazy::new(|| Ok(7));
        assert!(!cell.is_initialized());

        let a = cell.instance().unwrap();
        let b = cell.instance().unwrap();
        assert_eq!(*a, 7);
        assert!(std::ptr::eq(a, b));
        assert!(cell.is_initialized());
    }

    #[test]
    fn test_failed_construction_leaves_cell_empty() {
        let cell: RacyLazy<u32, _> =
            RacyLazy::new(|| Err(ConstructionError::new::<u32>("nope")));
        assert!(cell.instance().is_err());
        assert!(cell.peek().is_none());
    }
}
