//! Double-checked locking with explicit acquire/release publication.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Mutex;

use crate::event::{emit, SingletonEvent};
use crate::{ConstructionError, Singleton};

/// Lazy cell using double-checked locking.
///
/// Reads go through an atomic pointer first; the lock is taken only when
/// that unsynchronized-looking check suggests the cell is still empty, and
/// the pointer is re-checked under the lock before constructing. After
/// initialization every call is a single acquire load with no lock.
///
/// # Memory ordering is a correctness requirement
///
/// The pointer is published with [`Ordering::Release`] and read with
/// [`Ordering::Acquire`]. This pairing is what makes the pattern sound: the
/// release store is ordered after every write the constructor performed, and
/// any thread whose acquire load observes the non-null pointer also observes
/// the fully constructed value behind it. With relaxed ordering this would
/// be the classic broken double-checked locking bug, where a reader sees a
/// non-null pointer to an object whose fields are not yet visible. Do not
/// weaken these orderings.
///
/// The instance is never freed (owned for the process lifetime). A
/// constructor error leaves the pointer null and releases the lock, so a
/// later call may retry construction.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{DoubleCheckedLazy, Singleton};
///
/// static CONFIG: DoubleCheckedLazy<Vec<u32>> = DoubleCheckedLazy::new(|| Ok(vec![1, 2, 3]));
///
/// assert_eq!(CONFIG.instance().unwrap().len(), 3);
/// ```
pub struct DoubleCheckedLazy<T, F = fn() -> Result<T, ConstructionError>> {
    ptr: AtomicPtr<T>,
    init_lock: Mutex<()>,
    ctor: F,
}

impl<T, F> DoubleCheckedLazy<T, F> {
    /// Creates an empty cell with the given constructor.
    pub const fn new(ctor: F) -> Self {
        Self {
            ptr: AtomicPtr::new(ptr::null_mut()),
            init_lock: Mutex::new(()),
            ctor,
        }
    }
}

impl<T, F> Singleton<T> for DoubleCheckedLazy<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, ConstructionError>,
{
    const STRATEGY: &'static str = "double-checked";

    type Handle<'a>
        = &'a T
    where
        Self: 'a,
        T: 'a;

    /// # Lock Poisoning Recovery
    ///
    /// If the initialization lock is poisoned (a constructor panicked while
    /// holding it), the lock is recovered. The pointer is only ever stored
    /// after a constructor returns successfully, so a poisoned lock always
    /// means an empty cell and retrying is safe.
    fn instance(&self) -> Result<&T, ConstructionError> {
        // Fast path: one acquire load, no lock.
        let existing = self.ptr.load(Ordering::Acquire);
        if !existing.is_null() {
            return Ok(unsafe { &*existing });
        }

        let _guard = self.init_lock.lock().unwrap_or_else(|p| p.into_inner());

        // Second check under the lock: another thread may have won the race
        // while we were blocked acquiring it.
        let existing = self.ptr.load(Ordering::Acquire);
        if !existing.is_null() {
            return Ok(unsafe { &*existing });
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

        let fresh = Box::into_raw(Box::new(value));
        // Release store: publishes the constructed value together with the
        // pointer. Required for every acquire load above to be sound.
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
