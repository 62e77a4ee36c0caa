//! Strategy delegating to the standard library's one-time initialization.

use std::ops::Deref;
use std::sync::LazyLock;

use crate::{ConstructionError, Singleton};

/// Lazy cell backed by [`std::sync::LazyLock`].
///
/// Rust's runtime already ships an initialize-on-first-reach, exactly-once,
/// thread-safe primitive, and this strategy simply uses it: the first thread
/// to call [`instance`](Singleton::instance) runs the constructor, threads
/// arriving meanwhile block inside `LazyLock`, and every later call is a
/// single guard check. This is the simplest and least error-prone strategy;
/// reach for it unless you need fallible construction or shared ownership.
///
/// # Failure policy
///
/// The constructor is infallible by type (`fn() -> T`) because `LazyLock`
/// has no error channel. If the constructor panics, the inner `LazyLock` is
/// poisoned and every later access panics too: this strategy is **not**
/// retry-capable. Use [`SharedLazy`](crate::SharedLazy) or
/// [`DoubleCheckedLazy`](crate::DoubleCheckedLazy) when construction can
/// fail and a retry should be possible.
///
/// Because initialization happens inside the standard library's machinery,
/// this strategy emits no trace events.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{OnDemandLazy, Singleton};
///
/// static GREETING: OnDemandLazy<String> = OnDemandLazy::new(|| "hi".to_string());
///
/// assert_eq!(GREETING.instance().unwrap().as_str(), "hi");
/// assert_eq!(&*GREETING, "hi"); // Deref works too
/// ```
pub struct OnDemandLazy<T> {
    inner: LazyLock<T, fn() -> T>,
}

impl<T> OnDemandLazy<T> {
    /// Creates an empty cell with the given constructor.
    pub const fn new(ctor: fn() -> T) -> Self {
        Self {
            inner: LazyLock::new(ctor),
        }
    }

    /// Forces initialization and returns the instance.
    pub fn force(&self) -> &T {
        LazyLock::force(&self.inner)
    }
}

impl<T> Deref for OnDemandLazy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.force()
    }
}

impl<T> Singleton<T> for OnDemandLazy<T>
where
    T: Send + Sync + 'static,
{
    const STRATEGY: &'static str = "on-demand";

    type Handle<'a>
        = &'a T
    where
        Self: 'a,
        T: 'a;

    fn instance(&self) -> Result<&T, ConstructionError> {
        Ok(self.force())
    }

    fn peek(&self) -> Option<&T> {
        LazyLock::get(&self.inner)
    }
}
