//! The contract shared by every initialization strategy.
//!
//! Each strategy type owns its constructor and a write-once slot; this trait
//! is the seam that makes the strategies interchangeable. Application code
//! can stay generic over the policy and pick the locking discipline at the
//! declaration site.

use std::ops::Deref;

use crate::ConstructionError;

/// A cell holding a lazily-constructed, process-unique instance of `T`.
///
/// Implementations guarantee, for every correct strategy:
///
/// - **Exclusivity**: at most one instance of `T` is ever constructed by the
///   cell, no matter how many threads call [`instance`](Self::instance)
///   concurrently.
/// - **Visibility**: a caller that receives a handle observes the fully
///   constructed value; the constructor's writes happen-before every return.
/// - **Liveness**: callers that arrive while construction is in flight block
///   until the winning thread finishes, then receive the same instance.
///
/// [`RacyLazy`](crate::RacyLazy) implements this trait as well but is exempt
/// from the exclusivity guarantee: it is the deliberately broken baseline
/// kept around for comparison and for demonstrating the race in tests.
///
/// # Handles
///
/// The handle type differs per ownership mode: strategies that leak the
/// instance for the process lifetime hand out `&T`, while
/// [`SharedLazy`](crate::SharedLazy) hands out `Arc<T>` and releases the
/// value with the last reference.
pub trait Singleton<T> {
    /// Short strategy name, used in trace events.
    const STRATEGY: &'static str;

    /// The handle type returned to callers.
    type Handle<'a>: Deref<Target = T>
    where
        Self: 'a,
        T: 'a;

    /// Returns a handle to the instance, constructing it on the first call.
    ///
    /// Safe to call concurrently from any number of threads, any number of
    /// times. Every successful call across all threads returns a handle to
    /// the same instance.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstructionError`] if the constructor fails. No
    /// instance is considered initialized in that case; whether a later call
    /// may retry is documented per strategy.
    fn instance(&self) -> Result<Self::Handle<'_>, ConstructionError>;

    /// Returns a handle if the instance is already initialized.
    ///
    /// Never runs the constructor and never blocks on construction.
    fn peek(&self) -> Option<Self::Handle<'_>>;

    /// Whether the instance has been constructed.
    fn is_initialized(&self) -> bool {
        self.peek().is_some()
    }
}
