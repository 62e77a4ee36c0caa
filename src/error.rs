//! The single error kind produced by this crate.
//!
//! Lazy initialization has exactly one failure mode: the user-supplied
//! constructor failed. Everything else (lock poisoning on the internal
//! mutexes) is recovered internally, because the guarded state is a
//! write-once slot that is consistent at every observable point.

use std::error::Error;
use std::fmt;

/// A singleton constructor failed.
///
/// Returned by [`Singleton::instance`](crate::Singleton::instance) when the
/// constructor closure returns an error. The cell is left uninitialized, so
/// strategies documented as retry-capable may attempt construction again on
/// a later call.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::ConstructionError;
///
/// let err = ConstructionError::new::<String>("config file missing");
/// assert_eq!(
///     err.to_string(),
///     "failed to construct singleton `alloc::string::String`: config file missing"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
#[error("failed to construct singleton `{type_name}`: {reason}")]
pub struct ConstructionError {
    type_name: &'static str,
    reason: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ConstructionError {
    /// Creates an error for a failed construction of `T`.
    pub fn new<T>(reason: impl fmt::Display) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            reason: reason.to_string(),
            source: None,
        }
    }

    /// Creates an error for a failed construction of `T`, keeping the
    /// underlying error reachable through [`Error::source`].
    pub fn with_source<T>(source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            reason: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// The `std::any::type_name` of the instance that failed to construct.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Human-readable description of why construction failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
