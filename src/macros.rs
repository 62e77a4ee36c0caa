//! Macro for declaring singleton statics.
//!
//! This module provides a declaration macro so the common cases read like a
//! plain `static` item, without spelling out the cell type and constructor
//! closure by hand.

/// Declares a lazily-initialized singleton `static`.
///
/// The plain form expands to an [`OnDemandLazy`](crate::OnDemandLazy)
/// static (the recommended default strategy); prefix the declaration with
/// `shared` to get a [`SharedLazy`](crate::SharedLazy) static handing out
/// `Arc<T>` instead.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{define_singleton, Singleton};
///
/// define_singleton! {
///     /// Application-wide configuration.
///     pub static CONFIG: Vec<String> = vec!["default".to_string()];
/// }
///
/// assert_eq!(CONFIG.instance().unwrap().len(), 1);
/// ```
///
/// # Shared ownership
///
/// ```rust
/// use lazy_singleton::{define_singleton, Singleton};
/// use std::sync::Arc;
///
/// define_singleton! {
///     shared static REGISTRY: Vec<u32> = vec![1, 2, 3];
/// }
///
/// let a = REGISTRY.instance().unwrap();
/// let b = REGISTRY.instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($(#[$attr:meta])* $vis:vis shared static $name:ident: $ty:ty = $init:expr $(;)?) => {
        $(#[$attr])*
        $vis static $name: $crate::SharedLazy<$ty> = $crate::SharedLazy::new(|| Ok($init));
    };
    ($(#[$attr:meta])* $vis:vis static $name:ident: $ty:ty = $init:expr $(;)?) => {
        $(#[$attr])*
        $vis static $name: $crate::OnDemandLazy<$ty> = $crate::OnDemandLazy::new(|| $init);
    };
}
