//! Macros for declaring singletons.
//!
//! This module provides a macro-based shortcut for the common case of a singleton whose
//! construction cannot fail.

/// Implements [`Singleton`](crate::Singleton) for a type with an infallible constructor.
///
/// - `singleton!(Type)` builds the instance with `Default::default()`. The type keeps its
///   `Default` impl, so `Type::default()` still builds values outside the registry; those
///   are never the managed instance.
/// - `singleton!(Type => expr)` builds it by evaluating `expr` on every construction.
///
/// The generated impl uses `Infallible` as its error type, so the type also gets
/// [`InfallibleSingleton::instance`](crate::InfallibleSingleton::instance) and the full
/// forwarding surface of [`SingletonProxy`](crate::SingletonProxy).
///
/// # Examples
///
/// ```rust
/// use singleton_proxy::{singleton, InfallibleSingleton, Singleton};
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Hits(AtomicU64);
/// singleton!(Hits);
///
/// struct Greeting(String);
/// singleton!(Greeting => Greeting("hello".to_string()));
///
/// Hits::instance().0.fetch_add(1, Ordering::SeqCst);
/// assert_eq!(Hits::instance().0.load(Ordering::SeqCst), 1);
/// assert_eq!(Greeting::instance().0, "hello");
///
/// Hits::reset_instance();
/// assert_eq!(Hits::instance().0.load(Ordering::SeqCst), 0);
/// ```
///
/// Generic instantiations are separate types and need their own invocation:
///
/// ```rust
/// use singleton_proxy::{singleton, InfallibleSingleton};
///
/// #[derive(Default)]
/// struct Pool<T>(Vec<T>);
/// singleton!(Pool<u8>);
/// singleton!(Pool<String>);
///
/// assert!(Pool::<u8>::instance().0.is_empty());
/// ```
#[macro_export]
macro_rules! singleton {
    ($ty:ty) => {
        $crate::singleton!($ty => <$ty as ::core::default::Default>::default());
    };
    ($ty:ty => $init:expr) => {
        impl $crate::Singleton for $ty {
            type Error = ::core::convert::Infallible;

            fn create(
                _creation: $crate::Creation<'_, Self>,
            ) -> ::core::result::Result<Self, Self::Error> {
                ::core::result::Result::Ok($init)
            }
        }
    };
}
