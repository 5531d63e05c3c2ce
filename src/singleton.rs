//! Core trait defining singleton behavior.
//!
//! This module provides the `Singleton` trait with default implementations for
//! lazy creation, reset and inspection of the one shared instance of a type.
//!
//! The registry is type-based: each type (`TypeId`) owns exactly one slot. A type that
//! wraps another singleton type, or a different instantiation of a generic type, is a
//! different type and gets its own slot.

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{registry, SingletonProxy};

/// Proof that a constructor call was issued by the registry for `T`.
///
/// Only this crate can create a `Creation`, and [`Singleton::create`] requires one, so
/// code outside the registry cannot run the construction protocol of a singleton.
///
/// The token is bound to the type it was minted for and to the call it was minted in.
/// A constructor cannot spend its own token on another singleton:
///
/// ```compile_fail
/// use std::convert::Infallible;
/// use singleton_proxy::{Creation, Singleton};
///
/// struct Victim;
///
/// impl Singleton for Victim {
///     type Error = Infallible;
///
///     fn create(_: Creation<'_, Self>) -> Result<Self, Self::Error> {
///         Ok(Victim)
///     }
/// }
///
/// struct Thief;
///
/// impl Singleton for Thief {
///     type Error = Infallible;
///
///     fn create(creation: Creation<'_, Self>) -> Result<Self, Self::Error> {
///         let _unmanaged = Victim::create(creation);
///         Ok(Thief)
///     }
/// }
/// ```
///
/// Nor can it keep the token past the call:
///
/// ```compile_fail
/// use std::convert::Infallible;
/// use std::sync::Mutex;
/// use singleton_proxy::{Creation, Singleton};
///
/// static STASH: Mutex<Option<Creation<'static, Hoarder>>> = Mutex::new(None);
///
/// struct Hoarder;
///
/// impl Singleton for Hoarder {
///     type Error = Infallible;
///
///     fn create(creation: Creation<'_, Self>) -> Result<Self, Self::Error> {
///         *STASH.lock().unwrap() = Some(creation);
///         Ok(Hoarder)
///     }
/// }
/// ```
pub struct Creation<'a, T> {
    _bound: PhantomData<(fn() -> T, &'a mut &'a ())>,
}

impl<T> Creation<'_, T> {
    pub(crate) fn new() -> Self {
        Self {
            _bound: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Creation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Creation<{}>", type_name::<T>())
    }
}

/// A type with at most one live, lazily created, shared instance.
///
/// Implementors provide [`create`](Singleton::create); every other method has a default
/// implementation backed by the process-wide [`registry`](crate::registry).
///
/// Instances are shared as `Arc<Self>`, so state that callers mutate must live behind
/// interior mutability (`Mutex`, atomics, ...).
///
/// Two paths around the registry remain open, and values built through them are not
/// "the" instance and are never seen by `get_instance`:
///
/// - a struct literal inside the type's own module;
/// - any public constructor the type itself exposes, such as the `Default` impl that
///   [`singleton!(Type)`](crate::singleton) requires.
///
/// Calling `create` directly does not compile, because only the registry can mint the
/// [`Creation`] token:
///
/// ```compile_fail
/// use std::convert::Infallible;
/// use singleton_proxy::{Creation, Singleton};
///
/// struct Journal;
///
/// impl Singleton for Journal {
///     type Error = Infallible;
///
///     fn create(_: Creation<'_, Self>) -> Result<Self, Self::Error> {
///         Ok(Journal)
///     }
/// }
///
/// let _unmanaged = Journal::create(Creation::new());
/// ```
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use std::sync::{Arc, Mutex};
/// use singleton_proxy::{Creation, Singleton};
///
/// struct Journal {
///     lines: Mutex<Vec<String>>,
/// }
///
/// impl Singleton for Journal {
///     type Error = Infallible;
///
///     fn create(_: Creation<'_, Self>) -> Result<Self, Self::Error> {
///         Ok(Journal { lines: Mutex::new(Vec::new()) })
///     }
/// }
///
/// let a = Journal::get_instance().unwrap();
/// let b = Journal::get_instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// Journal::reset_instance();
/// let c = Journal::get_instance().unwrap();
/// assert!(!Arc::ptr_eq(&a, &c));
/// ```
pub trait Singleton: Send + Sync + Sized + 'static {
    /// Error returned when construction fails. Use `Infallible` when it cannot.
    type Error;

    /// Builds a fresh instance. Called by the registry only, when the slot is empty.
    fn create(creation: Creation<'_, Self>) -> Result<Self, Self::Error>;

    /// Returns the current instance, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Returns the error of [`create`](Singleton::create) unchanged. The slot stays empty,
    /// so a later call tries again.
    ///
    /// # Panics
    ///
    /// Panics if called for `Self` from within `Self::create` on the same thread.
    fn get_instance() -> Result<Arc<Self>, Self::Error> {
        registry::get_or_create::<Self>()
    }

    /// Discards the current instance so the next `get_instance` builds a new one.
    ///
    /// `Arc`s obtained earlier remain valid but are no longer the singleton.
    fn reset_instance() {
        registry::reset::<Self>();
    }

    /// Whether an instance currently exists. Never constructs one.
    fn has_instance() -> bool {
        registry::contains::<Self>()
    }

    /// Returns the current instance if there is one. Never constructs one.
    fn peek_instance() -> Option<Arc<Self>> {
        registry::peek::<Self>()
    }

    /// Returns a proxy that forwards to whatever the current instance is.
    fn proxy() -> SingletonProxy<Self> {
        SingletonProxy::new()
    }
}

/// Shorthand for singletons whose construction cannot fail.
pub trait InfallibleSingleton: Singleton<Error = Infallible> {
    /// Returns the current instance, constructing it on first use.
    fn instance() -> Arc<Self> {
        match Self::get_instance() {
            Ok(instance) => instance,
            Err(never) => match never {},
        }
    }
}

impl<T: Singleton<Error = Infallible>> InfallibleSingleton for T {}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
