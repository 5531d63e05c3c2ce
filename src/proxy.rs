//! A handle that stands in for the current instance of a singleton.
//!
//! [`SingletonProxy<T>`] stores nothing but the type `T`. Every operation on it first
//! resolves the live instance through `T::get_instance()` and then delegates, so the
//! proxy keeps working after `reset_instance` replaces the instance.
//!
//! What gets forwarded:
//!
//! - member access, through [`with`](SingletonProxy::with) / [`try_with`](SingletonProxy::try_with)
//! - the lifecycle operations (`get_instance`, `reset_instance`, ...)
//! - `Display` and `Debug`
//! - [`Members`], [`Iterable`] (via `&SingletonProxy<T>: IntoIterator`) and [`Cursor`]
//!   (via `SingletonProxy<T>: Iterator`)
//!
//! Protocols without an error channel (`Display`, iteration, ...) are only forwarded for
//! singletons whose construction is infallible.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{Cursor, InfallibleSingleton, Iterable, Members, Singleton};

/// Forwarding handle to the current instance of `T`.
///
/// Proxies are zero-sized and `Copy`, and can be declared as `static`s. Any number of
/// proxies for the same `T` observe the same instance.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
/// use singleton_proxy::{singleton, SingletonProxy};
///
/// #[derive(Default)]
/// struct Memory {
///     items: Mutex<Vec<i32>>,
/// }
/// singleton!(Memory);
///
/// static MEMORY: SingletonProxy<Memory> = SingletonProxy::new();
///
/// MEMORY.with(|memory| memory.items.lock().unwrap().push(12));
/// assert_eq!(*MEMORY.instance().items.lock().unwrap(), vec![12]);
///
/// MEMORY.reset_instance();
/// assert!(MEMORY.with(|memory| memory.items.lock().unwrap().is_empty()));
/// ```
pub struct SingletonProxy<T: Singleton> {
    target: PhantomData<fn() -> T>,
}

impl<T: Singleton> SingletonProxy<T> {
    /// Creates a proxy for `T`. Does not touch the registry.
    pub const fn new() -> Self {
        Self {
            target: PhantomData,
        }
    }

    /// Returns the raw current instance, constructing it on first use.
    pub fn get_instance(&self) -> Result<Arc<T>, T::Error> {
        T::get_instance()
    }

    /// Discards the current instance, exactly like `T::reset_instance()`.
    pub fn reset_instance(&self) {
        T::reset_instance()
    }

    /// Whether `T` currently has an instance. Never constructs one.
    pub fn has_instance(&self) -> bool {
        T::has_instance()
    }

    /// Returns the current instance if there is one. Never constructs one.
    pub fn peek_instance(&self) -> Option<Arc<T>> {
        T::peek_instance()
    }

    /// Runs `f` against the current instance.
    ///
    /// # Errors
    ///
    /// Returns the construction error of `T` unchanged if the instance had to be built
    /// and building it failed. `f` is not called in that case.
    pub fn try_with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, T::Error> {
        let instance = T::get_instance()?;
        Ok(f(&instance))
    }

    /// Starts a fresh iteration over the current instance.
    pub fn try_iter(&self) -> Result<T::IntoIter, T::Error>
    where
        T: Iterable,
    {
        Ok(T::get_instance()?.iterate())
    }
}

impl<T: Singleton<Error = Infallible>> SingletonProxy<T> {
    /// Returns the raw current instance, constructing it on first use.
    pub fn instance(&self) -> Arc<T> {
        T::instance()
    }

    /// Runs `f` against the current instance and returns its result.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.instance())
    }

    /// Starts a fresh iteration over the current instance.
    pub fn iter(&self) -> T::IntoIter
    where
        T: Iterable,
    {
        self.instance().iterate()
    }
}

impl<T: Singleton> Clone for SingletonProxy<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Singleton> Copy for SingletonProxy<T> {}

impl<T: Singleton> Default for SingletonProxy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for SingletonProxy<T>
where
    T: Singleton<Error = Infallible> + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.instance(), f)
    }
}

impl<T> fmt::Debug for SingletonProxy<T>
where
    T: Singleton<Error = Infallible> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.instance(), f)
    }
}

impl<T> Members for SingletonProxy<T>
where
    T: Singleton<Error = Infallible> + Members,
{
    fn members(&self) -> Vec<String> {
        self.instance().members()
    }

    fn has_member(&self, name: &str) -> bool {
        self.instance().has_member(name)
    }
}

impl<'a, T> IntoIterator for &'a SingletonProxy<T>
where
    T: Singleton<Error = Infallible> + Iterable,
{
    type Item = T::Item;
    type IntoIter = T::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Cursor for SingletonProxy<T>
where
    T: Singleton<Error = Infallible> + Cursor,
{
    type Item = T::Item;

    fn advance(&self) -> Option<Self::Item> {
        self.instance().advance()
    }
}

impl<T> Iterator for SingletonProxy<T>
where
    T: Singleton<Error = Infallible> + Cursor,
{
    type Item = <T as Cursor>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        Cursor::advance(self)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
