//! Process-wide slot registry backing every [`Singleton`](crate::Singleton).
//!
//! Each concrete type owns at most one slot, keyed by its `TypeId`. A slot is
//! either empty or holds the one shared `Arc` of that type. The lifecycle is
//! explicit: empty, constructed on the first `get_instance`, emptied again by
//! `reset_instance`.
//!
//! The slot map sits behind a `Mutex` because Rust statics must be `Sync`. The
//! lock is only held for map lookups and updates, never while a constructor,
//! a destructor or the trace callback runs.
//!
//! # Examples
//!
//! ```
//! use singleton_proxy::{registry, singleton, Singleton};
//!
//! #[derive(Default)]
//! struct Settings;
//! singleton!(Settings);
//!
//! let _settings = Settings::get_instance();
//! assert!(Settings::has_instance());
//! assert!(registry::instance_count() >= 1);
//!
//! Settings::reset_instance();
//! assert!(!Settings::has_instance());
//! ```

use std::{
    any::{type_name, Any, TypeId},
    cell::RefCell,
    collections::HashMap,
    sync::{Arc, LazyLock, Mutex, MutexGuard},
};

use crate::{Creation, Singleton, SingletonEvent};

/// Type-erased content of a filled slot.
type Slot = Arc<dyn Any + Send + Sync>;

/// Global slot map.
///
/// This is a `LazyLock` ensuring lazy initialization of the underlying `Mutex<HashMap>`.
static SLOTS: LazyLock<Mutex<HashMap<TypeId, Slot>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

thread_local! {
    /// Types whose constructor is currently running on this thread.
    static UNDER_CONSTRUCTION: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

// -------------------------------------------------------------------------------------------------
// Tracing callback support
// -------------------------------------------------------------------------------------------------

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `SingletonEvent` every time the registry is
/// interacted with. It must be thread-safe because the registry itself is globally shared.
pub type TraceCallback = dyn Fn(&SingletonEvent) + Send + Sync + 'static;

/// Holds an optional user-defined tracing callback.
static TRACE_CALLBACK: LazyLock<Mutex<Option<Arc<TraceCallback>>>> =
    LazyLock::new(|| Mutex::new(None));

/// Sets a tracing callback that will be invoked on every registry interaction.
///
/// The callback runs without any registry lock held, so it may itself call
/// `get_instance` or `reset_instance`.
///
/// # Example
/// ```rust
/// use singleton_proxy::registry::{clear_trace_callback, set_trace_callback};
///
/// set_trace_callback(|event| println!("[singleton-trace] {}", event));
/// clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&SingletonEvent) + Send + Sync + 'static) {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = Some(Arc::new(callback));
}

/// Clears the tracing callback (disables registry tracing).
pub fn clear_trace_callback() {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = None;
}

fn emit_event(event: &SingletonEvent) {
    let callback = {
        let guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
        guard.clone()
    };
    if let Some(callback) = callback {
        callback(event);
    }
}

// -------------------------------------------------------------------------------------------------
// Slots
// -------------------------------------------------------------------------------------------------

fn lock_slots() -> MutexGuard<'static, HashMap<TypeId, Slot>> {
    // No user code runs while the lock is held, so a poisoned map is still consistent.
    SLOTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lookup<T: Singleton>() -> Option<Arc<T>> {
    let slot = lock_slots().get(&TypeId::of::<T>()).cloned();
    slot.and_then(|slot| slot.downcast::<T>().ok())
}

/// Returns the instance of `T`, constructing it on first use.
pub(crate) fn get_or_create<T: Singleton>() -> Result<Arc<T>, T::Error> {
    let type_name = type_name::<T>();

    let existing = lookup::<T>();
    emit_event(&SingletonEvent::Get {
        type_name,
        found: existing.is_some(),
    });
    if let Some(instance) = existing {
        log::trace!("reusing singleton instance of {type_name}");
        return Ok(instance);
    }

    let fresh = {
        let _guard = ConstructionGuard::enter::<T>();
        T::create(Creation::new())
            .inspect_err(|_| log::debug!("construction of singleton {type_name} failed"))?
    };
    let fresh = Arc::new(fresh);

    let mut slots = lock_slots();
    let winner = slots
        .get(&TypeId::of::<T>())
        .cloned()
        .and_then(|slot| slot.downcast::<T>().ok());
    if let Some(winner) = winner {
        // Another thread filled the slot while `create` ran; keep its instance.
        drop(slots);
        log::debug!("discarding concurrently constructed instance of {type_name}");
        return Ok(winner);
    }
    slots.insert(TypeId::of::<T>(), Arc::clone(&fresh) as Slot);
    drop(slots);

    log::debug!("constructed singleton instance of {type_name}");
    emit_event(&SingletonEvent::Create { type_name });
    Ok(fresh)
}

/// Returns the instance of `T` if its slot is filled. Never constructs.
pub(crate) fn peek<T: Singleton>() -> Option<Arc<T>> {
    let instance = lookup::<T>();
    emit_event(&SingletonEvent::Get {
        type_name: type_name::<T>(),
        found: instance.is_some(),
    });
    instance
}

/// Checks whether the slot of `T` is filled. Never constructs.
pub(crate) fn contains<T: Singleton>() -> bool {
    let found = lock_slots().contains_key(&TypeId::of::<T>());
    emit_event(&SingletonEvent::Contains {
        type_name: type_name::<T>(),
        found,
    });
    found
}

/// Empties the slot of `T`.
///
/// The registry's reference is released after the lock, so a `Drop` impl on
/// `T` may use the registry. Clones held elsewhere stay valid.
pub(crate) fn reset<T: Singleton>() {
    let removed = lock_slots().remove(&TypeId::of::<T>());
    let found = removed.is_some();

    log::debug!(
        "reset singleton {} (had instance: {found})",
        type_name::<T>()
    );
    emit_event(&SingletonEvent::Reset {
        type_name: type_name::<T>(),
        found,
    });
}

/// Number of filled slots across all types.
pub fn instance_count() -> usize {
    lock_slots().len()
}

/// Empties every slot.
///
/// This is primarily intended for testing. Already-retrieved `Arc<T>`
/// references remain valid, and the tracing callback is left in place.
#[doc(hidden)]
pub fn clear() {
    emit_event(&SingletonEvent::Clear {});

    let drained: Vec<Slot> = lock_slots().drain().map(|(_, slot)| slot).collect();
    log::debug!("cleared {} singleton instance(s)", drained.len());
}

// -------------------------------------------------------------------------------------------------
// Re-entrancy detection
// -------------------------------------------------------------------------------------------------

/// Marks `T` as under construction on the current thread for as long as it lives.
struct ConstructionGuard {
    type_id: TypeId,
}

impl ConstructionGuard {
    /// # Panics
    ///
    /// Panics if `T` is already being constructed on this thread, which means
    /// its constructor asked for its own instance.
    fn enter<T: 'static>() -> Self {
        let type_id = TypeId::of::<T>();
        let reentrant = UNDER_CONSTRUCTION.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&type_id) {
                true
            } else {
                stack.push(type_id);
                false
            }
        });

        if reentrant {
            panic!(
                "re-entrant construction of singleton `{}`: its constructor requested its own instance",
                type_name::<T>()
            );
        }

        Self { type_id }
    }
}

impl Drop for ConstructionGuard {
    fn drop(&mut self) {
        // `try_with` because the guard may be dropped during thread-local teardown.
        let _ = UNDER_CONSTRUCTION.try_with(|stack| {
            stack.borrow_mut().retain(|id| *id != self.type_id);
        });
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
