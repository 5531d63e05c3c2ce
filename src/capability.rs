//! Capabilities a singleton can expose through a [`SingletonProxy`](crate::SingletonProxy).
//!
//! The proxy forwards a protocol only when the instance type implements the matching
//! trait here: [`Members`] for introspection, [`Iterable`] for restartable iteration and
//! [`Cursor`] for one-shot iteration. Representation uses the standard `Display` and
//! `Debug` traits.

use std::sync::Arc;

/// Lists the members (fields and methods) a value exposes to introspection.
pub trait Members {
    /// Names of the members, in the order the implementor chooses.
    fn members(&self) -> Vec<String>;

    fn has_member(&self, name: &str) -> bool {
        self.members().iter().any(|member| member == name)
    }
}

/// A value that can be iterated from the start any number of times.
///
/// `iterate` receives the shared instance itself, so the returned iterator may read the
/// instance lazily instead of taking a snapshot.
pub trait Iterable {
    type Item;
    type IntoIter: Iterator<Item = Self::Item>;

    fn iterate(self: Arc<Self>) -> Self::IntoIter;
}

/// A one-shot sequence that hands out its next element on demand.
///
/// `None` is the exhaustion signal. The position is part of the value's own state, which
/// is why `advance` takes `&self`.
pub trait Cursor {
    type Item;

    fn advance(&self) -> Option<Self::Item>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Toolbox;

    impl Members for Toolbox {
        fn members(&self) -> Vec<String> {
            vec!["hammer".to_string(), "saw".to_string()]
        }
    }

    #[test]
    fn test_has_member_uses_member_list() {
        assert!(Toolbox.has_member("saw"));
        assert!(!Toolbox.has_member("drill"));
    }

    struct Upto {
        state: AtomicU32,
        limit: u32,
    }

    impl Cursor for Upto {
        type Item = u32;

        fn advance(&self) -> Option<u32> {
            let current = self.state.load(Ordering::SeqCst);
            if current < self.limit {
                self.state.store(current + 1, Ordering::SeqCst);
                Some(current + 1)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_cursor_keeps_signalling_exhaustion() {
        let upto = Upto {
            state: AtomicU32::new(0),
            limit: 2,
        };
        assert_eq!(upto.advance(), Some(1));
        assert_eq!(upto.advance(), Some(2));
        assert_eq!(upto.advance(), None);
        assert_eq!(upto.advance(), None);
    }

    struct Digits;

    impl Iterable for Digits {
        type Item = u8;
        type IntoIter = std::ops::Range<u8>;

        fn iterate(self: Arc<Self>) -> Self::IntoIter {
            0..10
        }
    }

    #[test]
    fn test_iterable_restarts() {
        let digits = Arc::new(Digits);
        let first: Vec<u8> = Arc::clone(&digits).iterate().collect();
        let second: Vec<u8> = digits.iterate().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }
}
