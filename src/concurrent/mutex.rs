//! Scoped mutual exclusion around a single value

use std::fmt;

/// A lock that only grants access to its value for the duration of a closure.
///
/// The guard never escapes `with_lock`, so the lock is released on every exit
/// path of the action, including unwinding out of a panic. Built on
/// `parking_lot`, so a panic does not poison the lock for later callers.
pub struct Mutex<T> {
    inner: parking_lot::Mutex<T>,
}

impl<T> Mutex<T> {
    /// Create a new lock around `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: parking_lot::Mutex::new(value),
        }
    }

    /// Run `action` with exclusive access to the protected value.
    ///
    /// Blocks until the lock is available. Not re-entrant: calling `with_lock`
    /// on the same mutex from inside `action` deadlocks.
    pub fn with_lock<R>(&self, action: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        action(&mut *guard)
    }
}

impl<T> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.inner.is_locked() { "locked" } else { "unlocked" };
        f.debug_struct("Mutex").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_with_lock_returns_action_result() {
        let mutex = Mutex::new(41);
        let value = mutex.with_lock(|v| {
            *v += 1;
            *v
        });
        assert_eq!(value, 42);
        assert_eq!(mutex.with_lock(|v| *v), 42);
    }

    #[test]
    fn test_lock_released_after_panic() {
        let mutex = Mutex::new(0);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            mutex.with_lock(|_| panic!("action failed"));
        }));
        assert!(result.is_err());

        // Lock must be usable again
        mutex.with_lock(|v| *v = 7);
        assert_eq!(mutex.with_lock(|v| *v), 7);
    }

    #[test]
    fn test_repeated_acquisition_across_threads() {
        let mutex = Arc::new(Mutex::new(0usize));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mutex = Arc::clone(&mutex);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        mutex.with_lock(|v| *v += 1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(mutex.with_lock(|v| *v), 4000);
    }
}
