//! Poison-recovering lock helpers.
//!
//! A thread that panics while holding a lock poisons it. For a console
//! formatter the data behind every lock (theme, glyph set, capture buffers)
//! is safe to read after a panic, and continuing to produce output matters
//! more than surfacing the poison. Production code therefore always locks
//! through these helpers; test code keeps using `.lock().unwrap()` so tests
//! fail fast.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a mutex, recovering the guard if the mutex is poisoned.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a read guard, recovering from poison.
#[inline]
pub fn read_recover<T>(rwlock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rwlock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from poison.
#[inline]
pub fn write_recover<T>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn test_lock_recover_healthy() {
        let mutex = Mutex::new(42);
        assert_eq!(*lock_recover(&mutex), 42);
    }

    #[test]
    fn test_lock_recover_after_poison() {
        let mutex = Mutex::new(42);
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = mutex.lock().unwrap();
            panic!("poison the mutex");
        }));
        assert!(mutex.lock().is_err());
        assert_eq!(*lock_recover(&mutex), 42);
    }

    #[test]
    fn test_rwlock_recovery_after_write_poison() {
        let rwlock = RwLock::new(1);
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = rwlock.write().unwrap();
            panic!("poison the rwlock");
        }));
        assert_eq!(*read_recover(&rwlock), 1);
        *write_recover(&rwlock) = 2;
        assert_eq!(*read_recover(&rwlock), 2);
    }
}
