//! Owned counting semaphore used to bound hashing and directory-read concurrency.
//!
//! Deliberately not a global: the walker and hasher each receive their own instance
//! constructed from [`crate::Config`], so tests can run isolated scans in parallel
//! without tripping over one another's limits.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::cancel::CancellationToken;

/// How often a blocked `acquire` re-checks the cancellation token.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct CountingSemaphore {
    available: Mutex<usize>,
    condvar: Condvar,
}

impl CountingSemaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            available: Mutex::new(permits),
            condvar: Condvar::new(),
        }
    }

    /// Block until a permit is free, returning an RAII guard that releases it on drop.
    ///
    /// Polls `cancel` every [`POLL_INTERVAL`] so a cancelled scan does not leave
    /// traversal or hashing tasks parked forever on a semaphore nobody will release.
    /// Returns `None` if `cancel` fires before a permit becomes available.
    pub fn acquire(&self, cancel: &CancellationToken) -> Option<SemaphorePermit<'_>> {
        let mut available = self.available.lock().unwrap();
        loop {
            if *available > 0 {
                *available -= 1;
                return Some(SemaphorePermit { semaphore: self });
            }
            if cancel.is_cancelled() {
                return None;
            }
            let (guard, _timeout) = self
                .condvar
                .wait_timeout(available, POLL_INTERVAL)
                .unwrap();
            available = guard;
        }
    }

    fn release(&self) {
        let mut available = self.available.lock().unwrap();
        *available += 1;
        self.condvar.notify_one();
    }
}

pub struct SemaphorePermit<'a> {
    semaphore: &'a CountingSemaphore,
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn acquire_release_round_trips() {
        let sem = CountingSemaphore::new(2);
        let cancel = CancellationToken::new();
        let a = sem.acquire(&cancel).unwrap();
        let b = sem.acquire(&cancel).unwrap();
        assert_eq!(*sem.available.lock().unwrap(), 0);
        drop(a);
        assert_eq!(*sem.available.lock().unwrap(), 1);
        drop(b);
        assert_eq!(*sem.available.lock().unwrap(), 2);
    }

    #[test]
    fn blocked_acquire_unblocks_on_release() {
        let sem = Arc::new(CountingSemaphore::new(1));
        let cancel = CancellationToken::new();
        let first = sem.acquire(&cancel).unwrap();

        let sem2 = Arc::clone(&sem);
        let cancel2 = cancel.clone();
        let handle = thread::spawn(move || sem2.acquire(&cancel2).is_some());

        thread::sleep(Duration::from_millis(20));
        drop(first);
        assert!(handle.join().unwrap());
    }

    #[test]
    fn cancelled_acquire_returns_none() {
        let sem = Arc::new(CountingSemaphore::new(0));
        let cancel = CancellationToken::new();
        let cancel2 = cancel.clone();
        let sem2 = Arc::clone(&sem);
        let handle = thread::spawn(move || sem2.acquire(&cancel2).is_some());
        thread::sleep(Duration::from_millis(20));
        cancel.cancel();
        assert!(!handle.join().unwrap());
    }
}
