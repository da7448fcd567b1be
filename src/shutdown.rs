use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Condvar, Mutex, PoisonError,
    },
    time::{Duration, Instant},
};

/// Process-wide stop request, set once and never cleared
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    stopped: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Safe to call from the ctrlc handler: ctrlc runs it on its own thread, not in signal context.
    /// No allocation, no logging.
    pub fn stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        // Taking the lock orders the store before a waiter's check-then-wait
        drop(self.inner.lock.lock().unwrap_or_else(PoisonError::into_inner));
        self.inner.wake.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Sleeps for `timeout` or until `stop` is called, whichever comes first.
    /// Returns whether stop was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while !self.is_stopped() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            guard = self
                .inner
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }

        self.is_stopped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn wait_returns_early_on_stop() {
        let flag = StopFlag::new();
        let remote = flag.clone();
        let started = Instant::now();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.stop();
        });

        assert!(flag.wait_timeout(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(10));
        handle.join().unwrap();
    }

    #[test]
    fn wait_times_out_without_stop() {
        let flag = StopFlag::new();
        assert!(!flag.wait_timeout(Duration::from_millis(10)));
        assert!(!flag.is_stopped());
    }

    #[test]
    fn stop_before_wait() {
        let flag = StopFlag::new();
        flag.stop();
        assert!(flag.wait_timeout(Duration::from_secs(30)));
    }
}
