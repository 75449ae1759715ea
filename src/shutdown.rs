use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Shared cancellation flag for blocking loops.
///
/// Clones observe the same flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let mut cancelled = self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        self.inner.wake.notify_all();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleeps for up to `timeout`, waking early on cancellation.
    ///
    /// Returns `true` when the token is cancelled.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (guard, _timed_out) = self
            .inner
            .wake
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn wait_times_out_when_not_cancelled() -> Result<(), String> {
        let token = CancelToken::new();
        let started = Instant::now();
        if token.wait_timeout(Duration::from_millis(30)) {
            return Err("Token must not report cancellation".to_owned());
        }
        if started.elapsed() < Duration::from_millis(25) {
            return Err("Wait returned too early".to_owned());
        }
        Ok(())
    }

    #[test]
    fn cancel_wakes_a_waiting_thread() -> Result<(), String> {
        let token = CancelToken::new();
        let remote = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });

        let started = Instant::now();
        let cancelled = token.wait_timeout(Duration::from_secs(10));
        canceller
            .join()
            .map_err(|_| "canceller panicked".to_owned())?;

        if !cancelled {
            return Err("Expected cancellation".to_owned());
        }
        if started.elapsed() >= Duration::from_secs(5) {
            return Err("Cancellation did not wake the waiter".to_owned());
        }
        if !token.is_cancelled() {
            return Err("Cancellation must stick".to_owned());
        }
        Ok(())
    }
}
