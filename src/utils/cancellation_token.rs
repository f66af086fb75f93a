use std::{
    sync::{Condvar, Mutex, MutexGuard},
    time::Duration,
};

/// A cancellation token.
#[derive(Debug)]
pub struct CancellationToken {
    // The "check" for the cancellation token. Setting this to true will mark the cancellation token as "cancelled".
    mutex: Mutex<bool>,
    cvar: Condvar,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self {
            mutex: Mutex::new(false),
            cvar: Condvar::new(),
        }
    }
}

impl CancellationToken {
    // A panic while holding the lock can't leave a bool half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.mutex
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark the [`CancellationToken`] as cancelled.
    ///
    /// This is idempotent, and once cancelled, will stay cancelled. Sending it
    /// again will not do anything.
    pub fn cancel(&self) {
        let mut guard = self.lock();

        if !*guard {
            *guard = true;
            self.cvar.notify_all();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.lock()
    }

    /// Allows a thread to sleep while still being interruptible with by the token.
    ///
    /// Returns the condition state after either sleeping or being woken up.
    pub fn sleep_with_cancellation(&self, duration: Duration) -> bool {
        let guard = self.lock();

        let result = match self
            .cvar
            .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
        {
            Ok((result, _)) => result,
            Err(poisoned) => poisoned.into_inner().0,
        };

        *result
    }
}
