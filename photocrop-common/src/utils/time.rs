use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

/// Runs something at most once per interval, from any number of threads
pub struct Every {
    every: Duration,
    last: Mutex<Instant>,
}

impl Every {
    pub fn new(every: Duration) -> Self {
        Self {
            every,
            last: Mutex::new(Instant::now()),
        }
    }

    /// Runs `f` if enough time has passed. Gives up immediately if some other thread is
    /// checking at the same time.
    pub fn perform(&self, f: impl FnOnce()) {
        let Ok(mut last) = self.last.try_lock() else {
            return;
        };

        let now = Instant::now();
        if now - *last >= self.every {
            *last = now;
            drop(last);
            f()
        }
    }
}
