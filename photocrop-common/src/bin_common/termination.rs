use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use signal_hook::{consts::TERM_SIGNALS, flag};

/// Tells long running work to stop early. The first termination signal sets the
/// cookie, a second one exits the process right away.
#[derive(Clone, Debug, Default)]
pub struct Cookie {
    term: Arc<AtomicBool>,
}

impl Cookie {
    pub fn new() -> Result<Self, std::io::Error> {
        let term = Arc::new(AtomicBool::new(false));

        for sig in TERM_SIGNALS {
            // order matters, the shutdown must see the flag before it is set
            flag::register_conditional_shutdown(*sig, 1, Arc::clone(&term))?;
            flag::register(*sig, Arc::clone(&term))?;
        }

        Ok(Self { term })
    }

    /// A cookie that no signal will set, for use outside of binaries
    pub fn inert() -> Self {
        Self::default()
    }

    /// Sets the cookie as if a signal had arrived
    pub fn terminate(&self) {
        self.term.store(true, Ordering::SeqCst);
    }

    pub fn is_terminating(&self) -> bool {
        self.term.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clones_share_state() {
        let cookie = Cookie::inert();
        let other = cookie.clone();
        assert!(!other.is_terminating());
        cookie.terminate();
        assert!(other.is_terminating());
    }
}
