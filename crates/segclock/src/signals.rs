//! Edge-triggered flags set from signal handlers.
//!
//! Handlers only store to an atomic; the event loop reads the flags once per
//! iteration and does all terminal work itself.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct Signals {
    /// Set by SIGINT and SIGTERM.
    terminate: Arc<AtomicBool>,
    /// Set by SIGWINCH and by crossterm resize events.
    resize: Arc<AtomicBool>,
}

impl Signals {
    /// Register the handlers for SIGINT, SIGTERM and SIGWINCH.
    pub fn register() -> io::Result<Self> {
        let signals = Self::default();
        #[cfg(unix)]
        {
            use signal_hook::consts::{SIGINT, SIGTERM, SIGWINCH};
            use signal_hook::flag;

            for signal in [SIGINT, SIGTERM] {
                flag::register(signal, Arc::clone(&signals.terminate))?;
            }
            flag::register(SIGWINCH, Arc::clone(&signals.resize))?;
        }
        Ok(signals)
    }

    pub fn terminate_requested(&self) -> bool {
        self.terminate.load(Ordering::Relaxed)
    }

    /// Whether either flag is raised and the loop should come round.
    pub fn pending(&self) -> bool {
        self.terminate_requested() || self.resize.load(Ordering::Relaxed)
    }

    pub fn request_resize(&self) {
        self.resize.store(true, Ordering::Relaxed);
    }

    /// Consume a pending resize.
    pub fn take_resize(&self) -> bool {
        self.resize.swap(false, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_is_edge_triggered() {
        let signals = Signals::default();
        assert!(!signals.take_resize());
        signals.request_resize();
        signals.request_resize();
        assert!(signals.take_resize());
        assert!(!signals.take_resize());
    }

    #[test]
    fn test_terminate_starts_clear() {
        let signals = Signals::default();
        assert!(!signals.terminate_requested());
        signals.terminate.store(true, Ordering::Relaxed);
        assert!(signals.terminate_requested());
    }

    #[test]
    fn test_pending_sees_both_flags() {
        let signals = Signals::default();
        assert!(!signals.pending());
        signals.request_resize();
        assert!(signals.pending());
        assert!(signals.take_resize());
        assert!(!signals.pending());
        signals.terminate.store(true, Ordering::Relaxed);
        assert!(signals.pending());
    }
}
