//! constrained::control — caller-supplied timeout and cancellation.
//!
//! A [`SolveControl`] is created by the caller and forwarded, untouched,
//! to whichever constrained backend runs the solve. The backend turns it
//! into a [`Deadline`] when the solve starts and polls that deadline
//! before every outer iteration and inside every penalty evaluation, so an
//! expired or cancelled solve stops within one function evaluation.
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::optimization::errors::{OptError, OptResult};

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Optional timeout and cancellation token for one solve.
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl SolveControl {
    /// No timeout, no cancellation.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// # Errors
    /// [`OptError::InvalidTimeout`] if `timeout` is zero.
    pub fn with_timeout(mut self, timeout: Duration) -> OptResult<Self> {
        if timeout.is_zero() {
            return Err(OptError::InvalidTimeout);
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Start the clock.
    pub fn start(&self) -> Deadline {
        Deadline { started: Instant::now(), timeout: self.timeout, cancel: self.cancel.clone() }
    }
}

/// A running solve's clock and cancellation flag.
#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl Deadline {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// # Errors
    /// - [`OptError::SolverCancelled`] once the token has been cancelled.
    /// - [`OptError::SolverTimeout`] once the elapsed time reaches the timeout.
    pub fn check(&self) -> OptResult<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(OptError::SolverCancelled);
        }
        if let Some(timeout) = self.timeout {
            let elapsed = self.elapsed();
            if elapsed >= timeout {
                return Err(OptError::SolverTimeout { elapsed_ms: elapsed.as_millis() });
            }
        }
        Ok(())
    }
}
