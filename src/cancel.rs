// src/cancel.rs

//! Cooperative cancellation.
//!
//! The orchestrator never receives pushed cancellation; it polls a
//! [`CancelFlag`] at document boundaries. Two signals are exposed:
//!
//! - `canceled`: the caller asked this invocation to stop.
//! - `shut_down`: the host agent is terminating.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::types::CancelReason;

/// Polled cancellation capability.
pub trait CancelFlag: Send + Sync {
    fn canceled(&self) -> bool;
    fn shut_down(&self) -> bool;
}

const STATE_ACTIVE: u8 = 0;
const STATE_CANCELED: u8 = 1;
const STATE_SHUT_DOWN: u8 = 2;

/// Lock-free cancel flag backed by a single atomic state.
///
/// Once set, the state never goes back to active; a shutdown overrides an
/// earlier cancel, never the other way round.
#[derive(Debug, Default)]
pub struct TaskCancelFlag {
    state: AtomicU8,
}

impl TaskCancelFlag {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_ACTIVE),
        }
    }

    pub fn cancel(&self) {
        let _ = self.state.compare_exchange(
            STATE_ACTIVE,
            STATE_CANCELED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    pub fn shutdown(&self) {
        self.state.store(STATE_SHUT_DOWN, Ordering::SeqCst);
    }

    /// The signal currently set, if any.
    pub fn reason(&self) -> Option<CancelReason> {
        match self.state.load(Ordering::SeqCst) {
            STATE_CANCELED => Some(CancelReason::Canceled),
            STATE_SHUT_DOWN => Some(CancelReason::ShutDown),
            _ => None,
        }
    }
}

impl CancelFlag for TaskCancelFlag {
    fn canceled(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_CANCELED
    }

    fn shut_down(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_SHUT_DOWN
    }
}

/// Poll both signals once, shutdown first.
pub fn poll(flag: &dyn CancelFlag) -> Option<CancelReason> {
    if flag.shut_down() {
        Some(CancelReason::ShutDown)
    } else if flag.canceled() {
        Some(CancelReason::Canceled)
    } else {
        None
    }
}
