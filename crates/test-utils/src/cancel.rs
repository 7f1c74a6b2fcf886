use std::sync::atomic::{AtomicUsize, Ordering};

use runscript::cancel::CancelFlag;

/// Cancel flag that flips after a scripted number of polls and counts every
/// call.
///
/// `canceled_from(n)` makes `canceled()` return true from its n-th call
/// (0-based) onward; `shut_down_from(n)` does the same for `shut_down()`.
#[derive(Debug, Default)]
pub struct ScriptedCancelFlag {
    canceled_from: Option<usize>,
    shut_down_from: Option<usize>,
    canceled_calls: AtomicUsize,
    shut_down_calls: AtomicUsize,
}

impl ScriptedCancelFlag {
    /// A flag that never fires.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canceled_from(mut self, poll: usize) -> Self {
        self.canceled_from = Some(poll);
        self
    }

    pub fn shut_down_from(mut self, poll: usize) -> Self {
        self.shut_down_from = Some(poll);
        self
    }

    pub fn canceled_calls(&self) -> usize {
        self.canceled_calls.load(Ordering::SeqCst)
    }

    pub fn shut_down_calls(&self) -> usize {
        self.shut_down_calls.load(Ordering::SeqCst)
    }
}

impl CancelFlag for ScriptedCancelFlag {
    fn canceled(&self) -> bool {
        let n = self.canceled_calls.fetch_add(1, Ordering::SeqCst);
        self.canceled_from.is_some_and(|from| n >= from)
    }

    fn shut_down(&self) -> bool {
        let n = self.shut_down_calls.fetch_add(1, Ordering::SeqCst);
        self.shut_down_from.is_some_and(|from| n >= from)
    }
}
