//! Single-slot cancellable tasks.
//!
//! The carousel defers two kinds of work: the next animation frame after a
//! scroll, and the settle pass once scrolling stops. Each lives in its own
//! `TaskSlot`. A slot hands out a fresh `TaskToken` whenever it is armed and
//! only accepts that token back, so a timer the host failed to cancel is
//! ignored when it eventually fires.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskToken(pub u64);

#[derive(Clone, Debug, Default)]
pub struct TaskSlot {
    next: u64,
    pending: Option<TaskToken>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the slot, replacing whatever was pending.
    pub fn schedule(&mut self) -> TaskToken {
        self.next += 1;
        let token = TaskToken(self.next);
        self.pending = Some(token);
        token
    }

    /// Arms the slot only if it is idle. Returns the new token, or `None`
    /// when a task is already pending (coalesced).
    pub fn request(&mut self) -> Option<TaskToken> {
        if self.pending.is_some() {
            return None;
        }
        Some(self.schedule())
    }

    /// Consumes the pending task if `token` is current.
    pub fn fire(&mut self, token: TaskToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drops the pending task. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn pending(&self) -> Option<TaskToken> {
        self.pending
    }
}
