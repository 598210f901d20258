//! Auto-dismissing notification queue.
//!
//! # Invariants
//! - Every toast lives exactly [`TOAST_TTL`] from its creation instant.
//! - Toasts are independent; several may be visible at once.
//! - Time is supplied by the caller, the queue never reads a clock.

use std::time::{Duration, Instant};

/// Lifetime of a toast.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a toast created at `now` and returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        self.prune(now);
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            expires_at: now + TOAST_TTL,
        });
        id
    }

    /// Live toasts at `now`, oldest first.
    pub fn active(&self, now: Instant) -> Vec<&Toast> {
        self.toasts.iter().filter(|toast| toast.is_live(now)).collect()
    }

    /// Drops expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.is_live(now));
    }

    /// Removes and returns every queued toast regardless of expiry.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
