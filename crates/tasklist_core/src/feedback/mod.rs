//! Transient user feedback.

pub mod toast;

pub use toast::{Severity, Toast, ToastQueue, TOAST_TTL};
