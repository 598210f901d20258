//! Persistence mapping between domain values and stored blobs.
//!
//! # Responsibility
//! - Translate task lists and settings to and from store entries.
//! - Keep blob formats out of service/business orchestration.
//!
//! # Invariants
//! - Read paths treat absent or malformed blobs as defaults, never as errors.

pub mod settings_repo;
pub mod task_repo;
