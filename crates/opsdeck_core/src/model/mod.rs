//! Structured projections of markdown documents.
//!
//! # Responsibility
//! - Define the records derived from roadmap, inbox and task-list documents.
//! - Define the snapshot/line-reference types used by line mutations.
//!
//! # Invariants
//! - The raw line sequence is the only source of truth; every record here is
//!   re-derived on each read and never persisted on its own.
//! - `Task::line_number` is an offset into one document snapshot, not a
//!   stable identity.

pub mod inbox;
pub mod roadmap;
pub mod snapshot;
pub mod task;
