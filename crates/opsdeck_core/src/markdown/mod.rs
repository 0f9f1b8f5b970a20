//! Markdown-as-database parsing and line mutation.
//!
//! # Responsibility
//! - Project roadmap, inbox and task-list documents into structured records.
//! - Rewrite exactly one checkbox line without touching any other byte.
//!
//! # Invariants
//! - Parsers are pure and never fail; missing data degrades to empty values.
//! - Mutations operate on the raw line sequence, never on a re-rendered parse.

pub mod checkbox;
pub mod inbox;
pub mod mutate;
pub mod roadmap;
pub mod task_file;
