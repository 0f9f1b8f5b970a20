//! Dashboard use-case services.
//!
//! # Responsibility
//! - Derive display records from parsed documents.
//! - Orchestrate store reads/writes around the pure markdown layer.

pub mod deck_service;
pub mod project_service;
