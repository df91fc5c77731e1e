//! # Scrubgate Core
//!
//! Core domain types for Scrubgate.
//!
//! This crate provides the foundational types used throughout the system:
//! - Type-safe identifiers (newtype pattern)
//! - The submission entity and its storage-key conventions
//! - Content kind classification
//! - Error types

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod content;
pub mod error;
pub mod id;
pub mod submission;

pub use content::*;
pub use error::{CoreError, CoreResult, DataError, ValidationError};
pub use id::*;
pub use submission::*;
