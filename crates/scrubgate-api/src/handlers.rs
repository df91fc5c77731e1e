//! HTTP request handlers.

pub mod health;
pub mod submissions;

pub use health::*;
