//! Tessera Core Types
//!
//! This crate provides the foundational types used throughout Tessera:
//! - Value types (the Value enum and the Attributes map)
//! - The `attrs!` macro for building raw record input
//! - Shared error plumbing (Describe, chain rendering)

mod error;
mod value;

pub use error::*;
pub use value::*;
