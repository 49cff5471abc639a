//! CLI command implementations.

pub mod common;
pub mod interpret;
pub mod transform;
pub mod version;
