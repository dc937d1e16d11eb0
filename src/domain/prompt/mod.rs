//! Prompt building for the weather enrichment contract.

mod builder;

pub use builder::{DEFAULT_STRICTNESS, build_prompt};
