//! CLI command definitions.

pub mod serve;
pub mod tools;
pub mod version;
