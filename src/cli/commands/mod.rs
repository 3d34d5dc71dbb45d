//! CLI command implementations.

pub mod analyze;
pub mod run;
pub mod scan;
pub mod symbols;
pub mod validate;
