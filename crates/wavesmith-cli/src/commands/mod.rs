//! CLI command implementations

pub mod compare;
pub mod json_output;
pub mod process;
pub mod validate;
