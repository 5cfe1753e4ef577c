//! Wavesmith CLI library
//!
//! Command implementations behind the `wavesmith` binary, exposed as a library
//! so they can be driven from tests.

pub mod commands;
pub mod input;
pub mod logging;
