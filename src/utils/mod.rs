//! Shared utilities: Arrow conversion, file output and logging helpers

pub mod arrow;
pub mod io;
pub mod logging;
