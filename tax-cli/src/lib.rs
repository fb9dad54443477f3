//! Command-line front end for the bracket tax engine.

pub mod app;
pub mod logging;
pub mod report;
pub mod utils;
