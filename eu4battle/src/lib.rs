//! Command-line front end for `eu4battle-core`: scenario loading and the
//! text report.

pub mod loader;
pub mod report;
