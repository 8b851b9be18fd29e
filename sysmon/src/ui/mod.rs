//! UI module root: exposes drawing functions for individual panels.

pub mod header;
pub mod notices;
pub mod processes;
pub mod summary;
