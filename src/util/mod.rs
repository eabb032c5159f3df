//! Formatting and small browser helpers shared across pages.

pub mod browser;
pub mod format;
