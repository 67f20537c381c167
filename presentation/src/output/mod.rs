//! Output rendering: console formatting and JSON

pub mod console;
pub mod formatter;
pub mod report;
