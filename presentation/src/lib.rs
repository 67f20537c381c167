//! Presentation layer for condo-quorum
//!
//! This crate contains CLI definitions and output formatters for quorum,
//! tally, proxy and scheduling results.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, ProxyCommand, ScheduleCommand};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{Report, render};
pub use output::report::{
    AttendanceReport, PreferenceReport, ProxyDirection, ProxyListReport, ProxyReport,
    QuorumReport, RankingReport, SelectionReport, TallyReport, VoteReport, WeightsReport,
};
