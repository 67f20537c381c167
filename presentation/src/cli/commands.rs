//! CLI command definitions

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use condo_domain::{AttendanceKind, BallotChoice, Preference};
use std::path::PathBuf;

/// Output format for governance results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full breakdown with every figure
    Full,
    /// One-line verdict
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for condo_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => condo_domain::OutputFormat::Full,
            OutputFormat::Summary => condo_domain::OutputFormat::Summary,
            OutputFormat::Json => condo_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for condo-quorum
#[derive(Parser, Debug)]
#[command(name = "condo-quorum")]
#[command(author, version, about = "Weighted quorum, proxy and ballot calculations for owner associations")]
#[command(long_about = r#"
Condo Quorum evaluates meetings of weighted-membership organizations.

It works on a JSON snapshot of members, meetings, proxies, attendance and
votes (--data), and writes the snapshot back after commands that change it.

Configuration files are loaded from (in priority order):
1. CONDO_QUORUM_*           Environment variables
2. --config <path>          Explicit config file
3. ./condo-quorum.toml      Project-level config
4. ~/.config/condo-quorum/config.toml   Global config

Example:
  condo-quorum --data agm.json attend agm-2026 apt-12
  condo-quorum --data agm.json proxy create apt-7 apt-12 --meeting agm-2026
  condo-quorum --data agm.json quorum agm-2026
  condo-quorum --data agm.json vote roof-repair apt-12 yes --for apt-7
  condo-quorum --data agm.json -o json tally roof-repair
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Governance snapshot (JSON) to read and update
    #[arg(short, long, value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Output format (defaults to the configured one, then summary)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate whether a meeting has reached quorum
    Quorum {
        meeting: String,
    },

    /// Show each member's effective weight and voting power
    Weights {
        meeting: String,
    },

    /// Tally the votes of an agenda item
    Tally {
        item: String,
    },

    /// Cast a vote on an agenda item
    Vote {
        item: String,
        /// Member casting the vote
        member: String,
        /// yes, no, abstain, or an option label
        choice: BallotChoice,
        /// Cast the vote on behalf of this absent grantor
        #[arg(long = "for", value_name = "GRANTOR")]
        on_behalf_of: Option<String>,
    },

    /// Manage proxy delegations
    #[command(subcommand)]
    Proxy(ProxyCommand),

    /// Check a member in to a meeting
    Attend {
        meeting: String,
        member: String,
        /// in-person, online or proxy
        #[arg(long, default_value = "in-person")]
        kind: AttendanceKind,
    },

    /// Check a member out of a meeting
    Leave {
        meeting: String,
        member: String,
    },

    /// Find a meeting date
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProxyCommand {
    /// Delegate a grantor's vote to a grantee
    Create {
        grantor: String,
        grantee: String,
        /// Limit the proxy to one meeting (general when omitted)
        #[arg(long)]
        meeting: Option<String>,
        /// Start of validity (RFC 3339); defaults to now
        #[arg(long, value_name = "TIME")]
        from: Option<DateTime<Utc>>,
        /// End of validity (RFC 3339)
        #[arg(long, value_name = "TIME")]
        until: Option<DateTime<Utc>>,
        /// Reference to the signed proxy document
        #[arg(long, value_name = "REF")]
        document: Option<String>,
    },

    /// End a proxy's validity now, keeping the record
    Revoke { id: String },

    /// Remove a proxy record
    Delete { id: String },

    /// List the active proxies a member holds (or gave, with --outgoing)
    List {
        meeting: String,
        member: String,
        #[arg(long)]
        outgoing: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ScheduleCommand {
    /// Rank the candidate dates of a meeting
    Rank { meeting: String },

    /// Fix the meeting date (the best ranked option when omitted)
    Select {
        meeting: String,
        option: Option<String>,
    },

    /// Record a member's availability for a candidate date
    Prefer {
        meeting: String,
        option: String,
        member: String,
        /// yes, maybe or no
        preference: Preference,
    },
}

impl Command {
    /// Whether the command changes the snapshot
    pub fn is_mutating(&self) -> bool {
        match self {
            Command::Quorum { .. } | Command::Weights { .. } | Command::Tally { .. } => false,
            Command::Proxy(ProxyCommand::List { .. }) => false,
            Command::Schedule(ScheduleCommand::Rank { .. }) => false,
            Command::Vote { .. }
            | Command::Proxy(_)
            | Command::Attend { .. }
            | Command::Leave { .. }
            | Command::Schedule(_) => true,
        }
    }
}
