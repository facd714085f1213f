//! CLI argument definitions for the territory tracker.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bitimaps",
    version,
    about = "BITIMAPS - Congregation territory assignment tracker",
    long_about = "Track territories, publishers, and assignments against the\n\
                  hosted BITIMAPS backend: dashboard, filtered lists, assignment\n\
                  transitions, and the S-13 ongoing-work report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify the shared password and store the login.
    Login(LoginArgs),

    /// Clear the stored login.
    Logout,

    /// Show status counts, KDL distribution, and recent activity.
    Dashboard,

    /// List territories with filters, search, and sorting.
    Territories(TerritoriesArgs),

    /// List publishers with filters, search, and sorting.
    Publishers(PublishersArgs),

    /// Manage a single territory.
    #[command(subcommand)]
    Territory(TerritoryCommand),

    /// Manage a single publisher.
    #[command(subcommand)]
    Publisher(PublisherCommand),

    /// Assign a publisher to an available territory.
    Assign(AssignArgs),

    /// Close the open assignment on a territory.
    Complete(CompleteArgs),

    /// Print the S-13 ongoing-work report.
    Report,

    /// Repair territory statuses that drifted from the assignment rows.
    Reconcile,

    /// Show or change the S-13 form link.
    #[command(subcommand)]
    Link(LinkCommand),
}

#[derive(Args)]
pub struct LoginArgs {
    /// The shared password (prompted on stdin when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct TerritoriesArgs {
    /// Keep only territories with these statuses (Tersedia, Dikerjakan,
    /// Selesai); repeat the flag to select several.
    #[arg(long)]
    pub status: Vec<String>,

    /// Keep only territories in these KDL regions; repeat to select several.
    #[arg(long)]
    pub kdl: Vec<String>,

    /// Case-insensitive name search.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort column.
    #[arg(long, value_enum, default_value = "name")]
    pub sort: TerritorySortArg,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args)]
pub struct PublishersArgs {
    /// Keep only publishers in these groups; repeat to select several.
    #[arg(long)]
    pub group: Vec<String>,

    /// Case-insensitive name search.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort column.
    #[arg(long, value_enum, default_value = "name")]
    pub sort: PublisherSortArg,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
}

#[derive(Subcommand)]
pub enum TerritoryCommand {
    /// Show one territory with its current assignment and history.
    Show { id: i64 },

    /// Create a territory (starts out available).
    Add {
        name: String,
        /// KDL region label.
        #[arg(long)]
        kdl: String,
        /// Google Maps link.
        #[arg(long = "gmaps-link")]
        gmaps_link: Option<String>,
    },

    /// Edit a territory's name, region, or map link.
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        kdl: String,
        #[arg(long = "gmaps-link")]
        gmaps_link: Option<String>,
    },

    /// Delete a territory.
    Rm { id: i64 },
}

#[derive(Subcommand)]
pub enum PublisherCommand {
    /// Show one publisher with their current assignment and history.
    Show { id: i64 },

    /// Create a publisher.
    Add {
        name: String,
        /// KDL group label.
        #[arg(long)]
        group: String,
    },

    /// Edit a publisher's name or group.
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        group: String,
    },

    /// Delete a publisher.
    Rm { id: i64 },
}

#[derive(Args)]
pub struct AssignArgs {
    /// Territory to assign.
    #[arg(long = "territory")]
    pub territory_id: i64,

    /// Publisher taking it.
    #[arg(long = "publisher")]
    pub publisher_id: i64,

    /// Start date, YYYY-MM-DD.
    #[arg(long = "start")]
    pub start_date: String,

    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Territory whose open assignment is being closed.
    #[arg(long = "territory")]
    pub territory_id: i64,

    /// Completion date, YYYY-MM-DD.
    #[arg(long = "date")]
    pub completion_date: String,

    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum LinkCommand {
    /// Print the stored S-13 form link.
    Show,

    /// Replace the stored S-13 form link.
    Set { url: String },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TerritorySortArg {
    Name,
    Status,
    Kdl,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PublisherSortArg {
    Name,
    Group,
}
