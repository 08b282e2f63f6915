//! Clap derive structures for the `gatewatch` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gatewatch -- command-line monitor for Haivision SRT media gateways
#[derive(Debug, Parser)]
#[command(
    name = "gatewatch",
    version,
    about = "Monitor Haivision SRT gateways from the command line",
    long_about = "Polls a Haivision Media Gateway's REST API and publishes device,\n\
        route, source, and destination health as a flat metrics map.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Gateway profile to use
    #[arg(long, short = 'p', env = "GATEWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Gateway URL (overrides profile)
    #[arg(long, short = 'g', env = "GATEWATCH_GATEWAY", global = true)]
    pub gateway: Option<String>,

    /// Login username
    #[arg(long, short = 'u', env = "GATEWATCH_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "GATEWATCH_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GATEWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GATEWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GATEWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// One `key=value` line per metric (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one poll cycle and print the statistics map
    #[command(alias = "p")]
    Poll(PollArgs),

    /// Poll repeatedly on an interval
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Poll / Watch ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Report every route on the gateway
    #[arg(long)]
    pub all_routes: bool,

    /// Comma-separated route names to report
    #[arg(long, value_name = "NAMES", conflicts_with = "all_routes")]
    pub routes: Option<String>,

    /// Route list page size (must exceed the gateway's route count)
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub poll: PollArgs,

    /// Seconds between poll cycles
    #[arg(long, short = 'i', default_value = "30")]
    pub interval: u64,

    /// Stop after this many cycles
    #[arg(long, value_name = "N")]
    pub count: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Print the resolved configuration with secrets masked
    Show,
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
