//! Clap derive structures for the `panofly` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// panofly -- interface configuration for Panorama-managed firewalls
#[derive(Debug, Parser)]
#[command(
    name = "panofly",
    version,
    about = "Manage firewall interfaces in Panorama templates",
    long_about = "Reads and writes ethernet and tunnel interfaces through the XML API,\n\
        picking the wire format that matches the device's software version\n\
        and keeping written interfaces imported into the right vsys.",
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
    /// Device profile to use
    #[arg(long, short = 'p', env = "PANOFLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device URL or host name (overrides profile)
    #[arg(long, short = 'd', env = "PANOFLY_DEVICE", global = true)]
    pub device: Option<String>,

    /// XML API key
    #[arg(long, env = "PANOFLY_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Template to operate in (overrides profile)
    #[arg(long, short = 't', env = "PANOFLY_TEMPLATE", global = true)]
    pub template: Option<String>,

    /// Template stack to operate in, when no template is given
    #[arg(long, env = "PANOFLY_TEMPLATE_STACK", global = true)]
    pub template_stack: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PANOFLY_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PANOFLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "PANOFLY_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one name per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage ethernet interfaces
    #[command(alias = "eth", alias = "e")]
    Ethernet(InterfaceArgs),

    /// Manage tunnel interfaces
    #[command(alias = "tun")]
    Tunnel(InterfaceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Interface families ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InterfaceArgs {
    #[command(subcommand)]
    pub command: InterfaceCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfaceCommand {
    /// List interface names
    #[command(alias = "ls")]
    List(ReadArgs),

    /// Show one interface
    Get {
        /// Interface name (e.g. ethernet1/1, tunnel.10)
        name: String,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Show every interface
    GetAll(ReadArgs),

    /// Create or merge interfaces from a JSON array
    Set(WriteArgs),

    /// Replace one interface from a JSON object
    Edit(WriteArgs),

    /// Delete interfaces by name
    #[command(alias = "rm")]
    Delete {
        /// Interface names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Read the running configuration instead of the candidate
    #[arg(long)]
    pub running: bool,
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// Virtual system to import the interfaces into
    #[arg(long, env = "PANOFLY_VSYS")]
    pub vsys: Option<String>,

    /// JSON file with the interface definition(s)
    #[arg(long, short = 'F')]
    pub from_file: PathBuf,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
