use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Logbook CLI – classify conventional commits and render changelog sections
#[derive(Debug, Parser)]
#[command(name = "logbook", version, about, long_about = None)]
pub struct Cli {
    /// Project root holding the .logbook directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize Logbook in the current repository
    Init,

    /// Print the effective commit type table
    Types(TypesArgs),

    /// Classify parsed commits and print the ones that belong in the changelog
    Transform(TransformArgs),

    /// Render the changelog section for a release
    Render(RenderArgs),

    /// Validate configuration and templates
    Check,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TypesFormat {
    #[default]
    Table,
    Json,
    Toml,
}

#[derive(Debug, Args, Default)]
pub struct TypesArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = TypesFormat::Table)]
    pub format: TypesFormat,
}

#[derive(Debug, Args, Default)]
#[command(after_long_help = "\
Input:\n  A JSON array of commit records, or one JSON object per line.\n  Each record needs a string `type`; `hash`, `shortHash` and `subject` are optional,\n  and any other field is passed through untouched.")]
pub struct TransformArgs {
    /// File with parsed commit records (reads stdin when omitted or `-`)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args, Default)]
pub struct RenderArgs {
    /// Version being released (semver, a leading `v` is accepted)
    #[arg(long, value_name = "SEMVER")]
    pub release_version: String,

    /// Tag of the previous release, used for the compare link
    #[arg(long, value_name = "TAG")]
    pub previous_tag: Option<String>,

    /// Release date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// File with parsed commit records (reads stdin when omitted or `-`)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the section to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Prepend the configured changelog header
    #[arg(long)]
    pub with_header: bool,
}
