//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "labeler",
    version,
    about = "Label issues and pull requests from regex rules",
    long_about = "labeler — evaluate a repository's label config against an issue or pull request and decide which labels to add.\n\nRuns against a local checkout; label and comment writes are reported, not sent.\n\nSettings precedence: CLI > labeler.toml > defaults.",
    after_help = "Examples:\n  labeler run -t issues --data '{\"issue\":{\"number\":1,\"title\":\"a bug\"}}'\n  labeler run -t pull_request --fields title\n  labeler validate --config-path .github/labeler.yml",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current labeler version.")]
    Version,
    /// Decide labels for one issue or pull request
    #[command(
        about = "Run the labeler against an event",
        long_about = "Load the label config, resolve the issue or pull request from inline event data, and report the labels and comment that would be applied.",
        after_help = "Examples:\n  labeler run -t issues --id 12 --event-path event.json\n  labeler run -t pull_request_target --event-path event.json --output json"
    )]
    Run {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(short, long, env = "GITHUB_ACTOR", help = "GitHub owner/org name")]
        owner: Option<String>,
        #[arg(short, long, env = "GITHUB_REPO", help = "GitHub repo name")]
        repo: Option<String>,
        #[arg(
            short = 't',
            long = "type",
            env = "GITHUB_EVENT_NAME",
            help = "Event type: issues|pull_request|pull_request_target"
        )]
        event_type: String,
        #[arg(long, help = "Number of the issue or pull request")]
        id: Option<u64>,
        #[arg(long, help = "JSON event payload (issue/pull request event or bare object)")]
        data: Option<String>,
        #[arg(
            long,
            conflicts_with = "data",
            help = "Read the JSON event payload from a file (default: $GITHUB_EVENT_PATH)"
        )]
        event_path: Option<String>,
        #[arg(
            long,
            value_delimiter = ',',
            help = "Fields to evaluate: title,body (default: from config, else both)"
        )]
        fields: Vec<String>,
        #[arg(long, help = "Label config path relative to the repository root")]
        config_path: Option<String>,
        #[arg(long, help = "Per-call timeout in seconds (default: 10)")]
        timeout_secs: Option<u64>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Parse the label config and describe it
    #[command(
        about = "Validate the label config",
        long_about = "Parse the label config, report which schema it uses, and list the declared labels."
    )]
    Validate {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Label config path relative to the repository root")]
        config_path: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
