// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for ForkThis.
//!
//! Uses clap's derive API with noun-verb subcommands, mirroring the
//! screens of the browser client: feed, bookmarks, projects, history and
//! themes.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use forkthis_core::{Difficulty, FeedFilters, SortOrder, Theme};

/// Extended help text for the completion subcommand.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(forkthis completion bash)"

  zsh
    mkdir -p ~/.zsh/completions
    forkthis completion zsh > ~/.zsh/completions/_forkthis

  fish
    forkthis completion fish > ~/.config/fish/completions/forkthis.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// Markdown output for pasting into issues and docs
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone, Debug)]
pub struct OutputContext {
    /// Output format
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, prompts)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
    /// Stored color theme
    pub theme: Theme,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
            theme: Theme::default(),
        }
    }

    /// Returns a copy using the given theme for accents.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns true if interactive elements (spinners, prompts) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// ForkThis - find approachable GitHub issues with AI summaries.
#[derive(Parser)]
#[command(name = "forkthis")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, prompts)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search a repository's open issues
    Search {
        /// Repository in owner/name format (defaults to the last searched one)
        repo: Option<String>,

        /// Attach an AI summary and difficulty to every issue
        #[arg(long)]
        summaries: bool,

        /// Reveal this many additional pages after the first
        #[arg(long, default_value_t = 0)]
        more: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Summarize an issue body with the AI fallback chain
    Summarize {
        /// Issue body text
        #[arg(long, conflicts_with = "from")]
        body: Option<String>,

        /// Read the issue body from a file
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Rank issue authors of a repository
    Leaderboard {
        /// Repository in owner/name format
        repo: String,

        /// Count every page instead of the first one
        #[arg(long)]
        all_pages: bool,
    },

    /// Manage bookmarked issues
    #[command(subcommand)]
    Bookmark(BookmarkCommand),

    /// Manage saved projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Show or edit the action history
    #[command(subcommand)]
    History(HistoryCommand),

    /// Show or change the color theme
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Generate a shell completion script
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filter and sort flags shared by `search` and `project save`.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Keep only issues of this difficulty (easy, medium, hard, unknown)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Keep only issues carrying this exact label
    #[arg(long)]
    pub label: Option<String>,

    /// Sort order (newest, oldest, title)
    #[arg(long, default_value_t = SortOrder::Newest)]
    pub sort: SortOrder,

    /// Keep only open issues
    #[arg(long)]
    pub open_only: bool,

    /// Keep only issues with a beginner-friendly label
    #[arg(long)]
    pub beginner_only: bool,

    /// Keep only bookmarked issues
    #[arg(long)]
    pub bookmarks_only: bool,
}

impl From<FilterArgs> for FeedFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            difficulty: args.difficulty,
            label: args.label.filter(|l| !l.trim().is_empty()),
            sort: args.sort,
            open_only: args.open_only,
            beginner_only: args.beginner_only,
            bookmarks_only: args.bookmarks_only,
        }
    }
}

/// Bookmark subcommands
#[derive(Subcommand)]
pub enum BookmarkCommand {
    /// Bookmark an issue, or remove its bookmark
    Toggle {
        /// Repository in owner/name format
        repo: String,

        /// Issue number
        number: u64,
    },

    /// List bookmarks
    List {
        /// Only show bookmarks of this repository
        repo: Option<String>,
    },
}

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Save the current filters under a name
    Save {
        /// Project name
        name: String,

        /// Repository (defaults to the last searched one)
        #[arg(long, short = 'r')]
        repo: Option<String>,

        /// Request AI summaries when the project is loaded
        #[arg(long)]
        summaries: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Load a project and run its search
    Load {
        /// Project name
        name: String,
    },

    /// Delete a project
    Delete {
        /// Project name
        name: String,
    },

    /// List saved projects
    List,

    /// Export every project as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Import projects from an exported JSON file
    Import {
        /// File produced by `forkthis project export`
        file: PathBuf,

        /// Overwrite existing projects without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print a shareable link for a project
    Share {
        /// Project name
        name: String,

        /// Base URL of the web client
        #[arg(long, default_value = "https://forkthis.app/")]
        base: String,
    },
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List logged actions, newest first
    List,

    /// Remove every entry
    Clear,

    /// Remove one entry by its position in `history list`
    Remove {
        /// Zero-based index
        index: usize,
    },
}

/// Theme subcommands
#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Show the stored theme
    Show,

    /// Store a new theme
    Set {
        /// Theme name (light, dark, cyberpunk, terminal, luxe)
        theme: Theme,
    },
}
