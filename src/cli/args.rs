//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Terminal documentation browser: fetch a markdown topic index, browse and search its topics
#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project directory holding .docnav.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Override the documentation base URL (trailing slash expected)
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show categories and topics
    Tree {
        /// Only show topics/categories matching this term
        #[arg(short, long)]
        search: Option<String>,
        /// Expand every category
        #[arg(short, long)]
        all: bool,
    },

    /// Print a topic document (default topic if omitted)
    Show {
        /// Topic file name or title
        target: Option<String>,
    },

    /// Pick a topic interactively (fzf) and print it
    Select,

    /// Parse a local index file
    Parse {
        /// Markdown index file (e.g. data.md)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Emit JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Print the file-name slug for titles
    Slug {
        /// Titles to convert
        #[arg(required = true, num_args = 1..)]
        titles: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_tree_with_flags_when_parsing_then_captures_them() {
        let cli = Cli::try_parse_from([
            "docnav",
            "-vv",
            "--base-url",
            "https://docs.example.org/",
            "tree",
            "--search",
            "cache",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.base_url.as_deref(), Some("https://docs.example.org/"));
        match cli.command {
            Some(Commands::Tree { search, all }) => {
                assert_eq!(search.as_deref(), Some("cache"));
                assert!(all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_slug_without_titles_when_parsing_then_error() {
        assert!(Cli::try_parse_from(["docnav", "slug"]).is_err());
    }
}
