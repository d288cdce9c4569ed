//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::services::{OutputFormat, ViewOptions};

/// Hierarchical tree tables: flatten, expand and render nested datasets
#[derive(Parser, Debug)]
#[command(name = "treetable")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory searched for .treetable.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the visible rows as a table
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },

    /// Show the visible rows as an outline
    Tree {
        #[command(flatten)]
        view: ViewArgs,
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

/// Dataset and initial expansion shared by `render` and `tree`.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Dataset file (.toml or .json); falls back to `default_file`
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Expand the node with this id (repeatable)
    #[arg(short, long = "expand", value_name = "ID")]
    pub expand: Vec<String>,

    /// Expand every node that has children
    #[arg(short = 'a', long)]
    pub expand_all: bool,
}

impl ViewArgs {
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            expand: self.expand.clone(),
            expand_all: self.expand_all,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Attrs,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Attrs => OutputFormat::Attrs,
            FormatArg::Json => OutputFormat::Json,
        }
    }
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
