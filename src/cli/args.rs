//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::ItemId;

/// Integers become numeric ids, anything else a text id.
///
/// Set explicitly on every id argument: clap would otherwise pick the
/// `From<String>` impl and turn `2` into a text id.
pub fn parse_item_id(raw: &str) -> Result<ItemId, std::convert::Infallible> {
    raw.parse()
}

/// Inspect and edit parent-linked item hierarchies stored as TOML documents
#[derive(Parser, Debug)]
#[command(name = "treestore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Tree document (default: data_file from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the hierarchy as a tree
    Tree,

    /// Show grid rows: root-to-item path and category
    Rows,

    /// Show a single item
    Get {
        /// Item id (integers are numeric ids, anything else is text)
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
    },

    /// List direct children
    Children {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
    },

    /// List all descendants
    Descendants {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
    },

    /// List ancestors, nearest first
    Parents {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
    },

    /// Show the root-to-item id path
    Path {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
    },

    /// Add an item and show the result (document is not written)
    Add {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
        label: String,
        /// Parent id (default: new root)
        #[arg(short, long, value_parser = parse_item_id)]
        parent: Option<ItemId>,
    },

    /// Re-parent an item and show the result (document is not written)
    Move {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
        /// New parent id (default: make it a root)
        #[arg(short, long, value_parser = parse_item_id)]
        parent: Option<ItemId>,
    },

    /// Change an item's label and show the result (document is not written)
    Relabel {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
        label: String,
    },

    /// Remove an item with its subtree and show the result (document is not written)
    Remove {
        #[arg(value_parser = parse_item_id)]
        id: ItemId,
    },

    /// Print the document normalized to store order
    Export,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
