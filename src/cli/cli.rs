use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorWhen, LogLevel, SortField};

/// List a directory, including workspace units declared in the tree's
/// manifest that are not checked out.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory to list, defaults to the current directory
    pub path: Option<PathBuf>,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Show entries whose name starts with a dot
    #[clap(long, short)]
    pub all: bool,
    /// List only what exists on disk
    #[clap(long)]
    pub no_ghosts: bool,

    #[clap(long, short, default_value = "name", value_enum)]
    pub sort: SortField,
    /// Reverse the sort order
    #[clap(long, short)]
    pub reverse: bool,
    /// List ghost entries after all real ones
    #[clap(long)]
    pub ghosts_last: bool,

    /// Recurse into real subdirectories
    #[clap(long, short = 'R')]
    pub recurse: bool,
    /// Limit the depth of recursion
    #[clap(long, short = 'L', requires = "recurse")]
    pub level: Option<usize>,

    /// Stop looking for a workspace manifest above this directory
    #[clap(long, env = "WLS_SEARCH_BOUNDARY")]
    pub search_boundary: Option<PathBuf>,
    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorWhen,
}
