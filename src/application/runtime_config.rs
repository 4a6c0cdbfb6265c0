use std::path::PathBuf;

use crate::application::data::{ColorWhen, EntryOrdering};
use crate::cli::Cli;
use crate::listing::ListingOptions;

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// `None` lists the current directory.
    pub path: Option<PathBuf>,
    pub listing: ListingOptions,
    pub ordering: EntryOrdering,
    pub recurse: bool,
    pub max_depth: Option<usize>,
    pub search_boundary: Option<PathBuf>,
    pub color: ColorWhen,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            path: cli.path,
            listing: ListingOptions {
                show_hidden: cli.all,
                no_ghosts: cli.no_ghosts,
            },
            ordering: EntryOrdering {
                field: cli.sort,
                reverse: cli.reverse,
                ghosts_last: cli.ghosts_last,
            },
            recurse: cli.recurse,
            max_depth: cli.level,
            search_boundary: cli.search_boundary,
            color: cli.color,
        }
    }
}
