use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use snafu::prelude::*;
use tracing::debug;

use crate::ext::PathExt;
use crate::listing::directory::read_real_entries;
use crate::listing::{Entry, EntryComparator, merge, synthesize};
use crate::manifest::Manifest;
use crate::resolver::CanonicalPath;

/// The tree a listing happens in, shared by every directory of one run.
#[derive(Debug, Clone)]
pub struct TreeContext {
    pub root: PathBuf,
    pub manifest: Arc<Manifest>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Keep entries whose name starts with a dot.
    pub show_hidden: bool,
    /// Skip ghost synthesis, listing only what is on disk.
    pub no_ghosts: bool,
}

/// A directory to list together with its place in the tree, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTarget {
    /// Absolute and normalized.
    pub path: PathBuf,
    /// `None` outside a tree.
    pub canonical: Option<CanonicalPath>,
}

impl ListingTarget {
    pub fn new(path: PathBuf, canonical: Option<CanonicalPath>) -> Self {
        Self { path, canonical }
    }

    /// The real subdirectory `entry` of this target.
    pub fn child(&self, entry: &Entry) -> Self {
        Self {
            path: self.path.join(&entry.file_name),
            canonical: self
                .canonical
                .as_ref()
                .map(|canonical| canonical.join(entry.name.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub path: PathBuf,
    /// `None` outside a tree.
    pub canonical: Option<CanonicalPath>,
    pub entries: Vec<Entry>,
}

impl DirectoryListing {
    /// Targets for every real subdirectory shown in this listing.
    pub fn subdirectories(&self) -> impl Iterator<Item = ListingTarget> + '_ {
        let target = ListingTarget::new(self.path.clone(), self.canonical.clone());
        self.entries
            .iter()
            .filter(|entry| entry.is_real_directory())
            .map(move |entry| target.child(entry))
    }
}

/// Lists one directory at a time, merging disk contents with ghosts.
///
/// Cheap to clone and safe to move to other threads: the manifest is shared
/// read-only.
#[derive(Clone)]
pub struct DirectoryLister {
    tree: Option<TreeContext>,
    options: ListingOptions,
    comparator: EntryComparator,
}

impl DirectoryLister {
    pub fn new(
        tree: Option<TreeContext>,
        options: ListingOptions,
        comparator: EntryComparator,
    ) -> Self {
        Self {
            tree,
            options,
            comparator,
        }
    }

    /// Lists `target`, synthesizing ghosts only when it lies in a tree.
    pub fn list(&self, target: &ListingTarget) -> Result<DirectoryListing, ListingError> {
        let directory = target.path.as_path();
        let ghost_source = self.ghost_manifest().zip(target.canonical.as_ref());

        let real = match read_real_entries(directory) {
            Ok(real) => real,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                let declared = ghost_source.is_some_and(|(manifest, prefix)| {
                    manifest.declares_directory(prefix.segments())
                });
                ensure!(declared, DirectoryNotFoundSnafu { path: directory });
                debug!("{} exists only in the manifest", directory.display());
                Vec::new()
            }
            Err(source) => {
                return Err(source).context(ReadDirectorySnafu { path: directory });
            }
        };

        let ghosts = match ghost_source {
            Some((manifest, prefix)) => {
                let real_names = real
                    .iter()
                    .map(|entry| entry.name.clone())
                    .collect::<HashSet<_>>();
                synthesize(manifest, prefix, &real_names)
            }
            None => Vec::new(),
        };

        let entries = merge(
            self.visible(real),
            self.visible(ghosts),
            self.comparator.as_ref(),
        );

        Ok(DirectoryListing {
            path: target.path.clone(),
            canonical: target.canonical.clone(),
            entries,
        })
    }

    fn ghost_manifest(&self) -> Option<&Manifest> {
        if self.options.no_ghosts {
            return None;
        }
        self.tree.as_ref().map(|tree| tree.manifest.as_ref())
    }

    fn visible(&self, entries: Vec<Entry>) -> Vec<Entry> {
        if self.options.show_hidden {
            return entries;
        }
        entries.into_iter().filter(|entry| !entry.is_hidden()).collect()
    }
}

#[derive(Debug, Snafu)]
pub enum ListingError {
    #[snafu(display("{}: No such directory", path.best_effort_display()))]
    DirectoryNotFound { path: PathBuf },
    #[snafu(display("Failed to read directory {}", path.best_effort_display()))]
    ReadDirectoryError { path: PathBuf, source: io::Error },
}
