use std::num::NonZeroUsize;
use std::thread::available_parallelism;

use compio::dispatcher::{Dispatcher, DispatcherBuilder};
use futures::future::join_all;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::listing::{DirectoryLister, DirectoryListing, ListingError, ListingTarget};

/// Default number of worker threads when unable to determine system parallelism
const DEFAULT_WORKER_THREADS: NonZeroUsize = NonZeroUsize::MIN;

/// A listed directory plus the indices of its listed subdirectories.
struct ListedNode {
    listing: DirectoryListing,
    children: Vec<usize>,
}

/// Everything one invocation listed, plus the directories that could not be.
#[derive(Debug, Default)]
pub struct ListingOutcome {
    /// In display order.
    pub listings: Vec<DirectoryListing>,
    pub failures: Vec<ListingError>,
}

/// Walks real subdirectories level by level, listing each level in parallel.
///
/// Ghost entries are never descended into. A subdirectory that cannot be
/// listed is recorded as a failure and the walk goes on without it.
pub struct RecursiveLister {
    dispatcher: Dispatcher,
    lister: DirectoryLister,
    max_depth: Option<usize>,
}

impl RecursiveLister {
    /// `max_depth` counts levels below the start directory; `None` is unbounded.
    pub fn new(
        lister: DirectoryLister,
        max_depth: Option<usize>,
    ) -> Result<Self, RecursiveListerCreationError> {
        let workers_num = Self::determine_worker_count();
        debug!("Using {} worker threads for directory listing", workers_num);

        let dispatcher = DispatcherBuilder::new()
            .worker_threads(workers_num)
            .build()
            .context(DispatcherSnafu)?;

        Ok(Self {
            dispatcher,
            lister,
            max_depth,
        })
    }

    fn determine_worker_count() -> NonZeroUsize {
        available_parallelism().unwrap_or(DEFAULT_WORKER_THREADS)
    }

    /// Lists `start` and everything below it, in depth-first display order.
    ///
    /// Only a failure to list `start` itself is an error.
    pub async fn list(
        &self,
        start: &ListingTarget,
    ) -> Result<ListingOutcome, RecursiveListingError> {
        let root = self.lister.list(start).context(ListingSnafu)?;
        let mut nodes = vec![ListedNode {
            listing: root,
            children: Vec::new(),
        }];
        let mut failures = Vec::new();

        let mut level = vec![0];
        let mut depth = 0;
        while !level.is_empty() && self.max_depth.is_none_or(|max| depth < max) {
            depth += 1;

            let pending = level
                .iter()
                .flat_map(|&parent| {
                    nodes[parent]
                        .listing
                        .subdirectories()
                        .map(move |target| (parent, target))
                })
                .collect::<Vec<_>>();
            debug!("Listing {} directories at depth {}", pending.len(), depth);

            let listed = self
                .dispatch_level(pending.iter().map(|(_, target)| target.clone()))
                .await?;

            level = Vec::with_capacity(listed.len());
            for ((parent, target), result) in pending.into_iter().zip(listed) {
                let listing = match result {
                    Ok(listing) => listing,
                    Err(error) => {
                        debug!("Could not list {}: {}", target.path.display(), error);
                        failures.push(error);
                        continue;
                    }
                };
                let index = nodes.len();
                nodes.push(ListedNode {
                    listing,
                    children: Vec::new(),
                });
                nodes[parent].children.push(index);
                level.push(index);
            }
        }

        info!(
            "Listed {} directories under {}, {} failed",
            nodes.len(),
            start.path.display(),
            failures.len()
        );
        Ok(ListingOutcome {
            listings: Self::depth_first(nodes),
            failures,
        })
    }

    /// Lists every directory of one level on the worker pool.
    async fn dispatch_level(
        &self,
        targets: impl Iterator<Item = ListingTarget>,
    ) -> Result<Vec<Result<DirectoryListing, ListingError>>, RecursiveListingError> {
        let receivers = targets
            .map(|target| {
                let lister = self.lister.clone();
                self.dispatcher
                    .dispatch(move || async move { lister.list(&target) })
                    .map_err(|e| RecursiveListingError::DispatchError {
                        error: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        join_all(receivers)
            .await
            .into_iter()
            .map(|received| received.context(CanceledSnafu))
            .collect()
    }

    fn depth_first(nodes: Vec<ListedNode>) -> Vec<DirectoryListing> {
        let mut order = Vec::with_capacity(nodes.len());
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(nodes[index].children.iter().rev());
        }

        let mut slots = nodes
            .into_iter()
            .map(|node| Some(node.listing))
            .collect::<Vec<_>>();
        order
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect()
    }
}

#[derive(Debug, Snafu)]
pub enum RecursiveListerCreationError {
    #[snafu(display("Failed to create directory listing dispatcher"))]
    DispatcherError { source: std::io::Error },
}

#[derive(Debug, Snafu)]
pub enum RecursiveListingError {
    #[snafu(display("Failed to dispatch directory listing: {}", error))]
    DispatchError { error: String },
    #[snafu(display("Directory listing got cancelled"))]
    CanceledError {
        source: futures_channel::oneshot::Canceled,
    },
    #[snafu(display("Failed to list the start directory"))]
    ListingError { source: ListingError },
}
