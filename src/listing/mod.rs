//! Merged directory listings of real and ghost entries.
//!
//! A ghost is a child declared in the workspace manifest but missing on disk.
//! Ghosts are only ever produced one level deep: a ghost directory has no
//! listed contents, and a real directory standing in for deeper manifest keys
//! hides them until it is listed itself.

mod directory;
mod entry;
mod entry_merger;
mod ghost_synthesizer;
mod lister;
mod recursive;
#[cfg(test)]
mod test_fixtures;

pub use entry::{Entry, EntryKind};
pub use entry_merger::{EntryComparator, merge};
pub use ghost_synthesizer::synthesize;
pub use lister::{
    DirectoryLister, DirectoryListing, ListingError, ListingOptions, ListingTarget, TreeContext,
};
pub use recursive::{
    ListingOutcome, RecursiveLister, RecursiveListerCreationError, RecursiveListingError,
};
