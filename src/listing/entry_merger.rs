use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::listing::Entry;

/// Display order supplied by the front end.
pub type EntryComparator = Arc<dyn Fn(&Entry, &Entry) -> Ordering + Send + Sync>;

/// Combines real and ghost entries into one listing ordered by `compare`.
///
/// A ghost sharing its name with a real entry is dropped, so every name
/// appears once and real entries always win.
pub fn merge<F>(real: Vec<Entry>, ghosts: Vec<Entry>, compare: F) -> Vec<Entry>
where
    F: Fn(&Entry, &Entry) -> Ordering,
{
    let real_names = real
        .iter()
        .map(|entry| entry.name.clone())
        .collect::<HashSet<_>>();

    let mut entries = real;
    entries.extend(
        ghosts
            .into_iter()
            .filter(|ghost| !real_names.contains(&ghost.name)),
    );
    entries.sort_by(|a, b| compare(a, b));
    entries
}
