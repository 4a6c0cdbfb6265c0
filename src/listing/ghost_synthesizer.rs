use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::listing::Entry;
use crate::manifest::Manifest;
use crate::resolver::CanonicalPath;

/// Computes the ghost children of `prefix`, one level deep.
///
/// Every manifest key below `prefix` nominates the segment right after the
/// prefix, whether it names a unit directly or one of its ancestors. A
/// nominated name that already exists in `real_names` yields nothing here:
/// the real directory bridges the deeper keys, which surface only when that
/// directory is listed itself. Everything else becomes a terminal ghost.
///
/// Output is sorted by name and does not depend on set iteration order.
pub fn synthesize(
    manifest: &Manifest,
    prefix: &CanonicalPath,
    real_names: &HashSet<String>,
) -> Vec<Entry> {
    let ghost_names = manifest
        .keys()
        .filter_map(|key| key.child_name_under(prefix.segments()))
        .filter(|name| !real_names.contains(*name))
        .collect::<BTreeSet<_>>();

    debug!("Synthesized {} ghosts under {}", ghost_names.len(), prefix);
    ghost_names.into_iter().map(Entry::ghost).collect()
}
