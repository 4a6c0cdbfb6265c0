use std::cmp::Ordering;
use std::sync::Arc;

use clap::ValueEnum;

use crate::listing::{Entry, EntryComparator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SortField {
    /// Name, case-sensitive
    #[default]
    Name,
    /// Name, case-insensitive
    #[value(name = "iname")]
    NameIgnoreCase,
}

/// Display order of a listing, handed to the merger as its comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryOrdering {
    pub field: SortField,
    /// Reverses the name order. Grouping by kind is kept.
    pub reverse: bool,
    /// Puts ghosts after all real entries instead of interleaving them.
    pub ghosts_last: bool,
}

impl EntryOrdering {
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let group = if self.ghosts_last {
            a.is_ghost().cmp(&b.is_ghost())
        } else {
            Ordering::Equal
        };

        let by_field = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::NameIgnoreCase => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        };
        let by_field = if self.reverse {
            by_field.reverse()
        } else {
            by_field
        };

        group.then(by_field)
    }

    pub fn comparator(self) -> EntryComparator {
        Arc::new(move |a: &Entry, b: &Entry| self.compare(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::merge;
    use rstest::*;

    fn sample() -> (Vec<Entry>, Vec<Entry>) {
        (
            vec![Entry::real("beta", true), Entry::real("Delta", false)],
            vec![Entry::ghost("alpha"), Entry::ghost("Charlie")],
        )
    }

    #[rstest]
    #[case(EntryOrdering::default(), &["Charlie", "Delta", "alpha", "beta"])]
    #[case(
        EntryOrdering { field: SortField::NameIgnoreCase, ..Default::default() },
        &["alpha", "beta", "Charlie", "Delta"]
    )]
    #[case(
        EntryOrdering { field: SortField::NameIgnoreCase, reverse: true, ..Default::default() },
        &["Delta", "Charlie", "beta", "alpha"]
    )]
    #[case(
        EntryOrdering { field: SortField::NameIgnoreCase, ghosts_last: true, ..Default::default() },
        &["beta", "Delta", "alpha", "Charlie"]
    )]
    #[case(
        EntryOrdering { field: SortField::NameIgnoreCase, reverse: true, ghosts_last: true },
        &["Delta", "beta", "Charlie", "alpha"]
    )]
    fn orders_merged_entries(#[case] ordering: EntryOrdering, #[case] expected: &[&str]) {
        let (real, ghosts) = sample();

        let merged = merge(real, ghosts, ordering.comparator().as_ref());
        let names = merged
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(names, expected);
    }

    #[test]
    fn case_insensitive_ties_fall_back_to_case_sensitive_order() {
        let ordering = EntryOrdering {
            field: SortField::NameIgnoreCase,
            ..Default::default()
        };

        assert_eq!(
            ordering.compare(&Entry::real("Readme", false), &Entry::real("readme", false)),
            Ordering::Less
        );
    }
}
