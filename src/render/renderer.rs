use std::io::{self, Write};

use colored::Colorize;

use crate::ext::ErrorExt;
use crate::listing::{DirectoryListing, Entry, EntryKind, ListingError};

/// Prefix of every failure line.
const FAILURE_PREFIX: &str = "wls";

/// Writes listings one entry per line.
///
/// Every listing after the first is preceded by a blank line and a
/// `path:` header, as in recursive listings.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, listings: &[DirectoryListing], out: &mut impl Write) -> io::Result<()> {
        for (index, listing) in listings.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
                writeln!(out, "{}:", listing.path.display())?;
            }
            for entry in &listing.entries {
                writeln!(out, "{}", self.paint(entry))?;
            }
        }
        out.flush()
    }

    /// Writes one line per directory that could not be listed.
    pub fn render_failures(
        &self,
        failures: &[ListingError],
        out: &mut impl Write,
    ) -> io::Result<()> {
        for failure in failures {
            writeln!(out, "{FAILURE_PREFIX}: {}", failure.chained_message())?;
        }
        out.flush()
    }

    fn paint(&self, entry: &Entry) -> String {
        if !self.color {
            return entry.name.clone();
        }
        match entry.kind {
            EntryKind::Real { directory: true } => entry.name.blue().bold().to_string(),
            EntryKind::Real { directory: false } => entry.name.clone(),
            EntryKind::Ghost => entry.name.dimmed().italic().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn listing(path: &str, entries: Vec<Entry>) -> DirectoryListing {
        DirectoryListing {
            path: PathBuf::from(path),
            canonical: None,
            entries,
        }
    }

    fn render_plain(listings: &[DirectoryListing]) -> String {
        let mut out = Vec::new();
        Renderer::new(false).render(listings, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_listing_has_no_header() {
        let output = render_plain(&[listing(
            "/trees/main/src/areas",
            vec![Entry::real("clients", true), Entry::ghost("platform")],
        )]);

        assert_eq!(output, "clients\nplatform\n");
    }

    #[test]
    fn nested_listings_get_headers() {
        let output = render_plain(&[
            listing("/src/areas", vec![Entry::real("clients", true)]),
            listing(
                "/src/areas/clients",
                vec![Entry::real("admin-web", true), Entry::ghost("kiosk")],
            ),
        ]);

        assert_eq!(output, "clients\n\n/src/areas/clients:\nadmin-web\nkiosk\n");
    }

    #[test]
    fn failures_are_one_line_each() {
        let failures = [ListingError::DirectoryNotFound {
            path: PathBuf::from("/src/areas/gone"),
        }];
        let mut out = Vec::new();

        Renderer::new(false).render_failures(&failures, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "wls: /src/areas/gone: No such directory\n"
        );
    }

    #[test]
    fn empty_listing_renders_nothing() {
        assert_eq!(render_plain(&[listing("/src", Vec::new())]), "");
    }
}
