//! Workspace manifest discovery and parsing.
//!
//! A tree root (`trees/<name>/src`) carries `.meta/manifest.json`, a JSON
//! object mapping logical unit paths such as `//areas/clients/admin-web` to
//! metadata records. Most declared units are usually not checked out.

mod loader;
mod manifest;

pub use loader::{ManifestLoadError, ManifestLoader, ManifestLocation, ManifestNotFound};
pub use manifest::{Manifest, ManifestParseError};

#[cfg(test)]
pub use loader::{MANIFEST_FILE_NAME, META_DIR_NAME};
#[cfg(test)]
pub use manifest::{ManifestKey, ManifestRecord};
