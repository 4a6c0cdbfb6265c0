use std::collections::BTreeMap;
use std::str::FromStr;

use derive_more::Display;
use serde::Deserialize;
use serde_json::{Map, Value};
use snafu::prelude::*;
use tracing::{debug, warn};

/// Marker every manifest key starts with.
pub const KEY_MARKER: &str = "//";

/// Logical path of a workspace unit, e.g. `//areas/clients/admin-web`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("//{}", segments.join("/"))]
pub struct ManifestKey {
    segments: Vec<String>,
}

impl ManifestKey {
    #[cfg(test)]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this key equals `prefix` or lies somewhere below it.
    pub fn is_at_or_under(&self, prefix: &[String]) -> bool {
        self.segments.starts_with(prefix)
    }

    /// Name of the immediate child of `prefix` this key belongs to.
    ///
    /// `None` when the key is not under `prefix` or denotes `prefix` itself.
    pub fn child_name_under(&self, prefix: &[String]) -> Option<&str> {
        if !self.is_at_or_under(prefix) {
            return None;
        }
        self.segments.get(prefix.len()).map(String::as_str)
    }
}

impl FromStr for ManifestKey {
    type Err = ManifestKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let rest = raw.strip_prefix(KEY_MARKER).context(NoMarkerSnafu)?;
        ensure!(!rest.is_empty(), NoSegmentsSnafu);

        let segments = rest
            .split('/')
            .map(|segment| match segment {
                "" | "." | ".." => InvalidSegmentSnafu { segment }.fail(),
                _ => Ok(segment.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ManifestKey { segments })
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ManifestKeyError {
    #[snafu(display("Key does not start with '{KEY_MARKER}'"))]
    NoMarker,
    #[snafu(display("Key names no segments"))]
    NoSegments,
    #[snafu(display("Key contains the invalid segment '{segment}'"))]
    InvalidSegment { segment: String },
}

/// Metadata for one workspace unit. Only `id` is interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestRecord {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestRecord {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// Every workspace unit declared by one tree, checked out or not.
///
/// Built once per invocation and never mutated afterwards, so it can be
/// shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: BTreeMap<ManifestKey, ManifestRecord>,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestParseError> {
        bytes.try_into()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &ManifestKey) -> Option<&ManifestRecord> {
        self.entries.get(key)
    }

    /// Keys in lexicographic segment order.
    pub fn keys(&self) -> impl Iterator<Item = &ManifestKey> {
        self.entries.keys()
    }

    /// Whether `prefix` is a unit or an ancestor of one.
    pub fn declares_directory(&self, prefix: &[String]) -> bool {
        self.keys().any(|key| key.is_at_or_under(prefix))
    }

    fn parse_record(key: &str, value: Value) -> Result<ManifestRecord, ManifestParseError> {
        serde_json::from_value(value).context(InvalidRecordSnafu { key })
    }
}

impl FromIterator<(ManifestKey, ManifestRecord)> for Manifest {
    fn from_iter<T: IntoIterator<Item = (ManifestKey, ManifestRecord)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<&[u8]> for Manifest {
    type Error = ManifestParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let document: Value = serde_json::from_slice(bytes).context(InvalidJsonSnafu)?;
        let Value::Object(top_level) = document else {
            return TopLevelNotObjectSnafu.fail();
        };

        let mut entries = BTreeMap::new();
        for (raw_key, value) in top_level {
            let key = match raw_key.parse::<ManifestKey>() {
                Ok(key) => key,
                Err(ManifestKeyError::NoMarker) => {
                    return MissingMarkerSnafu { key: raw_key }.fail();
                }
                Err(err) => {
                    warn!("Ignoring manifest key '{}': {}", raw_key, err);
                    continue;
                }
            };
            let record = Self::parse_record(&raw_key, value)?;
            entries.insert(key, record);
        }

        debug!("Parsed manifest with {} units", entries.len());
        Ok(Manifest { entries })
    }
}

impl TryFrom<&str> for Manifest {
    type Error = ManifestParseError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        contents.as_bytes().try_into()
    }
}

#[derive(Debug, Snafu)]
pub enum ManifestParseError {
    #[snafu(display("Manifest is not valid JSON"))]
    InvalidJson { source: serde_json::Error },
    #[snafu(display("Top level of the manifest should be an object"))]
    TopLevelNotObject,
    #[snafu(display("Manifest key '{key}' does not start with '{KEY_MARKER}'"))]
    MissingMarker { key: String },
    #[snafu(display("Manifest record for '{key}' is malformed"))]
    InvalidRecord {
        key: String,
        source: serde_json::Error,
    },
}
