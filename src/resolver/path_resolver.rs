use std::path::{Component, Path, PathBuf};

use derive_more::Display;
use snafu::prelude::*;
use tracing::debug;

use crate::ext::absolutize;
use crate::manifest::{ManifestLoader, ManifestLocation, ManifestNotFound};

/// Directory being listed, as segments relative to the tree root.
///
/// Never contains `.` or `..`. The empty path is the tree root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Display)]
#[display("//{}", segments.join("/"))]
pub struct CanonicalPath {
    segments: Vec<String>,
}

impl CanonicalPath {
    #[cfg(test)]
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The prefix extended by one child segment.
    pub fn join(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }
}

impl<S: Into<String>> FromIterator<S> for CanonicalPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A requested path anchored inside a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub absolute: PathBuf,
    pub location: ManifestLocation,
    pub canonical: CanonicalPath,
}

pub struct PathResolver<'a> {
    loader: &'a ManifestLoader,
}

impl<'a> PathResolver<'a> {
    pub fn new(loader: &'a ManifestLoader) -> Self {
        Self { loader }
    }

    /// The absolute, lexically normalized form of the requested path.
    pub fn absolute(requested: Option<&Path>, cwd: &Path) -> PathBuf {
        match requested {
            Some(path) => absolutize(path, cwd),
            None => absolutize(cwd, cwd),
        }
    }

    /// Anchors the requested path (or `cwd`) to the nearest tree root.
    pub fn resolve(
        &self,
        requested: Option<&Path>,
        cwd: &Path,
    ) -> Result<ResolvedPath, ResolveError> {
        let absolute = Self::absolute(requested, cwd);
        let location = self
            .loader
            .locate(&absolute)
            .context(ManifestNotFoundSnafu)?;
        let canonical = Self::anchor(&location.tree_root, &absolute)?;
        debug!("Resolved {} to {}", absolute.display(), canonical);

        Ok(ResolvedPath {
            absolute,
            location,
            canonical,
        })
    }

    /// Splits the part of `absolute` below `tree_root` into segments.
    pub fn anchor(tree_root: &Path, absolute: &Path) -> Result<CanonicalPath, ResolveError> {
        let outside_tree = || OutsideTreeSnafu {
            path: absolute,
            tree_root,
        };

        let suffix = absolute.strip_prefix(tree_root).ok().context(outside_tree())?;
        suffix
            .components()
            .map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Option<CanonicalPath>>()
            .context(outside_tree())
    }
}

#[derive(Debug, Snafu)]
pub enum ResolveError {
    #[snafu(display("Path does not lie inside a workspace tree"))]
    ManifestNotFound { source: ManifestNotFound },
    #[snafu(display(
        "{} is outside the tree rooted at {}",
        path.display(),
        tree_root.display()
    ))]
    OutsideTree { path: PathBuf, tree_root: PathBuf },
}
