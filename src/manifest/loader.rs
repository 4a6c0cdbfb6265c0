use std::path::{Path, PathBuf};

use compio::fs;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::ext::PathExt;
use crate::manifest::{Manifest, ManifestParseError};

/// Reserved directory inside a tree root holding tree metadata.
pub const META_DIR_NAME: &str = ".meta";
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
/// Name every tree root directory carries (`trees/<name>/src`).
pub const TREE_ROOT_DIR_NAME: &str = "src";

fn get_manifest_file_path(tree_root: &Path) -> PathBuf {
    tree_root.join(META_DIR_NAME).join(MANIFEST_FILE_NAME)
}

/// Where a tree's manifest was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    pub tree_root: PathBuf,
    pub manifest_path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct ManifestLoader {
    search_boundary: Option<PathBuf>,
}

impl ManifestLoader {
    /// The ascent stops after examining `search_boundary`, if given.
    pub fn new(search_boundary: Option<PathBuf>) -> Self {
        Self {
            search_boundary: search_boundary.map(|boundary| boundary.lexically_normalized()),
        }
    }

    /// Finds the nearest tree root at or above `start`.
    ///
    /// `start` is expected to be absolute and normalized. It does not need to
    /// exist: unmaterialized directories are simply passed over on the way up.
    pub fn locate(&self, start: &Path) -> Result<ManifestLocation, ManifestNotFound> {
        for directory in start.ancestors() {
            if Self::is_tree_root(directory) {
                let location = ManifestLocation {
                    tree_root: directory.to_path_buf(),
                    manifest_path: get_manifest_file_path(directory),
                };
                debug!(
                    "Found manifest for {} at {}",
                    start.display(),
                    location.manifest_path.display()
                );
                return Ok(location);
            }

            if self.search_boundary.as_deref() == Some(directory) {
                debug!("Reached search boundary {}", directory.display());
                break;
            }
        }

        ManifestNotFoundSnafu { start }.fail()
    }

    /// Reads and parses the manifest at `location`.
    pub async fn load(&self, location: &ManifestLocation) -> Result<Manifest, ManifestLoadError> {
        let path = &location.manifest_path;
        info!("Reading manifest {}", path.best_effort_display());

        let bytes = fs::read(path).await.context(ReadSnafu { path })?;
        debug!("Read {} manifest bytes", bytes.len());

        Manifest::parse(&bytes).context(ParseSnafu { path })
    }

    fn is_tree_root(directory: &Path) -> bool {
        directory
            .file_name()
            .is_some_and(|name| name == TREE_ROOT_DIR_NAME)
            && get_manifest_file_path(directory).is_file()
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("No workspace manifest found at or above {}", start.display()))]
pub struct ManifestNotFound {
    start: PathBuf,
}

#[derive(Debug, Snafu)]
pub enum ManifestLoadError {
    #[snafu(display("Failed to read the manifest: {}", path.best_effort_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the manifest: {}", path.best_effort_display()))]
    ParseError {
        path: PathBuf,
        source: ManifestParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write_tree(root: &Path, manifest: &str) -> PathBuf {
        let tree_root = root.join("trees/main/src");
        std_fs::create_dir_all(tree_root.join(META_DIR_NAME)).unwrap();
        std_fs::write(get_manifest_file_path(&tree_root), manifest).unwrap();
        tree_root
    }

    #[test]
    fn locates_manifest_from_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(temp_dir.path(), "{}");
        let nested = tree_root.join("areas/clients");
        std_fs::create_dir_all(&nested).unwrap();

        let location = ManifestLoader::default().locate(&nested).unwrap();

        assert_eq!(location.tree_root, tree_root);
        assert_eq!(location.manifest_path, tree_root.join(".meta/manifest.json"));
    }

    #[test]
    fn locates_manifest_from_unmaterialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(temp_dir.path(), "{}");

        let location = ManifestLoader::default()
            .locate(&tree_root.join("areas/platform/billing"))
            .unwrap();

        assert_eq!(location.tree_root, tree_root);
    }

    #[test]
    fn locates_manifest_from_tree_root_itself() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(temp_dir.path(), "{}");

        let location = ManifestLoader::default().locate(&tree_root).unwrap();

        assert_eq!(location.tree_root, tree_root);
    }

    #[test]
    fn ignores_manifest_in_directory_not_named_src() {
        let temp_dir = TempDir::new().unwrap();
        let not_a_tree = temp_dir.path().join("trees/main/source");
        std_fs::create_dir_all(not_a_tree.join(META_DIR_NAME)).unwrap();
        std_fs::write(get_manifest_file_path(&not_a_tree), "{}").unwrap();

        let loader = ManifestLoader::new(Some(temp_dir.path().to_path_buf()));
        let result = loader.locate(&not_a_tree.join("areas"));

        assert!(result.is_err());
    }

    #[test]
    fn ignores_src_directory_without_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("project/src");
        std_fs::create_dir_all(&src).unwrap();

        let loader = ManifestLoader::new(Some(temp_dir.path().to_path_buf()));

        assert!(loader.locate(&src).is_err());
    }

    #[test]
    fn search_stops_at_boundary() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(temp_dir.path(), "{}");
        let nested = tree_root.join("areas/clients");
        std_fs::create_dir_all(&nested).unwrap();

        let loader = ManifestLoader::new(Some(tree_root.join("areas")));

        assert!(loader.locate(&nested).is_err());
    }

    #[test]
    fn boundary_itself_is_examined() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(temp_dir.path(), "{}");

        let loader = ManifestLoader::new(Some(tree_root.clone()));
        let location = loader.locate(&tree_root.join("areas")).unwrap();

        assert_eq!(location.tree_root, tree_root);
    }

    #[test]
    fn not_found_error_names_the_start() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ManifestLoader::new(Some(temp_dir.path().to_path_buf()));

        let error = loader.locate(temp_dir.path()).unwrap_err();

        assert!(error.to_string().contains("No workspace manifest found"));
    }

    #[compio::test]
    async fn loads_located_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(
            temp_dir.path(),
            r#"{"//areas/clients/admin-web": {"id": "admin-web"}}"#,
        );
        let loader = ManifestLoader::default();
        let location = loader.locate(&tree_root).unwrap();

        let manifest = loader.load(&location).await.unwrap();

        assert_eq!(manifest.len(), 1);
    }

    #[compio::test]
    async fn malformed_manifest_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let tree_root = write_tree(temp_dir.path(), "[1, 2, 3]");
        let loader = ManifestLoader::default();
        let location = loader.locate(&tree_root).unwrap();

        let result = loader.load(&location).await;

        assert!(matches!(
            result,
            Err(ManifestLoadError::ParseError {
                source: ManifestParseError::TopLevelNotObject,
                ..
            })
        ));
    }

    #[compio::test]
    async fn missing_manifest_file_is_a_read_error() {
        let location = ManifestLocation {
            tree_root: PathBuf::from("/nonexistent/src"),
            manifest_path: PathBuf::from("/nonexistent/src/.meta/manifest.json"),
        };

        let result = ManifestLoader::default().load(&location).await;

        assert!(matches!(result, Err(ManifestLoadError::ReadError { .. })));
    }
}
