use std::fs;
use std::path::PathBuf;

use rstest::fixture;
use tempfile::TempDir;

use crate::manifest::{MANIFEST_FILE_NAME, META_DIR_NAME};

pub const CLIENTS: [&str; 11] = [
    "admin-web",
    "billing-x",
    "checkout",
    "dashboard",
    "field-app",
    "kiosk",
    "mobile",
    "onboarding",
    "partner-portal",
    "storefront",
    "support-desk",
];

/// A tree declaring every client plus `//areas/platform/billing`, with only
/// `areas/clients/admin-web` checked out.
pub struct Monorepo {
    pub temp_dir: TempDir,
    pub tree_root: PathBuf,
}

impl Monorepo {
    pub fn path(&self, relative: &str) -> PathBuf {
        self.tree_root.join(relative)
    }
}

pub fn manifest_json() -> String {
    let units = CLIENTS
        .iter()
        .map(|client| format!(r#""//areas/clients/{client}": {{"id": "{client}"}}"#))
        .chain([r#""//areas/platform/billing": {"id": "billing", "owner": "platform"}"#.to_string()])
        .collect::<Vec<_>>();
    format!("{{{}}}", units.join(",\n"))
}

#[fixture]
pub fn monorepo() -> Monorepo {
    let temp_dir = TempDir::new().unwrap();
    let tree_root = temp_dir.path().join("trees/main/src");
    fs::create_dir_all(tree_root.join(META_DIR_NAME)).unwrap();
    fs::write(
        tree_root.join(META_DIR_NAME).join(MANIFEST_FILE_NAME),
        manifest_json(),
    )
    .unwrap();
    fs::create_dir_all(tree_root.join("areas/clients/admin-web/src")).unwrap();
    fs::write(tree_root.join("areas/clients/admin-web/BUILD"), "").unwrap();
    Monorepo {
        temp_dir,
        tree_root,
    }
}
