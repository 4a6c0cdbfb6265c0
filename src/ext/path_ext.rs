use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` components without touching the filesystem.
///
/// Redundant separators disappear as a side effect of walking components.
/// A `..` at the root (or at the start of a relative path) is dropped.
pub fn lexically_normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Joins `path` onto `base` unless it is already absolute, then normalizes.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        lexically_normalize(path)
    } else {
        lexically_normalize(&base.join(path))
    }
}

pub trait PathExt {
    fn lexically_normalized(&self) -> PathBuf;
    fn best_effort_display(&self) -> String;
}

impl PathExt for Path {
    fn lexically_normalized(&self) -> PathBuf {
        lexically_normalize(self)
    }

    fn best_effort_display(&self) -> String {
        match self.canonicalize() {
            Ok(canonical_path) => canonical_path.display().to_string(),
            Err(_) => lexically_normalize(self).display().to_string(),
        }
    }
}

impl PathExt for PathBuf {
    fn lexically_normalized(&self) -> PathBuf {
        self.as_path().lexically_normalized()
    }

    fn best_effort_display(&self) -> String {
        self.as_path().best_effort_display()
    }
}
