use std::ffi::OsString;

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntryKind {
    /// Present on disk.
    #[display("real")]
    Real { directory: bool },
    /// Declared in the manifest only. Carries no further structure.
    #[display("ghost")]
    Ghost,
}

/// One immediate child of the listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Display name, lossily decoded for names that are not UTF-8.
    pub name: String,
    /// Name exactly as stored on disk.
    pub file_name: OsString,
    pub kind: EntryKind,
}

impl Entry {
    pub fn real(file_name: impl Into<OsString>, directory: bool) -> Self {
        let file_name = file_name.into();
        Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            kind: EntryKind::Real { directory },
        }
    }

    pub fn ghost(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            file_name: OsString::from(&name),
            name,
            kind: EntryKind::Ghost,
        }
    }

    pub fn is_ghost(&self) -> bool {
        self.kind == EntryKind::Ghost
    }

    /// Real directory that can be descended into.
    pub fn is_real_directory(&self) -> bool {
        self.kind == EntryKind::Real { directory: true }
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}
