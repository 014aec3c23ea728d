//! In-memory [`TreeWalker`] for unit tests.
use super::walk::{ChildDirs, TreeWalker, WalkEntry, WalkIter};
use crate::error::AccessError;
use std::cell::Cell;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Dir,
    File(u64),
    Other,
    DeniedDir,
    DeniedFile,
    /// Its type cannot be read, so listing the parent fails for it.
    Unlisted,
}

/// A scripted directory tree. Entries are yielded in insertion order.
#[derive(Debug, Default)]
pub(crate) struct FakeWalker {
    entries: Vec<(PathBuf, Kind)>,
    pub walk_calls: Cell<usize>,
    pub list_calls: Cell<usize>,
}

impl FakeWalker {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, path: &str, kind: Kind) -> Self {
        self.entries.push((PathBuf::from(path), kind));
        self
    }

    pub fn dir(self, path: &str) -> Self {
        self.push(path, Kind::Dir)
    }

    pub fn file(self, path: &str, size: u64) -> Self {
        self.push(path, Kind::File(size))
    }

    pub fn other(self, path: &str) -> Self {
        self.push(path, Kind::Other)
    }

    pub fn denied_dir(self, path: &str) -> Self {
        self.push(path, Kind::DeniedDir)
    }

    pub fn denied_file(self, path: &str) -> Self {
        self.push(path, Kind::DeniedFile)
    }

    pub fn unlisted(self, path: &str) -> Self {
        self.push(path, Kind::Unlisted)
    }

    pub fn invocations(&self) -> usize {
        self.walk_calls.get() + self.list_calls.get()
    }

    fn is_denied_dir(&self, path: &Path) -> bool {
        self.entries
            .iter()
            .any(|(p, k)| matches!(k, Kind::DeniedDir) && p == path)
    }

    fn hidden_by_denied_ancestor(&self, path: &Path, root: &Path) -> bool {
        path.ancestors()
            .skip(1)
            .take_while(|a| *a != root)
            .any(|a| self.is_denied_dir(a))
    }

    fn denied(path: &Path) -> AccessError {
        AccessError::new(path, "Permission denied (os error 13)")
    }
}

impl TreeWalker for FakeWalker {
    fn walk(&self, root: &Path) -> Result<WalkIter<'_>, AccessError> {
        self.walk_calls.set(self.walk_calls.get() + 1);
        if self.is_denied_dir(root) {
            return Err(Self::denied(root));
        }

        let root = root.to_path_buf();
        let items: Vec<WalkEntry> = self
            .entries
            .iter()
            .filter(|(p, _)| p != &root && p.starts_with(&root))
            .filter(|(p, _)| !self.hidden_by_denied_ancestor(p, &root))
            .map(|(p, k)| match *k {
                Kind::Dir => WalkEntry::Dir { path: p.clone() },
                Kind::File(size) => WalkEntry::File {
                    path: p.clone(),
                    size,
                },
                Kind::Other => WalkEntry::Other { path: p.clone() },
                Kind::DeniedDir | Kind::DeniedFile | Kind::Unlisted => {
                    WalkEntry::Error(Self::denied(p))
                }
            })
            .collect();
        Ok(Box::new(items.into_iter()))
    }

    fn subdirectories(&self, root: &Path) -> Result<ChildDirs, AccessError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.is_denied_dir(root) {
            return Err(Self::denied(root));
        }
        Ok(self
            .entries
            .iter()
            .filter(|(p, _)| p.parent() == Some(root))
            .filter_map(|(p, k)| match k {
                Kind::Dir | Kind::DeniedDir => Some(Ok(p.clone())),
                Kind::Unlisted => Some(Err(Self::denied(p))),
                _ => None,
            })
            .collect())
    }
}
