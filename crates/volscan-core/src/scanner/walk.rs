//! Filesystem traversal primitive.
//!
//! [`TreeWalker`] is the seam between the size accounting and the real
//! filesystem: it yields a lazy, depth-first sequence of [`WalkEntry`]
//! values where unreadable entries are ordinary items rather than a reason
//! to stop. [`JwalkWalker`] is the production implementation.
use crate::error::AccessError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One item of a directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A regular file and its logical size.
    File { path: PathBuf, size: u64 },
    /// A directory. Its contents follow as separate entries.
    Dir { path: PathBuf },
    /// Anything else: symlinks, sockets, devices.
    Other { path: PathBuf },
    /// An entry that could not be read. The walk carries on after it.
    Error(AccessError),
}

/// Lazy iterator over the descendants of a walk root.
pub type WalkIter<'a> = Box<dyn Iterator<Item = WalkEntry> + 'a>;

/// Immediate children of a root that are directories. A child whose type
/// could not be read is an `Err` in its enumeration slot.
pub type ChildDirs = Vec<Result<PathBuf, AccessError>>;

/// Read-only view of a directory tree.
pub trait TreeWalker {
    /// Walk every descendant of `root` (the root itself is not yielded).
    ///
    /// Returns `Err` only when `root` cannot be opened at all.
    fn walk(&self, root: &Path) -> Result<WalkIter<'_>, AccessError>;

    /// Immediate child directories of `root`, in enumeration order.
    /// Symbolic links are not followed.
    ///
    /// Returns `Err` only when `root` cannot be listed at all.
    fn subdirectories(&self, root: &Path) -> Result<ChildDirs, AccessError>;
}

/// `jwalk`-backed walker.
///
/// Runs serially and sorts siblings by file name, so two scans of an
/// unchanged tree visit entries in the same order. On Unix the walk stays
/// on the filesystem `root` lives on: mount points below it are neither
/// listed nor descended, since each is reported as a volume of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct JwalkWalker;

impl JwalkWalker {
    pub fn new() -> Self {
        Self
    }
}

impl TreeWalker for JwalkWalker {
    fn walk(&self, root: &Path) -> Result<WalkIter<'_>, AccessError> {
        // jwalk reports an unreadable root as its first item; probing here lets
        // callers tell "root missing" apart from "one bad child".
        fs::read_dir(root).map_err(|err| AccessError::from_io(root, &err))?;
        let root_dev = device_of(root);

        let root_path = root.to_path_buf();
        let walker = jwalk::WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(jwalk::Parallelism::Serial)
            .process_read_dir(move |_depth, _parent, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) if entry.file_type().is_dir() => {
                        same_device(root_dev, &entry.path())
                    }
                    _ => true,
                });
            });

        let entries = walker.into_iter().filter_map(move |entry_result| {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    // jwalk errors are typically access-denied on directories.
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root_path.clone());
                    return Some(WalkEntry::Error(AccessError::new(path, err.to_string())));
                }
            };

            if entry.depth == 0 {
                return None;
            }

            let path = entry.path();
            let file_type = entry.file_type();
            if file_type.is_dir() {
                if let Some(err) = &entry.read_children_error {
                    return Some(WalkEntry::Error(AccessError::new(path, err.to_string())));
                }
                Some(WalkEntry::Dir { path })
            } else if file_type.is_file() {
                // Stat outside jwalk so a file vanishing mid-scan is an entry error.
                match fs::symlink_metadata(&path) {
                    // A file bind-mounted from another filesystem.
                    Ok(meta) if !dev_matches(root_dev, &meta) => Some(WalkEntry::Other { path }),
                    Ok(meta) => Some(WalkEntry::File {
                        size: meta.len(),
                        path,
                    }),
                    Err(err) => Some(WalkEntry::Error(AccessError::from_io(path, &err))),
                }
            } else {
                Some(WalkEntry::Other { path })
            }
        });

        Ok(Box::new(entries))
    }

    fn subdirectories(&self, root: &Path) -> Result<ChildDirs, AccessError> {
        let read_dir = fs::read_dir(root).map_err(|err| AccessError::from_io(root, &err))?;
        let root_dev = device_of(root);

        let mut dirs = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    dirs.push(Err(AccessError::from_io(root, &err)));
                    continue;
                }
            };
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => {
                    if same_device(root_dev, &path) {
                        dirs.push(Ok(path));
                    } else {
                        debug!("Not crossing into mount point {}", path.display());
                    }
                }
                Ok(_) => {}
                Err(err) => dirs.push(Err(AccessError::from_io(path, &err))),
            }
        }
        dirs.sort_by(|a, b| listed_path(a).cmp(listed_path(b)));
        Ok(dirs)
    }
}

fn listed_path(child: &Result<PathBuf, AccessError>) -> &Path {
    match child {
        Ok(path) => path,
        Err(err) => &err.path,
    }
}

/// Device id of the filesystem holding `path`, if the platform has one.
#[cfg(unix)]
fn device_of(path: &Path) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path).ok().map(|meta| meta.dev())
}

#[cfg(not(unix))]
fn device_of(_path: &Path) -> Option<u64> {
    None
}

#[cfg(unix)]
fn dev_matches(root_dev: Option<u64>, meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    root_dev.map_or(true, |dev| meta.dev() == dev)
}

#[cfg(not(unix))]
fn dev_matches(_root_dev: Option<u64>, _meta: &fs::Metadata) -> bool {
    true
}

/// Whether `path` (not followed if a link) sits on the `root_dev`
/// filesystem. Entries that cannot be stat'ed are kept so the walk can
/// report them.
fn same_device(root_dev: Option<u64>, path: &Path) -> bool {
    if root_dev.is_none() {
        return true;
    }
    fs::symlink_metadata(path).map_or(true, |meta| dev_matches(root_dev, &meta))
}
