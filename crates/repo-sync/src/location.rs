//! Classification of a sync target on disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Name of the git metadata directory inside a working copy.
pub const GIT_DIR: &str = ".git";

/// State of a sync target, computed fresh for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationState {
    /// Nothing exists at the location
    Absent,

    /// Something other than a directory exists at the location
    ExistsNotDirectory,

    /// A directory without `.git`
    ExistsDirectoryNotRepo,

    /// A directory containing a `.git` directory
    ExistsValidRepo,
}

/// What the syncer should do with a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Location is absent and its parent is a directory
    Clone,

    /// Location already holds a repository
    Sync,
}

impl LocationState {
    /// Inspect `location`.
    ///
    /// Fails with [`Error::PathIsNotADirectory`] when `.git` exists but is not
    /// a directory. Stat errors other than "not found" propagate unchanged.
    pub fn inspect(location: &Path) -> Result<Self> {
        let Some(metadata) = stat(location)? else {
            return Ok(Self::Absent);
        };
        if !metadata.is_dir() {
            return Ok(Self::ExistsNotDirectory);
        }

        let git_dir = location.join(GIT_DIR);
        match stat(&git_dir)? {
            None => Ok(Self::ExistsDirectoryNotRepo),
            Some(meta) if meta.is_dir() => Ok(Self::ExistsValidRepo),
            Some(_) => Err(Error::not_a_directory(git_dir)),
        }
    }
}

/// Decide between cloning and syncing `location`, or explain why neither
/// is possible.
pub fn plan(location: &Path) -> Result<SyncAction> {
    match LocationState::inspect(location)? {
        LocationState::ExistsValidRepo => Ok(SyncAction::Sync),
        LocationState::ExistsNotDirectory => Err(Error::not_a_directory(location)),
        LocationState::ExistsDirectoryNotRepo => Err(Error::not_a_repository(location)),
        LocationState::Absent => {
            let parent = parent_dir(location);
            // A missing parent is reported as the raw stat error.
            let metadata = fs::metadata(&parent)?;
            if !metadata.is_dir() {
                return Err(Error::not_a_directory(parent));
            }
            Ok(SyncAction::Clone)
        }
    }
}

/// Parent directory of `location`; `.` for a bare relative name.
pub fn parent_dir(location: &Path) -> PathBuf {
    match location.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => location.to_path_buf(),
    }
}

/// `None` when nothing exists at `path`. A path running through a regular
/// file (`ENOTDIR`) does not exist either.
fn stat(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
