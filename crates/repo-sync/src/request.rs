//! Input to a single synchronization attempt

use std::path::{Path, PathBuf};

/// Pin `location` to `reference` of the repository at `repository_url`.
///
/// `reference` may name a branch or a commit; which one it is only becomes
/// known after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub location: PathBuf,
    pub repository_url: String,
    pub reference: String,
}

impl SyncRequest {
    pub fn new(
        location: impl Into<PathBuf>,
        repository_url: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            repository_url: repository_url.into(),
            reference: reference.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Remote-tracking name of the ref once `origin` has been fetched.
    pub fn remote_ref(&self) -> String {
        format!("origin/{}", self.reference)
    }
}
