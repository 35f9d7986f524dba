//! Branch vs. detached checkout detection from the `HEAD` marker

use std::path::Path;

use crate::Result;
use crate::location::GIT_DIR;

/// Marker file naming what the working copy has checked out.
pub const HEAD_FILE: &str = "HEAD";

/// Prefix of a symbolic ref in the `HEAD` marker.
pub const SYMBOLIC_REF_PREFIX: &[u8] = b"ref: ";

/// What `HEAD` points at after a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadKind {
    /// `HEAD` is a symbolic ref to a local branch
    Branch,

    /// `HEAD` holds a commit id directly
    Detached,
}

impl HeadKind {
    pub fn from_contents(contents: &[u8]) -> Self {
        if contents.starts_with(SYMBOLIC_REF_PREFIX) {
            Self::Branch
        } else {
            Self::Detached
        }
    }

    /// Read `<location>/.git/HEAD`. Read failures propagate as raw I/O errors.
    pub fn read(location: &Path) -> Result<Self> {
        let contents = std::fs::read(location.join(GIT_DIR).join(HEAD_FILE))?;
        Ok(Self::from_contents(&contents))
    }
}
