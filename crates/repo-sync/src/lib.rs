//! Working-copy synchronization for Repository Sync
//!
//! Reconciles a local directory with a ref of a remote git repository:
//! clone when the directory is absent, fetch and align when it already
//! holds a repository. All git work goes through the [`GitExecutor`] seam.

pub mod error;
pub mod exec;
pub mod head;
pub mod location;
pub mod request;
pub mod syncer;

pub use error::{Error, ExitInfo, Result};
pub use exec::{GitCli, GitExecutor};
pub use head::HeadKind;
pub use location::{LocationState, SyncAction};
pub use request::SyncRequest;
pub use syncer::RepoSyncer;
