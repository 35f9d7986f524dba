//! Shared test utilities for the repo-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at three realism levels
//! - [`upstream`]: [`Upstream`] remote repository with a movable `main`

pub mod git;
pub mod upstream;

pub use upstream::Upstream;
