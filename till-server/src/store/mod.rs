//! Store layer
//!
//! The hosted relational store is the source of truth; the till talks
//! to it through the [`DataSource`] trait so the rest of the crate never
//! knows whether it is running against the real remote store or the
//! seeded local fallback. [`SnapshotCache`] persists the last known
//! working set so a relaunch never starts from a blank till.

pub mod cache;
pub mod local;
pub mod remote;
pub mod source;

pub use cache::{CacheError, SnapshotCache};
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use source::{DataSource, SourceKind, StoreChange, StoreError, StoreResult, TableProbe};
