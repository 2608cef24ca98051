//! fieldmerge Reconcile - Field-level diff and merge
//!
//! This crate implements the reconciliation engine:
//! - Field-by-field diff (`ModelDiff`)
//! - Directional change sets with presence-aware preferences (`ChangeSet`)
//! - Pluggable conflict resolution (`ConflictResolver`, `ResolverTable`)
//! - N-way merge sets (`MergeSet`)
//!
//! Preferences form a closed lattice (`Preference`). Only `Both` fields reach
//! the resolver, and the default resolver fails with `Conflict`.

pub mod config;
pub mod diff;
pub mod preference;
pub mod target;
pub mod resolver;
mod reconciler;
pub mod changeset;
pub mod mergeset;

pub use config::*;
pub use diff::*;
pub use preference::*;
pub use target::*;
pub use resolver::*;
pub use reconciler::Change;
pub use changeset::*;
pub use mergeset::*;
