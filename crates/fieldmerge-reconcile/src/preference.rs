//! Preference lattice and proposal labels

use std::fmt;

use fieldmerge_core::Value;

/// Which side of a differing field is preferred
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preference {
    /// Exempt from preference, e.g. an identity field surfaced on request
    NotApplicable,
    /// The values differ but neither is meaningful
    Neither,
    /// Keep the baseline value
    Left,
    /// Take the target value
    Right,
    /// Both sides hold a meaningful edit; needs resolution
    Both,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preference::NotApplicable => write!(f, "not-applicable"),
            Preference::Neither => write!(f, "neither"),
            Preference::Left => write!(f, "left"),
            Preference::Right => write!(f, "right"),
            Preference::Both => write!(f, "both"),
        }
    }
}

/// The target side of a change, as labelled by `resolve_preferences`
///
/// The original target value is always retained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Proposal<T> {
    /// Untouched target value; applying writes it
    Raw(T),
    /// Conflict settled to `resolution`, which may equal neither side
    Resolved { target: T, resolution: Value },
    /// Differs but deliberately not applied
    Unresolved(T),
}

impl<T> Proposal<T> {
    pub fn target(&self) -> &T {
        match self {
            Proposal::Raw(target)
            | Proposal::Resolved { target, .. }
            | Proposal::Unresolved(target) => target,
        }
    }

    pub fn into_target(self) -> T {
        match self {
            Proposal::Raw(target)
            | Proposal::Resolved { target, .. }
            | Proposal::Unresolved(target) => target,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Proposal::Raw(_))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Proposal::Resolved { .. })
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Proposal::Unresolved(_))
    }
}
