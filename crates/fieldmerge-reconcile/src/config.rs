//! Change set configuration

/// Options shared by change sets and merge sets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Track identity fields. They are classified `NotApplicable` and never
    /// written by a resolved apply; changing identity is a rename.
    pub include_identity: bool,
}

impl ReconcileConfig {
    pub fn with_identity() -> Self {
        ReconcileConfig {
            include_identity: true,
        }
    }
}
