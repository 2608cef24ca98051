//! Error types for fieldmerge

use thiserror::Error;

use crate::{Value, ValueList};

/// Reconciliation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    // Comparison errors
    #[error("Shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    #[error("{0} not found in diff")]
    FieldNotInDiff(String),

    #[error("Merge requires at least one target")]
    NoTargets,

    // Record errors
    #[error("Unknown field: {0}")]
    UnknownField(String),

    // Classifier errors
    #[error(
        "Unexpected category {0} is not one of [all, pk, fk, standard, assigned, unset, defaults, none]"
    )]
    InvalidCategory(String),

    // Resolution errors
    #[error("Unable to determine preferred result for {field}: {}", ValueList(.values))]
    Conflict { field: String, values: Vec<Value> },
}

impl ReconcileError {
    /// True for the domain error signalling that automatic merge is unsafe
    pub fn is_conflict(&self) -> bool {
        matches!(self, ReconcileError::Conflict { .. })
    }
}

/// Result type for fieldmerge operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
