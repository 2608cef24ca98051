//! Field-by-field comparison of two records
//!
//! [`ModelDiff`] is the primitive the directional sets build on: it holds
//! exactly the fields whose values differ, in declaration order, each with
//! its left and right value.

use fieldmerge_core::{FieldKind, FieldView, Model, ReconcileError, ReconcileResult, Value};

/// Diff options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    /// Compare identity fields too
    pub include_identity: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            include_identity: true,
        }
    }
}

impl DiffOptions {
    pub fn without_identity() -> Self {
        DiffOptions {
            include_identity: false,
        }
    }
}

/// One differing field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffEntry {
    pub field: String,
    pub kind: FieldKind,
    pub left: Value,
    pub right: Value,
}

/// Compare two records of the same shape
///
/// Both records must declare the same field names in the same order, which
/// gives forward and backward diffs one field order. Fails with
/// `ShapeMismatch` otherwise.
pub fn compare<L, R>(
    left: &L,
    right: &R,
    include_identity: bool,
) -> ReconcileResult<Vec<DiffEntry>>
where
    L: Model + ?Sized,
    R: Model + ?Sized,
{
    let left_fields = left.fields();
    let right_fields = right.fields();
    check_shape(&left_fields, &right_fields)?;

    let entries = left_fields
        .iter()
        .zip(&right_fields)
        .filter(|(l, _)| include_identity || l.kind != FieldKind::Identity)
        .filter(|(l, r)| l.value != r.value)
        .map(|(l, r)| DiffEntry {
            field: l.name.to_string(),
            kind: l.kind,
            left: l.value.clone(),
            right: r.value.clone(),
        })
        .collect();

    Ok(entries)
}

fn check_shape(left: &[FieldView<'_>], right: &[FieldView<'_>]) -> ReconcileResult<()> {
    let same_shape =
        left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.name == r.name);
    if !same_shape {
        return Err(ReconcileError::ShapeMismatch {
            left: left.iter().map(|f| f.name.to_string()).collect(),
            right: right.iter().map(|f| f.name.to_string()).collect(),
        });
    }
    Ok(())
}

/// The differing fields of two records
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelDiff {
    entries: Vec<DiffEntry>,
}

impl ModelDiff {
    /// Diff including identity fields
    pub fn new<L, R>(left: &L, right: &R) -> ReconcileResult<Self>
    where
        L: Model + ?Sized,
        R: Model + ?Sized,
    {
        Self::with_options(left, right, DiffOptions::default())
    }

    pub fn with_options<L, R>(left: &L, right: &R, options: DiffOptions) -> ReconcileResult<Self>
    where
        L: Model + ?Sized,
        R: Model + ?Sized,
    {
        Ok(ModelDiff {
            entries: compare(left, right, options.include_identity)?,
        })
    }

    fn entry(&self, field: &str) -> ReconcileResult<&DiffEntry> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .ok_or_else(|| ReconcileError::FieldNotInDiff(field.to_string()))
    }

    pub fn get_left(&self, field: &str) -> ReconcileResult<&Value> {
        self.entry(field).map(|e| &e.left)
    }

    pub fn get_right(&self, field: &str) -> ReconcileResult<&Value> {
        self.entry(field).map(|e| &e.right)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|e| e.field == field)
    }

    /// Differing field names in declaration order
    pub fn fields(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter()
    }
}
