//! N-way merge sets
//!
//! A [`MergeSet`] compares one baseline against several targets. A field is
//! tracked if any target differs from the baseline on it, and then carries
//! one slot per target holding that target's value (equal to the baseline's
//! for targets that did not change it). Presence verdicts on the target side
//! are the union over all targets.
//!
//! Resolvers see the baseline value followed by every slot, so they must
//! accept a value list of any length.

use std::collections::{HashMap, HashSet};

use fieldmerge_core::{FieldKind, Model, ReconcileError, ReconcileResult, Value};
use tracing::debug;

use crate::changeset::assigned_names;
use crate::diff::compare;
use crate::reconciler::{Change, Reconciler};
use crate::{ConflictResolver, Preference, Proposal, ReconcileConfig, Resolution, ResolverTable};

/// Baseline-to-many merge set
pub struct MergeSet<'a, M: Model + ?Sized, R: ConflictResolver = ResolverTable> {
    baseline: &'a mut M,
    resolver: R,
    targets_len: usize,
    inner: Reconciler<Vec<Value>>,
}

impl<'a, M: Model + ?Sized> MergeSet<'a, M, ResolverTable> {
    /// Merge set that raises `Conflict` for every `Both` field
    pub fn new(baseline: &'a mut M, targets: &[&M]) -> ReconcileResult<Self> {
        Self::with_config(baseline, targets, ReconcileConfig::default(), ResolverTable::default())
    }
}

impl<'a, M: Model + ?Sized, R: ConflictResolver> MergeSet<'a, M, R> {
    pub fn with_resolver(
        baseline: &'a mut M,
        targets: &[&M],
        resolver: R,
    ) -> ReconcileResult<Self> {
        Self::with_config(baseline, targets, ReconcileConfig::default(), resolver)
    }

    pub fn with_config(
        baseline: &'a mut M,
        targets: &[&M],
        config: ReconcileConfig,
        resolver: R,
    ) -> ReconcileResult<Self> {
        if targets.is_empty() {
            return Err(ReconcileError::NoTargets);
        }

        let mut differing: HashMap<String, FieldKind> = HashMap::new();
        let mut assigned_in_target = HashSet::new();
        for target in targets {
            for entry in compare(&*baseline, *target, config.include_identity)? {
                differing.insert(entry.field, entry.kind);
            }
            assigned_in_target.extend(assigned_names(*target));
        }

        let mut changes = Vec::with_capacity(differing.len());
        for field in baseline.field_names() {
            let Some(kind) = differing.get(field) else {
                continue;
            };
            let slots = targets
                .iter()
                .map(|t| t.value_of(field).cloned())
                .collect::<ReconcileResult<Vec<_>>>()?;
            let current = baseline.value_of(field)?.clone();
            changes.push(Change::new(field.to_string(), *kind, current, slots));
        }
        debug!(fields = changes.len(), targets = targets.len(), "built merge set");

        let inner = Reconciler::new(changes, assigned_names(&*baseline), assigned_in_target);
        Ok(MergeSet {
            baseline,
            resolver,
            targets_len: targets.len(),
            inner,
        })
    }

    pub fn baseline(&self) -> &M {
        &*self.baseline
    }

    pub fn targets_len(&self) -> usize {
        self.targets_len
    }

    pub fn contains(&self, field: &str) -> bool {
        self.inner.contains(field)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.inner.fields()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change<Vec<Value>>> {
        self.inner.iter()
    }

    pub fn get_baseline(&self, field: &str) -> ReconcileResult<&Value> {
        self.inner.change(field).map(Change::baseline)
    }

    /// One value per target, in target order
    pub fn get_targets(&self, field: &str) -> ReconcileResult<&[Value]> {
        self.inner.change(field).map(|c| c.target().as_slice())
    }

    pub fn proposal(&self, field: &str) -> ReconcileResult<&Proposal<Vec<Value>>> {
        self.inner.change(field).map(Change::proposal)
    }

    /// True if any target slot is non-null
    pub fn has_target_value(&self, field: &str) -> ReconcileResult<bool> {
        Ok(self.get_targets(field)?.iter().any(|v| !v.is_null()))
    }

    /// Baseline value followed by every target slot
    pub fn all_values(&self, field: &str) -> ReconcileResult<Vec<Value>> {
        self.inner.change(field).map(Change::all_values)
    }

    /// The value `apply()` would write. Untouched fields take the first
    /// non-null target slot that changes the baseline.
    pub fn get_resolution(&self, field: &str) -> ReconcileResult<Option<Value>> {
        self.inner.change(field).map(Change::resolution)
    }

    pub fn get_preferred(&self, field: &str) -> ReconcileResult<Preference> {
        self.inner.get_preferred(field, &self.resolver)
    }

    pub fn resolve_conflict(&self, field: &str) -> ReconcileResult<Resolution> {
        self.inner.resolve_conflict(field, &self.resolver)
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.is_resolved()
    }

    pub fn resolve_preferences(&mut self) -> ReconcileResult<&mut Self> {
        self.inner.resolve_preferences(&self.resolver)?;
        Ok(self)
    }

    pub fn apply(&mut self) -> ReconcileResult<&mut M> {
        if !self.inner.is_resolved() {
            debug!("applying unresolved merge set, first target values win");
        }
        let values = self.inner.resolutions();
        debug!(fields = values.len(), "applying merge set");
        self.baseline.set_values(values)?;
        Ok(&mut *self.baseline)
    }
}
