//! Directional change sets
//!
//! A [`ChangeSet`] is a diff from a baseline (left) to a target (right) that
//! also knows which fields were explicitly assigned on each side when it was
//! built. Identity fields are excluded unless configured otherwise.
//!
//! ```text
//! ChangeSet::new(&mut baseline, &target)?
//!     .resolve_preferences()?   // drop Left, settle Both, defer Neither
//!     .apply()?;                // write the survivors onto baseline
//! ```
//!
//! `apply()` without `resolve_preferences()` writes every raw target value:
//! an unmediated merge in which the target always wins.

use std::collections::HashSet;

use fieldmerge_core::{Category, Model, ReconcileResult, Toggle, Value};
use tracing::debug;

use crate::diff::compare;
use crate::reconciler::{Change, Reconciler};
use crate::{ConflictResolver, Preference, Proposal, ReconcileConfig, Resolution, ResolverTable};

pub(crate) fn assigned_names<M: Model + ?Sized>(model: &M) -> HashSet<String> {
    model
        .property_names(&[Toggle::include(Category::Assigned)])
        .into_iter()
        .collect()
}

/// Baseline-to-target change set
pub struct ChangeSet<'a, M: Model + ?Sized, R: ConflictResolver = ResolverTable> {
    baseline: &'a mut M,
    resolver: R,
    inner: Reconciler<Value>,
}

impl<'a, M: Model + ?Sized> ChangeSet<'a, M, ResolverTable> {
    /// Change set that raises `Conflict` for every `Both` field
    pub fn new(baseline: &'a mut M, target: &M) -> ReconcileResult<Self> {
        Self::with_config(baseline, target, ReconcileConfig::default(), ResolverTable::default())
    }
}

impl<'a, M: Model + ?Sized, R: ConflictResolver> ChangeSet<'a, M, R> {
    pub fn with_resolver(baseline: &'a mut M, target: &M, resolver: R) -> ReconcileResult<Self> {
        Self::with_config(baseline, target, ReconcileConfig::default(), resolver)
    }

    pub fn with_config(
        baseline: &'a mut M,
        target: &M,
        config: ReconcileConfig,
        resolver: R,
    ) -> ReconcileResult<Self> {
        let changes = compare(&*baseline, target, config.include_identity)?
            .into_iter()
            .map(|entry| Change::new(entry.field, entry.kind, entry.left, entry.right))
            .collect::<Vec<_>>();
        debug!(fields = changes.len(), "built change set");

        let inner = Reconciler::new(changes, assigned_names(&*baseline), assigned_names(target));
        Ok(ChangeSet {
            baseline,
            resolver,
            inner,
        })
    }

    pub fn baseline(&self) -> &M {
        &*self.baseline
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn contains(&self, field: &str) -> bool {
        self.inner.contains(field)
    }

    /// Tracked field names in declaration order
    pub fn fields(&self) -> Vec<&str> {
        self.inner.fields()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change<Value>> {
        self.inner.iter()
    }

    pub fn get_left(&self, field: &str) -> ReconcileResult<&Value> {
        self.inner.change(field).map(Change::baseline)
    }

    /// Raw target value, whatever label the field carries
    pub fn get_right(&self, field: &str) -> ReconcileResult<&Value> {
        self.inner.change(field).map(Change::target)
    }

    pub fn get_baseline(&self, field: &str) -> ReconcileResult<&Value> {
        self.get_left(field)
    }

    pub fn get_target(&self, field: &str) -> ReconcileResult<&Value> {
        self.get_right(field)
    }

    pub fn proposal(&self, field: &str) -> ReconcileResult<&Proposal<Value>> {
        self.inner.change(field).map(Change::proposal)
    }

    pub fn has_target_value(&self, field: &str) -> ReconcileResult<bool> {
        Ok(!self.get_target(field)?.is_null())
    }

    /// `[baseline, target]`
    pub fn all_values(&self, field: &str) -> ReconcileResult<Vec<Value>> {
        self.inner.change(field).map(Change::all_values)
    }

    /// The value `apply()` would write for the field; `None` when the field
    /// is unresolved and stays at its baseline value
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

    /// Drop fields where the baseline is preferred, settle conflicts and
    /// mark fields that differ without a meaningful side as unresolved
    pub fn resolve_preferences(&mut self) -> ReconcileResult<&mut Self> {
        self.inner.resolve_preferences(&self.resolver)?;
        Ok(self)
    }

    /// Write every remaining resolution onto the baseline in one batch
    pub fn apply(&mut self) -> ReconcileResult<&mut M> {
        if !self.inner.is_resolved() {
            debug!("applying unresolved change set, target values win");
        }
        let values = self.inner.resolutions();
        debug!(fields = values.len(), "applying change set");
        self.baseline.set_values(values)?;
        Ok(&mut *self.baseline)
    }
}
