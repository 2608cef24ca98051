//! Shared preference and resolution machinery
//!
//! [`Reconciler`] owns the differing fields of a baseline against one or more
//! targets and the presence verdicts captured at construction. Change sets and
//! merge sets wrap it with the records they were built from.

use std::collections::HashSet;

use fieldmerge_core::{FieldKind, ReconcileError, ReconcileResult, Value};
use tracing::{debug, trace};

use crate::{conflict, ConflictResolver, Preference, Proposal, Resolution, TargetSide};

/// One differing field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change<T> {
    field: String,
    kind: FieldKind,
    baseline: Value,
    proposal: Proposal<T>,
}

impl<T: TargetSide> Change<T> {
    pub(crate) fn new(field: String, kind: FieldKind, baseline: Value, target: T) -> Self {
        Change {
            field,
            kind,
            baseline,
            proposal: Proposal::Raw(target),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn baseline(&self) -> &Value {
        &self.baseline
    }

    pub fn proposal(&self) -> &Proposal<T> {
        &self.proposal
    }

    pub fn target(&self) -> &T {
        self.proposal.target()
    }

    /// Baseline value followed by every target value
    pub fn all_values(&self) -> Vec<Value> {
        let mut values = vec![self.baseline.clone()];
        self.target().append_to(&mut values);
        values
    }

    /// Value applying this change would write, if any
    pub fn resolution(&self) -> Option<Value> {
        match &self.proposal {
            Proposal::Raw(target) => Some(target.raw_resolution(&self.baseline)),
            Proposal::Resolved { resolution, .. } => Some(resolution.clone()),
            Proposal::Unresolved(_) => None,
        }
    }
}

/// What `resolve_preferences` does with one field
enum Outcome {
    Drop,
    Keep,
    Settle(Value),
    Defer,
}

#[derive(Clone, Debug)]
pub struct Reconciler<T> {
    changes: Vec<Change<T>>,
    assigned_in_baseline: HashSet<String>,
    assigned_in_target: HashSet<String>,
    resolved: bool,
}

impl<T: TargetSide> Reconciler<T> {
    pub(crate) fn new(
        changes: Vec<Change<T>>,
        assigned_in_baseline: HashSet<String>,
        assigned_in_target: HashSet<String>,
    ) -> Self {
        Reconciler {
            changes,
            assigned_in_baseline,
            assigned_in_target,
            resolved: false,
        }
    }

    pub fn change(&self, field: &str) -> ReconcileResult<&Change<T>> {
        self.changes
            .iter()
            .find(|c| c.field == field)
            .ok_or_else(|| ReconcileError::FieldNotInDiff(field.to_string()))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.changes.iter().any(|c| c.field == field)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.field.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change<T>> {
        self.changes.iter()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn assigned_in_baseline(&self, field: &str) -> bool {
        self.assigned_in_baseline.contains(field)
    }

    pub fn assigned_in_target(&self, field: &str) -> bool {
        self.assigned_in_target.contains(field)
    }

    /// Preference from presence alone:
    ///
    /// | target value | baseline assigned | target assigned | preference |
    /// |--------------|-------------------|-----------------|------------|
    /// | absent       | -                 | -               | Left       |
    /// | present      | yes               | yes             | Both       |
    /// | present      | yes               | no              | Left       |
    /// | present      | no                | yes             | Right      |
    /// | present      | no                | no              | Neither    |
    ///
    /// Identity fields are `NotApplicable`. A `Right` field whose targets
    /// change the baseline to different values is `Both`.
    fn computed_preference(&self, change: &Change<T>) -> Preference {
        if change.kind == FieldKind::Identity {
            return Preference::NotApplicable;
        }
        if !change.target().has_value() {
            return Preference::Left;
        }
        match (
            self.assigned_in_baseline(&change.field),
            self.assigned_in_target(&change.field),
        ) {
            (true, true) => Preference::Both,
            (true, false) => Preference::Left,
            (false, true) if change.target().diverges_from(&change.baseline) => Preference::Both,
            (false, true) => Preference::Right,
            (false, false) => Preference::Neither,
        }
    }

    pub fn get_preferred<R>(&self, field: &str, resolver: &R) -> ReconcileResult<Preference>
    where
        R: ConflictResolver + ?Sized,
    {
        let change = self.change(field)?;
        let computed = self.computed_preference(change);
        Ok(resolver.prefer(field, computed, &change.all_values()))
    }

    /// Invoke the resolver for a field, reporting a resolution equal to the
    /// baseline as `Left` and one equal to the target as `Right`
    pub fn resolve_conflict<R>(&self, field: &str, resolver: &R) -> ReconcileResult<Resolution>
    where
        R: ConflictResolver + ?Sized,
    {
        let change = self.change(field)?;
        Self::settle(change, &change.all_values(), resolver)
    }

    fn settle<R>(change: &Change<T>, values: &[Value], resolver: &R) -> ReconcileResult<Resolution>
    where
        R: ConflictResolver + ?Sized,
    {
        match resolver.resolve_conflict(&change.field, values)? {
            Resolution::Value(value) if value == change.baseline => {
                Ok(Resolution::Prefer(Preference::Left))
            }
            Resolution::Value(value) if change.target().matches(&value) => {
                Ok(Resolution::Prefer(Preference::Right))
            }
            other => Ok(other),
        }
    }

    fn outcome<R>(&self, change: &Change<T>, resolver: &R) -> ReconcileResult<Outcome>
    where
        R: ConflictResolver + ?Sized,
    {
        let values = change.all_values();
        let computed = self.computed_preference(change);
        let preferred = resolver.prefer(&change.field, computed, &values);
        trace!(field = %change.field, %computed, %preferred, "classified field");

        let resolution = match preferred {
            Preference::Both => Self::settle(change, &values, resolver)?,
            other => Resolution::Prefer(other),
        };

        match resolution {
            Resolution::Prefer(Preference::Left) => Ok(Outcome::Drop),
            Resolution::Prefer(Preference::Right) => Ok(Outcome::Keep),
            Resolution::Prefer(Preference::Neither | Preference::NotApplicable) => {
                Ok(Outcome::Defer)
            }
            Resolution::Prefer(Preference::Both) => Err(conflict(&change.field, &values)),
            Resolution::Value(value) => Ok(Outcome::Settle(value)),
        }
    }

    /// Classify every field, then relabel the set in one step
    ///
    /// Nothing is modified if any field fails to resolve. Once a pass has
    /// succeeded, later passes change nothing and never consult the resolver.
    pub fn resolve_preferences<R>(&mut self, resolver: &R) -> ReconcileResult<()>
    where
        R: ConflictResolver + ?Sized,
    {
        if self.resolved {
            trace!("preferences already resolved");
            return Ok(());
        }

        let outcomes = self
            .changes
            .iter()
            .map(|change| self.outcome(change, resolver))
            .collect::<ReconcileResult<Vec<_>>>()?;

        let (mut dropped, mut settled, mut deferred) = (0usize, 0usize, 0usize);
        let changes = std::mem::take(&mut self.changes);
        self.changes = changes
            .into_iter()
            .zip(outcomes)
            .filter_map(|(mut change, outcome)| {
                match outcome {
                    Outcome::Drop => {
                        dropped += 1;
                        return None;
                    }
                    Outcome::Keep => {}
                    Outcome::Settle(resolution) => {
                        settled += 1;
                        change.proposal = Proposal::Resolved {
                            target: change.proposal.into_target(),
                            resolution,
                        };
                    }
                    Outcome::Defer => {
                        deferred += 1;
                        change.proposal = Proposal::Unresolved(change.proposal.into_target());
                    }
                }
                Some(change)
            })
            .collect();

        self.resolved = true;
        debug!(
            kept = self.changes.len(),
            dropped, settled, deferred, "resolved preferences"
        );
        Ok(())
    }

    /// Field/value pairs an apply writes; unresolved fields are skipped
    pub fn resolutions(&self) -> Vec<(String, Value)> {
        self.changes
            .iter()
            .filter_map(|c| c.resolution().map(|v| (c.field.clone(), v)))
            .collect()
    }
}
