//! Target side abstraction shared by change sets and merge sets

use fieldmerge_core::Value;

/// What a change holds on its target side: one value for a change set, one
/// value per target for a merge set
pub trait TargetSide: Clone + std::fmt::Debug + PartialEq {
    /// At least one non-null value
    fn has_value(&self) -> bool;

    /// Append the target values, in target order
    fn append_to(&self, values: &mut Vec<Value>);

    /// A resolution equal to this counts as taking the target
    fn matches(&self, resolution: &Value) -> bool;

    /// Target values that differ from the baseline disagree among themselves
    fn diverges_from(&self, baseline: &Value) -> bool;

    /// Value written when the target is taken as-is
    fn raw_resolution(&self, baseline: &Value) -> Value;
}

impl TargetSide for Value {
    fn has_value(&self) -> bool {
        !self.is_null()
    }

    fn append_to(&self, values: &mut Vec<Value>) {
        values.push(self.clone());
    }

    fn matches(&self, resolution: &Value) -> bool {
        self == resolution
    }

    fn diverges_from(&self, _baseline: &Value) -> bool {
        false
    }

    fn raw_resolution(&self, _baseline: &Value) -> Value {
        self.clone()
    }
}

/// One slot per target. The raw resolution is the first non-null slot that
/// changes the baseline, or the first non-null slot when none does.
impl TargetSide for Vec<Value> {
    fn has_value(&self) -> bool {
        self.iter().any(|v| !v.is_null())
    }

    fn append_to(&self, values: &mut Vec<Value>) {
        values.extend(self.iter().cloned());
    }

    fn matches(&self, resolution: &Value) -> bool {
        let mut present = self.iter().filter(|v| !v.is_null()).peekable();
        present.peek().is_some() && present.all(|v| v == resolution)
    }

    fn diverges_from(&self, baseline: &Value) -> bool {
        let mut changed = self.iter().filter(|v| !v.is_null() && *v != baseline);
        match changed.next() {
            Some(first) => changed.any(|v| v != first),
            None => false,
        }
    }

    fn raw_resolution(&self, baseline: &Value) -> Value {
        self.iter()
            .find(|v| !v.is_null() && *v != baseline)
            .or_else(|| self.iter().find(|v| !v.is_null()))
            .cloned()
            .unwrap_or_default()
    }
}
