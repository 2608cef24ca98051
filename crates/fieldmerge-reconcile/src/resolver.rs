//! Pluggable conflict resolution
//!
//! A resolver is consulted for fields in `Both` contention. It receives the
//! field name and every value involved, baseline first, followed by one value
//! per target. The safe default is [`Strategy::Fail`], which raises
//! `ReconcileError::Conflict`.

use std::collections::HashMap;
use std::fmt;

use fieldmerge_core::{ReconcileError, ReconcileResult, Value};

use crate::Preference;

/// Outcome of a conflict resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Pick a side (or declare the field not applicable)
    Prefer(Preference),
    /// The final value, which may be neither of the originals
    Value(Value),
}

impl From<Preference> for Resolution {
    fn from(p: Preference) -> Self {
        Resolution::Prefer(p)
    }
}

impl From<Value> for Resolution {
    fn from(v: Value) -> Self {
        Resolution::Value(v)
    }
}

/// Conflict resolution policy
pub trait ConflictResolver {
    /// Settle a `Both` conflict
    fn resolve_conflict(&self, field: &str, values: &[Value]) -> ReconcileResult<Resolution>;

    /// Override the computed preference for a field
    fn prefer(&self, _field: &str, computed: Preference, _values: &[Value]) -> Preference {
        computed
    }
}

/// Raise the conflict error for a field
pub fn conflict(field: &str, values: &[Value]) -> ReconcileError {
    ReconcileError::Conflict {
        field: field.to_string(),
        values: values.to_vec(),
    }
}

/// Resolver backed by a closure over `(field, values)`
pub struct FnResolver<F>(F);

/// Wrap a closure as a [`ConflictResolver`]
pub fn resolve_with<F>(f: F) -> FnResolver<F>
where
    F: Fn(&str, &[Value]) -> ReconcileResult<Resolution>,
{
    FnResolver(f)
}

impl<F> ConflictResolver for FnResolver<F>
where
    F: Fn(&str, &[Value]) -> ReconcileResult<Resolution>,
{
    fn resolve_conflict(&self, field: &str, values: &[Value]) -> ReconcileResult<Resolution> {
        (self.0)(field, values)
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnResolver")
    }
}

pub type ResolveFn = Box<dyn Fn(&[Value]) -> ReconcileResult<Resolution> + Send + Sync>;

/// Per-field resolution strategy
#[derive(Default)]
pub enum Strategy {
    /// Raise `Conflict`
    #[default]
    Fail,
    /// Always pick this preference
    Prefer(Preference),
    /// Always resolve to this value
    Literal(Value),
    /// Compute from the value list
    Custom(ResolveFn),
}

impl Strategy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> ReconcileResult<Resolution> + Send + Sync + 'static,
    {
        Strategy::Custom(Box::new(f))
    }

    /// Largest non-null value
    pub fn max() -> Self {
        Strategy::custom(|values| {
            let max = values.iter().filter(|v| !v.is_null()).max();
            Ok(Resolution::Value(max.cloned().unwrap_or_default()))
        })
    }

    /// Smallest non-null value
    pub fn min() -> Self {
        Strategy::custom(|values| {
            let min = values.iter().filter(|v| !v.is_null()).min();
            Ok(Resolution::Value(min.cloned().unwrap_or_default()))
        })
    }

    /// Concatenate non-null values in value order
    pub fn join(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        Strategy::custom(move |values| {
            let parts: Vec<String> = values
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| match v.as_text() {
                    Some(text) => text.to_string(),
                    None => v.to_string(),
                })
                .collect();
            Ok(Resolution::Value(Value::Text(parts.join(&separator))))
        })
    }

    pub fn resolve(&self, field: &str, values: &[Value]) -> ReconcileResult<Resolution> {
        match self {
            Strategy::Fail => Err(conflict(field, values)),
            Strategy::Prefer(preference) => Ok(Resolution::Prefer(*preference)),
            Strategy::Literal(value) => Ok(Resolution::Value(value.clone())),
            Strategy::Custom(f) => f(values),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Fail => write!(f, "Fail"),
            Strategy::Prefer(p) => write!(f, "Prefer({:?})", p),
            Strategy::Literal(v) => write!(f, "Literal({:?})", v),
            Strategy::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Declarative resolver: a strategy per field plus a fallback
#[derive(Debug, Default)]
pub struct ResolverTable {
    strategies: HashMap<String, Strategy>,
    fallback: Strategy,
}

impl ResolverTable {
    pub fn new() -> Self {
        ResolverTable::default()
    }

    pub fn field(mut self, name: impl Into<String>, strategy: Strategy) -> Self {
        self.strategies.insert(name.into(), strategy);
        self
    }

    /// Strategy for fields without their own entry
    pub fn fallback(mut self, strategy: Strategy) -> Self {
        self.fallback = strategy;
        self
    }

    pub fn strategy_for(&self, field: &str) -> &Strategy {
        self.strategies.get(field).unwrap_or(&self.fallback)
    }
}

impl ConflictResolver for ResolverTable {
    fn resolve_conflict(&self, field: &str, values: &[Value]) -> ReconcileResult<Resolution> {
        self.strategy_for(field).resolve(field, values)
    }
}
