//! Record provider contract
//!
//! The reconciliation engine never looks inside a concrete record type. It
//! reads fields through [`Model`], classifies them through
//! [`Model::property_names`], and writes resolved values back through
//! [`Model::set_values`].

use crate::{classify, FieldKind, ReconcileResult, Toggle, Value};

/// Presence state of one field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Presence {
    /// A caller supplied the value. Never cleared once set.
    pub assigned: bool,
    /// The value is the field's default (never assigned, or assigned a value
    /// equal to the declared default)
    pub default: bool,
}

impl Presence {
    #[inline]
    pub fn is_unset(&self) -> bool {
        !self.assigned
    }
}

/// Read-only view of one field of a record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub name: &'a str,
    pub kind: FieldKind,
    pub value: &'a Value,
    pub presence: Presence,
}

impl FieldView<'_> {
    /// Explicitly assigned to a meaningful value: assigned, not the default
    /// and not null
    pub fn is_explicit(&self) -> bool {
        self.presence.assigned && !self.presence.default && !self.value.is_null()
    }
}

/// Record provider
pub trait Model {
    /// All fields in declaration order
    fn fields(&self) -> Vec<FieldView<'_>>;

    /// Current value of a declared field
    fn value_of(&self, field: &str) -> ReconcileResult<&Value>;

    /// Batch write. Either every name is declared and all values are written,
    /// or nothing is written.
    fn set_values(&mut self, values: Vec<(String, Value)>) -> ReconcileResult<()>;

    fn field_names(&self) -> Vec<&str> {
        self.fields().into_iter().map(|f| f.name).collect()
    }

    /// Names of the fields matching the toggles, in declaration order
    fn property_names(&self, toggles: &[Toggle]) -> Vec<String> {
        classify(&self.fields(), toggles)
    }
}
