//! Field declarations
//!
//! A [`Schema`] is the ordered list of fields a record declares. Two records
//! have the same shape when their schemas declare the same field names.

use std::sync::Arc;

use crate::Value;

/// Structural kind of a field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    /// Part of the record's unique key
    Identity,
    /// Points at another record's identity
    Reference,
    /// Everything else
    #[default]
    Standard,
}

/// Declaration of a single field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Declared default. `None` means the field has no default and reads as
    /// `Value::Null` until assigned.
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn identity(name: impl Into<String>) -> Self {
        FieldSpec::new(name, FieldKind::Identity)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        FieldSpec::new(name, FieldKind::Reference)
    }

    pub fn standard(name: impl Into<String>) -> Self {
        FieldSpec::new(name, FieldKind::Standard)
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Value the field holds before any assignment
    pub fn initial_value(&self) -> Value {
        self.default.clone().unwrap_or_default()
    }
}

/// Ordered field declarations of one record type
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn names_of(&self, kind: FieldKind) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`Schema`]
///
/// Declaring a name twice replaces the earlier declaration in place.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn identity(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::identity(name))
    }

    pub fn reference(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::reference(name))
    }

    pub fn standard(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::standard(name))
    }

    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}
