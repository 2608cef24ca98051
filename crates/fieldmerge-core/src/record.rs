//! Records with per-field presence
//!
//! Every field slot carries its value and an `assigned` flag. The flag is set
//! when a caller supplies a value and is never cleared, so presence
//! classification does not depend on how the value compares to anything.

use std::fmt;
use std::sync::Arc;

use crate::{FieldKind, FieldView, Model, Presence, ReconcileError, ReconcileResult, Schema, Value};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Slot {
    value: Value,
    assigned: bool,
}

/// A record of some [`Schema`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    schema: Arc<Schema>,
    slots: Vec<Slot>,
}

impl Record {
    /// Create a record with every field at its initial value
    pub fn new(schema: Arc<Schema>) -> Self {
        let slots = schema
            .fields()
            .iter()
            .map(|spec| Slot {
                value: spec.initial_value(),
                assigned: false,
            })
            .collect();
        Record { schema, slots }
    }

    pub fn builder(schema: &Arc<Schema>) -> RecordBuilder {
        RecordBuilder {
            schema: Arc::clone(schema),
            values: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn slot_index(&self, field: &str) -> ReconcileResult<usize> {
        self.schema
            .position(field)
            .ok_or_else(|| ReconcileError::UnknownField(field.to_string()))
    }

    /// Explicitly assign a value
    pub fn assign(&mut self, field: &str, value: impl Into<Value>) -> ReconcileResult<()> {
        let index = self.slot_index(field)?;
        self.slots[index] = Slot {
            value: value.into(),
            assigned: true,
        };
        Ok(())
    }

    pub fn get(&self, field: &str) -> ReconcileResult<&Value> {
        let index = self.slot_index(field)?;
        Ok(&self.slots[index].value)
    }

    pub fn is_assigned(&self, field: &str) -> ReconcileResult<bool> {
        let index = self.slot_index(field)?;
        Ok(self.slots[index].assigned)
    }

    pub fn identity_names(&self) -> Vec<&str> {
        self.schema.names_of(FieldKind::Identity)
    }

    pub fn reference_names(&self) -> Vec<&str> {
        self.schema.names_of(FieldKind::Reference)
    }

    /// Identity values in declaration order
    pub fn identity_values(&self) -> Vec<&Value> {
        self.schema
            .fields()
            .iter()
            .zip(&self.slots)
            .filter(|(spec, _)| spec.kind == FieldKind::Identity)
            .map(|(_, slot)| &slot.value)
            .collect()
    }

    /// Copy every declared non-identity value, ignoring other names
    pub fn copy_values<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (name, value) in values {
            let Some(index) = self.schema.position(&name) else {
                continue;
            };
            if self.schema.fields()[index].kind == FieldKind::Identity {
                continue;
            }
            self.slots[index] = Slot {
                value,
                assigned: true,
            };
        }
    }

    /// Copy all non-identity values from a record of the same shape
    pub fn copy_record(&mut self, source: &Record) -> ReconcileResult<()> {
        if self.schema.field_names() != source.schema.field_names() {
            return Err(ReconcileError::ShapeMismatch {
                left: owned_names(&self.schema),
                right: owned_names(&source.schema),
            });
        }
        let values = source
            .schema
            .fields()
            .iter()
            .zip(&source.slots)
            .map(|(spec, slot)| (spec.name.clone(), slot.value.clone()))
            .collect::<Vec<_>>();
        self.copy_values(values);
        Ok(())
    }
}

fn owned_names(schema: &Schema) -> Vec<String> {
    schema.field_names().into_iter().map(String::from).collect()
}

impl Model for Record {
    fn fields(&self) -> Vec<FieldView<'_>> {
        self.schema
            .fields()
            .iter()
            .zip(&self.slots)
            .map(|(spec, slot)| FieldView {
                name: &spec.name,
                kind: spec.kind,
                value: &slot.value,
                presence: Presence {
                    assigned: slot.assigned,
                    default: !slot.assigned || spec.default.as_ref() == Some(&slot.value),
                },
            })
            .collect()
    }

    fn value_of(&self, field: &str) -> ReconcileResult<&Value> {
        self.get(field)
    }

    fn set_values(&mut self, values: Vec<(String, Value)>) -> ReconcileResult<()> {
        let indexed = values
            .into_iter()
            .map(|(name, value)| self.slot_index(&name).map(|index| (index, value)))
            .collect::<ReconcileResult<Vec<_>>>()?;

        for (index, value) in indexed {
            self.slots[index] = Slot {
                value,
                assigned: true,
            };
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    /// A single identity value renders bare (`1234`), a composite one as a
    /// tuple (`('Cod', '123 Lake Way')`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let identity = self.identity_values();
        match identity.as_slice() {
            [single] => write!(f, "{}", single),
            values => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Collects assignments and validates them against the schema on `build`
#[derive(Debug)]
pub struct RecordBuilder {
    schema: Arc<Schema>,
    values: Vec<(String, Value)>,
}

impl RecordBuilder {
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((field.into(), value.into()));
        self
    }

    pub fn build(self) -> ReconcileResult<Record> {
        let mut record = Record::new(self.schema);
        record.set_values(self.values)?;
        Ok(record)
    }
}
