use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::index::{Attributes, ReferenceIndex};
use super::lazy::{foreign_key_target, LazyReference};
use crate::errors::{Result, TeamboxError};

/// Value of one field on a decorated record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A plain value copied through from the raw object.
    Scalar(Value),
    /// A foreign-key field, resolved against the index on read.
    Reference(LazyReference),
}

impl FieldValue {
    /// The plain value, or `None` for a reference.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Reference(_) => None,
        }
    }

    /// The reference, or `None` for a plain value.
    pub fn as_reference(&self) -> Option<&LazyReference> {
        match self {
            Self::Scalar(_) => None,
            Self::Reference(r) => Some(r),
        }
    }

    /// The value as it appeared on the wire; references yield their raw id.
    pub fn raw(&self) -> &Value {
        match self {
            Self::Scalar(v) => v,
            Self::Reference(r) => r.target_id(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw().serialize(serializer)
    }
}

/// One primary object whose foreign-key fields have been swapped for
/// [`LazyReference`]s. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecoratedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl DecoratedRecord {
    /// Decorates one raw object against the response's shared index.
    ///
    /// Only top-level keys ending in `_id` become references; nested values
    /// are copied through as they are. The input is left untouched.
    pub fn decorate(raw: &Attributes, index: &Arc<ReferenceIndex>) -> Self {
        let fields = raw
            .iter()
            .map(|(key, value)| {
                let field = if foreign_key_target(key).is_some() {
                    FieldValue::Reference(LazyReference::new(key, value.clone(), Arc::clone(index)))
                } else {
                    FieldValue::Scalar(value.clone())
                };
                (key.clone(), field)
            })
            .collect();
        Self { fields }
    }

    /// Gets a field by name, whatever its kind.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Gets a non-reference field by name.
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        self.get(name)?.as_scalar()
    }

    /// Gets a foreign-key field by name.
    pub fn reference(&self, name: &str) -> Option<&LazyReference> {
        self.get(name)?.as_reference()
    }

    /// Resolves the foreign-key field `name` to its target's attributes.
    pub fn resolve(&self, name: &str) -> Result<&Attributes> {
        self.reference(name)
            .ok_or_else(|| TeamboxError::InvalidArgument {
                message: format!("`{}` is not a foreign-key field of this record", name),
            })?
            .resolve()
    }

    /// Field names, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields with their values, in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields, equal to the raw object's.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rebuilds the raw object, references rendered back as their ids.
    pub fn to_raw(&self) -> Attributes {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.raw().clone()))
            .collect()
    }

    /// Like [`to_raw`](Self::to_raw), but every resolvable reference is
    /// replaced by its target's attributes. Unresolvable ones keep their id.
    pub fn expand(&self) -> Attributes {
        self.fields
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    FieldValue::Scalar(s) => s.clone(),
                    FieldValue::Reference(r) => match r.resolve() {
                        Ok(attrs) => Value::Object(attrs.clone()),
                        Err(e) => {
                            warn!(field = %k, reference = %r, error = %e, "leaving reference unexpanded");
                            r.target_id().clone()
                        }
                    },
                };
                (k.clone(), value)
            })
            .collect()
    }

    /// Deserializes the raw view of this record into a typed struct such as
    /// [`Task`](crate::types::Task).
    pub fn project<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.to_raw()))?)
    }
}
