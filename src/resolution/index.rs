use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{Result, TeamboxError};

/// Attribute mapping of a single entity as shipped by the server.
pub type Attributes = Map<String, Value>;

/// Two-level lookup over a response's `references` list:
/// entity type -> entity id -> attributes.
///
/// Built once per response and never mutated afterwards. Type keys are stored
/// lower-cased; ids are the integer `id` of each entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceIndex {
    by_type: HashMap<String, HashMap<i64, Attributes>>,
}

impl ReferenceIndex {
    /// Groups the `references` list by type and id.
    ///
    /// Every entry must be a mapping with a string `type` and an integer `id`;
    /// anything else fails with `MalformedReference`. When the list carries the
    /// same `(type, id)` twice the later entry wins. Case variants of one type
    /// (`User`, `user`) share a group; their entries merge rather than one
    /// variant replacing the other.
    pub fn build(references: &[Value]) -> Result<Self> {
        let mut by_type: HashMap<String, HashMap<i64, Attributes>> = HashMap::new();

        for (position, entry) in references.iter().enumerate() {
            let attrs = entry
                .as_object()
                .ok_or_else(|| TeamboxError::MalformedReference {
                    position,
                    message: "entry is not a mapping".to_string(),
                })?;

            let ref_type = attrs.get("type").and_then(Value::as_str).ok_or_else(|| {
                TeamboxError::MalformedReference {
                    position,
                    message: "missing string `type`".to_string(),
                }
            })?;

            let id = attrs.get("id").and_then(Value::as_i64).ok_or_else(|| {
                TeamboxError::MalformedReference {
                    position,
                    message: "missing integer `id`".to_string(),
                }
            })?;

            by_type
                .entry(ref_type.to_lowercase())
                .or_default()
                .insert(id, attrs.clone());
        }

        let index = Self { by_type };
        debug!(
            types = index.by_type.len(),
            entries = index.len(),
            "built reference index"
        );
        Ok(index)
    }

    /// Returns the attributes stored for `(entity_type, id)`.
    ///
    /// `entity_type` is matched exactly against the lower-cased keys; it is
    /// not normalized here.
    pub fn get(&self, entity_type: &str, id: i64) -> Option<&Attributes> {
        self.by_type.get(entity_type)?.get(&id)
    }

    /// Like [`get`](Self::get), but reports a miss as `ReferenceResolution`.
    pub fn lookup(&self, entity_type: &str, id: i64) -> Result<&Attributes> {
        self.get(entity_type, id)
            .ok_or_else(|| TeamboxError::ReferenceResolution {
                target_type: entity_type.to_string(),
                target_id: id.to_string(),
            })
    }

    /// Returns `true` if at least one reference of `entity_type` was indexed.
    pub fn contains_type(&self, entity_type: &str) -> bool {
        self.by_type.contains_key(entity_type)
    }

    /// Indexed entity types, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    /// Total number of indexed entities across all types.
    pub fn len(&self) -> usize {
        self.by_type.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
