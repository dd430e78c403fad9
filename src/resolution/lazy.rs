use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::index::{Attributes, ReferenceIndex};
use crate::errors::{Result, TeamboxError};

/// Suffix marking a field as a foreign key. The target type is the field
/// name with this suffix removed (`user_id` -> `user`).
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// Returns the target entity type encoded in a foreign-key field name, or
/// `None` if the field is not a foreign key.
pub fn foreign_key_target(field_name: &str) -> Option<&str> {
    field_name.strip_suffix(FOREIGN_KEY_SUFFIX)
}

/// Deferred handle standing in for a foreign-key field.
///
/// Holds only the target type, the raw id and a shared handle to the
/// response's index. Nothing is cached: every read goes back to the index.
#[derive(Clone)]
pub struct LazyReference {
    field_name: String,
    target_type: String,
    target_id: Value,
    index: Arc<ReferenceIndex>,
}

impl LazyReference {
    /// Builds a reference for `field_name` carrying `target_id`.
    ///
    /// The target type is the field name minus [`FOREIGN_KEY_SUFFIX`], taken
    /// as-is. Index keys are lower-cased, so a mixed-case field name will not
    /// resolve.
    pub fn new(field_name: &str, target_id: Value, index: Arc<ReferenceIndex>) -> Self {
        let target_type = foreign_key_target(field_name).unwrap_or(field_name);
        Self {
            field_name: field_name.to_string(),
            target_type: target_type.to_string(),
            target_id,
            index,
        }
    }

    /// Name of the field this reference replaced.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Entity type looked up in the index, e.g. `user` for `user_id`.
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// The original scalar value of the field.
    pub fn target_id(&self) -> &Value {
        &self.target_id
    }

    /// Looks up the target's attributes in the index.
    ///
    /// Fails with `ReferenceResolution` when the type or id is missing from
    /// the response's references, or when the raw id is not an integer
    /// (including `null`).
    pub fn resolve(&self) -> Result<&Attributes> {
        let id = self.target_id.as_i64().ok_or_else(|| self.unresolved())?;
        self.index
            .get(&self.target_type, id)
            .ok_or_else(|| self.unresolved())
    }

    /// Reads one attribute of the target.
    ///
    /// A missing target is an error; a missing attribute on a present target
    /// is `None`.
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.resolve()?.get(key))
    }

    /// Deserializes the target into a typed view such as
    /// [`User`](crate::types::User).
    pub fn project<T: DeserializeOwned>(&self) -> Result<T> {
        let attrs = self.resolve()?.clone();
        Ok(serde_json::from_value(Value::Object(attrs))?)
    }

    /// Returns `true` if both references read from the same index instance.
    pub fn shares_index_with(&self, other: &LazyReference) -> bool {
        Arc::ptr_eq(&self.index, &other.index)
    }

    fn unresolved(&self) -> TeamboxError {
        TeamboxError::ReferenceResolution {
            target_type: self.target_type.clone(),
            target_id: self.target_id.to_string(),
        }
    }
}

impl PartialEq for LazyReference {
    fn eq(&self, other: &Self) -> bool {
        self.field_name == other.field_name
            && self.target_type == other.target_type
            && self.target_id == other.target_id
            && (Arc::ptr_eq(&self.index, &other.index) || *self.index == *other.index)
    }
}

impl fmt::Display for LazyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} obj ({})>", self.target_type, self.target_id)
    }
}

impl fmt::Debug for LazyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyReference")
            .field("field_name", &self.field_name)
            .field("target_type", &self.target_type)
            .field("target_id", &self.target_id)
            .finish_non_exhaustive()
    }
}
