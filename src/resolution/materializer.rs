use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::index::ReferenceIndex;
use super::record::DecoratedRecord;
use crate::errors::{Result, TeamboxError};

/// Ordered records of one objects/references response, all reading from a
/// single shared [`ReferenceIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedResponse {
    index: Arc<ReferenceIndex>,
    records: Vec<DecoratedRecord>,
}

impl MaterializedResponse {
    /// Number of records, equal to the length of the `objects` list.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `position` in response order.
    pub fn get(&self, position: usize) -> Option<&DecoratedRecord> {
        self.records.get(position)
    }

    /// Iterates records in response order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecoratedRecord> {
        self.records.iter()
    }

    /// All records as a slice, in response order.
    pub fn records(&self) -> &[DecoratedRecord] {
        &self.records
    }

    /// The index every record of this response resolves against.
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Records for which `predicate` holds, in response order.
    ///
    /// The predicate may read references; one that fails to resolve is the
    /// predicate's to handle.
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a DecoratedRecord>
    where
        P: FnMut(&DecoratedRecord) -> bool + 'a,
    {
        self.records.iter().filter(move |r| predicate(*r))
    }

    /// Takes the records out. Each keeps its handle on the shared index.
    pub fn into_records(self) -> Vec<DecoratedRecord> {
        self.records
    }
}

impl IntoIterator for MaterializedResponse {
    type Item = DecoratedRecord;
    type IntoIter = std::vec::IntoIter<DecoratedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a MaterializedResponse {
    type Item = &'a DecoratedRecord;
    type IntoIter = std::slice::Iter<'a, DecoratedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Outcome of [`materialize`]: linked records, or the body as it came in.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized {
    /// An objects/references body, decorated.
    Records(MaterializedResponse),
    /// Any other body, or every body when materialization is switched off.
    Raw(Value),
}

impl Materialized {
    pub fn is_materialized(&self) -> bool {
        matches!(self, Self::Records(_))
    }

    /// The records, if the body was materialized.
    pub fn records(&self) -> Option<&MaterializedResponse> {
        match self {
            Self::Records(r) => Some(r),
            Self::Raw(_) => None,
        }
    }

    /// The untouched body, if it was passed through.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            Self::Records(_) => None,
            Self::Raw(v) => Some(v),
        }
    }

    /// Consumes the response and keeps the records matching `predicate`.
    /// Pass-through bodies carry no records and yield an empty list.
    pub fn into_matching<P>(self, mut predicate: P) -> Vec<DecoratedRecord>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        match self {
            Self::Records(records) => records.into_iter().filter(|r| predicate(r)).collect(),
            Self::Raw(_) => Vec::new(),
        }
    }
}

/// Returns `true` if `response` is a mapping carrying both `objects` and
/// `references`.
pub fn is_materializable(response: &Value) -> bool {
    response
        .as_object()
        .is_some_and(|m| m.contains_key("objects") && m.contains_key("references"))
}

/// Turns a parsed response into linked records.
///
/// Responses that are not objects/references mappings come back unchanged as
/// [`Materialized::Raw`]. Otherwise the index is built once from
/// `references` and every entry of `objects` is decorated against it, in
/// order.
pub fn materialize(response: Value) -> Result<Materialized> {
    if !is_materializable(&response) {
        return Ok(Materialized::Raw(response));
    }

    let references = list_field(&response, "references")?;
    let objects = list_field(&response, "objects")?;

    let index = Arc::new(ReferenceIndex::build(references)?);

    let records = objects
        .iter()
        .enumerate()
        .map(|(position, object)| {
            let attrs = object
                .as_object()
                .ok_or_else(|| TeamboxError::MalformedResponse {
                    message: format!("object at position {} is not a mapping", position),
                })?;
            Ok(DecoratedRecord::decorate(attrs, &index))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        records = records.len(),
        references = index.len(),
        "materialized response"
    );

    Ok(Materialized::Records(MaterializedResponse { index, records }))
}

fn list_field<'a>(response: &'a Value, key: &str) -> Result<&'a [Value]> {
    response[key]
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| TeamboxError::MalformedResponse {
            message: format!("`{}` is not a list", key),
        })
}
