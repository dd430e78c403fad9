//! Materialization of objects/references responses.
//!
//! A response splits into primary `objects` and a deduplicated side list of
//! `references`. The references are indexed once per response; every
//! foreign-key field on an object becomes a [`LazyReference`] that looks its
//! target up in that shared index when read.
mod index;
mod lazy;
mod materializer;
mod record;

pub use index::{Attributes, ReferenceIndex};
pub use lazy::{foreign_key_target, LazyReference, FOREIGN_KEY_SUFFIX};
pub use materializer::{is_materializable, materialize, Materialized, MaterializedResponse};
pub use record::{DecoratedRecord, FieldValue};
