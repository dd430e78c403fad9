//! REST plumbing around the materialization core.
//!
//! Nothing here knows about references: resources format paths, the
//! transport moves bytes, and the client hands parsed bodies to
//! [`crate::resolution::materialize`].

/// Resource wrappers building paths for each REST route.
pub mod resources;

/// Request model and HTTP transport.
pub mod transport;

pub use resources::{
    Activities, CommentTargetType, Comments, Form, Memberships, Organizations, People, Projects,
    TaskLists,
};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
