//! Remote data gateway.
//!
//! One attempt per call, bearer credential attached when present, and every
//! non-success status folded into [`GatewayError::RequestFailed`].

pub(crate) mod client;
pub(crate) mod course_query;
pub(crate) mod error;


pub use client::Gateway;
pub use course_query::CourseQuery;
pub use error::{FailureKind, GatewayError, Result as GatewayResult};
