//! Error taxonomy and wire mapping for the HTTP-adjacent layer.
//!
//! Every failure the crate can surface collapses into the closed
//! [`ErrorKind`] union — validation, not-found, conflict, unauthorized,
//! invalid-reference, or internal — and is mapped exactly once onto the
//! wire payload shape by [`ErrorBody`]. Service errors convert via
//! `From`, so the outermost layer never inspects layer-specific error
//! enums. Unanticipated failures map to the internal kind and leak no
//! detail.

mod error;

pub use error::{ErrorBody, ErrorKind};
