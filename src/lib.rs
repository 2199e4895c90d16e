#![feature(error_generic_member_access)]
//! Composite error handling for GraphQL clients.
//!
//! A GraphQL request can fail in two places at once: the server may report
//! structured errors alongside a partial result, and the transport carrying
//! the request may fail outright. This crate provides [`ClientError`], a
//! single failure value holding both sources, with a derived human-readable
//! summary message and a type-check predicate for use behind `dyn Error`
//! boundaries.

pub mod error;
pub mod graphql;

// Re-export commonly used types
pub use error::{ClientError, ClientErrorBuilder, ClientResult, NetworkError, is_client_error};
pub use graphql::{ErrorLocation, GraphQlError, PathSegment};
