//! Composite error type for GraphQL client operations.
//!
//! A single request can fail in two ways at once: the server may report
//! structured GraphQL errors alongside a partial result, and the transport
//! carrying the request may fail outright. [`ClientError`] holds both
//! sources in one value so callers can propagate a single error and still
//! branch on the underlying causes.

use crate::graphql::GraphQlError;
use serde_json::Value;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use thiserror::Error;
use tracing::debug;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Boxed transport-level failure.
///
/// Any error type works here; the message used in summaries is the value's
/// `Display` output. Plain strings convert too, which keeps test and caller
/// code short.
pub type NetworkError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure value combining zero or more server-reported GraphQL errors with
/// at most one transport failure.
///
/// Constructed once at the point a failure is detected, then propagated
/// unchanged. The summary `message` is fixed at construction: either the
/// caller-supplied string, or a derived join of the underlying error
/// messages. Constructing with neither source is legal and yields an empty
/// message.
///
/// # Examples
///
/// ```
/// use graphql_client_error::{ClientError, GraphQlError};
///
/// let error = ClientError::builder()
///     .graphql_error(GraphQlError::new("bad query"))
///     .network_error("timeout")
///     .build();
/// assert_eq!(
///     error.message(),
///     "GraphQL error: bad query\nNetwork error: timeout"
/// );
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    graphql_errors: Vec<GraphQlError>,
    #[source]
    network_error: Option<NetworkError>,
    extra_info: Option<Value>,
    backtrace: Backtrace,
}

impl ClientError {
    /// Start building an error from whichever sources are at hand.
    pub fn builder() -> ClientErrorBuilder {
        ClientErrorBuilder::default()
    }

    /// Create an error carrying only server-reported GraphQL errors.
    pub fn from_graphql_errors(errors: impl IntoIterator<Item = GraphQlError>) -> Self {
        Self::builder().graphql_errors(errors).build()
    }

    /// Create an error carrying only a transport failure.
    pub fn from_network_error(error: impl Into<NetworkError>) -> Self {
        Self::builder().network_error(error).build()
    }

    /// Summary message, caller-supplied or derived at construction.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Server-reported errors in response order. Empty when the failure was
    /// transport-only.
    pub fn graphql_errors(&self) -> &[GraphQlError] {
        &self.graphql_errors
    }

    /// The transport failure, if the request never completed.
    pub fn network_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.network_error.as_deref()
    }

    /// Caller-supplied diagnostic data, returned exactly as given.
    pub fn extra_info(&self) -> Option<&Value> {
        self.extra_info.as_ref()
    }

    /// Backtrace captured when the error was built, which may differ from
    /// where it was ultimately returned.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

/// Builder for [`ClientError`]. All inputs are independently optional.
#[derive(Default)]
pub struct ClientErrorBuilder {
    graphql_errors: Vec<GraphQlError>,
    network_error: Option<NetworkError>,
    message: Option<String>,
    extra_info: Option<Value>,
}

impl ClientErrorBuilder {
    /// Append server-reported errors, preserving their order.
    pub fn graphql_errors(mut self, errors: impl IntoIterator<Item = GraphQlError>) -> Self {
        self.graphql_errors.extend(errors);
        self
    }

    /// Append a single server-reported error.
    pub fn graphql_error(mut self, error: GraphQlError) -> Self {
        self.graphql_errors.push(error);
        self
    }

    /// Set the transport failure.
    pub fn network_error(mut self, error: impl Into<NetworkError>) -> Self {
        self.network_error = Some(error.into());
        self
    }

    /// Set an explicit summary message, skipping derivation entirely.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach free-form diagnostic data for callers further up the stack.
    /// This crate never inspects it.
    pub fn extra_info(mut self, info: Value) -> Self {
        self.extra_info = Some(info);
        self
    }

    /// Finish the error.
    ///
    /// Derives the summary message when none was supplied, and captures the
    /// backtrace here rather than at the eventual return site.
    pub fn build(self) -> ClientError {
        let message = match self.message {
            Some(message) => message,
            None => derive_message(&self.graphql_errors, self.network_error.as_deref()),
        };
        debug!(
            graphql_errors = self.graphql_errors.len(),
            has_network_error = self.network_error.is_some(),
            "assembled client error"
        );
        ClientError {
            message,
            graphql_errors: self.graphql_errors,
            network_error: self.network_error,
            extra_info: self.extra_info,
            backtrace: Backtrace::capture(),
        }
    }
}

/// Check whether an error behind a `dyn Error` is a [`ClientError`].
///
/// Useful at API boundaries that surface `Box<dyn Error>`, where callers
/// need to branch on the composite kind without naming the concrete type.
pub fn is_client_error(error: &(dyn StdError + 'static)) -> bool {
    error.is::<ClientError>()
}

// Summary format: one "GraphQL error: " line per server error in response
// order, then a single "Network error: " line. Exactly one trailing newline
// is stripped, so an error with no sources keeps an empty message.
fn derive_message(
    graphql_errors: &[GraphQlError],
    network_error: Option<&(dyn StdError + Send + Sync + 'static)>,
) -> String {
    let mut message = String::new();
    for error in graphql_errors {
        message.push_str("GraphQL error: ");
        message.push_str(&error.message);
        message.push('\n');
    }
    if let Some(error) = network_error {
        message.push_str("Network error: ");
        message.push_str(&error.to_string());
        message.push('\n');
    }
    if message.ends_with('\n') {
        message.pop();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_graphql_errors_in_order() {
        let error = ClientError::from_graphql_errors([
            GraphQlError::new("first"),
            GraphQlError::new("second"),
            GraphQlError::new("third"),
        ]);
        assert_eq!(
            error.message(),
            "GraphQL error: first\nGraphQL error: second\nGraphQL error: third"
        );
    }

    #[test]
    fn test_message_from_network_error_only() {
        let error = ClientError::from_network_error("Failed to fetch");
        assert_eq!(error.message(), "Network error: Failed to fetch");
    }

    #[test]
    fn test_message_from_both_sources() {
        let error = ClientError::builder()
            .graphql_error(GraphQlError::new("bad query"))
            .network_error("timeout")
            .build();
        assert_eq!(
            error.message(),
            "GraphQL error: bad query\nNetwork error: timeout"
        );
    }

    #[test]
    fn test_empty_error_has_empty_message() {
        // Legal, just not useful
        let error = ClientError::builder().build();
        assert_eq!(error.message(), "");
        assert!(error.graphql_errors().is_empty());
        assert!(error.network_error().is_none());
    }

    #[test]
    fn test_explicit_message_skips_derivation() {
        let error = ClientError::builder()
            .graphql_error(GraphQlError::new("ignored"))
            .network_error("also ignored")
            .message("request failed")
            .build();
        assert_eq!(error.message(), "request failed");
    }

    #[test]
    fn test_strips_only_the_final_newline() {
        let error = ClientError::from_graphql_errors([GraphQlError::new("oops\n")]);
        assert_eq!(error.message(), "GraphQL error: oops\n");
    }

    #[test]
    fn test_display_matches_message() {
        let error = ClientError::from_network_error("connection reset");
        assert_eq!(error.to_string(), error.message());
    }

    #[test]
    fn test_source_exposes_network_error() {
        let error = ClientError::from_network_error("connection reset");
        let source = StdError::source(&error).expect("source should be present");
        assert_eq!(source.to_string(), "connection reset");

        let error = ClientError::from_graphql_errors([GraphQlError::new("bad query")]);
        assert!(StdError::source(&error).is_none());
    }

    #[test]
    fn test_predicate_recognizes_client_errors() {
        let error: Box<dyn StdError> = Box::new(ClientError::builder().build());
        assert!(is_client_error(error.as_ref()));
    }

    #[test]
    fn test_predicate_rejects_other_errors() {
        let error: Box<dyn StdError> =
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, "plain"));
        assert!(!is_client_error(error.as_ref()));
    }
}
