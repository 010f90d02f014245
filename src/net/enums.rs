//! Enumerations for engine states and error codes.

/// Lifecycle states of a Connector.
pub mod connector_state;

/// Error codes delivered to the event sink.
pub mod message_error_code;

/// Errors returned by engine setup paths.
pub mod network_error;
