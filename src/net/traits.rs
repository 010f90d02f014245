//! Traits exposed by the connection engine.

/// Event sink receiving session lifecycle, message and error callbacks.
pub mod message_handler;
