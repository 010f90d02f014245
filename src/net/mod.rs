//! Non-blocking connection engine.
//!
//! This module turns raw TCP byte streams into discrete application
//! messages and back. It contains the client-role [`structs::connector::Connector`]
//! and the server-role [`structs::acceptor::Acceptor`], both driven by a
//! readiness loop on a dedicated reactor thread.
//!
//! # Concurrency Model
//!
//! - Every Connector owns one named OS thread running a current-thread
//!   runtime; an Acceptor multiplexes its listener and all accepted
//!   sessions on one such thread.
//! - Read buffers and codec state are moved into the loop task, so only
//!   the owning thread ever touches them.
//! - The outbound queue is the only multi-producer structure: any thread
//!   may enqueue, only the loop drains.
//! - Shutdown is cooperative: a watch channel wakes the blocked readiness
//!   wait, and the caller joins the loop within a fixed bound.
//!
//! # Framing
//!
//! With head/tail marks configured, messages travel as
//! `HEAD ‖ PAYLOAD ‖ TAIL`; without marks every read chunk is delivered
//! as one message. The codec keeps unconsumed trailing bytes between
//! reads, so frames may span any number of reads.

/// Enumerations for engine states and error codes.
pub mod enums;

/// Implementation blocks for engine types.
pub mod impls;

/// Data structures for sessions, messages and the engine roles.
pub mod structs;

/// The event sink trait implemented by embedding applications.
pub mod traits;

/// Core readiness-loop internals shared by Connector and Acceptor.
#[allow(clippy::module_inception)]
pub mod net;

#[cfg(test)]
mod tests;
