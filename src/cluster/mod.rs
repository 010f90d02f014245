//! Peer discovery and cluster membership.
//!
//! Nodes find each other in two steps: a UDP beacon scan surfaces
//! candidate addresses on the local network, and a TCP handshake over the
//! connection engine confirms them. Confirmed peers hang off the local
//! root in a node tree keyed by a 64-bit address hash.
//!
//! # Discovery Protocol
//!
//! A discovering node sends its cluster tag (a globally unique
//! self-identifier) together with its root-node view. The receiving
//! controller rejects when the tag equals its own - a node must never
//! cluster with itself through a loopback or alias address - and accepts
//! otherwise, attaching its own root view to the response.
//!
//! # Retry Heuristic
//!
//! A rejected or failed attempt against the preferred well-known port is
//! retried exactly once against `preferred_port + 1`; any other failure
//! gives up silently.
//!
//! # Event Flow
//!
//! Every notification is a [`enums::cluster_event::ClusterEvent`] on one
//! mpsc channel consumed by the controller's event task; outcomes carry
//! their own discriminant, so no source-type inspection is needed.

/// Enumerations for protocol states and event payloads.
pub mod enums;

/// Implementation blocks for cluster types.
pub mod impls;

/// Data structures for the controller, nodes and the wire protocol.
pub mod structs;

/// Address hashing and protocol decision functions.
#[allow(clippy::module_inception)]
pub mod cluster;
