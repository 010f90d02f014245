//! # Nodemesh
//!
//! Transport and membership engine for an ad-hoc "cloud of nodes".
//!
//! ## Overview
//!
//! Nodemesh gives every node two things: a delimited-message transport over
//! raw TCP sockets, and a discovery protocol that lets nodes on the same
//! network self-organize into a cluster tree without any central registry.
//!
//! ## Features
//!
//! - **Framed Transport**: configurable head/tail byte marks turn a raw
//!   stream into discrete messages; raw passthrough mode when no marks are set
//! - **Connector / Acceptor**: client-role and server-role connection engines,
//!   each driving its sessions from one dedicated reactor thread
//! - **Event Sink**: a single callback trait delivers session lifecycle,
//!   message and error notifications to the embedding application
//! - **Peer Discovery**: UDP beacon scanning plus a TCP handshake with a
//!   self-discovery guard, assembling confirmed peers into a node tree
//! - **Bounded Shutdown**: every loop is woken by an explicit cancel signal
//!   and joined within a fixed bound
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nodemesh::config::structs::configuration::Configuration;
//! use nodemesh::cluster::structs::cluster_controller::ClusterController;
//!
//! let config = Configuration::load_from_file(false)?;
//! let controller = ClusterController::new(config.into());
//! controller.startup()?;
//! ```
//!
//! ## Modules
//!
//! - [`cluster`] - Peer discovery, node tree and cluster controller
//! - [`common`] - Shared utilities, error handling and logging setup
//! - [`config`] - Configuration management and TOML parsing
//! - [`net`] - Non-blocking connection engine and framing codec
//! - [`structs`] - CLI argument parsing

/// Peer discovery and membership module.
///
/// Contains the cluster controller, the discovery wire protocol, the node
/// tree and the network scanner that together keep the local view of the
/// cluster up to date.
pub mod cluster;

/// Common utilities and shared functionality.
///
/// Contains the custom error type, logging setup and small helper
/// functions used across all modules.
pub mod common;

/// Configuration management module.
///
/// Handles loading, parsing and validating configuration from TOML files,
/// including the delimiter marks used by the framing codec.
pub mod config;

/// Non-blocking connection engine.
///
/// Implements the Connector (client role) and Acceptor (server role), the
/// framing codec, per-connection sessions and the event sink trait.
pub mod net;

/// CLI argument parsing structures.
pub mod structs;
