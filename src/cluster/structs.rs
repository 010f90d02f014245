//! Data structures for discovery and membership.

/// Beacon datagram broadcast by the network scanner.
pub mod beacon;

/// Outbound discovery handshake runner.
pub mod cluster_connector;

/// Owner of the node tree, seed set and discovery lifecycle.
pub mod cluster_controller;

/// Inbound acceptor plus the UDP beacon scanner.
pub mod cluster_network;

/// A confirmed member of the node tree.
pub mod cluster_node;

/// Discovery request payload.
pub mod discovering_request;

/// Discovery response payload.
pub mod discovering_response;

/// Event sink bridging an engine connector to discovery outcomes.
pub mod discovery_sink;

/// Event sink for inbound discovery sessions.
pub mod inbound_sink;

/// Node snapshot exchanged in the handshake.
pub mod node_info;
