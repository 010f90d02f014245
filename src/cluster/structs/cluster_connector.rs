use std::net::SocketAddr;
use std::sync::Arc;
use crate::cluster::structs::discovery_sink::DiscoverySink;
use crate::net::structs::connector::Connector;

/// Runs the discovery handshake against one candidate address.
///
/// Owns a dedicated engine [`Connector`] whose event sink translates
/// transport callbacks into exactly one terminal
/// [`crate::cluster::enums::cluster_event::ConnectorEvent`] per attempt.
pub struct ClusterConnector {
    pub(crate) address: SocketAddr,
    pub(crate) hash: u64,
    pub(crate) connector: Connector,
    pub(crate) sink: Arc<DiscoverySink>,
}
