use std::net::SocketAddr;
use crossbeam::atomic::AtomicCell;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use crate::cluster::enums::cluster_event::ClusterEvent;
use crate::cluster::enums::discovery_state::DiscoveryState;
use crate::cluster::structs::discovering_request::DiscoveringRequest;

/// Engine event sink of one [`crate::cluster::structs::cluster_connector::ClusterConnector`].
///
/// Sends the pending request when the session opens, resolves the attempt
/// from the first response message, and treats any transport-level end of
/// the session before a response as a failure. The state cell guarantees
/// a single terminal event per attempt.
pub struct DiscoverySink {
    pub(crate) address: SocketAddr,
    pub(crate) hash: u64,
    pub(crate) events: UnboundedSender<ClusterEvent>,
    pub(crate) request: Mutex<Option<DiscoveringRequest>>,
    pub(crate) state: AtomicCell<DiscoveryState>,
}
