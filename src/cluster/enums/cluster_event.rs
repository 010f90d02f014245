use std::net::SocketAddr;
use std::sync::Arc;
use crate::cluster::structs::discovering_request::DiscoveringRequest;
use crate::cluster::structs::node_info::NodeInfo;
use crate::net::structs::session::Session;

/// A notification delivered to the controller's event task.
///
/// Every payload carries its own discriminant; handlers match on the
/// variant instead of inspecting the notification source.
#[derive(Debug)]
pub enum ClusterEvent {
    Network(NetworkEvent),
    Connector(ConnectorEvent),
}

/// Raised by the inbound side: the acceptor and the beacon scanner.
#[derive(Debug)]
pub enum NetworkEvent {
    /// An inbound discovery request awaiting a reply on its session.
    Discovering { request: DiscoveringRequest, session: Arc<Session> },
    /// A candidate peer address surfaced by the beacon scanner.
    Candidate { address: SocketAddr },
}

/// Terminal outcome of one outbound discovery attempt.
#[derive(Debug)]
pub enum ConnectorEvent {
    Accepted { address: SocketAddr, hash: u64, root: Option<NodeInfo> },
    Rejected { address: SocketAddr, hash: u64 },
    Failed { address: SocketAddr, hash: u64 },
}
