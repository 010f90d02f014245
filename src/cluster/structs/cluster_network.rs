use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicU16;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use crate::cluster::enums::cluster_event::ClusterEvent;
use crate::net::structs::acceptor::Acceptor;

/// Inbound side of discovery: the TCP acceptor peers hand their requests
/// to, plus a UDP beacon scanner for local-network discovery.
///
/// The acceptor binds the first free port in
/// `preferred_port..preferred_port + port_range`; the fallback ports are
/// what make the controller's port-guess retry meaningful.
pub struct ClusterNetwork {
    pub(crate) tag: String,
    pub(crate) bind_address: IpAddr,
    pub(crate) preferred_port: u16,
    pub(crate) port_range: u16,
    pub(crate) events: UnboundedSender<ClusterEvent>,
    pub(crate) acceptor: Arc<Acceptor>,
    pub(crate) port: AtomicU16,
    pub(crate) beacon: Mutex<Option<std::net::UdpSocket>>,
    pub(crate) shutdown: Mutex<Option<watch::Sender<bool>>>,
}
