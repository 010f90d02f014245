use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use crate::cluster::enums::cluster_event::ClusterEvent;
use crate::cluster::structs::cluster_connector::ClusterConnector;
use crate::cluster::structs::cluster_network::ClusterNetwork;
use crate::cluster::structs::cluster_node::ClusterNode;
use crate::config::structs::configuration::Configuration;
use crate::net::structs::reactor::Reactor;

/// Owner of the root node, seed set and every in-flight discovery.
///
/// The `discovering` map holds at most one connector per address hash at
/// any time; hash collisions are treated as identity equality. The seed
/// list is guarded by one mutex shared between `add_cluster_address` and
/// the periodic reconciliation step.
pub struct ClusterController {
    pub(crate) config: Arc<Configuration>,
    pub(crate) tag: String,
    pub(crate) network: Mutex<Option<Arc<ClusterNetwork>>>,
    pub(crate) seeds: Mutex<Vec<IpAddr>>,
    pub(crate) discovering: Arc<RwLock<HashMap<u64, Arc<ClusterConnector>>>>,
    pub(crate) root: RwLock<Option<Arc<ClusterNode>>>,
    pub(crate) events_tx: UnboundedSender<ClusterEvent>,
    pub(crate) events_rx: Mutex<Option<UnboundedReceiver<ClusterEvent>>>,
    pub(crate) shutdown: Mutex<Option<watch::Sender<bool>>>,
    pub(crate) reactor: Mutex<Option<Arc<Reactor>>>,
}
