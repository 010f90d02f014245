use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Weak};
use parking_lot::{Mutex, RwLock};
use crate::cluster::structs::cluster_connector::ClusterConnector;

/// A confirmed member of the node tree, keyed by address hash.
///
/// The parent link is a non-owning back-reference; children own their
/// subtrees. While a child's discovery is still resolving its connector
/// stays attached so the controller can close it on shutdown.
pub struct ClusterNode {
    pub(crate) hash: u64,
    pub(crate) address: Option<SocketAddr>,
    pub(crate) parent: RwLock<Weak<ClusterNode>>,
    pub(crate) children: RwLock<BTreeMap<u64, Arc<ClusterNode>>>,
    pub(crate) connector: Mutex<Option<Arc<ClusterConnector>>>,
}
