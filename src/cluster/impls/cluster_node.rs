use std::collections::BTreeMap;
use std::fmt;
use std::net::SocketAddr;
use std::sync::{Arc, Weak};
use parking_lot::{Mutex, RwLock};
use crate::cluster::structs::cluster_connector::ClusterConnector;
use crate::cluster::structs::cluster_node::ClusterNode;

impl ClusterNode {
    pub fn new(hash: u64, address: Option<SocketAddr>) -> ClusterNode {
        ClusterNode {
            hash,
            address,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(BTreeMap::new()),
            connector: Mutex::new(None),
        }
    }

    pub fn with_connector(hash: u64, address: Option<SocketAddr>, connector: Arc<ClusterConnector>) -> ClusterNode {
        let node = ClusterNode::new(hash, address);
        *node.connector.lock() = Some(connector);
        node
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn address(&self) -> Option<SocketAddr> {
        self.address
    }

    pub fn parent(&self) -> Option<Arc<ClusterNode>> {
        self.parent.read().upgrade()
    }

    pub fn add_child(self: &Arc<ClusterNode>, child: Arc<ClusterNode>) {
        *child.parent.write() = Arc::downgrade(self);
        self.children.write().insert(child.hash, child);
    }

    /// Whole-subtree membership test by address hash.
    pub fn contains(&self, hash: u64) -> bool {
        if self.hash == hash {
            return true;
        }
        self.children.read().values().any(|child| child.contains(hash))
    }

    pub fn children(&self) -> Vec<Arc<ClusterNode>> {
        self.children.read().values().cloned().collect()
    }

    pub fn child_hashes(&self) -> Vec<u64> {
        self.children.read().keys().copied().collect()
    }

    pub fn child_count(&self) -> usize {
        self.children.read().len()
    }

    /// Disconnects the attached connector, if any. Idempotent.
    pub fn close_connector(&self) {
        if let Some(connector) = self.connector.lock().take() {
            connector.close();
        }
    }

    /// Closes every child's connector and drops the subtree.
    pub fn clear(&self) {
        let children = std::mem::take(&mut *self.children.write());
        for child in children.values() {
            child.close_connector();
            child.clear();
        }
    }
}

impl fmt::Debug for ClusterNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClusterNode")
            .field("hash", &self.hash)
            .field("address", &self.address)
            .field("children", &self.children.read().len())
            .finish()
    }
}
