use serde::{Deserialize, Serialize};

/// Snapshot of a node as exchanged in the discovery handshake.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct NodeInfo {
    pub hash: u64,
    pub address: String,
    pub children: Vec<u64>,
}
