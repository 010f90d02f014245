use serde::{Deserialize, Serialize};
use crate::cluster::structs::node_info::NodeInfo;

/// Payload a discovering node sends to a candidate peer.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DiscoveringRequest {
    /// Globally unique self-identifier of the sender.
    pub tag: String,
    pub address: String,
    pub port: u16,
    pub root: NodeInfo,
}
