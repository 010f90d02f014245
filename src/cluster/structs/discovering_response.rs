use serde::{Deserialize, Serialize};
use crate::cluster::enums::protocol_state::ProtocolState;
use crate::cluster::structs::node_info::NodeInfo;

/// Reply of the receiving controller; `root` is present on accept.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DiscoveringResponse {
    pub state: ProtocolState,
    pub tag: String,
    pub root: Option<NodeInfo>,
}
