use serde::{Deserialize, Serialize};

/// Outcome of a discovery request as seen by the receiving controller.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ProtocolState {
    Accept,
    Reject,
}
