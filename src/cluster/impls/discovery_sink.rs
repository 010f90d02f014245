use std::sync::Arc;
use log::debug;
use crate::cluster::enums::cluster_event::{ClusterEvent, ConnectorEvent};
use crate::cluster::enums::discovery_state::DiscoveryState;
use crate::cluster::structs::discovering_response::DiscoveringResponse;
use crate::cluster::structs::discovery_sink::DiscoverySink;
use crate::cluster::structs::node_info::NodeInfo;
use crate::cluster::enums::protocol_state::ProtocolState;
use crate::net::enums::message_error_code::MessageErrorCode;
use crate::net::structs::message::Message;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

impl DiscoverySink {
    /// Moves the attempt from `Discovering` to a terminal state; only the
    /// first caller wins, so exactly one event reaches the controller.
    fn resolve(&self, outcome: DiscoveryState, root: Option<NodeInfo>) {
        if self.state.compare_exchange(DiscoveryState::Discovering, outcome).is_err() {
            return;
        }
        let event = match outcome {
            DiscoveryState::Accepted => ConnectorEvent::Accepted { address: self.address, hash: self.hash, root },
            DiscoveryState::Rejected => ConnectorEvent::Rejected { address: self.address, hash: self.hash },
            DiscoveryState::Failed => ConnectorEvent::Failed { address: self.address, hash: self.hash },
            DiscoveryState::Idle | DiscoveryState::Discovering => return,
        };
        let _ = self.events.send(ClusterEvent::Connector(event));
    }
}

impl MessageHandler for DiscoverySink {
    fn session_created(&self, session: &Arc<Session>) {
        debug!("discovery session created for {}", session.address());
    }

    fn session_opened(&self, session: &Arc<Session>) {
        if let Some(request) = self.request.lock().take() {
            match request.to_message() {
                Ok(message) => session.write(message),
                Err(encode_error) => {
                    debug!("unable to encode discovery request for {}: {}", session.address(), encode_error);
                    self.resolve(DiscoveryState::Failed, None);
                }
            }
        }
    }

    fn session_closed(&self, session: &Arc<Session>) {
        debug!("discovery session to {} closed", session.address());
        self.resolve(DiscoveryState::Failed, None);
    }

    fn session_destroyed(&self, _session: &Arc<Session>) {
        // backstop: a loop that dies without ever opening still resolves
        self.resolve(DiscoveryState::Failed, None);
    }

    fn message_received(&self, session: &Arc<Session>, message: Message) {
        match DiscoveringResponse::from_message(&message) {
            Ok(response) => {
                let outcome = match response.state {
                    ProtocolState::Accept => DiscoveryState::Accepted,
                    ProtocolState::Reject => DiscoveryState::Rejected,
                };
                self.resolve(outcome, response.root);
            }
            Err(error) => {
                debug!("garbled discovery response from {}: {}", session.address(), error);
                self.resolve(DiscoveryState::Failed, None);
            }
        }
    }

    fn message_sent(&self, session: &Arc<Session>, _message: Message) {
        debug!("discovery request sent to {}", session.address());
    }

    fn error_occurred(&self, code: MessageErrorCode, session: &Arc<Session>) {
        debug!("discovery transport error {:?} on {}", code, session.address());
        self.resolve(DiscoveryState::Failed, None);
    }
}
