use std::sync::Arc;
use log::debug;
use crate::cluster::enums::cluster_event::{ClusterEvent, NetworkEvent};
use crate::cluster::structs::discovering_request::DiscoveringRequest;
use crate::cluster::structs::inbound_sink::InboundSink;
use crate::net::enums::message_error_code::MessageErrorCode;
use crate::net::structs::message::Message;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

impl MessageHandler for InboundSink {
    fn session_created(&self, _session: &Arc<Session>) {}

    fn session_opened(&self, session: &Arc<Session>) {
        debug!("inbound discovery session from {}", session.address());
    }

    fn session_closed(&self, session: &Arc<Session>) {
        debug!("inbound discovery session from {} closed", session.address());
    }

    fn session_destroyed(&self, _session: &Arc<Session>) {}

    fn message_received(&self, session: &Arc<Session>, message: Message) {
        match DiscoveringRequest::from_message(&message) {
            Ok(request) => {
                let _ = self.events.send(ClusterEvent::Network(NetworkEvent::Discovering {
                    request,
                    session: session.clone(),
                }));
            }
            Err(error) => {
                debug!("garbled discovery request from {}: {}", session.address(), error);
            }
        }
    }

    fn message_sent(&self, session: &Arc<Session>, _message: Message) {
        debug!("discovery response sent to {}", session.address());
    }

    fn error_occurred(&self, code: MessageErrorCode, session: &Arc<Session>) {
        debug!("inbound discovery error {:?} on {}", code, session.address());
    }
}
