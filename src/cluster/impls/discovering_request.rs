use crate::cluster::structs::discovering_request::DiscoveringRequest;
use crate::net::structs::message::Message;

impl DiscoveringRequest {
    pub fn to_message(&self) -> Result<Message, serde_json::Error> {
        Ok(Message::new(serde_json::to_vec(self)?))
    }

    pub fn from_message(message: &Message) -> Result<DiscoveringRequest, serde_json::Error> {
        serde_json::from_slice(message.bytes())
    }
}
