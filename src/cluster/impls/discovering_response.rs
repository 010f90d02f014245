use crate::cluster::structs::discovering_response::DiscoveringResponse;
use crate::net::structs::message::Message;

impl DiscoveringResponse {
    pub fn to_message(&self) -> Result<Message, serde_json::Error> {
        Ok(Message::new(serde_json::to_vec(self)?))
    }

    pub fn from_message(message: &Message) -> Result<DiscoveringResponse, serde_json::Error> {
        serde_json::from_slice(message.bytes())
    }
}
