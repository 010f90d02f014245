use crate::net::structs::message::Message;

impl Message {
    pub fn new(payload: Vec<u8>) -> Message {
        Message { payload }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl From<Vec<u8>> for Message {
    fn from(payload: Vec<u8>) -> Message {
        Message::new(payload)
    }
}

impl From<&[u8]> for Message {
    fn from(payload: &[u8]) -> Message {
        Message::new(payload.to_vec())
    }
}

impl From<&str> for Message {
    fn from(payload: &str) -> Message {
        Message::new(payload.as_bytes().to_vec())
    }
}
