use crate::net::structs::framing_codec::FramingCodec;
use crate::net::structs::message::Message;

impl FramingCodec {
    /// Delimited mode requires both marks; anything else is raw mode.
    pub fn new(head_mark: Option<Vec<u8>>, tail_mark: Option<Vec<u8>>) -> FramingCodec {
        let delimited = matches!((&head_mark, &tail_mark), (Some(head), Some(tail)) if !head.is_empty() && !tail.is_empty());
        FramingCodec {
            head_mark: head_mark.unwrap_or_default(),
            tail_mark: tail_mark.unwrap_or_default(),
            delimited,
            pending: Vec::new(),
            payload: Vec::new(),
            in_payload: false,
        }
    }

    pub fn raw() -> FramingCodec {
        FramingCodec::new(None, None)
    }

    pub fn is_delimited(&self) -> bool {
        self.delimited
    }

    /// Drops any partially scanned frame state.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.payload.clear();
        self.in_payload = false;
    }

    /// Decodes one read's worth of bytes into zero or more messages.
    ///
    /// In delimited mode unconsumed trailing bytes are retained, so a
    /// frame split across reads is reassembled on the next call. Raw
    /// mode delivers the chunk as a single message.
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<Message> {
        if chunk.is_empty() {
            return Vec::new();
        }
        if !self.delimited {
            return vec![Message::new(chunk.to_vec())];
        }

        self.pending.extend_from_slice(chunk);
        let mut messages = Vec::new();
        loop {
            if !self.in_payload {
                match find_mark(&self.pending, &self.head_mark) {
                    Some(at) => {
                        // bytes before the head mark are noise between frames
                        self.pending.drain(..at + self.head_mark.len());
                        self.payload.clear();
                        self.in_payload = true;
                    }
                    None => {
                        self.retain_possible_prefix(self.head_mark.len());
                        break;
                    }
                }
            } else {
                match find_mark(&self.pending, &self.tail_mark) {
                    Some(at) => {
                        self.payload.extend_from_slice(&self.pending[..at]);
                        self.pending.drain(..at + self.tail_mark.len());
                        messages.push(Message::new(std::mem::take(&mut self.payload)));
                        self.in_payload = false;
                    }
                    None => {
                        // everything that can no longer start a tail match is payload
                        let keep = (self.tail_mark.len() - 1).min(self.pending.len());
                        let cut = self.pending.len() - keep;
                        self.payload.extend_from_slice(&self.pending[..cut]);
                        self.pending.drain(..cut);
                        break;
                    }
                }
            }
        }
        messages
    }

    /// Wraps a message for the wire: `HEAD ‖ PAYLOAD ‖ TAIL`, or the bare
    /// payload in raw mode.
    pub fn encode(&self, message: &Message) -> Vec<u8> {
        if !self.delimited {
            return message.bytes().to_vec();
        }
        let mut frame = Vec::with_capacity(self.head_mark.len() + message.len() + self.tail_mark.len());
        frame.extend_from_slice(&self.head_mark);
        frame.extend_from_slice(message.bytes());
        frame.extend_from_slice(&self.tail_mark);
        frame
    }

    fn retain_possible_prefix(&mut self, mark_len: usize) {
        let keep = (mark_len - 1).min(self.pending.len());
        let cut = self.pending.len() - keep;
        self.pending.drain(..cut);
    }
}

fn find_mark(data: &[u8], mark: &[u8]) -> Option<usize> {
    if mark.is_empty() || data.len() < mark.len() {
        return None;
    }
    data.windows(mark.len()).position(|window| window == mark)
}
