/// An immutable byte payload exchanged between peers.
///
/// A message has no identity beyond its bytes: two messages with equal
/// payloads compare equal. The engine never inspects the payload; any
/// interpretation belongs to the layer above.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Message {
    pub(crate) payload: Vec<u8>
}
