/// Converts byte runs into discrete messages and back.
///
/// With both marks configured the codec is in delimited mode; without
/// them it is a raw passthrough where one decoded chunk equals one
/// message. In delimited mode the codec is stateful: unconsumed trailing
/// bytes (including partial delimiters) are carried into the next
/// `decode` call, so a frame may span any number of reads.
pub struct FramingCodec {
    pub(crate) head_mark: Vec<u8>,
    pub(crate) tail_mark: Vec<u8>,
    pub(crate) delimited: bool,
    pub(crate) pending: Vec<u8>,
    pub(crate) payload: Vec<u8>,
    pub(crate) in_payload: bool,
}
