/// Error classes reported to the event sink.
///
/// `SocketFailed` and `ConnectTimeout` are setup failures; `ReadFailed`
/// and `WriteFailed` happen on an established session.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MessageErrorCode {
    SocketFailed,
    ConnectTimeout,
    ReadFailed,
    WriteFailed,
}
