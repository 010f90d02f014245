/// Connection lifecycle of a [`crate::net::structs::connector::Connector`].
///
/// Transitions: `Disconnected → Connecting → Connected → Closing → Disconnected`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ConnectorState {
    Disconnected,
    Connecting,
    Connected,
    Closing,
}
