use serde::{Deserialize, Serialize};

/// Datagram broadcast during a network scan.
///
/// `port` advertises the sender's TCP discovery port; `reply` marks a
/// directed answer to a scan, which must not be answered again.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Beacon {
    pub tag: String,
    pub port: u16,
    pub reply: bool,
}
