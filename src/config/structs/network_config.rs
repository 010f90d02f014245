use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NetworkConfig {
    /// Connect timeout in milliseconds.
    pub connect_timeout: u64,
    /// Fixed size of the per-session read buffer and the socket
    /// send/receive buffers, in bytes.
    pub buffer_size: usize,
    /// Hex-encoded head delimiter. Both marks unset selects raw mode.
    pub head_mark: Option<String>,
    /// Hex-encoded tail delimiter.
    pub tail_mark: Option<String>,
}
