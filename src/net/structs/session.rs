use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use crossbeam::queue::SegQueue;
use tokio::sync::Notify;
use crate::net::structs::message::Message;

/// Per-connection state shared between the owning loop and writer threads.
///
/// The session's identity is its remote address. Read buffers and codec
/// state live inside the loop task and are not reachable from here; the
/// only multi-producer structure is the outbound queue, appended from any
/// thread and drained exclusively by the loop.
pub struct Session {
    pub(crate) address: SocketAddr,
    pub(crate) outbound: SegQueue<Message>,
    pub(crate) wakeup: Notify,
    pub(crate) closed: AtomicBool,
}
