use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use crossbeam::queue::SegQueue;
use tokio::sync::Notify;
use crate::net::structs::message::Message;
use crate::net::structs::session::Session;

impl Session {
    pub fn new(address: SocketAddr) -> Session {
        Session {
            address,
            outbound: SegQueue::new(),
            wakeup: Notify::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Enqueues a message for transmission by the owning loop.
    ///
    /// Callable from any thread. After the session has closed this is a
    /// silent no-op.
    pub fn write(&self, message: Message) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.outbound.push(message);
        self.wakeup.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Sets the closed flag, returning true only on the first call.
    pub(crate) fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn has_outbound(&self) -> bool {
        !self.outbound.is_empty()
    }

    pub(crate) fn pop_outbound(&self) -> Option<Message> {
        self.outbound.pop()
    }

    pub(crate) async fn outbound_added(&self) {
        self.wakeup.notified().await;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("pending", &self.outbound.len())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}
