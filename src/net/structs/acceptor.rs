use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

/// Server-role connection engine multiplexing many sessions.
///
/// One dedicated thread runs the listener and every accepted session;
/// sessions are tracked by remote address and removed when they close.
pub struct Acceptor {
    pub(crate) buffer_size: usize,
    pub(crate) head_mark: Option<Vec<u8>>,
    pub(crate) tail_mark: Option<Vec<u8>>,
    pub(crate) handler: Arc<dyn MessageHandler>,
    pub(crate) sessions: Arc<RwLock<HashMap<SocketAddr, Arc<Session>>>>,
    pub(crate) local_address: Mutex<Option<SocketAddr>>,
    pub(crate) shutdown: Mutex<Option<watch::Sender<bool>>>,
    pub(crate) running: Arc<AtomicBool>,
    pub(crate) loop_thread: Mutex<Option<std::thread::JoinHandle<()>>>,
}
