use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use crossbeam::atomic::AtomicCell;
use parking_lot::Mutex;
use tokio::sync::watch;
use crate::net::enums::connector_state::ConnectorState;
use crate::net::structs::reactor::Reactor;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

/// Client-role connection engine managing exactly one session.
///
/// By default each Connector runs its readiness loop on its own named OS
/// thread; pass a shared [`Reactor`] to multiplex several Connectors on
/// one thread instead. The public contract is identical either way.
pub struct Connector {
    pub(crate) connect_timeout: Duration,
    pub(crate) buffer_size: usize,
    pub(crate) head_mark: Option<Vec<u8>>,
    pub(crate) tail_mark: Option<Vec<u8>>,
    pub(crate) handler: Arc<dyn MessageHandler>,
    pub(crate) reactor: Option<Arc<Reactor>>,
    pub(crate) state: Arc<AtomicCell<ConnectorState>>,
    pub(crate) session: Mutex<Option<Arc<Session>>>,
    pub(crate) address: Mutex<Option<SocketAddr>>,
    pub(crate) shutdown: Mutex<Option<watch::Sender<bool>>>,
    pub(crate) running: Arc<AtomicBool>,
    pub(crate) loop_thread: Mutex<Option<std::thread::JoinHandle<()>>>,
    pub(crate) loop_task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}
