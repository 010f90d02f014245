use parking_lot::Mutex;
use tokio::sync::watch;

/// A named thread running a current-thread runtime for engine loops.
///
/// Several Connectors may share one Reactor ("one reactor thread serving
/// N connectors"); the cluster controller also runs its timer and event
/// tasks on one. Dropping or shutting down the Reactor cancels every
/// task spawned on it.
pub struct Reactor {
    pub(crate) handle: tokio::runtime::Handle,
    pub(crate) shutdown: watch::Sender<bool>,
    pub(crate) thread: Mutex<Option<std::thread::JoinHandle<()>>>,
}
