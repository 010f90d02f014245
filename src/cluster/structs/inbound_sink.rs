use tokio::sync::mpsc::UnboundedSender;
use crate::cluster::enums::cluster_event::ClusterEvent;

/// Engine event sink of the cluster acceptor.
///
/// Parses inbound messages as discovery requests and forwards them,
/// together with their session, to the controller's event task.
pub struct InboundSink {
    pub(crate) events: UnboundedSender<ClusterEvent>,
}
