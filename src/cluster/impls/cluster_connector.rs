use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use crossbeam::atomic::AtomicCell;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use crate::cluster::enums::cluster_event::ClusterEvent;
use crate::cluster::enums::discovery_state::DiscoveryState;
use crate::cluster::structs::cluster_connector::ClusterConnector;
use crate::cluster::structs::discovering_request::DiscoveringRequest;
use crate::cluster::structs::discovery_sink::DiscoverySink;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::network_config::NetworkConfig;
use crate::net::enums::network_error::NetworkError;
use crate::net::structs::connector::Connector;

impl ClusterConnector {
    pub fn new(address: SocketAddr, hash: u64, config: &NetworkConfig, events: UnboundedSender<ClusterEvent>) -> Result<ClusterConnector, CustomError> {
        let sink = Arc::new(DiscoverySink {
            address,
            hash,
            events,
            request: Mutex::new(None),
            state: AtomicCell::new(DiscoveryState::Idle),
        });
        let connector = Connector::new(config, sink.clone())?;
        Ok(ClusterConnector {
            address,
            hash,
            connector,
            sink,
        })
    }

    /// Starts the handshake: connects and sends `request` once the
    /// session opens. Reused while an attempt is already in flight, the
    /// existing connection keeps going and the call is a no-op.
    pub fn discover(&self, request: DiscoveringRequest) -> Result<(), NetworkError> {
        *self.sink.request.lock() = Some(request);
        self.sink.state.store(DiscoveryState::Discovering);
        self.connector.connect(self.address)
    }

    pub fn close(&self) {
        self.connector.disconnect();
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn state(&self) -> DiscoveryState {
        self.sink.state.load()
    }
}

impl fmt::Debug for ClusterConnector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClusterConnector")
            .field("address", &self.address)
            .field("hash", &self.hash)
            .field("state", &self.sink.state.load())
            .finish()
    }
}
