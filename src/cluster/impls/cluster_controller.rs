use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::sync::watch;
use uuid::Uuid;
use crate::cluster::cluster::{evaluate_discovery, guess_address, hash_socket_address};
use crate::cluster::enums::cluster_event::{ClusterEvent, ConnectorEvent, NetworkEvent};
use crate::cluster::enums::protocol_state::ProtocolState;
use crate::cluster::structs::cluster_connector::ClusterConnector;
use crate::cluster::structs::cluster_controller::ClusterController;
use crate::cluster::structs::cluster_network::ClusterNetwork;
use crate::cluster::structs::cluster_node::ClusterNode;
use crate::cluster::structs::discovering_request::DiscoveringRequest;
use crate::cluster::structs::discovering_response::DiscoveringResponse;
use crate::cluster::structs::node_info::NodeInfo;
use crate::common::common::equal_bytes_check;
use crate::config::structs::configuration::Configuration;
use crate::net::enums::network_error::NetworkError;
use crate::net::structs::reactor::Reactor;
use crate::net::structs::session::Session;

impl ClusterController {
    pub fn new(config: Arc<Configuration>) -> ClusterController {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        ClusterController {
            config,
            tag: Uuid::new_v4().to_string(),
            network: Mutex::new(None),
            seeds: Mutex::new(Vec::new()),
            discovering: Arc::new(RwLock::new(HashMap::new())),
            root: RwLock::new(None),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            shutdown: Mutex::new(None),
            reactor: Mutex::new(None),
        }
    }

    /// Starts the network, creates the root node from the local bind
    /// address and arms the event and timer tasks.
    pub fn startup(self: &Arc<Self>) -> Result<(), NetworkError> {
        let mut events_rx = match self.events_rx.lock().take() {
            Some(events_rx) => events_rx,
            None => {
                return Err(NetworkError::Config(String::from("controller already started")));
            }
        };

        let reactor = Arc::new(Reactor::new("cluster")?);
        let network = match ClusterNetwork::new(self.tag.clone(), &self.config, self.events_tx.clone()) {
            Ok(network) => Arc::new(network),
            Err(error) => {
                return Err(NetworkError::Config(error.message));
            }
        };
        network.startup(&reactor)?;
        *self.network.lock() = Some(network.clone());

        let local = SocketAddr::new(network.bind_ip(), network.port());
        let root = Arc::new(ClusterNode::new(hash_socket_address(&local), Some(local)));
        info!("cluster root {} created for {}", root.hash(), local);
        *self.root.write() = Some(root);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        *self.shutdown.lock() = Some(shutdown_tx);

        let event_controller = self.clone();
        let mut event_shutdown = shutdown_rx.clone();
        reactor.spawn(async move {
            loop {
                tokio::select! {
                    _ = event_shutdown.changed() => {
                        return;
                    }
                    event = events_rx.recv() => {
                        match event {
                            Some(event) => event_controller.handle_event(event),
                            None => return,
                        }
                    }
                }
            }
        });

        let timer_controller = self.clone();
        let timer_network = network.clone();
        let auto_scan = self.config.cluster.auto_scan;
        let initial_delay = Duration::from_secs(self.config.cluster.initial_delay);
        let period = Duration::from_secs(self.config.cluster.scan_interval);
        let mut timer_shutdown = shutdown_rx.clone();
        reactor.spawn(async move {
            tokio::select! {
                _ = timer_shutdown.changed() => {
                    return;
                }
                _ = tokio::time::sleep(initial_delay) => {}
            }
            loop {
                if auto_scan {
                    timer_network.scan_network();
                }
                timer_controller.timer_handle();
                tokio::select! {
                    _ = timer_shutdown.changed() => {
                        return;
                    }
                    _ = tokio::time::sleep(period) => {}
                }
            }
        });

        *self.reactor.lock() = Some(reactor);
        Ok(())
    }

    /// Stops the timer and event tasks, the network and every connector,
    /// then drops the tree's children. Idempotent.
    pub fn shutdown(&self) {
        if let Some(shutdown) = self.shutdown.lock().take() {
            let _ = shutdown.send(true);
        }
        if let Some(network) = self.network.lock().clone() {
            network.shutdown();
        }
        let connectors: Vec<Arc<ClusterConnector>> = self.discovering.write().drain().map(|(_, connector)| connector).collect();
        for connector in connectors {
            connector.close();
        }
        if let Some(root) = self.root.read().clone() {
            root.clear();
        }
        if let Some(reactor) = self.reactor.lock().take() {
            reactor.shutdown();
        }
    }

    /// Adds seed addresses, deduplicated by raw octets.
    pub fn add_cluster_address(&self, addresses: Vec<IpAddr>) {
        for address in addresses {
            let bytes = address_octets(&address);
            let mut seeds = self.seeds.lock();
            let known = seeds.iter().any(|existing| equal_bytes_check(&address_octets(existing), &bytes));
            if !known {
                seeds.push(address);
            }
        }
    }

    /// Starts (or continues) discovery against each address, keeping at
    /// most one in-flight connector per address hash.
    pub fn do_discover(&self, addresses: Vec<SocketAddr>) {
        for address in addresses {
            let hash = hash_socket_address(&address);
            let connector = {
                let mut discovering = self.discovering.write();
                match discovering.get(&hash) {
                    Some(connector) => connector.clone(),
                    None => {
                        let connector = match ClusterConnector::new(address, hash, &self.config.network, self.events_tx.clone()) {
                            Ok(connector) => Arc::new(connector),
                            Err(build_error) => {
                                warn!("unable to build connector for {}: {}", address, build_error);
                                continue;
                            }
                        };
                        discovering.insert(hash, connector.clone());
                        connector
                    }
                }
            };
            match connector.discover(self.build_request()) {
                Ok(_) => {
                    info!("Start discovering: {}", address);
                }
                Err(discover_error) => {
                    info!("Discovering error: {}: {}", address, discover_error);
                    self.discovering.write().remove(&hash);
                }
            }
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn port(&self) -> u16 {
        self.network.lock().as_ref().map(|network| network.port()).unwrap_or(0)
    }

    pub fn root(&self) -> Option<Arc<ClusterNode>> {
        self.root.read().clone()
    }

    pub fn discovering_count(&self) -> usize {
        self.discovering.read().len()
    }

    pub fn seed_count(&self) -> usize {
        self.seeds.lock().len()
    }

    /// Periodic reconciliation: every seed whose hash is absent from the
    /// tree starts discovery at the preferred port.
    fn timer_handle(&self) {
        let preferred = self.config.cluster.preferred_port;
        let mut pending = Vec::new();
        {
            let seeds = self.seeds.lock();
            let root = self.root.read().clone();
            for seed in seeds.iter() {
                let address = SocketAddr::new(*seed, preferred);
                let hash = hash_socket_address(&address);
                let joined = root.as_ref().map(|root| root.contains(hash)).unwrap_or(false);
                if !joined {
                    pending.push(address);
                }
            }
        }
        if !pending.is_empty() {
            self.do_discover(pending);
        }
    }

    fn handle_event(&self, event: ClusterEvent) {
        match event {
            ClusterEvent::Network(NetworkEvent::Discovering { request, session }) => {
                self.handle_discovering(request, session);
            }
            ClusterEvent::Network(NetworkEvent::Candidate { address }) => {
                self.do_discover(vec![address]);
            }
            ClusterEvent::Connector(ConnectorEvent::Accepted { address, hash, root }) => {
                self.handle_accepted(address, hash, root);
            }
            ClusterEvent::Connector(ConnectorEvent::Rejected { address, hash }) => {
                self.handle_unresolved(address, hash, "rejected");
            }
            ClusterEvent::Connector(ConnectorEvent::Failed { address, hash }) => {
                self.handle_unresolved(address, hash, "failed");
            }
        }
    }

    /// Inbound side of the handshake: reject our own tag, accept anyone
    /// else and attach our root view to the reply.
    fn handle_discovering(&self, request: DiscoveringRequest, session: Arc<Session>) {
        let state = evaluate_discovery(&self.tag, &request.tag);
        let response = match state {
            ProtocolState::Reject => {
                info!("rejecting discovery from {}: tag matches our own", request.address);
                DiscoveringResponse { state, tag: self.tag.clone(), root: None }
            }
            ProtocolState::Accept => {
                debug!("accepting discovery from {} ({})", request.address, request.tag);
                DiscoveringResponse { state, tag: self.tag.clone(), root: self.root_info() }
            }
        };
        match response.to_message() {
            Ok(message) => session.write(message),
            Err(encode_error) => {
                debug!("unable to encode discovery response for {}: {}", request.address, encode_error);
            }
        }
    }

    fn handle_accepted(&self, address: SocketAddr, hash: u64, remote_root: Option<NodeInfo>) {
        let connector = self.discovering.write().remove(&hash);
        let node = Arc::new(match connector {
            Some(connector) => ClusterNode::with_connector(hash, Some(address), connector),
            None => ClusterNode::new(hash, Some(address)),
        });
        if let Some(root) = self.root.read().clone() {
            root.add_child(node);
            debug!("Add cluster node: {} (remote root {:?})", address, remote_root.map(|info| info.hash));
        }
    }

    fn handle_unresolved(&self, address: SocketAddr, hash: u64, outcome: &str) {
        if let Some(connector) = self.discovering.write().remove(&hash) {
            connector.close();
        }
        debug!("No cluster node: {} ({})", address, outcome);
        self.guess_discover(&address);
    }

    /// One heuristic retry for attempts that died on the preferred port.
    fn guess_discover(&self, failed: &SocketAddr) -> bool {
        match guess_address(failed, self.config.cluster.preferred_port) {
            Some(next) => {
                info!("Guess discovering address: {}", next);
                self.do_discover(vec![next]);
                true
            }
            None => false,
        }
    }

    fn root_info(&self) -> Option<NodeInfo> {
        self.root.read().as_ref().map(|root| NodeInfo {
            hash: root.hash(),
            address: root.address().map(|address| address.to_string()).unwrap_or_default(),
            children: root.child_hashes(),
        })
    }

    fn build_request(&self) -> DiscoveringRequest {
        let (address, port) = match self.network.lock().as_ref() {
            Some(network) => (network.bind_ip().to_string(), network.port()),
            None => (String::new(), 0),
        };
        DiscoveringRequest {
            tag: self.tag.clone(),
            address,
            port,
            root: self.root_info().unwrap_or_default(),
        }
    }
}

fn address_octets(address: &IpAddr) -> Vec<u8> {
    match address {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}
