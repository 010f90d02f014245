use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use crate::cluster::enums::cluster_event::{ClusterEvent, NetworkEvent};
use crate::cluster::structs::beacon::Beacon;
use crate::cluster::structs::cluster_network::ClusterNetwork;
use crate::cluster::structs::inbound_sink::InboundSink;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;
use crate::net::enums::network_error::NetworkError;
use crate::net::structs::acceptor::Acceptor;
use crate::net::structs::reactor::Reactor;

impl ClusterNetwork {
    pub fn new(tag: String, config: &Configuration, events: UnboundedSender<ClusterEvent>) -> Result<ClusterNetwork, CustomError> {
        let bind_address = match config.cluster.bind_address.parse::<IpAddr>() {
            Ok(address) => address,
            Err(_) => {
                return Err(CustomError::new(&format!("invalid cluster bind address: '{}'", config.cluster.bind_address)));
            }
        };
        let acceptor = Arc::new(Acceptor::new(&config.network, Arc::new(InboundSink { events: events.clone() }))?);
        Ok(ClusterNetwork {
            tag,
            bind_address,
            preferred_port: config.cluster.preferred_port,
            port_range: config.cluster.port_range,
            events,
            acceptor,
            port: AtomicU16::new(0),
            beacon: Mutex::new(None),
            shutdown: Mutex::new(None),
        })
    }

    /// Binds the acceptor on the first free port of the discovery range
    /// and arms the beacon scanner. A missing beacon socket only disables
    /// scanning; a full range of occupied TCP ports fails the startup.
    pub fn startup(&self, reactor: &Arc<Reactor>) -> Result<(), NetworkError> {
        let mut bound = None;
        for offset in 0..self.port_range {
            let candidate = SocketAddr::new(self.bind_address, self.preferred_port + offset);
            match self.acceptor.bind(candidate) {
                Ok(address) => {
                    bound = Some(address);
                    break;
                }
                Err(bind_error) => {
                    debug!("cluster port {} unavailable: {}", candidate, bind_error);
                }
            }
        }
        let bound = match bound {
            Some(address) => address,
            None => {
                return Err(NetworkError::NoFreePort(self.preferred_port, self.preferred_port + self.port_range));
            }
        };
        self.port.store(bound.port(), Ordering::SeqCst);
        info!("cluster acceptor listening on {}", bound);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        *self.shutdown.lock() = Some(shutdown_tx);

        match open_beacon_socket(self.bind_address, self.preferred_port, self.port_range) {
            Ok(socket) => {
                match socket.try_clone() {
                    Ok(listener) => {
                        *self.beacon.lock() = Some(socket);
                        reactor.spawn(run_beacon_loop(listener, self.tag.clone(), bound.port(), self.events.clone(), shutdown_rx));
                    }
                    Err(clone_error) => {
                        warn!("beacon scanner disabled: {}", clone_error);
                    }
                }
            }
            Err(open_error) => {
                warn!("beacon scanner disabled: {}", open_error);
            }
        }

        Ok(())
    }

    /// Broadcasts a beacon across the discovery port range. Peers that
    /// hear it surface as candidates on both sides.
    pub fn scan_network(&self) {
        let guard = self.beacon.lock();
        let socket = match guard.as_ref() {
            Some(socket) => socket,
            None => {
                debug!("beacon scanner not available, skipping rescan");
                return;
            }
        };
        let beacon = Beacon {
            tag: self.tag.clone(),
            port: self.port(),
            reply: false,
        };
        let payload = match beacon.to_bytes() {
            Ok(payload) => payload,
            Err(encode_error) => {
                debug!("unable to encode beacon: {}", encode_error);
                return;
            }
        };
        for offset in 0..self.port_range {
            let target = SocketAddr::new(IpAddr::V4(Ipv4Addr::BROADCAST), self.preferred_port + offset);
            if let Err(send_error) = socket.send_to(&payload, target) {
                if send_error.kind() != io::ErrorKind::WouldBlock {
                    debug!("beacon broadcast to {} failed: {}", target, send_error);
                }
            }
        }
    }

    /// Closes the scanner and the acceptor with all its sessions. Idempotent.
    pub fn shutdown(&self) {
        if let Some(shutdown) = self.shutdown.lock().take() {
            let _ = shutdown.send(true);
        }
        *self.beacon.lock() = None;
        self.acceptor.shutdown();
    }

    pub fn port(&self) -> u16 {
        self.port.load(Ordering::SeqCst)
    }

    pub fn bind_ip(&self) -> IpAddr {
        self.bind_address
    }

    pub fn preferred_port(&self) -> u16 {
        self.preferred_port
    }
}

/// Listens for beacons, surfaces foreign ones as candidates, and answers
/// scans with a directed reply beacon so both sides learn each other.
async fn run_beacon_loop(
    socket: std::net::UdpSocket,
    tag: String,
    advertised_port: u16,
    events: UnboundedSender<ClusterEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let socket = match tokio::net::UdpSocket::from_std(socket) {
        Ok(socket) => socket,
        Err(register_error) => {
            error!("unable to register beacon socket: {}", register_error);
            return;
        }
    };
    let mut buffer = [0u8; 512];
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                return;
            }
            received = socket.recv_from(&mut buffer) => {
                match received {
                    Ok((read, source)) => {
                        let beacon = match Beacon::from_bytes(&buffer[..read]) {
                            Ok(beacon) => beacon,
                            Err(_) => {
                                debug!("garbled beacon from {}", source);
                                continue;
                            }
                        };
                        if beacon.tag == tag {
                            // our own broadcast echoed back
                            continue;
                        }
                        let candidate = SocketAddr::new(source.ip(), beacon.port);
                        debug!("beacon from {} advertising {}", source, candidate);
                        let _ = events.send(ClusterEvent::Network(NetworkEvent::Candidate { address: candidate }));
                        if !beacon.reply {
                            let reply = Beacon { tag: tag.clone(), port: advertised_port, reply: true };
                            match reply.to_bytes() {
                                Ok(payload) => {
                                    if let Err(reply_error) = socket.send_to(&payload, source).await {
                                        debug!("beacon reply to {} failed: {}", source, reply_error);
                                    }
                                }
                                Err(encode_error) => {
                                    debug!("unable to encode beacon reply: {}", encode_error);
                                }
                            }
                        }
                    }
                    Err(receive_error) => {
                        debug!("beacon receive failed: {}", receive_error);
                    }
                }
            }
        }
    }
}

fn open_beacon_socket(bind_address: IpAddr, preferred_port: u16, port_range: u16) -> io::Result<std::net::UdpSocket> {
    let domain = if bind_address.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_broadcast(true)?;
    socket.set_nonblocking(true)?;
    let mut last_error = io::Error::other("empty discovery port range");
    for offset in 0..port_range {
        match socket.bind(&SocketAddr::new(bind_address, preferred_port + offset).into()) {
            Ok(_) => return Ok(socket.into()),
            Err(bind_error) => {
                last_error = bind_error;
            }
        }
    }
    Err(last_error)
}
