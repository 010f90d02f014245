use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use log::{debug, error, warn};
use parking_lot::{Mutex, RwLock};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::sync::watch;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::network_config::NetworkConfig;
use crate::net::enums::network_error::NetworkError;
use crate::net::net::{run_acceptor_loop, SHUTDOWN_POLL_INTERVAL, SHUTDOWN_POLL_LIMIT};
use crate::net::structs::acceptor::Acceptor;
use crate::net::structs::message::Message;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

impl Acceptor {
    pub fn new(config: &NetworkConfig, handler: Arc<dyn MessageHandler>) -> Result<Acceptor, CustomError> {
        Ok(Acceptor {
            buffer_size: config.buffer_size,
            head_mark: config.head_mark_bytes()?,
            tail_mark: config.tail_mark_bytes()?,
            handler,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            local_address: Mutex::new(None),
            shutdown: Mutex::new(None),
            running: Arc::new(AtomicBool::new(false)),
            loop_thread: Mutex::new(None),
        })
    }

    /// Binds the listener and starts the multiplexing loop on its own
    /// thread. Returns the actual bound address (relevant for port 0).
    pub fn bind(&self, address: SocketAddr) -> Result<SocketAddr, NetworkError> {
        if self.running.load(Ordering::SeqCst) {
            self.shutdown();
        }

        let listener = open_listener(&address)?;
        let local_address = listener.local_addr()?;
        *self.local_address.lock() = Some(local_address);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        *self.shutdown.lock() = Some(shutdown_tx);
        self.running.store(true, Ordering::SeqCst);

        let handler = self.handler.clone();
        let sessions = self.sessions.clone();
        let head_mark = self.head_mark.clone();
        let tail_mark = self.tail_mark.clone();
        let buffer_size = self.buffer_size;
        let running = self.running.clone();
        let thread_running = self.running.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("acceptor[{}]", local_address))
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => runtime,
                    Err(build_error) => {
                        error!("unable to build acceptor runtime: {}", build_error);
                        thread_running.store(false, Ordering::SeqCst);
                        return;
                    }
                };
                runtime.block_on(run_acceptor_loop(listener, handler, sessions, head_mark, tail_mark, buffer_size, shutdown_rx));
                running.store(false, Ordering::SeqCst);
            });
        match spawned {
            Ok(handle) => {
                *self.loop_thread.lock() = Some(handle);
            }
            Err(error) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(NetworkError::Socket(error));
            }
        }

        Ok(local_address)
    }

    /// Stops the loop, closes every live session and clears the session
    /// map. Bounded like `Connector::disconnect`, idempotent.
    pub fn shutdown(&self) {
        if let Some(shutdown) = self.shutdown.lock().take() {
            let _ = shutdown.send(true);
        }

        let mut forced = false;
        let mut count = 0;
        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(SHUTDOWN_POLL_INTERVAL);
            count += 1;
            if count >= SHUTDOWN_POLL_LIMIT {
                warn!("acceptor loop for {:?} did not stop in time, forcing termination", *self.local_address.lock());
                forced = true;
                self.running.store(false, Ordering::SeqCst);
                break;
            }
        }
        if let Some(handle) = self.loop_thread.lock().take() {
            if forced {
                drop(handle);
            } else if let Err(error) = handle.join() {
                debug!("acceptor loop thread panicked: {:?}", error);
            }
        }

        // sessions still in the map were cut off by the loop teardown and
        // never saw a peer close; notify them here, at most once each
        let sessions: Vec<Arc<Session>> = self.sessions.write().drain().map(|(_, session)| session).collect();
        for session in sessions {
            if session.mark_closed() {
                self.handler.session_closed(&session);
            }
            self.handler.session_destroyed(&session);
        }
    }

    /// Enqueues a message on one of this acceptor's sessions.
    pub fn write(&self, session: &Arc<Session>, message: Message) {
        session.write(message);
    }

    pub fn session(&self, address: &SocketAddr) -> Option<Arc<Session>> {
        self.sessions.read().get(address).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn local_address(&self) -> Option<SocketAddr> {
        *self.local_address.lock()
    }
}

impl Drop for Acceptor {
    fn drop(&mut self) {
        if self.running.load(Ordering::SeqCst) {
            self.shutdown();
        }
    }
}

fn open_listener(address: &SocketAddr) -> io::Result<std::net::TcpListener> {
    let domain = if address.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&(*address).into())?;
    socket.listen(128)?;
    Ok(socket.into())
}
