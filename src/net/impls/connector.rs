use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crossbeam::atomic::AtomicCell;
use log::{debug, error, warn};
use parking_lot::Mutex;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::sync::watch;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::network_config::NetworkConfig;
use crate::net::enums::connector_state::ConnectorState;
use crate::net::enums::message_error_code::MessageErrorCode;
use crate::net::enums::network_error::NetworkError;
use crate::net::net::{run_connector_loop, SHUTDOWN_POLL_INTERVAL, SHUTDOWN_POLL_LIMIT};
use crate::net::structs::connector::Connector;
use crate::net::structs::framing_codec::FramingCodec;
use crate::net::structs::message::Message;
use crate::net::structs::reactor::Reactor;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

impl Connector {
    pub fn new(config: &NetworkConfig, handler: Arc<dyn MessageHandler>) -> Result<Connector, CustomError> {
        Self::build(config, handler, None)
    }

    /// Runs the readiness loop on a shared [`Reactor`] instead of a
    /// dedicated thread.
    pub fn with_reactor(config: &NetworkConfig, handler: Arc<dyn MessageHandler>, reactor: Arc<Reactor>) -> Result<Connector, CustomError> {
        Self::build(config, handler, Some(reactor))
    }

    fn build(config: &NetworkConfig, handler: Arc<dyn MessageHandler>, reactor: Option<Arc<Reactor>>) -> Result<Connector, CustomError> {
        Ok(Connector {
            connect_timeout: config.connect_timeout(),
            buffer_size: config.buffer_size,
            head_mark: config.head_mark_bytes()?,
            tail_mark: config.tail_mark_bytes()?,
            handler,
            reactor,
            state: Arc::new(AtomicCell::new(ConnectorState::Disconnected)),
            session: Mutex::new(None),
            address: Mutex::new(None),
            shutdown: Mutex::new(None),
            running: Arc::new(AtomicBool::new(false)),
            loop_thread: Mutex::new(None),
            loop_task: Mutex::new(None),
        })
    }

    /// Opens a non-blocking channel to `address` and starts the loop.
    ///
    /// Already connected to the same address: succeeds as a no-op. A
    /// still-live previous attempt is torn down first. Setup failures
    /// report `SocketFailed` and return an error without starting a loop.
    pub fn connect(&self, address: SocketAddr) -> Result<(), NetworkError> {
        if self.state.load() == ConnectorState::Connected && *self.address.lock() == Some(address) {
            warn!("Connector has connected to {}", address);
            return Ok(());
        }
        if self.running.load(Ordering::SeqCst) {
            self.teardown(false);
        }

        *self.address.lock() = Some(address);
        let session = Arc::new(Session::new(address));
        *self.session.lock() = Some(session.clone());

        let socket = match open_socket(&address, self.buffer_size) {
            Ok(socket) => socket,
            Err(error) => {
                debug!("socket setup for {} failed: {}", address, error);
                self.handler.error_occurred(MessageErrorCode::SocketFailed, &session);
                return Err(NetworkError::Socket(error));
            }
        };

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        *self.shutdown.lock() = Some(shutdown_tx);
        self.state.store(ConnectorState::Connecting);
        self.running.store(true, Ordering::SeqCst);

        let codec = FramingCodec::new(self.head_mark.clone(), self.tail_mark.clone());
        let state = self.state.clone();
        let handler = self.handler.clone();
        let running = self.running.clone();
        let connect_timeout = self.connect_timeout;
        let buffer_size = self.buffer_size;
        let loop_session = session.clone();
        let loop_future = async move {
            run_connector_loop(socket, address, connect_timeout, state, handler, loop_session, codec, buffer_size, shutdown_rx).await;
            running.store(false, Ordering::SeqCst);
        };

        match &self.reactor {
            Some(reactor) => {
                *self.loop_task.lock() = Some(reactor.spawn(loop_future));
            }
            None => {
                let thread_running = self.running.clone();
                let spawned = std::thread::Builder::new()
                    .name(format!("connector[{}]", address))
                    .spawn(move || {
                        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                            Ok(runtime) => runtime,
                            Err(build_error) => {
                                error!("unable to build connector runtime: {}", build_error);
                                thread_running.store(false, Ordering::SeqCst);
                                return;
                            }
                        };
                        runtime.block_on(loop_future);
                    });
                match spawned {
                    Ok(handle) => {
                        *self.loop_thread.lock() = Some(handle);
                    }
                    Err(error) => {
                        self.running.store(false, Ordering::SeqCst);
                        self.state.store(ConnectorState::Disconnected);
                        self.handler.error_occurred(MessageErrorCode::SocketFailed, &session);
                        return Err(NetworkError::Socket(error));
                    }
                }
            }
        }

        Ok(())
    }

    /// Stops the loop and releases the channel.
    ///
    /// Fires `session_closed` when currently connected, wakes the blocked
    /// readiness wait, and joins the loop within the shutdown bound. Safe
    /// to call on an already disconnected instance.
    pub fn disconnect(&self) {
        self.teardown(true);
    }

    /// Enqueues a message for the owning loop. Callable from any thread;
    /// a no-op once the session has closed.
    pub fn write(&self, message: Message) {
        if let Some(session) = self.session.lock().clone() {
            session.write(message);
        }
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.session.lock().clone()
    }

    pub fn address(&self) -> Option<SocketAddr> {
        *self.address.lock()
    }

    pub fn state(&self) -> ConnectorState {
        self.state.load()
    }

    pub fn is_connected(&self) -> bool {
        self.state.load() == ConnectorState::Connected
    }

    fn teardown(&self, notify_closed: bool) {
        let was_connected = self.state.swap(ConnectorState::Closing) == ConnectorState::Connected;
        // closed must be observable before the loop can fire destroyed
        if notify_closed && was_connected {
            if let Some(session) = self.session.lock().clone() {
                if session.mark_closed() {
                    self.handler.session_closed(&session);
                }
            }
        }
        if let Some(shutdown) = self.shutdown.lock().take() {
            let _ = shutdown.send(true);
        }
        self.join_loop();
        self.state.store(ConnectorState::Disconnected);
    }

    /// Waits for the loop to acknowledge the shutdown signal, bounded by
    /// `SHUTDOWN_POLL_LIMIT` increments, then forces termination: a
    /// reactor task is aborted, a dedicated thread is detached (it exits
    /// on its own the moment its readiness wait wakes).
    fn join_loop(&self) {
        let mut forced = false;
        let mut count = 0;
        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(SHUTDOWN_POLL_INTERVAL);
            count += 1;
            if count >= SHUTDOWN_POLL_LIMIT {
                warn!("connector loop for {:?} did not stop in time, forcing termination", *self.address.lock());
                forced = true;
                self.running.store(false, Ordering::SeqCst);
                break;
            }
        }
        if let Some(task) = self.loop_task.lock().take() {
            task.abort();
        }
        if let Some(handle) = self.loop_thread.lock().take() {
            if forced {
                drop(handle);
            } else if let Err(error) = handle.join() {
                debug!("connector loop thread panicked: {:?}", error);
            }
        }
    }
}

impl Drop for Connector {
    fn drop(&mut self) {
        if self.running.load(Ordering::SeqCst) {
            self.teardown(false);
        }
    }
}

fn open_socket(address: &SocketAddr, buffer_size: usize) -> io::Result<std::net::TcpStream> {
    let domain = if address.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_keepalive(true)?;
    socket.set_recv_buffer_size(buffer_size)?;
    socket.set_send_buffer_size(buffer_size)?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}
