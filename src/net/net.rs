use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use crossbeam::atomic::AtomicCell;
use log::{debug, error, info};
use parking_lot::RwLock;
use tokio::io::Interest;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::watch;
use crate::net::enums::connector_state::ConnectorState;
use crate::net::enums::message_error_code::MessageErrorCode;
use crate::net::structs::framing_codec::FramingCodec;
use crate::net::structs::session::Session;
use crate::net::traits::message_handler::MessageHandler;

/// Increment of the bounded shutdown wait.
pub const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Number of increments before a shutdown gives up on its loop (~3s).
pub const SHUTDOWN_POLL_LIMIT: u32 = 300;

/// Fires `session_closed` through the session's closed flag, at most once.
pub(crate) fn close_session(handler: &Arc<dyn MessageHandler>, session: &Arc<Session>) {
    if session.mark_closed() {
        handler.session_closed(session);
    }
}

/// Connector loop body: finish the non-blocking connect under the timeout,
/// then drive the session until it closes or the loop is cancelled.
pub(crate) async fn run_connector_loop(
    socket: std::net::TcpStream,
    address: SocketAddr,
    connect_timeout: Duration,
    state: Arc<AtomicCell<ConnectorState>>,
    handler: Arc<dyn MessageHandler>,
    session: Arc<Session>,
    mut codec: FramingCodec,
    buffer_size: usize,
    mut shutdown: watch::Receiver<bool>,
) {
    handler.session_created(&session);

    let tcp_socket = TcpSocket::from_std_stream(socket);
    let outcome = tokio::select! {
        _ = shutdown.changed() => None,
        connected = tokio::time::timeout(connect_timeout, tcp_socket.connect(address)) => Some(connected),
    };

    match outcome {
        None => {
            debug!("connect to {} cancelled", address);
        }
        Some(Ok(Ok(stream))) => {
            state.store(ConnectorState::Connected);
            handler.session_opened(&session);
            drive_session(&stream, &handler, &session, &mut codec, buffer_size, &mut shutdown).await;
        }
        Some(Ok(Err(error))) => {
            debug!("connect to {} failed: {}", address, error);
            handler.error_occurred(MessageErrorCode::ConnectTimeout, &session);
        }
        Some(Err(_elapsed)) => {
            debug!("connect to {} timed out after {:?}", address, connect_timeout);
            handler.error_occurred(MessageErrorCode::ConnectTimeout, &session);
        }
    }

    state.store(ConnectorState::Disconnected);
    handler.session_destroyed(&session);
}

/// Acceptor loop body: accept until cancelled, one task per session on
/// the same current-thread runtime.
pub(crate) async fn run_acceptor_loop(
    listener: std::net::TcpListener,
    handler: Arc<dyn MessageHandler>,
    sessions: Arc<RwLock<HashMap<SocketAddr, Arc<Session>>>>,
    head_mark: Option<Vec<u8>>,
    tail_mark: Option<Vec<u8>>,
    buffer_size: usize,
    mut shutdown: watch::Receiver<bool>,
) {
    let listener = match TcpListener::from_std(listener) {
        Ok(listener) => listener,
        Err(error) => {
            error!("unable to register listener: {}", error);
            return;
        }
    };
    // template receiver handed to every session task
    let shutdown_template = shutdown.clone();

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                return;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        configure_accepted(&stream, buffer_size);
                        let session = Arc::new(Session::new(peer));
                        sessions.write().insert(peer, session.clone());
                        info!("session accepted from {}", peer);

                        let handler = handler.clone();
                        let sessions = sessions.clone();
                        let mut codec = FramingCodec::new(head_mark.clone(), tail_mark.clone());
                        let mut shutdown = shutdown_template.clone();
                        tokio::spawn(async move {
                            handler.session_created(&session);
                            handler.session_opened(&session);
                            drive_session(&stream, &handler, &session, &mut codec, buffer_size, &mut shutdown).await;
                            close_session(&handler, &session);
                            sessions.write().remove(&peer);
                            handler.session_destroyed(&session);
                        });
                    }
                    Err(error) => {
                        debug!("accept failed: {}", error);
                    }
                }
            }
        }
    }
}

fn configure_accepted(stream: &TcpStream, buffer_size: usize) {
    let sock_ref = socket2::SockRef::from(stream);
    if let Err(error) = sock_ref.set_keepalive(true) {
        debug!("unable to enable keep-alive: {}", error);
    }
    if let Err(error) = sock_ref.set_recv_buffer_size(buffer_size) {
        debug!("unable to size receive buffer: {}", error);
    }
    if let Err(error) = sock_ref.set_send_buffer_size(buffer_size) {
        debug!("unable to size send buffer: {}", error);
    }
}

/// The readiness loop of one established session.
///
/// Blocks only in the readiness wait; woken by the shutdown channel and
/// by the session's outbound queue. Returns when the session closes or
/// the loop is cancelled.
pub(crate) async fn drive_session(
    stream: &TcpStream,
    handler: &Arc<dyn MessageHandler>,
    session: &Arc<Session>,
    codec: &mut FramingCodec,
    buffer_size: usize,
    shutdown: &mut watch::Receiver<bool>,
) {
    let mut buffer = vec![0u8; buffer_size];
    loop {
        let idle = !session.has_outbound();
        let interest = if idle {
            Interest::READABLE
        } else {
            Interest::READABLE | Interest::WRITABLE
        };
        tokio::select! {
            _ = shutdown.changed() => {
                return;
            }
            _ = session.outbound_added(), if idle => {}
            ready = stream.ready(interest) => {
                match ready {
                    Ok(ready) => {
                        if ready.is_readable() && !receive(stream, handler, session, codec, &mut buffer) {
                            return;
                        }
                        if ready.is_writable() {
                            send(stream, handler, session, codec).await;
                        }
                    }
                    Err(error) => {
                        debug!("readiness wait on {} failed: {}", session.address(), error);
                        handler.error_occurred(MessageErrorCode::ReadFailed, session);
                        close_session(handler, session);
                        return;
                    }
                }
            }
        }
    }
}

/// Inner read drain. Returns false when the session is finished: a peer
/// close or an I/O fault notifies `session_closed` exactly once and
/// permanently stops the loop; `WouldBlock` just ends the drain.
fn receive(
    stream: &TcpStream,
    handler: &Arc<dyn MessageHandler>,
    session: &Arc<Session>,
    codec: &mut FramingCodec,
    buffer: &mut [u8],
) -> bool {
    loop {
        match stream.try_read(buffer) {
            Ok(0) => {
                debug!("peer {} closed the connection", session.address());
                close_session(handler, session);
                return false;
            }
            Ok(read) => {
                for message in codec.decode(&buffer[..read]) {
                    handler.message_received(session, message);
                }
            }
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                return true;
            }
            Err(error) => {
                debug!("read on {} failed: {}", session.address(), error);
                handler.error_occurred(MessageErrorCode::ReadFailed, session);
                close_session(handler, session);
                return false;
            }
        }
    }
}

/// Drains the outbound queue in FIFO order, framing each message and
/// firing `message_sent` per message. A write fault reports
/// `WriteFailed` and abandons the remainder of the drain; the read path
/// notices a dead connection on its next turn.
async fn send(
    stream: &TcpStream,
    handler: &Arc<dyn MessageHandler>,
    session: &Arc<Session>,
    codec: &FramingCodec,
) {
    while let Some(message) = session.pop_outbound() {
        let frame = codec.encode(&message);
        let mut written = 0;
        while written < frame.len() {
            match stream.try_write(&frame[written..]) {
                Ok(sent) => {
                    written += sent;
                }
                Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                    if let Err(error) = stream.writable().await {
                        debug!("write wait on {} failed: {}", session.address(), error);
                        handler.error_occurred(MessageErrorCode::WriteFailed, session);
                        return;
                    }
                }
                Err(error) => {
                    debug!("write on {} failed: {}", session.address(), error);
                    handler.error_occurred(MessageErrorCode::WriteFailed, session);
                    return;
                }
            }
        }
        handler.message_sent(session, message);
    }
}
