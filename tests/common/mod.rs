#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use crossbeam::channel::{unbounded, Receiver, Sender};
use nodemesh::config::structs::configuration::Configuration;
use nodemesh::net::enums::message_error_code::MessageErrorCode;
use nodemesh::net::structs::message::Message;
use nodemesh::net::structs::session::Session;
use nodemesh::net::traits::message_handler::MessageHandler;

pub const WAIT: Duration = Duration::from_secs(5);

/// Delimited-mode engine configuration bound to loopback tests.
pub fn create_test_config() -> Configuration {
    let mut config = Configuration::init();
    config.network.connect_timeout = 2000;
    config.cluster.bind_address = String::from("127.0.0.1");
    config.cluster.auto_scan = false;
    config
}

/// Raw-mode variant of the test configuration.
pub fn create_raw_test_config() -> Configuration {
    let mut config = create_test_config();
    config.network.head_mark = None;
    config.network.tail_mark = None;
    config
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SinkEvent {
    Created(SocketAddr),
    Opened(SocketAddr),
    Closed(SocketAddr),
    Destroyed(SocketAddr),
    Received(Vec<u8>),
    Sent(Vec<u8>),
    Error(MessageErrorCode),
}

/// Event sink that forwards every callback to a channel for assertions.
pub struct RecordingSink {
    events: Sender<SinkEvent>,
}

impl RecordingSink {
    pub fn create() -> (Arc<RecordingSink>, Receiver<SinkEvent>) {
        let (events, receiver) = unbounded();
        (Arc::new(RecordingSink { events }), receiver)
    }
}

impl MessageHandler for RecordingSink {
    fn session_created(&self, session: &Arc<Session>) {
        let _ = self.events.send(SinkEvent::Created(session.address()));
    }

    fn session_opened(&self, session: &Arc<Session>) {
        let _ = self.events.send(SinkEvent::Opened(session.address()));
    }

    fn session_closed(&self, session: &Arc<Session>) {
        let _ = self.events.send(SinkEvent::Closed(session.address()));
    }

    fn session_destroyed(&self, session: &Arc<Session>) {
        let _ = self.events.send(SinkEvent::Destroyed(session.address()));
    }

    fn message_received(&self, _session: &Arc<Session>, message: Message) {
        let _ = self.events.send(SinkEvent::Received(message.into_bytes()));
    }

    fn message_sent(&self, _session: &Arc<Session>, message: Message) {
        let _ = self.events.send(SinkEvent::Sent(message.into_bytes()));
    }

    fn error_occurred(&self, code: MessageErrorCode, _session: &Arc<Session>) {
        let _ = self.events.send(SinkEvent::Error(code));
    }
}

/// Event sink that echoes every received message back on its session.
pub struct EchoSink;

impl MessageHandler for EchoSink {
    fn session_created(&self, _session: &Arc<Session>) {}

    fn session_opened(&self, _session: &Arc<Session>) {}

    fn session_closed(&self, _session: &Arc<Session>) {}

    fn session_destroyed(&self, _session: &Arc<Session>) {}

    fn message_received(&self, session: &Arc<Session>, message: Message) {
        session.write(message);
    }

    fn message_sent(&self, _session: &Arc<Session>, _message: Message) {}

    fn error_occurred(&self, _code: MessageErrorCode, _session: &Arc<Session>) {}
}

/// Blocks until `receiver` yields an event matching `matches`, failing the
/// test after [`WAIT`]. Non-matching events are discarded.
pub fn wait_for_event(receiver: &Receiver<SinkEvent>, matches: impl Fn(&SinkEvent) -> bool) -> SinkEvent {
    let deadline = std::time::Instant::now() + WAIT;
    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        match receiver.recv_timeout(remaining) {
            Ok(event) => {
                if matches(&event) {
                    return event;
                }
            }
            Err(_) => panic!("expected event did not arrive within {:?}", WAIT),
        }
    }
}

/// Polls `check` until it returns true, failing the test after `limit`.
pub fn wait_until(limit: Duration, check: impl Fn() -> bool) {
    let deadline = std::time::Instant::now() + limit;
    while std::time::Instant::now() < deadline {
        if check() {
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    panic!("condition not reached within {:?}", limit);
}
