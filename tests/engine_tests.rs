mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};
use common::{create_raw_test_config, create_test_config, wait_for_event, EchoSink, RecordingSink, SinkEvent};
use nodemesh::net::enums::connector_state::ConnectorState;
use nodemesh::net::enums::message_error_code::MessageErrorCode;
use nodemesh::net::structs::acceptor::Acceptor;
use nodemesh::net::structs::connector::Connector;
use nodemesh::net::structs::message::Message;
use nodemesh::net::structs::reactor::Reactor;

#[test]
fn test_echo_round_trip_with_marks() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    connector.connect(address).unwrap();

    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));
    assert!(connector.is_connected());

    connector.write(Message::from("hi"));
    let sent = wait_for_event(&events, |event| matches!(event, SinkEvent::Sent(_)));
    assert_eq!(sent, SinkEvent::Sent(b"hi".to_vec()));
    let received = wait_for_event(&events, |event| matches!(event, SinkEvent::Received(_)));
    assert_eq!(received, SinkEvent::Received(b"hi".to_vec()));

    connector.disconnect();
    acceptor.shutdown();
}

#[test]
fn test_messages_arrive_in_fifo_order() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    connector.connect(address).unwrap();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));

    for index in 0u8..10 {
        connector.write(Message::new(vec![index]));
    }
    let mut echoed = Vec::new();
    while echoed.len() < 10 {
        if let SinkEvent::Received(payload) = wait_for_event(&events, |event| matches!(event, SinkEvent::Received(_))) {
            echoed.extend(payload);
        }
    }
    assert_eq!(echoed, (0u8..10).collect::<Vec<u8>>());

    connector.disconnect();
    acceptor.shutdown();
}

#[test]
fn test_raw_mode_passthrough_end_to_end() {
    let config = create_raw_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    connector.connect(address).unwrap();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));

    connector.write(Message::from("raw bytes"));
    let received = wait_for_event(&events, |event| matches!(event, SinkEvent::Received(_)));
    assert_eq!(received, SinkEvent::Received(b"raw bytes".to_vec()));

    connector.disconnect();
    acceptor.shutdown();
}

#[test]
fn test_peer_close_fires_session_closed_exactly_once() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    connector.connect(address).unwrap();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));

    // the peer closes every session; the connector sees EOF
    acceptor.shutdown();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Closed(_)));
    wait_for_event(&events, |event| matches!(event, SinkEvent::Destroyed(_)));

    // a write after the loss has no observable effect
    connector.write(Message::from("into the void"));

    // disconnect must not re-fire the closed notification
    connector.disconnect();
    std::thread::sleep(Duration::from_millis(100));
    let closed_again = events.try_iter().filter(|event| matches!(event, SinkEvent::Closed(_))).count();
    assert_eq!(closed_again, 0);
}

#[test]
fn test_connect_to_dead_port_reports_error() {
    let config = create_test_config();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    // bind-then-drop guarantees the port is free but unserved
    let dead = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    connector.connect(dead).unwrap();

    let error = wait_for_event(&events, |event| matches!(event, SinkEvent::Error(_)));
    assert_eq!(error, SinkEvent::Error(MessageErrorCode::ConnectTimeout));
    wait_for_event(&events, |event| matches!(event, SinkEvent::Destroyed(_)));

    connector.disconnect();
    assert_eq!(connector.state(), ConnectorState::Disconnected);
}

#[test]
fn test_disconnect_returns_within_the_bound() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    connector.connect(address).unwrap();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));

    let started = Instant::now();
    connector.disconnect();
    assert!(started.elapsed() < Duration::from_millis(3500), "disconnect exceeded the shutdown bound");
    assert_eq!(connector.state(), ConnectorState::Disconnected);

    // a second disconnect on a dead instance is a no-op
    connector.disconnect();
    acceptor.shutdown();
}

#[test]
fn test_reconnect_after_disconnect() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();

    connector.connect(address).unwrap();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));
    connector.disconnect();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Destroyed(_)));

    connector.connect(address).unwrap();
    wait_for_event(&events, |event| matches!(event, SinkEvent::Opened(_)));
    connector.write(Message::from("second life"));
    let received = wait_for_event(&events, |event| matches!(event, SinkEvent::Received(_)));
    assert_eq!(received, SinkEvent::Received(b"second life".to_vec()));

    connector.disconnect();
    acceptor.shutdown();
}

#[test]
fn test_connectors_share_a_reactor() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let reactor = Arc::new(Reactor::new("test").unwrap());
    let (sink_a, events_a) = RecordingSink::create();
    let (sink_b, events_b) = RecordingSink::create();
    let connector_a = Connector::with_reactor(&config.network, sink_a, reactor.clone()).unwrap();
    let connector_b = Connector::with_reactor(&config.network, sink_b, reactor.clone()).unwrap();

    connector_a.connect(address).unwrap();
    connector_b.connect(address).unwrap();
    wait_for_event(&events_a, |event| matches!(event, SinkEvent::Opened(_)));
    wait_for_event(&events_b, |event| matches!(event, SinkEvent::Opened(_)));

    connector_a.write(Message::from("from a"));
    connector_b.write(Message::from("from b"));
    assert_eq!(
        wait_for_event(&events_a, |event| matches!(event, SinkEvent::Received(_))),
        SinkEvent::Received(b"from a".to_vec())
    );
    assert_eq!(
        wait_for_event(&events_b, |event| matches!(event, SinkEvent::Received(_))),
        SinkEvent::Received(b"from b".to_vec())
    );

    connector_a.disconnect();
    connector_b.disconnect();
    acceptor.shutdown();
    reactor.shutdown();
}

#[test]
fn test_session_lifecycle_order() {
    let config = create_test_config();

    let acceptor = Acceptor::new(&config.network, Arc::new(EchoSink)).unwrap();
    let address = acceptor.bind("127.0.0.1:0".parse().unwrap()).unwrap();

    let (sink, events) = RecordingSink::create();
    let connector = Connector::new(&config.network, sink).unwrap();
    connector.connect(address).unwrap();

    let mut seen = Vec::new();
    loop {
        let event = events.recv_timeout(Duration::from_secs(5)).expect("lifecycle stalled");
        let is_opened = matches!(event, SinkEvent::Opened(_));
        seen.push(event);
        if is_opened {
            break;
        }
    }
    connector.disconnect();
    loop {
        let event = events.recv_timeout(Duration::from_secs(5)).expect("lifecycle stalled");
        let is_destroyed = matches!(event, SinkEvent::Destroyed(_));
        seen.push(event);
        if is_destroyed {
            break;
        }
    }

    let position = |check: fn(&SinkEvent) -> bool| seen.iter().position(check).unwrap();
    let created = position(|event| matches!(event, SinkEvent::Created(_)));
    let opened = position(|event| matches!(event, SinkEvent::Opened(_)));
    let closed = position(|event| matches!(event, SinkEvent::Closed(_)));
    let destroyed = position(|event| matches!(event, SinkEvent::Destroyed(_)));
    assert!(created < opened && opened < closed && closed < destroyed);
    assert_eq!(seen.iter().filter(|event| matches!(event, SinkEvent::Closed(_))).count(), 1);

    acceptor.shutdown();
}
