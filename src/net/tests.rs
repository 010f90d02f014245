#[cfg(test)]
mod net_tests {
    mod message_tests {
        use crate::net::structs::message::Message;

        #[test]
        fn test_message_equality_is_by_bytes() {
            let left = Message::new(vec![1, 2, 3]);
            let right = Message::from(&[1u8, 2, 3][..]);
            assert_eq!(left, right);
            assert_ne!(left, Message::new(vec![1, 2]));
        }

        #[test]
        fn test_message_accessors() {
            let message = Message::from("hi");
            assert_eq!(message.bytes(), b"hi");
            assert_eq!(message.len(), 2);
            assert!(!message.is_empty());
            assert_eq!(message.into_bytes(), b"hi".to_vec());
        }
    }

    mod framing_tests {
        use crate::net::structs::framing_codec::FramingCodec;
        use crate::net::structs::message::Message;

        fn delimited() -> FramingCodec {
            FramingCodec::new(Some(vec![0xAA]), Some(vec![0xBB]))
        }

        #[test]
        fn test_raw_mode_passthrough() {
            let mut codec = FramingCodec::raw();
            assert!(!codec.is_delimited());
            let messages = codec.decode(b"one read");
            assert_eq!(messages, vec![Message::from("one read")]);
            assert_eq!(codec.encode(&Message::from("one read")), b"one read".to_vec());
        }

        #[test]
        fn test_single_frame_round_trip() {
            let mut codec = delimited();
            let wire = codec.encode(&Message::from("hi"));
            assert_eq!(wire, vec![0xAA, b'h', b'i', 0xBB]);
            let messages = codec.decode(&wire);
            assert_eq!(messages, vec![Message::from("hi")]);
        }

        #[test]
        fn test_multiple_frames_in_one_read() {
            let mut codec = delimited();
            let mut wire = codec.encode(&Message::from("a"));
            wire.extend(codec.encode(&Message::from("bc")));
            let messages = codec.decode(&wire);
            assert_eq!(messages, vec![Message::from("a"), Message::from("bc")]);
        }

        #[test]
        fn test_noise_before_head_is_skipped() {
            let mut codec = delimited();
            let mut wire = vec![0x01, 0x02];
            wire.extend(codec.encode(&Message::from("x")));
            let messages = codec.decode(&wire);
            assert_eq!(messages, vec![Message::from("x")]);
        }

        #[test]
        fn test_empty_payload_frame() {
            let mut codec = delimited();
            let messages = codec.decode(&[0xAA, 0xBB]);
            assert_eq!(messages, vec![Message::new(vec![])]);
        }

        // The codec carries trailing bytes between reads, so a frame split
        // anywhere across read boundaries is reassembled instead of being
        // dropped or garbled.
        #[test]
        fn test_frame_split_across_reads_is_reassembled() {
            let mut codec = delimited();
            let wire = codec.encode(&Message::from("split"));
            for cut in 0..=wire.len() {
                let mut codec = delimited();
                let mut messages = codec.decode(&wire[..cut]);
                messages.extend(codec.decode(&wire[cut..]));
                assert_eq!(messages, vec![Message::from("split")], "failed at cut {}", cut);
            }
        }

        #[test]
        fn test_multi_byte_marks_split_mid_mark() {
            let head = vec![0xFE, 0xFD, 0xFC];
            let tail = vec![0x01, 0x02, 0x03];
            let mut codec = FramingCodec::new(Some(head.clone()), Some(tail.clone()));
            let wire = codec.encode(&Message::from("payload"));
            // split inside the head mark and inside the tail mark
            let messages_a = codec.decode(&wire[..2]);
            assert!(messages_a.is_empty());
            let messages_b = codec.decode(&wire[2..wire.len() - 1]);
            assert!(messages_b.is_empty());
            let messages_c = codec.decode(&wire[wire.len() - 1..]);
            assert_eq!(messages_c, vec![Message::from("payload")]);
        }

        #[test]
        fn test_partial_mark_prefix_is_ordinary_payload() {
            let head = vec![0xAA, 0xAB];
            let tail = vec![0xBB, 0xBC];
            let mut codec = FramingCodec::new(Some(head), Some(tail));
            // 0xBB not followed by 0xBC fails the tail match and stays payload
            let wire = vec![0xAA, 0xAB, b'x', 0xBB, b'y', 0xBB, 0xBC];
            let messages = codec.decode(&wire);
            assert_eq!(messages, vec![Message::new(vec![b'x', 0xBB, b'y'])]);
        }

        #[test]
        fn test_reset_drops_partial_frame() {
            let mut codec = delimited();
            assert!(codec.decode(&[0xAA, b'h']).is_empty());
            codec.reset();
            let messages = codec.decode(&[0xAA, b'i', 0xBB]);
            assert_eq!(messages, vec![Message::from("i")]);
        }

        #[test]
        fn test_binary_payload_round_trip() {
            let mut codec = FramingCodec::new(Some(vec![0x1F, 0x2F]), Some(vec![0x3F, 0x4F]));
            let payload: Vec<u8> = (0u8..=0x1E).collect();
            let wire = codec.encode(&Message::new(payload.clone()));
            let messages = codec.decode(&wire);
            assert_eq!(messages, vec![Message::new(payload)]);
        }
    }

    mod session_tests {
        use std::net::SocketAddr;
        use crate::net::structs::message::Message;
        use crate::net::structs::session::Session;

        fn address() -> SocketAddr {
            "127.0.0.1:9000".parse().unwrap()
        }

        #[test]
        fn test_outbound_queue_preserves_fifo_order() {
            let session = Session::new(address());
            session.write(Message::from("first"));
            session.write(Message::from("second"));
            session.write(Message::from("third"));
            assert_eq!(session.pop_outbound(), Some(Message::from("first")));
            assert_eq!(session.pop_outbound(), Some(Message::from("second")));
            assert_eq!(session.pop_outbound(), Some(Message::from("third")));
            assert_eq!(session.pop_outbound(), None);
        }

        #[test]
        fn test_mark_closed_fires_once() {
            let session = Session::new(address());
            assert!(!session.is_closed());
            assert!(session.mark_closed());
            assert!(!session.mark_closed());
            assert!(session.is_closed());
        }

        #[test]
        fn test_write_after_close_is_dropped() {
            let session = Session::new(address());
            session.mark_closed();
            session.write(Message::from("late"));
            assert!(!session.has_outbound());
        }

        #[test]
        fn test_concurrent_producers_single_consumer() {
            let session = std::sync::Arc::new(Session::new(address()));
            let mut producers = Vec::new();
            for producer in 0..4 {
                let session = session.clone();
                producers.push(std::thread::spawn(move || {
                    for item in 0..100 {
                        session.write(Message::new(vec![producer as u8, item as u8]));
                    }
                }));
            }
            for producer in producers {
                producer.join().unwrap();
            }
            let mut drained = 0;
            while session.pop_outbound().is_some() {
                drained += 1;
            }
            assert_eq!(drained, 400);
        }
    }

    mod connector_tests {
        use std::sync::Arc;
        use crate::config::structs::configuration::Configuration;
        use crate::net::enums::connector_state::ConnectorState;
        use crate::net::enums::message_error_code::MessageErrorCode;
        use crate::net::structs::connector::Connector;
        use crate::net::structs::message::Message;
        use crate::net::structs::session::Session;
        use crate::net::traits::message_handler::MessageHandler;

        struct NullSink;

        impl MessageHandler for NullSink {
            fn session_created(&self, _session: &Arc<Session>) {}
            fn session_opened(&self, _session: &Arc<Session>) {}
            fn session_closed(&self, _session: &Arc<Session>) {}
            fn session_destroyed(&self, _session: &Arc<Session>) {}
            fn message_received(&self, _session: &Arc<Session>, _message: Message) {}
            fn message_sent(&self, _session: &Arc<Session>, _message: Message) {}
            fn error_occurred(&self, _code: MessageErrorCode, _session: &Arc<Session>) {}
        }

        #[test]
        fn test_new_connector_is_disconnected() {
            let config = Configuration::init();
            let connector = Connector::new(&config.network, Arc::new(NullSink)).unwrap();
            assert_eq!(connector.state(), ConnectorState::Disconnected);
            assert!(!connector.is_connected());
            assert!(connector.session().is_none());
        }

        #[test]
        fn test_disconnect_without_connect_is_safe() {
            let config = Configuration::init();
            let connector = Connector::new(&config.network, Arc::new(NullSink)).unwrap();
            connector.disconnect();
            connector.disconnect();
            assert_eq!(connector.state(), ConnectorState::Disconnected);
        }

        #[test]
        fn test_write_without_session_is_a_no_op() {
            let config = Configuration::init();
            let connector = Connector::new(&config.network, Arc::new(NullSink)).unwrap();
            connector.write(Message::from("nowhere"));
        }

        #[test]
        fn test_bad_marks_are_rejected() {
            let mut config = Configuration::init();
            config.network.head_mark = Some(String::from("zz"));
            assert!(Connector::new(&config.network, Arc::new(NullSink)).is_err());
        }
    }
}
