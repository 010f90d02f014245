use nodemesh::net::structs::framing_codec::FramingCodec;
use nodemesh::net::structs::message::Message;
use proptest::prelude::*;

fn delimited() -> FramingCodec {
    FramingCodec::new(Some(vec![0xAA]), Some(vec![0xBB]))
}

#[test]
fn test_wire_format_head_payload_tail() {
    let codec = delimited();
    let wire = codec.encode(&Message::from("hi"));
    assert_eq!(wire, vec![0xAA, b'h', b'i', 0xBB]);
}

#[test]
fn test_echoed_wire_decodes_to_original() {
    let mut codec = delimited();
    let wire = codec.encode(&Message::from("hi"));
    // an echo peer returns the exact wire bytes
    let messages = codec.decode(&wire);
    assert_eq!(messages, vec![Message::from("hi")]);
}

proptest! {
    // Payload bytes below 0xAA can never form a false delimiter match, the
    // caller-responsibility precondition of the wire format.
    #[test]
    fn round_trip_any_clean_payload(payload in proptest::collection::vec(0u8..0xAA, 0..512)) {
        let mut codec = delimited();
        let wire = codec.encode(&Message::new(payload.clone()));
        let messages = codec.decode(&wire);
        prop_assert_eq!(messages, vec![Message::new(payload)]);
    }

    // The codec carries trailing bytes between reads: splitting the wire
    // run at any point must not lose or garble the message.
    #[test]
    fn round_trip_survives_any_split(payload in proptest::collection::vec(0u8..0xAA, 0..256), cut_ratio in 0.0f64..1.0) {
        let mut codec = delimited();
        let wire = codec.encode(&Message::new(payload.clone()));
        let cut = ((wire.len() as f64) * cut_ratio) as usize;
        let mut messages = codec.decode(&wire[..cut]);
        messages.extend(codec.decode(&wire[cut..]));
        prop_assert_eq!(messages, vec![Message::new(payload)]);
    }

    #[test]
    fn multi_byte_marks_round_trip(payload in proptest::collection::vec(0u8..0x7F, 0..256)) {
        let mut codec = FramingCodec::new(Some(vec![0xF0, 0xF1, 0xF2]), Some(vec![0xF8, 0xF9]));
        let wire = codec.encode(&Message::new(payload.clone()));
        let messages = codec.decode(&wire);
        prop_assert_eq!(messages, vec![Message::new(payload)]);
    }

    #[test]
    fn back_to_back_frames_all_arrive(payloads in proptest::collection::vec(proptest::collection::vec(0u8..0xAA, 0..32), 1..8)) {
        let mut codec = delimited();
        let mut wire = Vec::new();
        for payload in &payloads {
            wire.extend(codec.encode(&Message::new(payload.clone())));
        }
        let messages = codec.decode(&wire);
        let expected: Vec<Message> = payloads.into_iter().map(Message::new).collect();
        prop_assert_eq!(messages, expected);
    }
}
