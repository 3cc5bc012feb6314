//! Codec round-trip and rejection tests over the full packet surface.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use mailbox_relay::core::codec::{decode, encode};
use mailbox_relay::core::frame::{Frame, HEADER_SIZE, MAGIC_BYTES, PROTOCOL_VERSION};
use mailbox_relay::protocol::{Message, Packet};
use mailbox_relay::RelayError;

fn sample_message() -> Message {
    Message {
        id: "42".to_string(),
        mailbox: "inbox".to_string(),
        sender: "192.168.0.9".to_string(),
        timestamp: "2026-08-06T09:30:00+00:00".to_string(),
        body: "a body with\nnewlines and unicode: héllo".to_string(),
    }
}

#[test]
fn all_variants_roundtrip() {
    let packets = vec![
        Packet::Query {
            mailbox: "inbox".to_string(),
        },
        Packet::Query {
            mailbox: String::new(),
        },
        Packet::Fetch {
            mailbox: "inbox".to_string(),
            ids: vec!["1".to_string(), "2".to_string(), "42".to_string()],
        },
        Packet::Send {
            messages: vec![sample_message(), sample_message()],
        },
        Packet::MessageIds {
            mailbox: "inbox".to_string(),
            ids: vec![],
        },
        Packet::Messages {
            messages: vec![sample_message()],
        },
    ];

    for packet in packets {
        let bytes = encode(&packet).unwrap();
        let recovered = decode(&bytes).unwrap();
        assert_eq!(packet, recovered, "roundtrip failed for {packet:?}");
    }
}

#[test]
fn encoded_frame_carries_header() {
    let bytes = encode(&Packet::Query {
        mailbox: "inbox".to_string(),
    })
    .unwrap();

    assert!(bytes.len() > HEADER_SIZE);
    assert_eq!(&bytes[..4], &MAGIC_BYTES);
    assert_eq!(bytes[4], PROTOCOL_VERSION);
}

#[test]
fn random_bytes_rejected() {
    let garbage = [0x13u8, 0x37, 0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02, 0x03];
    assert!(decode(&garbage).is_err());
}

#[test]
fn empty_datagram_rejected() {
    assert!(matches!(decode(&[]), Err(RelayError::InvalidHeader)));
}

#[test]
fn truncated_datagram_rejected() {
    let bytes = encode(&Packet::Fetch {
        mailbox: "inbox".to_string(),
        ids: vec!["1".to_string()],
    })
    .unwrap();

    // Cut the frame mid-payload: the length field no longer agrees.
    assert!(decode(&bytes[..bytes.len() - 3]).is_err());
}

#[test]
fn corrupted_body_rejected() {
    // A well-formed frame whose payload is not a bincode Packet.
    let frame = Frame::new(vec![0xFFu8; 16]);
    let bytes = frame.to_bytes().unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(RelayError::Serialization(_))
    ));
}

#[test]
fn oversized_packet_rejected_symmetrically() {
    // Too big to encode into one datagram...
    let packet = Packet::Messages {
        messages: vec![Message {
            id: "1".to_string(),
            mailbox: "inbox".to_string(),
            sender: "s".to_string(),
            timestamp: "t".to_string(),
            body: "x".repeat(70_000),
        }],
    };
    assert!(matches!(
        encode(&packet),
        Err(RelayError::OversizedPacket(_))
    ));

    // ...and a crafted header claiming more than the cap is rejected on read.
    let mut bytes = MAGIC_BYTES.to_vec();
    bytes.push(PROTOCOL_VERSION);
    bytes.extend_from_slice(&(1_000_000u32).to_be_bytes());
    bytes.extend_from_slice(&[0u8; 16]);
    assert!(matches!(
        decode(&bytes),
        Err(RelayError::OversizedPacket(1_000_000))
    ));
}
