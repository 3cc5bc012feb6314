//! Packet ⇄ bytes codec.
//!
//! Composes the bincode body with the [`Frame`] envelope. Both directions
//! enforce the 64 KiB datagram cap: `encode` refuses to build a frame larger
//! than one datagram, and `decode` refuses length claims past the cap before
//! touching the body.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::message::Packet;

/// Encode a packet into one wire datagram.
pub fn encode(packet: &Packet) -> Result<Vec<u8>> {
    let payload = bincode::serialize(packet)?;
    Frame::new(payload).to_bytes()
}

/// Decode one wire datagram into a packet.
///
/// Any failure here is a decode error in the spec taxonomy: the caller logs
/// it and drops the datagram.
pub fn decode(bytes: &[u8]) -> Result<Packet> {
    let frame = Frame::from_bytes(bytes)?;
    let packet = bincode::deserialize(&frame.payload)?;
    Ok(packet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use crate::protocol::message::Message;

    #[test]
    fn roundtrip_all_variants() {
        let message = Message {
            id: "7".into(),
            mailbox: "inbox".into(),
            sender: "10.0.0.1".into(),
            timestamp: "2026-08-06T12:00:00+00:00".into(),
            body: "hello".into(),
        };
        let packets = vec![
            Packet::Query {
                mailbox: "inbox".into(),
            },
            Packet::Fetch {
                mailbox: "inbox".into(),
                ids: vec!["1".into(), "7".into()],
            },
            Packet::Send {
                messages: vec![message.clone()],
            },
            Packet::MessageIds {
                mailbox: "inbox".into(),
                ids: vec![],
            },
            Packet::Messages {
                messages: vec![message],
            },
        ];

        for packet in packets {
            let bytes = encode(&packet).unwrap();
            let recovered = decode(&bytes).unwrap();
            assert_eq!(packet, recovered);
        }
    }

    #[test]
    fn garbage_body_rejected() {
        let frame = Frame::new(vec![0xFF; 32]);
        let bytes = frame.to_bytes().unwrap();
        assert!(matches!(
            decode(&bytes),
            Err(RelayError::Serialization(_))
        ));
    }

    #[test]
    fn oversized_body_rejected_on_encode() {
        let packet = Packet::Send {
            messages: vec![Message {
                id: String::new(),
                mailbox: "inbox".into(),
                sender: String::new(),
                timestamp: String::new(),
                body: "x".repeat(70_000),
            }],
        };
        assert!(matches!(
            encode(&packet),
            Err(RelayError::OversizedPacket(_))
        ));
    }
}
