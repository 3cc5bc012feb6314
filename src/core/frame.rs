//! Datagram envelope: `[Magic(4)] [Version(1)] [Length(4)] [Payload(N)]`.
//!
//! A frame is exactly one UDP datagram. The length field is validated against
//! both the actual buffer and [`MAX_DATAGRAM_SIZE`] before the payload is
//! copied out.

use crate::error::{RelayError, Result};

/// Current supported protocol version
pub const PROTOCOL_VERSION: u8 = 1;

/// Magic bytes identifying relay datagrams (0x4D524C59, "MRLY")
pub const MAGIC_BYTES: [u8; 4] = [0x4D, 0x52, 0x4C, 0x59];

/// Size of the fixed header: magic + version + length
pub const HEADER_SIZE: usize = 9;

/// Maximum size of one encoded datagram, header included (64 KiB)
pub const MAX_DATAGRAM_SIZE: usize = 1 << 16;

/// Maximum payload a single frame can carry
pub const MAX_PAYLOAD_SIZE: usize = MAX_DATAGRAM_SIZE - HEADER_SIZE;

/// One wire frame: a protocol version and an opaque payload.
///
/// The payload is a bincode-encoded [`Packet`](crate::protocol::message::Packet);
/// this type only concerns itself with the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub version: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Wrap a payload in a frame at the current protocol version.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            payload,
        }
    }

    /// Encode the frame into wire bytes.
    ///
    /// Returns `OversizedPacket` if the payload would push the datagram past
    /// [`MAX_DATAGRAM_SIZE`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(RelayError::OversizedPacket(self.payload.len()));
        }

        let mut buf = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        buf.extend_from_slice(&MAGIC_BYTES);
        buf.push(self.version);
        buf.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.payload);
        Ok(buf)
    }

    /// Decode a frame from wire bytes.
    ///
    /// Rejects short buffers and bad magic (`InvalidHeader`), unknown versions
    /// (`UnsupportedVersion`), and length fields that exceed the datagram cap
    /// or disagree with the buffer (`OversizedPacket` / `InvalidHeader`).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(RelayError::InvalidHeader);
        }
        if bytes[..4] != MAGIC_BYTES {
            return Err(RelayError::InvalidHeader);
        }

        let version = bytes[4];
        if version != PROTOCOL_VERSION {
            return Err(RelayError::UnsupportedVersion(version));
        }

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&bytes[5..9]);
        let length = u32::from_be_bytes(len_bytes) as usize;

        if length > MAX_PAYLOAD_SIZE {
            return Err(RelayError::OversizedPacket(length));
        }
        if bytes.len() - HEADER_SIZE != length {
            return Err(RelayError::InvalidHeader);
        }

        Ok(Self {
            version,
            payload: bytes[HEADER_SIZE..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_roundtrip() {
        let frame = Frame::new(vec![]);
        let bytes = frame.to_bytes().unwrap();
        let decoded = Frame::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.payload.len(), 0);
        assert_eq!(decoded.version, PROTOCOL_VERSION);
    }

    #[test]
    fn max_payload_roundtrip() {
        let frame = Frame::new(vec![0xAB; MAX_PAYLOAD_SIZE]);
        let bytes = frame.to_bytes().unwrap();
        assert_eq!(bytes.len(), MAX_DATAGRAM_SIZE);
        let decoded = Frame::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.payload.len(), MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn oversized_payload_rejected_on_encode() {
        let frame = Frame::new(vec![0u8; MAX_PAYLOAD_SIZE + 1]);
        assert!(matches!(
            frame.to_bytes(),
            Err(RelayError::OversizedPacket(_))
        ));
    }

    #[test]
    fn oversized_length_claim_rejected() {
        let mut bytes = MAGIC_BYTES.to_vec();
        bytes.push(PROTOCOL_VERSION);
        bytes.extend_from_slice(&(100_000u32).to_be_bytes());
        bytes.extend_from_slice(&[0xFF; 8]);
        assert!(matches!(
            Frame::from_bytes(&bytes),
            Err(RelayError::OversizedPacket(100_000))
        ));
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = vec![0xFF, 0xFF, 0xFF, 0xFF];
        bytes.push(PROTOCOL_VERSION);
        bytes.extend_from_slice(&(2u32).to_be_bytes());
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        assert!(matches!(
            Frame::from_bytes(&bytes),
            Err(RelayError::InvalidHeader)
        ));
    }

    #[test]
    fn unsupported_version_rejected() {
        let mut bytes = MAGIC_BYTES.to_vec();
        bytes.push(99);
        bytes.extend_from_slice(&(0u32).to_be_bytes());
        assert!(matches!(
            Frame::from_bytes(&bytes),
            Err(RelayError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn truncated_header_rejected() {
        let bytes = [0x4D, 0x52, 0x4C, 0x59, 0x01];
        assert!(matches!(
            Frame::from_bytes(&bytes),
            Err(RelayError::InvalidHeader)
        ));
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut bytes = MAGIC_BYTES.to_vec();
        bytes.push(PROTOCOL_VERSION);
        bytes.extend_from_slice(&(10u32).to_be_bytes());
        bytes.extend_from_slice(&[0xAA; 4]); // claims 10, carries 4
        assert!(matches!(
            Frame::from_bytes(&bytes),
            Err(RelayError::InvalidHeader)
        ));
    }
}
