use tokio_util::bytes::Bytes;
use utils::traits::dynamic_sized_packet::DynamicSizedPacket;
pub mod builder;
pub mod reader;
pub mod writer;

pub const DOLLAR_SIGN: u8 = 0x24;

///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   "$" = 36    |   Channel ID  |        Length in octets       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// :         Binary data (Length according to Length field)        :
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtspInterleavedPacket {
    pub channel_id: u8,
    pub payload: Bytes,
}

impl RtspInterleavedPacket {
    pub fn new(channel_id: u8, payload: Bytes) -> Self {
        Self {
            channel_id,
            payload,
        }
    }

    pub fn builder() -> builder::RtspInterleavedPacketBuilder {
        builder::RtspInterleavedPacketBuilder::new()
    }
}

impl DynamicSizedPacket for RtspInterleavedPacket {
    fn get_packet_bytes_count(&self) -> usize {
        4 + self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use tokio_util::bytes::Bytes;
    use utils::traits::{reader::TryReadFrom, writer::WriteTo};

    use super::RtspInterleavedPacket;

    #[test]
    fn test_read_write() {
        let packet = RtspInterleavedPacket::builder()
            .channel(1)
            .payload(vec![0x80_u8, 0x60, 0x00, 0x01])
            .build();
        let mut bytes = vec![];
        packet.write_to(&mut bytes).unwrap();
        assert_eq!(bytes, [0x24, 0x01, 0x00, 0x04, 0x80, 0x60, 0x00, 0x01]);

        let mut cursor = io::Cursor::new(&bytes);
        let parsed = RtspInterleavedPacket::try_read_from(&mut cursor)
            .unwrap()
            .unwrap();
        assert_eq!(parsed, packet);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_incomplete() {
        for len in 0..8 {
            let bytes = [0x24_u8, 0x00, 0x00, 0x04, 0x01, 0x02, 0x03, 0x04];
            let mut cursor = io::Cursor::new(&bytes[..len]);
            assert!(
                RtspInterleavedPacket::try_read_from(&mut cursor)
                    .unwrap()
                    .is_none()
            );
        }
    }

    #[test]
    fn test_bad_sign_and_oversized_payload() {
        let mut cursor = io::Cursor::new([0x25_u8, 0x00, 0x00, 0x00]);
        assert!(RtspInterleavedPacket::try_read_from(&mut cursor).is_err());

        let packet = RtspInterleavedPacket::new(0, Bytes::from(vec![0; 70000]));
        assert!(packet.write_to(&mut Vec::<u8>::new()).is_err());
    }
}
