#[cfg(test)]
mod tests {
    use tokio_util::bytes::Bytes;
    use utils::{bytes::writable_to_bytes, traits::dynamic_sized_packet::DynamicSizedPacket};

    use crate::{
        errors::RtpError,
        header::{RtpHeader, RtpHeaderExtension},
        packet::RtpTrivialPacket,
    };

    #[test]
    fn test_parse_fixed_header() {
        let raw: &[u8] = &[
            0x80, 0xE0, 0x00, 0x01, // V=2, M=1, PT=96, seq=1
            0x00, 0x00, 0x03, 0xE8, // timestamp=1000
            0x12, 0x34, 0x56, 0x78, // ssrc
            0xAA, 0xBB,
        ];
        let packet = RtpTrivialPacket::parse(raw).unwrap();
        assert!(packet.header.marker);
        assert_eq!(packet.header.payload_type, 96);
        assert_eq!(packet.header.sequence_number, 1);
        assert_eq!(packet.header.timestamp, 1000);
        assert_eq!(packet.header.ssrc, 0x12345678);
        assert_eq!(&packet.payload[..], &[0xAA, 0xBB]);
        assert_eq!(writable_to_bytes(&packet).unwrap(), raw);
    }

    #[test]
    fn test_parse_padding_and_extension() {
        let raw: &[u8] = &[
            0xB0, 0x60, 0x00, 0x02, // V=2, P=1, X=1, PT=96
            0x00, 0x00, 0x00, 0x10, //
            0x00, 0x00, 0x00, 0x01, //
            0xBE, 0xDE, 0x00, 0x01, // extension, one word
            0x01, 0x02, 0x03, 0x04, //
            0xAA, 0x00, 0x00, 0x03, // payload then 3 padding bytes
        ];
        let packet = RtpTrivialPacket::parse(raw).unwrap();
        assert_eq!(&packet.payload[..], &[0xAA]);
        assert_eq!(
            packet.header.header_extension,
            Some(RtpHeaderExtension {
                profile_defined: 0xBEDE,
                bytes: Bytes::from_static(&[0x01, 0x02, 0x03, 0x04]),
            })
        );
        assert_eq!(packet.get_packet_bytes_count(), 21);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            RtpTrivialPacket::parse([0x80u8, 0x60, 0x00]),
            Err(RtpError::ShortPacket(3))
        ));

        let mut raw = writable_to_bytes(
            &RtpTrivialPacket::builder()
                .header(RtpHeader::builder().payload_type(96).build())
                .payload(&[0x01])
                .build(),
        )
        .unwrap();
        raw[0] = 0x40;
        assert!(matches!(
            RtpTrivialPacket::parse(&raw),
            Err(RtpError::UnsupportedVersion(1))
        ));

        raw[0] = 0xA0;
        *raw.last_mut().unwrap() = 5;
        assert!(matches!(
            RtpTrivialPacket::parse(&raw),
            Err(RtpError::BadPaddingSize(5))
        ));
    }
}
