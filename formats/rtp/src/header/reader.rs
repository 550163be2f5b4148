use std::io;

use byteorder::{BigEndian, ReadBytesExt};
use tokio_util::bytes::Bytes;
use utils::traits::reader::ReadFrom;

use crate::errors::RtpError;

use super::{RTP_VERSION, RtpHeader, RtpHeaderExtension};

impl<R: io::Read> ReadFrom<R> for RtpHeader {
    type Error = RtpError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let first_byte = reader.read_u8()?;
        let version = (first_byte >> 6) & 0b11;
        if version != RTP_VERSION {
            return Err(RtpError::UnsupportedVersion(version));
        }
        let padding = ((first_byte >> 5) & 0b1) == 0b1;
        let extension = ((first_byte >> 4) & 0b1) == 0b1;
        let csrc_count = first_byte & 0b1111;

        let second_byte = reader.read_u8()?;
        let marker = ((second_byte >> 7) & 0b1) == 0b1;
        let payload_type = second_byte & 0b0111_1111;

        let sequence_number = reader.read_u16::<BigEndian>()?;
        let timestamp = reader.read_u32::<BigEndian>()?;
        let ssrc = reader.read_u32::<BigEndian>()?;

        let mut csrc_list = Vec::with_capacity(csrc_count as usize);
        for _ in 0..csrc_count {
            csrc_list.push(reader.read_u32::<BigEndian>()?);
        }

        let header_extension = if extension {
            Some(RtpHeaderExtension::read_from(reader)?)
        } else {
            None
        };

        Ok(Self {
            version,
            padding,
            extension,
            csrc_count,
            marker,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
            csrc_list,
            header_extension,
        })
    }
}

impl<R: io::Read> ReadFrom<R> for RtpHeaderExtension {
    type Error = RtpError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let profile_defined = reader.read_u16::<BigEndian>()?;
        let length_in_words = reader.read_u16::<BigEndian>()?;
        let mut bytes = vec![0; length_in_words as usize * 4];
        reader.read_exact(&mut bytes)?;

        Ok(Self {
            profile_defined,
            bytes: Bytes::from(bytes),
        })
    }
}
