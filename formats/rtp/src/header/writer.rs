use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use num::ToPrimitive;
use utils::traits::writer::WriteTo;

use crate::errors::RtpError;

use super::{RtpHeader, RtpHeaderExtension};

impl<W: io::Write> WriteTo<W> for RtpHeader {
    type Error = RtpError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        let first_byte = ((self.version & 0b11) << 6)
            | ((self.padding as u8) << 5)
            | ((self.header_extension.is_some() as u8) << 4)
            | (self.csrc_list.len() as u8 & 0b1111);
        writer.write_u8(first_byte)?;
        writer.write_u8(((self.marker as u8) << 7) | (self.payload_type & 0b0111_1111))?;
        writer.write_u16::<BigEndian>(self.sequence_number)?;
        writer.write_u32::<BigEndian>(self.timestamp)?;
        writer.write_u32::<BigEndian>(self.ssrc)?;
        for csrc in &self.csrc_list {
            writer.write_u32::<BigEndian>(*csrc)?;
        }

        if let Some(header_extension) = &self.header_extension {
            header_extension.write_to(writer)?;
        }

        Ok(())
    }
}

impl<W: io::Write> WriteTo<W> for RtpHeaderExtension {
    type Error = RtpError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        let length_in_words = (self.bytes.len() / 4)
            .to_u16()
            .ok_or(RtpError::ExtensionTooLong(self.bytes.len()))?;
        writer.write_u16::<BigEndian>(self.profile_defined)?;
        writer.write_u16::<BigEndian>(length_in_words)?;
        writer.write_all(&self.bytes[..length_in_words as usize * 4])?;
        Ok(())
    }
}
