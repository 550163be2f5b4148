//! ADTS framing of raw AAC access units, ISO/IEC 13818-7 6.2
use std::io::{self, Cursor};

use bitstream_io::{BigEndian, BitReader, BitWrite, BitWriter};
use header::AdtsHeader;
use tokio_util::bytes::Bytes;
use utils::traits::{reader::BitwiseReadFrom, writer::WriteTo};

use crate::{
    consts::ADTS_HEADER_SIZE,
    errors::{AacError, AacResult},
};

pub mod fixed_header;
pub mod header;
pub mod variable_header;


#[derive(Debug, Clone)]
pub struct AdtsPacket {
    pub header: AdtsHeader,
    pub access_unit: Bytes,
}

impl AdtsPacket {
    /// Splits a buffer made of back to back ADTS frames.
    pub fn read_all(buffer: &Bytes) -> AacResult<Vec<Self>> {
        let mut result = vec![];
        let mut pos = 0;
        while pos < buffer.len() {
            let remaining = buffer.len() - pos;
            if remaining <= ADTS_HEADER_SIZE {
                return Err(AacError::ShortFrame(remaining));
            }

            let mut reader = BitReader::endian(Cursor::new(&buffer[pos..]), BigEndian);
            let header = AdtsHeader::read_from(&mut reader)?;
            header.validate()?;

            let frame_length = header.variable_header.aac_frame_length as usize;
            if frame_length < ADTS_HEADER_SIZE || frame_length > remaining {
                return Err(AacError::InvalidFrameLength {
                    length: frame_length,
                    remaining,
                });
            }

            result.push(Self {
                header,
                access_unit: buffer.slice(pos + ADTS_HEADER_SIZE..pos + frame_length),
            });
            pos += frame_length;
        }
        Ok(result)
    }
}

impl<W: io::Write> WriteTo<W> for AdtsPacket {
    type Error = AacError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        let mut bit_writer = BitWriter::endian(writer.by_ref(), BigEndian);
        self.header.write_to(&mut bit_writer)?;
        bit_writer.byte_align()?;
        writer.write_all(&self.access_unit)?;
        Ok(())
    }
}
