use std::io;

use bitstream_io::{BigEndian, BitRead, BitReader};
use utils::{bits::bits_to_bytes_ceil, traits::reader::ReadRemainingFrom};

use super::{
    errors::{RtpMpeg4Error, RtpMpeg4Result},
    parameters::RtpMpeg4AudioParams,
};

/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+- .. -+-+-+-+-+-+-+-+-+-+
/// |AU-headers-length|AU-header|AU-header|      |AU-header|padding|
/// |                 |   (1)   |   (2)   |      |   (n)   |  bits |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+- .. -+-+-+-+-+-+-+-+-+-+
///
/// Only AU-size and AU-Index(-delta) are carried, both indices must be zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuHeaderSection {
    /// in bits
    pub au_headers_length: u16,
    pub au_sizes: Vec<usize>,
}

impl AuHeaderSection {
    /// Bytes taken by the length field and the header section, padding included.
    pub fn section_bytes(&self) -> usize {
        2 + bits_to_bytes_ceil(self.au_headers_length as usize)
    }
}

fn eof_as_short_payload(err: io::Error) -> RtpMpeg4Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        RtpMpeg4Error::ShortPayload
    } else {
        RtpMpeg4Error::IoError(err)
    }
}

fn read_field<R: BitRead>(reader: &mut R, bits: u8) -> RtpMpeg4Result<u64> {
    reader
        .read_var::<u64>(bits as u32)
        .map_err(eof_as_short_payload)
}

impl<R: io::Read> ReadRemainingFrom<&RtpMpeg4AudioParams, R> for AuHeaderSection {
    type Error = RtpMpeg4Error;
    fn read_remaining_from(
        header: &RtpMpeg4AudioParams,
        reader: &mut R,
    ) -> Result<Self, Self::Error> {
        let mut reader = BitReader::endian(reader, BigEndian);
        let au_headers_length = reader
            .read::<16, u16>()
            .map_err(eof_as_short_payload)?;
        if au_headers_length == 0 {
            return Err(RtpMpeg4Error::AuHeadersInvalidLength);
        }

        let mut remaining_bits = au_headers_length as i64;
        let mut au_sizes = vec![];
        while remaining_bits > 0 {
            let au_size = read_field(&mut reader, header.size_length)?;
            remaining_bits -= header.size_length as i64;

            if au_sizes.is_empty() {
                if header.index_length > 0 {
                    let au_index = read_field(&mut reader, header.index_length)?;
                    remaining_bits -= header.index_length as i64;
                    if au_index != 0 {
                        return Err(RtpMpeg4Error::AuIndexNotZero(au_index));
                    }
                }
            } else if header.index_delta_length > 0 {
                let au_index_delta = read_field(&mut reader, header.index_delta_length)?;
                remaining_bits -= header.index_delta_length as i64;
                if au_index_delta != 0 {
                    return Err(RtpMpeg4Error::AuIndexDeltaNotZero(au_index_delta));
                }
            }

            au_sizes.push(au_size as usize);
        }

        Ok(Self {
            au_headers_length,
            au_sizes,
        })
    }
}
