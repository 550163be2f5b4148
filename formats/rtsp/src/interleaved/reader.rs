use std::io;

use byteorder::{BigEndian, ReadBytesExt};
use tokio_util::bytes::Buf;
use utils::traits::reader::{TryReadFrom, TryReadRemainingFrom};

use super::{DOLLAR_SIGN, RtspInterleavedPacket};
use crate::errors::RtspMessageError;

impl<R: AsRef<[u8]>> TryReadRemainingFrom<u8, R> for RtspInterleavedPacket {
    type Error = RtspMessageError;
    fn try_read_remaining_from(
        header: u8,
        reader: &mut io::Cursor<R>,
    ) -> Result<Option<Self>, Self::Error> {
        if header != DOLLAR_SIGN {
            return Err(RtspMessageError::InvalidInterleavedSign(header));
        }

        if reader.remaining() < 3 {
            return Ok(None);
        }

        let channel_id = reader.read_u8()?;
        let data_length = reader.read_u16::<BigEndian>()? as usize;
        if reader.remaining() < data_length {
            return Ok(None);
        }

        Ok(Some(Self {
            channel_id,
            payload: reader.copy_to_bytes(data_length),
        }))
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for RtspInterleavedPacket {
    type Error = RtspMessageError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        if reader.remaining() < 4 {
            return Ok(None);
        }

        let sign = reader.read_u8()?;
        Self::try_read_remaining_from(sign, reader)
    }
}
