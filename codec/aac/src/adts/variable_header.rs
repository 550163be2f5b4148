use bitstream_io::{BitRead, BitWrite};
use utils::{
    bits::{bool_from_bit, bool_to_bit},
    traits::reader::BitwiseReadFrom,
};

use crate::errors::{AacError, AacResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableHeader {
    pub copyright_identification_bit: bool,     // 1 bit
    pub copyright_identification_start: bool,   // 1 bit
    pub aac_frame_length: u16,                  // 13 bits, header included
    pub adts_buffer_fullness: u16,              // 11 bits
    pub number_of_raw_data_blocks_in_frame: u8, // 2 bits
}

impl<R: BitRead> BitwiseReadFrom<R> for VariableHeader {
    type Error = AacError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        Ok(Self {
            copyright_identification_bit: bool_from_bit(reader.read::<1, u8>()?),
            copyright_identification_start: bool_from_bit(reader.read::<1, u8>()?),
            aac_frame_length: reader.read::<13, u16>()?,
            adts_buffer_fullness: reader.read::<11, u16>()?,
            number_of_raw_data_blocks_in_frame: reader.read::<2, u8>()?,
        })
    }
}

impl VariableHeader {
    pub fn write_to<W: BitWrite>(&self, writer: &mut W) -> AacResult<()> {
        writer.write::<1, u8>(bool_to_bit(self.copyright_identification_bit))?;
        writer.write::<1, u8>(bool_to_bit(self.copyright_identification_start))?;
        writer.write::<13, u16>(self.aac_frame_length)?;
        writer.write::<11, u16>(self.adts_buffer_fullness)?;
        writer.write::<2, u8>(self.number_of_raw_data_blocks_in_frame)?;
        Ok(())
    }
}
