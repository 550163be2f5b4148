use bitstream_io::{BitRead, BitWrite};
use utils::{
    bits::{bool_from_bit, bool_to_bit},
    traits::reader::BitwiseReadFrom,
};

use crate::errors::{AacError, AacResult};

pub const SYNC_WORD: u16 = 0b1111_1111_1111;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHeader {
    pub id: bool,                     // 1 bit
    pub layer: u8,                    // 2 bits
    pub protection_absent: bool,      // 1 bit
    pub profile: u8,                  // 2 bits
    pub sampling_frequency_index: u8, // 4 bits
    pub private_bit: bool,            // 1 bit
    pub channel_configuration: u8,    // 3 bits
    pub original_copy: bool,          // 1 bit
    pub home: bool,                   // 1 bit
}

impl<R: BitRead> BitwiseReadFrom<R> for FixedHeader {
    type Error = AacError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let sync_word = reader.read::<12, u16>()?;
        if sync_word != SYNC_WORD {
            return Err(AacError::WrongSyncWord(sync_word));
        }

        Ok(Self {
            id: bool_from_bit(reader.read::<1, u8>()?),
            layer: reader.read::<2, u8>()?,
            protection_absent: bool_from_bit(reader.read::<1, u8>()?),
            profile: reader.read::<2, u8>()?,
            sampling_frequency_index: reader.read::<4, u8>()?,
            private_bit: bool_from_bit(reader.read::<1, u8>()?),
            channel_configuration: reader.read::<3, u8>()?,
            original_copy: bool_from_bit(reader.read::<1, u8>()?),
            home: bool_from_bit(reader.read::<1, u8>()?),
        })
    }
}

impl FixedHeader {
    pub fn write_to<W: BitWrite>(&self, writer: &mut W) -> AacResult<()> {
        writer.write::<12, u16>(SYNC_WORD)?;
        writer.write::<1, u8>(bool_to_bit(self.id))?;
        writer.write::<2, u8>(self.layer)?;
        writer.write::<1, u8>(bool_to_bit(self.protection_absent))?;
        writer.write::<2, u8>(self.profile)?;
        writer.write::<4, u8>(self.sampling_frequency_index)?;
        writer.write::<1, u8>(bool_to_bit(self.private_bit))?;
        writer.write::<3, u8>(self.channel_configuration)?;
        writer.write::<1, u8>(bool_to_bit(self.original_copy))?;
        writer.write::<1, u8>(bool_to_bit(self.home))?;
        Ok(())
    }
}
