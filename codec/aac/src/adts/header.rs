use bitstream_io::{BitRead, BitWrite};
use utils::traits::reader::BitwiseReadFrom;

use crate::{
    consts::OBJECT_TYPE_AAC_LC,
    errors::{AacError, AacResult},
    sampling_frequency_index::SamplingFrequencyIndex,
};

use super::{fixed_header::FixedHeader, variable_header::VariableHeader};

/// Buffer fullness value signalling a variable bitrate stream.
pub const VBR_BUFFER_FULLNESS: u16 = 0x7FF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdtsHeader {
    pub fixed_header: FixedHeader,
    pub variable_header: VariableHeader,
}

impl<R: BitRead> BitwiseReadFrom<R> for AdtsHeader {
    type Error = AacError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let fixed_header = FixedHeader::read_from(reader)?;
        let variable_header = VariableHeader::read_from(reader)?;
        Ok(Self {
            fixed_header,
            variable_header,
        })
    }
}

impl AdtsHeader {
    pub fn write_to<W: BitWrite>(&self, writer: &mut W) -> AacResult<()> {
        self.fixed_header.write_to(writer)?;
        self.variable_header.write_to(writer)?;
        Ok(())
    }

    pub fn object_type(&self) -> u8 {
        self.fixed_header.profile + 1
    }

    pub fn sample_rate(&self) -> AacResult<u32> {
        let index = SamplingFrequencyIndex::try_from(self.fixed_header.sampling_frequency_index)?;
        Ok(index.get_sampling_frequency())
    }

    pub fn channel_count(&self) -> AacResult<u8> {
        match self.fixed_header.channel_configuration {
            count @ 1..=6 => Ok(count),
            7 => Ok(8),
            other => Err(AacError::InvalidChannelConfiguration(other)),
        }
    }

    /// Rejects the header features a single-AU unwrapping does not handle.
    pub fn validate(&self) -> AacResult<()> {
        if !self.fixed_header.protection_absent {
            return Err(AacError::CrcNotSupported);
        }
        if self.object_type() != OBJECT_TYPE_AAC_LC {
            return Err(AacError::UnsupportedObjectType(self.object_type()));
        }
        self.sample_rate()?;
        self.channel_count()?;
        if self.variable_header.adts_buffer_fullness != VBR_BUFFER_FULLNESS {
            return Err(AacError::UnsupportedBufferFullness(
                self.variable_header.adts_buffer_fullness,
            ));
        }
        if self.variable_header.number_of_raw_data_blocks_in_frame != 0 {
            return Err(AacError::MultipleRawDataBlocks(
                self.variable_header.number_of_raw_data_blocks_in_frame + 1,
            ));
        }
        Ok(())
    }
}
