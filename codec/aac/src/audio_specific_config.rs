//! AudioSpecificConfig, ISO/IEC 14496-3 1.6.2.1
//!
//! Only the leading fields are modelled, which is what the `config=` fmtp
//! parameter of an AAC stream needs.
use std::io::{self, Cursor};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use utils::traits::{reader::BitwiseReadFrom, writer::WriteTo};

use crate::{
    consts::OBJECT_TYPE_AAC_LC,
    errors::{AacError, AacResult},
    sampling_frequency_index::SamplingFrequencyIndex,
};

const ESCAPE_OBJECT_TYPE: u8 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpecificConfig {
    pub audio_object_type: u8,
    pub sampling_frequency_index: SamplingFrequencyIndex,
    pub channel_configuration: u8,
}

impl AudioSpecificConfig {
    pub fn aac_lc(sample_rate: u32, channel_count: u8) -> AacResult<Self> {
        let sampling_frequency_index = SamplingFrequencyIndex::from_sampling_frequency(sample_rate)
            .ok_or(AacError::UnsupportedSampleRate(sample_rate))?;
        let channel_configuration = match channel_count {
            1..=6 => channel_count,
            8 => 7,
            _ => return Err(AacError::InvalidChannelConfiguration(channel_count)),
        };
        Ok(Self {
            audio_object_type: OBJECT_TYPE_AAC_LC,
            sampling_frequency_index,
            channel_configuration,
        })
    }

    pub fn sampling_frequency(&self) -> u32 {
        self.sampling_frequency_index.get_sampling_frequency()
    }

    /// `None` when the channel layout is carried in a program config element.
    pub fn channel_count(&self) -> Option<u8> {
        match self.channel_configuration {
            1..=6 => Some(self.channel_configuration),
            7 => Some(8),
            _ => None,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> AacResult<Self> {
        Self::read_from(&mut BitReader::endian(Cursor::new(bytes), BigEndian))
    }

    pub fn to_bytes(&self) -> AacResult<Vec<u8>> {
        utils::bytes::writable_to_bytes(self)
    }
}

impl<R: BitRead> BitwiseReadFrom<R> for AudioSpecificConfig {
    type Error = AacError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let mut audio_object_type = reader.read::<5, u8>()?;
        if audio_object_type == ESCAPE_OBJECT_TYPE {
            audio_object_type = 32 + reader.read::<6, u8>()?;
        }
        // index 15 escapes to an explicit 24 bit frequency, rejected by the table lookup
        let sampling_frequency_index = SamplingFrequencyIndex::try_from(reader.read::<4, u8>()?)?;
        Ok(Self {
            audio_object_type,
            sampling_frequency_index,
            channel_configuration: reader.read::<4, u8>()?,
        })
    }
}

impl<W: io::Write> WriteTo<W> for AudioSpecificConfig {
    type Error = AacError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        if self.audio_object_type >= ESCAPE_OBJECT_TYPE {
            return Err(AacError::UnsupportedObjectType(self.audio_object_type));
        }
        let mut bit_writer = BitWriter::endian(writer, BigEndian);
        bit_writer.write::<5, u8>(self.audio_object_type)?;
        bit_writer.write::<4, u8>(self.sampling_frequency_index.into())?;
        bit_writer.write::<4, u8>(self.channel_configuration)?;
        // GASpecificConfig: frameLengthFlag, dependsOnCoreCoder, extensionFlag
        bit_writer.write::<3, u8>(0)?;
        bit_writer.byte_align()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AudioSpecificConfig;
    use crate::errors::AacError;

    #[test]
    fn test_aac_lc_config() {
        let config = AudioSpecificConfig::aac_lc(48000, 2).unwrap();
        assert_eq!(config.to_bytes().unwrap(), vec![0x11, 0x90]);

        let config = AudioSpecificConfig::aac_lc(44100, 2).unwrap();
        assert_eq!(config.to_bytes().unwrap(), vec![0x12, 0x10]);
        assert_eq!(AudioSpecificConfig::from_bytes(&[0x12, 0x10]).unwrap(), config);

        let surround = AudioSpecificConfig::aac_lc(48000, 8).unwrap();
        assert_eq!(surround.channel_configuration, 7);
        assert_eq!(surround.channel_count(), Some(8));
    }

    #[test]
    fn test_read_trailing_fields_ignored() {
        // ffmpeg's config for 44.1kHz stereo with a sync extension
        let config = AudioSpecificConfig::from_bytes(&[0x12, 0x10, 0x56, 0xE5, 0x00]).unwrap();
        assert_eq!(config.audio_object_type, 2);
        assert_eq!(config.sampling_frequency(), 44100);
        assert_eq!(config.channel_count(), Some(2));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AudioSpecificConfig::aac_lc(12345, 2),
            Err(AacError::UnsupportedSampleRate(12345))
        ));
        assert!(matches!(
            AudioSpecificConfig::aac_lc(48000, 7),
            Err(AacError::InvalidChannelConfiguration(7))
        ));
        assert!(matches!(
            AudioSpecificConfig::from_bytes(&[0x17, 0x90]),
            Err(AacError::InvalidSamplingFrequencyIndex(15))
        ));
        assert!(AudioSpecificConfig::from_bytes(&[0x11]).is_err());
    }
}
