//! Sampling frequency index, ISO/IEC 14496-3 table 1.18

use crate::errors::AacError;

const SAMPLING_FREQUENCIES: [u32; 13] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingFrequencyIndex(u8);

impl SamplingFrequencyIndex {
    pub fn get_sampling_frequency(&self) -> u32 {
        SAMPLING_FREQUENCIES[self.0 as usize]
    }

    pub fn from_sampling_frequency(frequency: u32) -> Option<Self> {
        SAMPLING_FREQUENCIES
            .iter()
            .position(|f| *f == frequency)
            .map(|i| Self(i as u8))
    }
}

impl From<SamplingFrequencyIndex> for u8 {
    fn from(value: SamplingFrequencyIndex) -> Self {
        value.0
    }
}

impl TryFrom<u8> for SamplingFrequencyIndex {
    type Error = AacError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (value as usize) < SAMPLING_FREQUENCIES.len() {
            Ok(Self(value))
        } else {
            Err(AacError::InvalidSamplingFrequencyIndex(value))
        }
    }
}
