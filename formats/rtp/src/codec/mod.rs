use std::time::Duration;

use mpeg4_generic::{RtpMpeg4AudioDepacketizer, errors::RtpMpeg4Error};
use thiserror::Error;
use tokio_util::bytes::Bytes;
use utils::traits::buffer::GenericFragmentComposer;

use crate::{errors::RtpError, packet::RtpTrivialPacket};

pub mod mpeg4_generic;

/// Complete access units recovered from one or more RTP packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessUnits {
    pub units: Vec<Bytes>,
    /// presentation time of the first unit
    pub pts: Duration,
}

impl AccessUnits {
    /// Presentation time of the unit at `index` for codecs with a fixed unit duration.
    pub fn pts_of(&self, index: usize, unit_duration: Duration) -> Duration {
        self.pts + unit_duration * index as u32
    }
}

#[derive(Debug, Error)]
pub enum RtpDepacketizeError {
    #[error("malformed rtp packet: {0}")]
    Rtp(#[from] RtpError),
    #[error("mpeg4 audio: {0}")]
    Mpeg4Audio(#[from] RtpMpeg4Error),
}

/// Per track depacketizer state, one variant per supported payload format.
#[derive(Debug)]
pub enum RtpDepacketizer {
    Mpeg4Audio(RtpMpeg4AudioDepacketizer),
}

impl RtpDepacketizer {
    /// `Ok(None)` when the packet did not complete an access unit yet.
    pub fn decode(
        &mut self,
        packet: RtpTrivialPacket,
    ) -> Result<Option<AccessUnits>, RtpDepacketizeError> {
        match self {
            Self::Mpeg4Audio(depacketizer) => Ok(depacketizer.enqueue(packet)?),
        }
    }

    pub fn clock_rate(&self) -> u32 {
        match self {
            Self::Mpeg4Audio(depacketizer) => depacketizer.params().sample_rate,
        }
    }
}
