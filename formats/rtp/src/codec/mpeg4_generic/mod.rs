//! RTP payload format for MPEG-4 audio streams, RFC 3640
use std::{io::Cursor, time::Duration};

use au_header::AuHeaderSection;
use codec_aac::{
    adts::AdtsPacket,
    consts::{MAX_ACCESS_UNIT_SIZE, SAMPLES_PER_ACCESS_UNIT},
};
use errors::{RtpMpeg4Error, RtpMpeg4Result};
use parameters::RtpMpeg4AudioParams;
use tokio_util::bytes::{Bytes, BytesMut};
use utils::traits::{buffer::GenericFragmentComposer, reader::ReadRemainingFrom};

use crate::{packet::RtpTrivialPacket, time_decoder::RtpTimeDecoder};

use super::AccessUnits;

pub mod au_header;
pub mod errors;
pub mod parameters;


/// Duration of one access unit at the given sample rate.
pub fn access_unit_duration(sample_rate: u32) -> Duration {
    let nanos = SAMPLES_PER_ACCESS_UNIT as u64 * 1_000_000_000 / sample_rate.max(1) as u64;
    Duration::from_nanos(nanos)
}

/// Turns a sequence of mpeg4-generic RTP packets into access units.
///
/// Fragments of a single access unit are collected until the marker bit,
/// any error drops them. Some cameras wrap every access unit in ADTS, this
/// is detected on the first decoded unit and unwrapped from then on.
#[derive(Debug)]
pub struct RtpMpeg4AudioDepacketizer {
    params: RtpMpeg4AudioParams,
    time_decoder: RtpTimeDecoder,
    first_au_parsed: bool,
    adts_mode: bool,
    fragments: Vec<Bytes>,
    fragmented_size: usize,
}

impl RtpMpeg4AudioDepacketizer {
    pub fn new(params: RtpMpeg4AudioParams) -> RtpMpeg4Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            time_decoder: RtpTimeDecoder::new(params.sample_rate),
            first_au_parsed: false,
            adts_mode: false,
            fragments: vec![],
            fragmented_size: 0,
        })
    }

    pub fn params(&self) -> &RtpMpeg4AudioParams {
        &self.params
    }

    pub fn is_adts_mode(&self) -> bool {
        self.adts_mode
    }

    pub fn has_pending_fragments(&self) -> bool {
        !self.fragments.is_empty()
    }

    pub fn reset_fragments(&mut self) {
        self.fragments.clear();
        self.fragmented_size = 0;
    }

    fn decode(&mut self, packet: RtpTrivialPacket) -> RtpMpeg4Result<Option<AccessUnits>> {
        if packet.payload.len() < 2 {
            return Err(RtpMpeg4Error::ShortPayload);
        }

        let section =
            AuHeaderSection::read_remaining_from(&self.params, &mut Cursor::new(&packet.payload))?;
        let data_offset = section.section_bytes();
        if data_offset > packet.payload.len() {
            return Err(RtpMpeg4Error::ShortPayload);
        }
        let data = packet.payload.slice(data_offset..);

        let units = if self.fragments.is_empty() {
            self.decode_unfragmented(&section.au_sizes, data, packet.header.marker)?
        } else {
            self.decode_fragmented(&section.au_sizes, data, packet.header.marker)?
        };

        let Some(units) = units else {
            return Ok(None);
        };
        let units = self.finalize(units)?;
        Ok(Some(AccessUnits {
            units,
            pts: self.time_decoder.decode(packet.header.timestamp),
        }))
    }

    fn decode_fragmented(
        &mut self,
        au_sizes: &[usize],
        data: Bytes,
        marker: bool,
    ) -> RtpMpeg4Result<Option<Vec<Bytes>>> {
        if au_sizes.len() != 1 {
            return Err(RtpMpeg4Error::FragMultipleAu(au_sizes.len()));
        }
        let au_size = au_sizes[0];
        if data.len() < au_size {
            return Err(RtpMpeg4Error::ShortPayload);
        }

        self.fragmented_size += au_size;
        if self.fragmented_size > MAX_ACCESS_UNIT_SIZE {
            return Err(RtpMpeg4Error::AuTooBig(self.fragmented_size));
        }
        self.fragments.push(data.slice(..au_size));

        if !marker {
            return Ok(None);
        }

        let mut access_unit = BytesMut::with_capacity(self.fragmented_size);
        for fragment in self.fragments.drain(..) {
            access_unit.extend_from_slice(&fragment);
        }
        self.fragmented_size = 0;
        Ok(Some(vec![access_unit.freeze()]))
    }

    fn decode_unfragmented(
        &mut self,
        au_sizes: &[usize],
        mut data: Bytes,
        marker: bool,
    ) -> RtpMpeg4Result<Option<Vec<Bytes>>> {
        if marker {
            let mut units = Vec::with_capacity(au_sizes.len());
            for au_size in au_sizes {
                if data.len() < *au_size {
                    return Err(RtpMpeg4Error::ShortPayload);
                }
                units.push(data.split_to(*au_size));
            }
            return Ok(Some(units));
        }

        if au_sizes.len() != 1 {
            return Err(RtpMpeg4Error::FragMultipleAu(au_sizes.len()));
        }
        let au_size = au_sizes[0];
        if data.len() < au_size {
            return Err(RtpMpeg4Error::ShortPayload);
        }
        self.fragmented_size = au_size;
        self.fragments.push(data.slice(..au_size));
        Ok(None)
    }

    fn finalize(&mut self, mut units: Vec<Bytes>) -> RtpMpeg4Result<Vec<Bytes>> {
        if !self.first_au_parsed {
            self.first_au_parsed = true;
            if units.len() == 1
                && units[0].len() >= 2
                && units[0][0] == 0xFF
                && (units[0][1] & 0xF0) == 0xF0
                && let Ok(packets) = AdtsPacket::read_all(&units[0])
                && packets.len() == 1
            {
                tracing::debug!("access units are wrapped in adts, unwrapping");
                self.adts_mode = true;
                units[0] = packets[0].access_unit.clone();
            }
            return Ok(units);
        }

        if !self.adts_mode {
            return Ok(units);
        }

        if units.len() != 1 {
            return Err(RtpMpeg4Error::AdtsMultipleAu(units.len()));
        }
        let packets = AdtsPacket::read_all(&units[0])?;
        if packets.len() != 1 {
            return Err(RtpMpeg4Error::MultipleAdts(packets.len()));
        }
        units[0] = packets[0].access_unit.clone();
        Ok(units)
    }
}

impl GenericFragmentComposer for RtpMpeg4AudioDepacketizer {
    type In = RtpTrivialPacket;
    type Out = AccessUnits;
    type Error = RtpMpeg4Error;
    fn enqueue(&mut self, packet: Self::In) -> Result<Option<Self::Out>, Self::Error> {
        let result = self.decode(packet);
        if result.is_err() {
            self.reset_fragments();
        }
        result
    }
}
