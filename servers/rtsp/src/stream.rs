use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::RwLock;
use rtp_formats::packet::RtpTrivialPacket;
use rtsp_formats::{
    interleaved::RtspInterleavedPacket, sdp_extension::attribute::RtspSDPControl,
};
use sdp_formats::{attributes::SDPTrivialAttribute, session::SessionDescription};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::bytes::Bytes;
use utils::bytes::writable_to_bytes;
use uuid::Uuid;

use crate::{
    errors::{RtspServerError, RtspServerResult},
    track::RtspTrack,
};

#[derive(Debug)]
struct StreamReader {
    /// track id -> interleaved rtp channel
    channels: HashMap<usize, u8>,
    sender: mpsc::Sender<RtspInterleavedPacket>,
}

/// Tracks published by the host, read by any number of playing sessions.
#[derive(Debug)]
pub struct RtspStream {
    tracks: Vec<RtspTrack>,
    closed: AtomicBool,
    readers: RwLock<HashMap<Uuid, StreamReader>>,
}

impl RtspStream {
    pub fn new(tracks: Vec<RtspTrack>) -> RtspServerResult<Self> {
        if tracks.is_empty() {
            return Err(RtspServerError::BadRequest(
                "a stream needs at least one track".to_owned(),
            ));
        }
        tracks.iter().try_for_each(RtspTrack::validate)?;
        Ok(Self {
            tracks,
            closed: AtomicBool::new(false),
            readers: RwLock::new(HashMap::new()),
        })
    }

    pub fn tracks(&self) -> &[RtspTrack] {
        &self.tracks
    }

    pub fn track(&self, track_id: usize) -> Option<&RtspTrack> {
        self.tracks.get(track_id)
    }

    /// Description served by DESCRIBE, track `N` is set up at `trackID=N`.
    pub fn session_description(&self) -> RtspServerResult<SessionDescription> {
        let media_descriptions = self
            .tracks
            .iter()
            .enumerate()
            .map(|(track_id, track)| track.media_description(&track_control(track_id)))
            .collect::<RtspServerResult<_>>()?;
        Ok(SessionDescription {
            attributes: vec![SDPTrivialAttribute::from(&RtspSDPControl::Asterisk).into()],
            media_descriptions,
            ..Default::default()
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Later SETUPs against this stream fail, current readers stop receiving.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.readers.write().clear();
        tracing::info!("stream closed");
    }

    pub fn reader_count(&self) -> usize {
        self.readers.read().len()
    }

    pub(crate) fn add_reader(
        &self,
        session_id: Uuid,
        channels: HashMap<usize, u8>,
        sender: mpsc::Sender<RtspInterleavedPacket>,
    ) {
        if self.is_closed() {
            return;
        }
        self.readers
            .write()
            .insert(session_id, StreamReader { channels, sender });
    }

    pub(crate) fn remove_reader(&self, session_id: Uuid) {
        self.readers.write().remove(&session_id);
    }

    /// Queues the packet to every reader that set up `track_id`.
    ///
    /// Never blocks, a reader whose queue is full misses this packet.
    pub fn write_packet_rtp(
        &self,
        track_id: usize,
        packet: &RtpTrivialPacket,
    ) -> RtspServerResult<()> {
        if self.is_closed() {
            return Ok(());
        }
        if track_id >= self.tracks.len() {
            return Err(RtspServerError::TrackNotFound(track_id));
        }

        let payload = Bytes::from(writable_to_bytes(packet)?);
        for (session_id, reader) in self.readers.read().iter() {
            let Some(&channel) = reader.channels.get(&track_id) else {
                continue;
            };
            match reader
                .sender
                .try_send(RtspInterleavedPacket::new(channel, payload.clone()))
            {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::trace!("reader {} is lagging, packet dropped", session_id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::trace!("reader {} is gone", session_id);
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn track_control(track_id: usize) -> RtspSDPControl {
    RtspSDPControl::Relative(format!("trackID={}", track_id))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rtp_formats::packet::RtpTrivialPacket;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use super::RtspStream;
    use crate::track::RtspTrack;

    fn packet(sequence_number: u16) -> RtpTrivialPacket {
        RtpTrivialPacket::builder()
            .payload_type(97)
            .sequence_number(sequence_number)
            .timestamp(1000)
            .ssrc(0x1234)
            .marker(true)
            .payload(&[1, 2, 3])
            .build()
    }

    #[test]
    fn test_fan_out() {
        let stream = RtspStream::new(vec![
            RtspTrack::aac_hbr(97, 48000, 2),
            RtspTrack::aac_hbr(98, 48000, 1),
        ])
        .unwrap();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        stream.add_reader(Uuid::now_v7(), HashMap::from([(0, 4)]), tx_a);
        stream.add_reader(Uuid::now_v7(), HashMap::from([(1, 2)]), tx_b);
        assert_eq!(stream.reader_count(), 2);

        stream.write_packet_rtp(0, &packet(1)).unwrap();
        let frame = rx_a.try_recv().unwrap();
        assert_eq!(frame.channel_id, 4);
        assert_eq!(
            RtpTrivialPacket::parse(&frame.payload).unwrap().header.sequence_number,
            1
        );
        assert!(rx_b.try_recv().is_err());

        assert!(stream.write_packet_rtp(2, &packet(2)).is_err());
    }

    #[test]
    fn test_full_queue_drops() {
        let stream = RtspStream::new(vec![RtspTrack::aac_hbr(97, 48000, 2)]).unwrap();
        let (tx, mut rx) = mpsc::channel(1);
        stream.add_reader(Uuid::now_v7(), HashMap::from([(0, 0)]), tx);
        stream.write_packet_rtp(0, &packet(1)).unwrap();
        stream.write_packet_rtp(0, &packet(2)).unwrap();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_close() {
        let stream = RtspStream::new(vec![RtspTrack::aac_hbr(97, 48000, 2)]).unwrap();
        let (tx, mut rx) = mpsc::channel(1);
        let session_id = Uuid::now_v7();
        stream.add_reader(session_id, HashMap::from([(0, 0)]), tx.clone());
        stream.close();
        stream.close();
        assert!(stream.is_closed());
        assert_eq!(stream.reader_count(), 0);
        stream.write_packet_rtp(0, &packet(1)).unwrap();
        assert!(rx.try_recv().is_err());

        stream.add_reader(session_id, HashMap::from([(0, 0)]), tx);
        assert_eq!(stream.reader_count(), 0);
    }

    #[test]
    fn test_empty_stream() {
        assert!(RtspStream::new(vec![]).is_err());
    }

    #[test]
    fn test_session_description() {
        let stream = RtspStream::new(vec![
            RtspTrack::aac_hbr(96, 48000, 2),
            RtspTrack::Generic {
                payload_type: 97,
                clock_rate: 8000,
                encoding_name: "PCMA".to_owned(),
            },
        ])
        .unwrap();
        let sdp = stream.session_description().unwrap();
        let text = format!("{}", sdp);
        assert!(text.starts_with("v=0\r\no=- 0 0 IN IP4 127.0.0.1\r\ns=Stream\r\nt=0 0\r\na=control:*\r\n"));
        assert!(text.contains("m=audio 0 RTP/AVP 97\r\na=rtpmap:97 PCMA/8000\r\na=control:trackID=1\r\n"));

        let parsed: sdp_formats::session::SessionDescription = text.parse().unwrap();
        let tracks = parsed
            .media_descriptions
            .iter()
            .map(RtspTrack::from_media_description)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tracks, stream.tracks());
    }
}
