use std::{collections::BTreeMap, fmt, sync::Arc, time::Instant};

use rtsp_formats::header::transport::{TransportHeader, TransportMode};
use uuid::Uuid;

use crate::{
    connection::ConnectionId,
    errors::{RtspServerError, RtspServerResult},
    registry::SessionRegistry,
    stream::RtspStream,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtspSessionState {
    /// created by a SETUP, no track yet
    Init,
    /// at least one track set up, mode known
    PreReady,
    /// PLAY or RECORD accepted
    Ready,
    Closed,
}

impl fmt::Display for RtspSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::PreReady => "pre-ready",
            Self::Ready => "ready",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupTrack {
    /// rtp and rtcp interleaved channels
    pub channels: (u8, u8),
    pub ssrc: Option<u32>,
}

/// Registry record of one session, mutated only under the registry lock.
#[derive(Debug)]
pub(crate) struct RtspSession {
    pub(crate) id: Uuid,
    pub(crate) path: String,
    pub(crate) state: RtspSessionState,
    pub(crate) mode: Option<TransportMode>,
    pub(crate) tracks: BTreeMap<usize, SetupTrack>,
    pub(crate) stream: Option<Arc<RtspStream>>,
    /// tracks of an ANNOUNCE, the only ones this session may RECORD
    pub(crate) announced: Option<Arc<RtspStream>>,
    pub(crate) connection: ConnectionId,
    pub(crate) last_activity: Instant,
}

impl RtspSession {
    pub(crate) fn new(id: Uuid, path: String, connection: ConnectionId) -> Self {
        Self {
            id,
            path,
            state: RtspSessionState::Init,
            mode: None,
            tracks: BTreeMap::new(),
            stream: None,
            announced: None,
            connection,
            last_activity: Instant::now(),
        }
    }

    /// Binds announced tracks, only before any SETUP.
    pub(crate) fn announce(&mut self, stream: Arc<RtspStream>) -> RtspServerResult<()> {
        if self.state != RtspSessionState::Init || self.announced.is_some() {
            return Err(RtspServerError::InvalidState {
                method: "ANNOUNCE".to_owned(),
                state: self.state,
            });
        }
        self.mode = Some(TransportMode::Record);
        self.announced = Some(stream);
        Ok(())
    }

    /// Guards a SETUP before the host is asked for the stream.
    pub(crate) fn check_setup(
        &self,
        path: &str,
        track_id: usize,
        transport: &TransportHeader,
    ) -> RtspServerResult<(u8, u8)> {
        if !matches!(
            self.state,
            RtspSessionState::Init | RtspSessionState::PreReady
        ) {
            return Err(RtspServerError::InvalidState {
                method: "SETUP".to_owned(),
                state: self.state,
            });
        }
        if self.path != path {
            return Err(RtspServerError::DifferentPaths);
        }
        if self.tracks.contains_key(&track_id) {
            return Err(RtspServerError::AlreadySetup(track_id));
        }

        let mode = transport.mode.unwrap_or(TransportMode::Play);
        if self.mode.is_some_and(|current| current != mode) {
            return Err(RtspServerError::ModeMismatch);
        }

        let (rtp, rtcp) = transport
            .interleaved
            .ok_or(RtspServerError::InterleavedMissing)?;
        for track in self.tracks.values() {
            let (used_rtp, used_rtcp) = track.channels;
            if let Some(channel) = [rtp, rtcp]
                .into_iter()
                .find(|channel| *channel == used_rtp || *channel == used_rtcp)
            {
                return Err(RtspServerError::InterleavedChannelInUse(channel));
            }
        }
        Ok((rtp, rtcp))
    }

    pub(crate) fn add_track(
        &mut self,
        path: &str,
        track_id: usize,
        transport: &TransportHeader,
        stream: Arc<RtspStream>,
    ) -> RtspServerResult<()> {
        let channels = self.check_setup(path, track_id, transport)?;
        if stream.is_closed() {
            return Err(RtspServerError::StreamClosed);
        }
        if stream.track(track_id).is_none() {
            return Err(RtspServerError::TrackNotFound(track_id));
        }

        self.tracks.insert(
            track_id,
            SetupTrack {
                channels,
                ssrc: transport.ssrc,
            },
        );
        self.mode = Some(transport.mode.unwrap_or(TransportMode::Play));
        self.stream = Some(stream);
        self.state = RtspSessionState::PreReady;
        Ok(())
    }

    pub(crate) fn check_start(&self, mode: TransportMode) -> RtspServerResult<()> {
        if self.state != RtspSessionState::PreReady || self.mode != Some(mode) {
            let method = match mode {
                TransportMode::Play => "PLAY",
                TransportMode::Record => "RECORD",
            };
            return Err(RtspServerError::InvalidState {
                method: method.to_owned(),
                state: self.state,
            });
        }
        Ok(())
    }

    pub(crate) fn start(&mut self, mode: TransportMode) -> RtspServerResult<()> {
        self.check_start(mode)?;
        self.state = RtspSessionState::Ready;
        Ok(())
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.state == RtspSessionState::Ready && self.mode == Some(TransportMode::Play)
    }

    /// track id -> rtp channel of every set up track
    pub(crate) fn rtp_channels(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.tracks
            .iter()
            .map(|(track_id, track)| (*track_id, track.channels.0))
    }
}

/// Host side view of a session, valid after the session is gone.
#[derive(Debug, Clone)]
pub struct RtspSessionHandle {
    id: Uuid,
    path: String,
    registry: Arc<SessionRegistry>,
}

impl RtspSessionHandle {
    pub(crate) fn new(id: Uuid, path: String, registry: Arc<SessionRegistry>) -> Self {
        Self { id, path, registry }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> RtspSessionState {
        self.registry.session_state(self.id)
    }

    /// Closes the session and the connection it is bound to, repeated calls do nothing.
    pub fn close(&self) {
        self.registry.request_close(self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rtsp_formats::header::transport::{TransportHeader, TransportMode};
    use uuid::Uuid;

    use super::{RtspSession, RtspSessionState};
    use crate::{errors::RtspServerError, stream::RtspStream, track::RtspTrack};

    fn stream() -> Arc<RtspStream> {
        Arc::new(
            RtspStream::new(vec![
                RtspTrack::aac_hbr(97, 48000, 2),
                RtspTrack::aac_hbr(98, 16000, 1),
            ])
            .unwrap(),
        )
    }

    fn transport(channels: (u8, u8), mode: Option<TransportMode>) -> TransportHeader {
        TransportHeader {
            interleaved: Some(channels),
            ssrc: None,
            mode,
        }
    }

    #[test]
    fn test_setup_then_play() {
        let mut session = RtspSession::new(Uuid::now_v7(), "teststream".to_owned(), 1);
        assert_eq!(session.state, RtspSessionState::Init);
        assert!(matches!(
            session.check_start(TransportMode::Play),
            Err(RtspServerError::InvalidState { .. })
        ));

        session
            .add_track("teststream", 0, &transport((0, 1), None), stream())
            .unwrap();
        assert_eq!(session.state, RtspSessionState::PreReady);
        assert_eq!(session.mode, Some(TransportMode::Play));
        session
            .add_track("teststream", 1, &transport((2, 3), None), stream())
            .unwrap();
        assert_eq!(session.rtp_channels().collect::<Vec<_>>(), vec![(0, 0), (1, 2)]);

        assert!(session.check_start(TransportMode::Record).is_err());
        session.start(TransportMode::Play).unwrap();
        assert!(session.is_playing());
        assert!(matches!(
            session.check_setup("teststream", 1, &transport((4, 5), None)),
            Err(RtspServerError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_setup_guards() {
        let mut session = RtspSession::new(Uuid::now_v7(), "teststream".to_owned(), 1);
        session
            .add_track("teststream", 0, &transport((0, 1), Some(TransportMode::Record)), stream())
            .unwrap();

        assert!(matches!(
            session.check_setup("other", 1, &transport((2, 3), Some(TransportMode::Record))),
            Err(RtspServerError::DifferentPaths)
        ));
        assert!(matches!(
            session.check_setup("teststream", 0, &transport((2, 3), Some(TransportMode::Record))),
            Err(RtspServerError::AlreadySetup(0))
        ));
        assert!(matches!(
            session.check_setup("teststream", 1, &transport((2, 3), Some(TransportMode::Play))),
            Err(RtspServerError::ModeMismatch)
        ));
        assert!(matches!(
            session.check_setup("teststream", 1, &transport((1, 2), Some(TransportMode::Record))),
            Err(RtspServerError::InterleavedChannelInUse(1))
        ));
        assert!(matches!(
            session.check_setup(
                "teststream",
                1,
                &TransportHeader {
                    mode: Some(TransportMode::Record),
                    ..Default::default()
                }
            ),
            Err(RtspServerError::InterleavedMissing)
        ));
        assert!(matches!(
            session.add_track("teststream", 5, &transport((2, 3), Some(TransportMode::Record)), stream()),
            Err(RtspServerError::TrackNotFound(5))
        ));
        assert_eq!(session.tracks.len(), 1);
    }

    #[test]
    fn test_announced_session_records() {
        let mut session = RtspSession::new(Uuid::now_v7(), "teststream".to_owned(), 1);
        session.announce(stream()).unwrap();
        assert!(matches!(
            session.announce(stream()),
            Err(RtspServerError::InvalidState { .. })
        ));
        assert!(matches!(
            session.check_setup("teststream", 0, &transport((0, 1), None)),
            Err(RtspServerError::ModeMismatch)
        ));
        session
            .add_track("teststream", 0, &transport((0, 1), Some(TransportMode::Record)), stream())
            .unwrap();
        session.start(TransportMode::Record).unwrap();
        assert!(!session.is_playing());
    }

    #[test]
    fn test_closed_stream() {
        let mut session = RtspSession::new(Uuid::now_v7(), "teststream".to_owned(), 1);
        let stream = stream();
        stream.close();
        assert!(matches!(
            session.add_track("teststream", 0, &transport((0, 1), None), stream),
            Err(RtspServerError::StreamClosed)
        ));
        assert_eq!(session.state, RtspSessionState::Init);
        assert!(session.tracks.is_empty());
    }
}
