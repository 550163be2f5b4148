use std::{collections::HashMap, sync::Arc, time::Duration};

use rtp_formats::{
    codec::{AccessUnits, RtpDepacketizeError, mpeg4_generic::access_unit_duration},
    packet::RtpTrivialPacket,
};
use rtsp_formats::{consts::status::RtspStatus, response::RtspResponse};
use rtsp_server::{
    connection::RtspConnectionInfo,
    errors::{RtspServerError, RtspServerResult},
    handler::RtspServerHandler,
    rtsp_server_simple_response,
    session::RtspSessionHandle,
    stream::RtspStream,
    track::RtspTrack,
};

use crate::{config::Path, errors::AppResult};

/// Serves each configured path from one stream, fed by whoever RECORDs into it.
#[derive(Debug)]
pub(crate) struct RelayHandler {
    streams: HashMap<String, Arc<RtspStream>>,
}

impl RelayHandler {
    pub(crate) fn new(paths: &[Path]) -> AppResult<Self> {
        let mut streams = HashMap::new();
        for path in paths {
            let tracks = path.tracks.iter().map(RtspTrack::from).collect();
            streams.insert(path.name.clone(), Arc::new(RtspStream::new(tracks)?));
        }
        Ok(Self { streams })
    }

    fn stream(&self, path: &str) -> RtspServerResult<&Arc<RtspStream>> {
        self.streams.get(path).ok_or_else(|| {
            RtspServerError::HandlerRejected(RtspStatus::NotFound, format!("unknown path {}", path))
        })
    }

    /// Publishers must announce exactly the tracks configured for the path.
    fn check_announce(&self, path: &str, tracks: &[RtspTrack]) -> RtspServerResult<()> {
        let stream = self.stream(path)?;
        if stream.tracks() != tracks {
            return Err(RtspServerError::HandlerRejected(
                RtspStatus::NotAcceptable,
                format!("{} announced {:?}, serving {:?}", path, tracks, stream.tracks()),
            ));
        }
        Ok(())
    }

    /// Presentation time of every unit, `None` for tracks without a fixed unit duration.
    fn unit_times(&self, path: &str, track_id: usize, units: &AccessUnits) -> Option<Vec<Duration>> {
        let RtspTrack::Mpeg4Audio { sample_rate, .. } =
            self.streams.get(path)?.track(track_id)?
        else {
            return None;
        };
        let duration = access_unit_duration(*sample_rate);
        Some(
            (0..units.units.len())
                .map(|index| units.pts_of(index, duration))
                .collect(),
        )
    }

    pub(crate) fn close(&self) {
        self.streams.values().for_each(|stream| stream.close());
    }
}

impl RtspServerHandler for RelayHandler {
    fn on_connection_open(&self, conn: &RtspConnectionInfo) {
        tracing::info!("connection {} opened from {}", conn.id, conn.peer_addr);
    }

    fn on_connection_close(&self, conn: &RtspConnectionInfo, err: Option<&RtspServerError>) {
        match err {
            None => tracing::info!("connection {} closed", conn.id),
            Some(err) => tracing::info!("connection {} closed: {}", conn.id, err),
        }
    }

    fn on_session_open(&self, session: &RtspSessionHandle, conn: &RtspConnectionInfo, path: &str) {
        tracing::info!(
            "session {} opened on connection {} for {}",
            session.id(),
            conn.id,
            path
        );
    }

    fn on_session_close(&self, session: &RtspSessionHandle, err: Option<&RtspServerError>) {
        tracing::info!("session {} closed, err: {:?}", session.id(), err);
    }

    fn on_describe(
        &self,
        _conn: &RtspConnectionInfo,
        path: &str,
    ) -> RtspServerResult<(RtspResponse, Arc<RtspStream>)> {
        let stream = self.stream(path)?;
        Ok((rtsp_server_simple_response(RtspStatus::OK), stream.clone()))
    }

    fn on_announce(
        &self,
        _session: &RtspSessionHandle,
        path: &str,
        tracks: &[RtspTrack],
    ) -> RtspServerResult<RtspResponse> {
        self.check_announce(path, tracks)?;
        tracing::info!("{} announced {} tracks", path, tracks.len());
        Ok(rtsp_server_simple_response(RtspStatus::OK))
    }

    fn on_setup(
        &self,
        _session: &RtspSessionHandle,
        path: &str,
        _track_id: usize,
    ) -> RtspServerResult<(RtspResponse, Arc<RtspStream>)> {
        let stream = self.stream(path)?;
        Ok((rtsp_server_simple_response(RtspStatus::OK), stream.clone()))
    }

    fn on_play(&self, session: &RtspSessionHandle) -> RtspServerResult<RtspResponse> {
        self.stream(session.path())?;
        Ok(rtsp_server_simple_response(RtspStatus::OK))
    }

    fn on_record(&self, session: &RtspSessionHandle) -> RtspServerResult<RtspResponse> {
        self.stream(session.path())?;
        Ok(rtsp_server_simple_response(RtspStatus::OK))
    }

    fn on_packet_rtp(&self, session: &RtspSessionHandle, track_id: usize, packet: &RtpTrivialPacket) {
        let Ok(stream) = self.stream(session.path()) else {
            return;
        };
        if let Err(err) = stream.write_packet_rtp(track_id, packet) {
            tracing::warn!("relay to {} failed: {}", session.path(), err);
        }
    }

    fn on_access_units(&self, session: &RtspSessionHandle, track_id: usize, units: AccessUnits) {
        let Some(times) = self.unit_times(session.path(), track_id, &units) else {
            tracing::trace!(
                "{} track {}: {} access units at {:?}",
                session.path(),
                track_id,
                units.units.len(),
                units.pts
            );
            return;
        };
        for (unit, pts) in units.units.iter().zip(times) {
            tracing::trace!(
                "{} track {}: access unit of {} bytes at {:?}",
                session.path(),
                track_id,
                unit.len(),
                pts
            );
        }
    }

    fn on_decode_error(&self, session: &RtspSessionHandle, track_id: usize, err: &RtpDepacketizeError) {
        tracing::warn!("{} track {}: {}", session.path(), track_id, err);
    }
}
