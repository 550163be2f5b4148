use std::sync::Arc;

use rtp_formats::{
    codec::{AccessUnits, RtpDepacketizeError},
    packet::RtpTrivialPacket,
};
use rtsp_formats::response::RtspResponse;

use crate::{
    connection::RtspConnectionInfo,
    errors::{RtspServerError, RtspServerResult},
    session::RtspSessionHandle,
    stream::RtspStream,
    track::RtspTrack,
};

/// Callbacks from the server into the embedding application.
///
/// Called from connection tasks, so implementations must not block.
/// Returning `Err` from a request callback fails that request with
/// [`RtspServerError::status`].
pub trait RtspServerHandler: Send + Sync + 'static {
    fn on_connection_open(&self, conn: &RtspConnectionInfo) {
        let _ = conn;
    }

    /// `err` is `None` when the peer hung up or the server was closed.
    fn on_connection_close(&self, conn: &RtspConnectionInfo, err: Option<&RtspServerError>) {
        let _ = (conn, err);
    }

    fn on_session_open(&self, session: &RtspSessionHandle, conn: &RtspConnectionInfo, path: &str) {
        let _ = (session, conn, path);
    }

    /// `err` is `None` after a TEARDOWN.
    fn on_session_close(&self, session: &RtspSessionHandle, err: Option<&RtspServerError>) {
        let _ = (session, err);
    }

    /// Stream described to a player, the server renders its SDP body.
    fn on_describe(
        &self,
        conn: &RtspConnectionInfo,
        path: &str,
    ) -> RtspServerResult<(RtspResponse, Arc<RtspStream>)> {
        let _ = (conn, path);
        Err(RtspServerError::NotImplemented("DESCRIBE".to_owned()))
    }

    /// A publisher announced `tracks` for `path`, already validated.
    ///
    /// The SETUPs that follow use these tracks and skip [`RtspServerHandler::on_setup`].
    fn on_announce(
        &self,
        session: &RtspSessionHandle,
        path: &str,
        tracks: &[RtspTrack],
    ) -> RtspServerResult<RtspResponse> {
        let _ = (session, path, tracks);
        Err(RtspServerError::NotImplemented("ANNOUNCE".to_owned()))
    }

    /// Stream serving `path`, a non 2xx response fails the SETUP with its status.
    fn on_setup(
        &self,
        session: &RtspSessionHandle,
        path: &str,
        track_id: usize,
    ) -> RtspServerResult<(RtspResponse, Arc<RtspStream>)> {
        let _ = (session, path, track_id);
        Err(RtspServerError::NotImplemented("SETUP".to_owned()))
    }

    fn on_play(&self, session: &RtspSessionHandle) -> RtspServerResult<RtspResponse> {
        let _ = session;
        Err(RtspServerError::NotImplemented("PLAY".to_owned()))
    }

    fn on_record(&self, session: &RtspSessionHandle) -> RtspServerResult<RtspResponse> {
        let _ = session;
        Err(RtspServerError::NotImplemented("RECORD".to_owned()))
    }

    fn on_packet_rtp(&self, session: &RtspSessionHandle, track_id: usize, packet: &RtpTrivialPacket) {
        let _ = (session, track_id, packet);
    }

    fn on_access_units(&self, session: &RtspSessionHandle, track_id: usize, units: AccessUnits) {
        let _ = (session, track_id, units);
    }

    fn on_decode_error(
        &self,
        session: &RtspSessionHandle,
        track_id: usize,
        err: &RtpDepacketizeError,
    ) {
        let _ = (session, track_id, err);
    }
}
