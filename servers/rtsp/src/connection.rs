use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use futures::{SinkExt, StreamExt};
use rtp_formats::{codec::RtpDepacketizer, packet::RtpTrivialPacket};
use rtsp_formats::{
    RtspMessage, RtspMessageFramed,
    consts::{methods::RtspMethod, status::RtspStatus},
    header::{
        RtspHeader,
        session::SessionHeader,
        transport::{TransportHeader, TransportMode},
    },
    interleaved::RtspInterleavedPacket,
    path::{rtsp_path, setup_path},
    request::RtspRequest,
    response::RtspResponse,
    sdp_extension::{SDP_CONTENT_TYPE, media_control},
};
use sdp_formats::session::SessionDescription;
use tokio::{
    net::TcpStream,
    sync::mpsc,
    time::{Instant, sleep_until},
};
use tokio_util::{codec::Framed, sync::CancellationToken};
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::{
    errors::{RtspServerError, RtspServerResult},
    handler::RtspServerHandler,
    rtsp_server_simple_response,
    server::ServerContext,
    session::RtspSessionHandle,
    stream::{RtspStream, track_control},
    track::RtspTrack,
};

pub type ConnectionId = u64;

const PUBLIC_METHODS: &str =
    "OPTIONS, DESCRIBE, ANNOUNCE, SETUP, PLAY, RECORD, TEARDOWN, GET_PARAMETER";

#[derive(Debug, Clone)]
pub struct RtspConnectionInfo {
    pub id: ConnectionId,
    pub peer_addr: SocketAddr,
}

#[derive(Debug)]
pub(crate) enum ConnectionCommand {
    /// the bound session was closed by the host
    Terminate,
}

#[derive(Debug)]
struct ChannelRoute {
    track_id: usize,
    depacketizer: Option<RtpDepacketizer>,
}

/// One client socket, served by a single task until it hangs up,
/// times out, or is terminated.
pub(crate) struct RtspConnection<H: RtspServerHandler> {
    info: RtspConnectionInfo,
    framed: Framed<TcpStream, RtspMessageFramed>,
    context: Arc<ServerContext<H>>,
    cancel: CancellationToken,
    commands_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
    outbound_tx: mpsc::Sender<RtspInterleavedPacket>,
    outbound_rx: mpsc::Receiver<RtspInterleavedPacket>,
    session: Option<RtspSessionHandle>,
    /// rtp channel -> track of a RECORD session
    channels: HashMap<u8, ChannelRoute>,
    pending_reader: Option<(Arc<RtspStream>, HashMap<usize, u8>)>,
    /// SETUP url of each announced track
    announced_urls: Vec<Url>,
    playing: bool,
    recording: bool,
    last_activity: Instant,
}

impl<H: RtspServerHandler> RtspConnection<H> {
    pub(crate) fn new(
        tcp_stream: TcpStream,
        info: RtspConnectionInfo,
        commands_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        context: Arc<ServerContext<H>>,
        cancel: CancellationToken,
    ) -> Self {
        let (outbound_tx, outbound_rx) =
            mpsc::channel(context.config.write_queue_capacity.max(1));
        Self {
            info,
            framed: Framed::new(tcp_stream, RtspMessageFramed),
            context,
            cancel,
            commands_rx,
            outbound_tx,
            outbound_rx,
            session: None,
            channels: HashMap::new(),
            pending_reader: None,
            announced_urls: Vec::new(),
            playing: false,
            recording: false,
            last_activity: Instant::now(),
        }
    }

    pub(crate) async fn run(mut self) {
        self.context.handler.on_connection_open(&self.info);
        let err = self.serve().await.err();
        match &err {
            None => tracing::info!("rtsp connection closed"),
            Some(err) => tracing::warn!("rtsp connection closed with error: {}", err),
        }

        if self.session.is_some() {
            let closed = RtspServerError::ConnectionClosed;
            self.close_session(Some(err.as_ref().unwrap_or(&closed)));
        }
        self.context.registry.deregister_connection(self.info.id);
        self.context
            .handler
            .on_connection_close(&self.info, err.as_ref());
    }

    async fn serve(&mut self) -> RtspServerResult<()> {
        loop {
            let idle_limit = self.idle_limit();
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(()),
                command = self.commands_rx.recv() => match command {
                    Some(ConnectionCommand::Terminate) => return Err(RtspServerError::Terminated),
                    None => return Ok(()),
                },
                Some(frame) = self.outbound_rx.recv() => {
                    tracing::trace!("sending interleaved frame on channel {}", frame.channel_id);
                    self.send(RtspMessage::Interleaved(frame)).await?;
                }
                message = self.framed.next() => match message {
                    None => return Ok(()),
                    Some(Err(err)) => return Err(err.into()),
                    Some(Ok(message)) => {
                        self.last_activity = Instant::now();
                        if let Some(session) = &self.session {
                            self.context.registry.touch(session.id());
                        }
                        self.on_message(message).await?;
                    }
                },
                () = idle(self.last_activity, idle_limit) => {
                    return Err(match self.session {
                        Some(_) => RtspServerError::SessionTimeout(self.context.config.session_timeout()),
                        None => RtspServerError::ReadTimeout(self.context.config.read_timeout()),
                    });
                }
            }
        }
    }

    /// No limit while playing, the socket itself tells whether the reader is alive.
    fn idle_limit(&self) -> Option<Duration> {
        if self.playing {
            return None;
        }
        match self.session {
            Some(_) => Some(self.context.config.session_timeout()),
            None => Some(self.context.config.read_timeout()),
        }
    }

    async fn send(&mut self, message: RtspMessage) -> RtspServerResult<()> {
        let timeout = self.context.config.write_timeout();
        tokio::time::timeout(timeout, self.framed.send(message))
            .await
            .map_err(|_| RtspServerError::WriteTimeout(timeout))??;
        Ok(())
    }

    async fn send_response(
        &mut self,
        request: &RtspRequest,
        response: RtspResponse,
    ) -> RtspServerResult<()> {
        let response = self
            .context
            .middlewares
            .iter()
            .try_fold(response, |res, middleware| {
                middleware.pre_response(request, res)
            })?;
        tracing::debug!("sending rtsp response: {}", response.status());
        self.send(RtspMessage::Response(response)).await
    }

    async fn on_message(&mut self, message: RtspMessage) -> RtspServerResult<()> {
        match message {
            RtspMessage::Request(request) => {
                let span = tracing::debug_span!(
                    "request",
                    method = request.method().as_str(),
                    uri = request.uri().as_str(),
                    cseq = request
                        .headers()
                        .get_unique(RtspHeader::CSeq)
                        .map(String::as_str),
                    session_id = request
                        .headers()
                        .get_unique(RtspHeader::Session)
                        .map(String::as_str),
                );
                self.on_request(request).instrument(span).await
            }
            RtspMessage::Response(response) => {
                tracing::debug!("ignoring rtsp response from client: {}", response.status());
                Ok(())
            }
            RtspMessage::Interleaved(packet) => {
                self.on_interleaved(packet);
                Ok(())
            }
        }
    }

    async fn on_request(&mut self, request: RtspRequest) -> RtspServerResult<()> {
        tracing::debug!("received rtsp request: {}", request.method());
        let request = self
            .context
            .middlewares
            .iter()
            .try_fold(request, |req, middleware| middleware.pre_request(req))?;

        if !request.headers().contains(RtspHeader::CSeq) {
            self.send_response(
                &request,
                rtsp_server_simple_response(RtspStatus::BadRequest),
            )
            .await?;
            return Err(RtspServerError::CSeqMissing);
        }

        let response = match self.dispatch(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("{} failed: {}", request.method(), err);
                rtsp_server_simple_response(err.status())
            }
        };
        self.send_response(&request, response).await?;

        // after the PLAY response so it precedes every data frame
        if let Some((stream, channels)) = self.pending_reader.take()
            && let Some(session) = &self.session
        {
            stream.add_reader(session.id(), channels, self.outbound_tx.clone());
            self.playing = true;
            tracing::info!("session {} is playing {}", session.id(), session.path());
        }
        Ok(())
    }

    fn dispatch(&mut self, request: &RtspRequest) -> RtspServerResult<RtspResponse> {
        match request.method() {
            RtspMethod::OPTIONS => {
                let mut response = rtsp_server_simple_response(RtspStatus::OK);
                response
                    .headers_mut()
                    .set(RtspHeader::Public, PUBLIC_METHODS);
                Ok(response)
            }
            RtspMethod::DESCRIBE => self.on_describe(request),
            RtspMethod::ANNOUNCE => self.on_announce(request),
            RtspMethod::SETUP => self.on_setup(request),
            RtspMethod::PLAY => self.on_start(request, TransportMode::Play),
            RtspMethod::RECORD => self.on_start(request, TransportMode::Record),
            RtspMethod::TEARDOWN => {
                self.session_from_request(request)?;
                self.close_session(None);
                Ok(rtsp_server_simple_response(RtspStatus::OK))
            }
            RtspMethod::GET_PARAMETER => {
                if request.headers().contains(RtspHeader::Session) {
                    let session = self.session_from_request(request)?;
                    self.context.registry.touch(session.id());
                }
                Ok(rtsp_server_simple_response(RtspStatus::OK))
            }
            method => Err(RtspServerError::NotImplemented(method.to_string())),
        }
    }

    fn on_describe(&self, request: &RtspRequest) -> RtspServerResult<RtspResponse> {
        let path = rtsp_path(request.uri());
        let (response, stream) = self.context.handler.on_describe(&self.info, &path)?;
        if !response.status().is_success() {
            return Err(RtspServerError::HandlerRejected(
                response.status(),
                format!("DESCRIBE {}", path),
            ));
        }
        if stream.is_closed() {
            return Err(RtspServerError::StreamClosed);
        }

        let sdp = stream.session_description()?;
        Ok(response
            .into_builder()
            .header(RtspHeader::ContentBase, content_base(request.uri()).as_str())
            .body(SDP_CONTENT_TYPE, sdp.to_string())
            .build())
    }

    fn on_announce(&mut self, request: &RtspRequest) -> RtspServerResult<RtspResponse> {
        if self.session.is_some() {
            return Err(RtspServerError::OneConnTwoSessions);
        }
        let path = rtsp_path(request.uri());
        if path.is_empty() {
            return Err(RtspServerError::BadRequest(format!(
                "invalid announce url: {}",
                request.uri()
            )));
        }
        match request.headers().get_unique(RtspHeader::ContentType) {
            Some(content_type) if content_type.trim() == SDP_CONTENT_TYPE => {}
            other => {
                return Err(RtspServerError::BadRequest(format!(
                    "unsupported content type: {:?}",
                    other
                )));
            }
        }
        let sdp: SessionDescription = request
            .body()
            .ok_or_else(|| RtspServerError::BadRequest("announce without body".to_owned()))?
            .parse()?;

        let base = content_base(request.uri());
        let mut tracks = Vec::with_capacity(sdp.media_descriptions.len());
        let mut urls = Vec::with_capacity(sdp.media_descriptions.len());
        for (track_id, media) in sdp.media_descriptions.iter().enumerate() {
            tracks.push(RtspTrack::from_media_description(media)?);
            let control = media_control(media).unwrap_or_else(|| track_control(track_id));
            urls.push(control.resolve(&base)?);
        }
        let stream = Arc::new(RtspStream::new(tracks)?);

        let session = self.open_session(&path)?;
        let mut response = self
            .announce(&session, &path, stream)
            .inspect_err(|err| self.close_session(Some(err)))?;
        self.announced_urls = urls;
        response.headers_mut().set(
            RtspHeader::Session,
            session_header(session.id(), self.context.config.session_timeout()),
        );
        Ok(response)
    }

    fn announce(
        &self,
        session: &RtspSessionHandle,
        path: &str,
        stream: Arc<RtspStream>,
    ) -> RtspServerResult<RtspResponse> {
        let response = self
            .context
            .handler
            .on_announce(session, path, stream.tracks())?;
        if !response.status().is_success() {
            return Err(RtspServerError::HandlerRejected(
                response.status(),
                format!("ANNOUNCE {}", path),
            ));
        }
        self.context
            .registry
            .announce(session.id(), self.info.id, stream)?;
        Ok(response)
    }

    fn on_setup(&mut self, request: &RtspRequest) -> RtspServerResult<RtspResponse> {
        let (path, track_id) = match self.announced_track(request.uri()) {
            Some(announced) => announced,
            None => setup_path(request.uri()).ok_or_else(|| {
                RtspServerError::BadRequest(format!("invalid setup url: {}", request.uri()))
            })?,
        };
        let transport = request.headers().transport()?;

        let (session, created) = if request.headers().contains(RtspHeader::Session) {
            (self.session_from_request(request)?, false)
        } else {
            if self.session.is_some() {
                return Err(RtspServerError::OneConnTwoSessions);
            }
            (self.open_session(&path)?, true)
        };

        self.setup_track(&session, &path, track_id, &transport)
            .inspect_err(|err| {
                if created {
                    self.close_session(Some(err));
                }
            })
    }

    fn setup_track(
        &mut self,
        session: &RtspSessionHandle,
        path: &str,
        track_id: usize,
        transport: &TransportHeader,
    ) -> RtspServerResult<RtspResponse> {
        let registry = &self.context.registry;
        let (rtp, rtcp) =
            registry.check_setup(session.id(), self.info.id, path, track_id, transport)?;
        let announced = registry.announced_stream(session.id(), self.info.id)?;
        let (mut response, stream) = match announced {
            Some(stream) => (rtsp_server_simple_response(RtspStatus::OK), stream),
            None => self.context.handler.on_setup(session, path, track_id)?,
        };
        if !response.status().is_success() {
            return Err(RtspServerError::HandlerRejected(
                response.status(),
                format!("SETUP {}", path),
            ));
        }

        let mode = transport.mode.unwrap_or(TransportMode::Play);
        let depacketizer = match (mode, stream.track(track_id)) {
            (TransportMode::Record, Some(track)) => track.depacketizer()?,
            _ => None,
        };
        registry.add_track(
            session.id(),
            self.info.id,
            path,
            track_id,
            transport,
            stream,
        )?;
        if mode == TransportMode::Record {
            self.channels.insert(
                rtp,
                ChannelRoute {
                    track_id,
                    depacketizer,
                },
            );
        }

        let headers = response.headers_mut();
        headers.set(
            RtspHeader::Session,
            session_header(session.id(), self.context.config.session_timeout()),
        );
        headers.set(
            RtspHeader::Transport,
            TransportHeader {
                interleaved: Some((rtp, rtcp)),
                ssrc: None,
                mode: Some(mode),
            }
            .marshal(),
        );
        Ok(response)
    }

    fn on_start(
        &mut self,
        request: &RtspRequest,
        mode: TransportMode,
    ) -> RtspServerResult<RtspResponse> {
        let session = self.session_from_request(request)?;
        let registry = &self.context.registry;
        registry.check_start(session.id(), self.info.id, mode)?;

        let mut response = match mode {
            TransportMode::Play => self.context.handler.on_play(&session)?,
            TransportMode::Record => self.context.handler.on_record(&session)?,
        };
        if !response.status().is_success() {
            return Err(RtspServerError::HandlerRejected(
                response.status(),
                format!("{} {}", mode, session.path()),
            ));
        }

        let reader = registry.start(session.id(), self.info.id, mode)?;
        response.headers_mut().set(
            RtspHeader::Session,
            session_header(session.id(), self.context.config.session_timeout()),
        );
        match mode {
            TransportMode::Play => self.pending_reader = reader,
            TransportMode::Record => {
                self.recording = true;
                tracing::info!("session {} is recording {}", session.id(), session.path());
            }
        }
        Ok(response)
    }

    fn open_session(&mut self, path: &str) -> RtspServerResult<RtspSessionHandle> {
        let id = self.context.registry.open_session(self.info.id, path)?;
        let session = RtspSessionHandle::new(id, path.to_owned(), self.context.registry.clone());
        self.session = Some(session.clone());
        tracing::info!("session {} opened for {}", id, path);
        self.context
            .handler
            .on_session_open(&session, &self.info, path);
        Ok(session)
    }

    /// Path and track id of an announced track addressed by a SETUP url.
    ///
    /// Only paths are compared, publishers often SETUP through another host name.
    fn announced_track(&self, uri: &Url) -> Option<(String, usize)> {
        let session = self.session.as_ref()?;
        let path = uri.path().trim_end_matches('/');
        let track_id = self
            .announced_urls
            .iter()
            .position(|url| url.path().trim_end_matches('/') == path)?;
        Some((session.path().to_owned(), track_id))
    }

    /// Session named by the request's `Session` header, owned by this connection.
    fn session_from_request(&self, request: &RtspRequest) -> RtspServerResult<RtspSessionHandle> {
        let header = request
            .headers()
            .session()
            .ok_or(RtspServerError::SessionNotFound)?
            .map_err(|_| RtspServerError::SessionNotFound)?;
        let id = Uuid::parse_str(&header.id).map_err(|_| RtspServerError::SessionNotFound)?;

        self.context.registry.check_owner(id, self.info.id)?;
        match &self.session {
            Some(session) if session.id() == id => Ok(session.clone()),
            _ => Err(RtspServerError::SessionNotFound),
        }
    }

    fn close_session(&mut self, err: Option<&RtspServerError>) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Some(stream) = self.context.registry.remove_session(session.id()) {
            stream.remove_reader(session.id());
        }
        self.channels.clear();
        self.pending_reader = None;
        self.announced_urls.clear();
        self.playing = false;
        self.recording = false;
        while self.outbound_rx.try_recv().is_ok() {}

        match err {
            None => tracing::info!("session {} closed", session.id()),
            Some(err) => tracing::info!("session {} closed: {}", session.id(), err),
        }
        self.context.handler.on_session_close(&session, err);
    }

    fn on_interleaved(&mut self, packet: RtspInterleavedPacket) {
        let Some(session) = self.session.as_ref().filter(|_| self.recording) else {
            tracing::trace!("dropping frame on channel {}, not recording", packet.channel_id);
            return;
        };
        let Some(route) = self.channels.get_mut(&packet.channel_id) else {
            // rtcp or a channel nobody set up
            return;
        };

        let handler = &self.context.handler;
        let rtp = match RtpTrivialPacket::parse(packet.payload) {
            Ok(rtp) => rtp,
            Err(err) => {
                tracing::debug!("malformed rtp on channel {}: {}", packet.channel_id, err);
                handler.on_decode_error(session, route.track_id, &err.into());
                return;
            }
        };
        handler.on_packet_rtp(session, route.track_id, &rtp);

        let Some(depacketizer) = route.depacketizer.as_mut() else {
            return;
        };
        match depacketizer.decode(rtp) {
            Ok(Some(units)) => handler.on_access_units(session, route.track_id, units),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!("depacketize failed on track {}: {}", route.track_id, err);
                handler.on_decode_error(session, route.track_id, &err);
            }
        }
    }
}

/// Request url with a trailing slash, relative track controls resolve against it.
fn content_base(uri: &Url) -> Url {
    let mut base = uri.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn session_header(id: Uuid, timeout: Duration) -> String {
    SessionHeader::new(id.simple().to_string(), Some(timeout.as_secs())).to_string()
}

async fn idle(since: Instant, limit: Option<Duration>) {
    match limit {
        Some(limit) => sleep_until(since + limit).await,
        None => futures::future::pending().await,
    }
}
