use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use rtsp_formats::header::transport::{TransportHeader, TransportMode};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    connection::{ConnectionCommand, ConnectionId, RtspConnectionInfo},
    errors::{RtspServerError, RtspServerResult},
    session::{RtspSession, RtspSessionState},
    stream::RtspStream,
};

#[derive(Debug)]
struct ConnectionEntry {
    info: RtspConnectionInfo,
    session: Option<Uuid>,
    commands: mpsc::UnboundedSender<ConnectionCommand>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    sessions: HashMap<Uuid, RtspSession>,
    connections: HashMap<ConnectionId, ConnectionEntry>,
}

/// Sessions and connections addressed by id.
///
/// The lock is only held for field updates, never across I/O or host callbacks.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    next_connection_id: AtomicU64,
    inner: Mutex<RegistryInner>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    pub fn connection_count(&self) -> usize {
        self.inner.lock().connections.len()
    }

    pub fn connections(&self) -> Vec<RtspConnectionInfo> {
        self.inner
            .lock()
            .connections
            .values()
            .map(|entry| entry.info.clone())
            .collect()
    }

    /// `Closed` once the session is gone or a close is pending
    pub fn session_state(&self, session_id: Uuid) -> RtspSessionState {
        self.inner
            .lock()
            .sessions
            .get(&session_id)
            .map_or(RtspSessionState::Closed, |session| session.state)
    }

    /// Time since the session last saw a request or frame.
    pub fn session_idle_time(&self, session_id: Uuid) -> Option<Duration> {
        self.inner
            .lock()
            .sessions
            .get(&session_id)
            .map(|session| session.last_activity.elapsed())
    }

    pub(crate) fn register_connection(
        &self,
        peer_addr: SocketAddr,
    ) -> (RtspConnectionInfo, mpsc::UnboundedReceiver<ConnectionCommand>) {
        let id = self.next_connection_id.fetch_add(1, Ordering::Relaxed) + 1;
        let info = RtspConnectionInfo { id, peer_addr };
        let (commands, commands_rx) = mpsc::unbounded_channel();
        self.inner.lock().connections.insert(
            id,
            ConnectionEntry {
                info: info.clone(),
                session: None,
                commands,
            },
        );
        (info, commands_rx)
    }

    pub(crate) fn deregister_connection(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.connections.remove(&connection_id)
            && let Some(session_id) = entry.session
        {
            inner.sessions.remove(&session_id);
        }
    }

    /// New session bound to the connection, which must not own one yet.
    pub(crate) fn open_session(
        &self,
        connection_id: ConnectionId,
        path: &str,
    ) -> RtspServerResult<Uuid> {
        let mut inner = self.inner.lock();
        let RegistryInner {
            sessions,
            connections,
        } = &mut *inner;
        let entry = connections
            .get_mut(&connection_id)
            .ok_or(RtspServerError::ConnectionClosed)?;
        if entry.session.is_some() {
            return Err(RtspServerError::OneConnTwoSessions);
        }

        let id = Uuid::now_v7();
        sessions.insert(id, RtspSession::new(id, path.to_owned(), connection_id));
        entry.session = Some(id);
        Ok(id)
    }

    /// Removes the session and unbinds its connection.
    pub(crate) fn remove_session(&self, session_id: Uuid) -> Option<Arc<RtspStream>> {
        let mut inner = self.inner.lock();
        let session = inner.sessions.remove(&session_id)?;
        if let Some(entry) = inner.connections.get_mut(&session.connection)
            && entry.session == Some(session_id)
        {
            entry.session = None;
        }
        session.stream
    }

    /// The session when it exists and belongs to `connection_id`.
    pub(crate) fn check_owner(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
    ) -> RtspServerResult<()> {
        self.with_session(session_id, connection_id, |_| Ok(()))
    }

    pub(crate) fn check_setup(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
        path: &str,
        track_id: usize,
        transport: &TransportHeader,
    ) -> RtspServerResult<(u8, u8)> {
        self.with_session(session_id, connection_id, |session| {
            session.check_setup(path, track_id, transport)
        })
    }

    pub(crate) fn add_track(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
        path: &str,
        track_id: usize,
        transport: &TransportHeader,
        stream: Arc<RtspStream>,
    ) -> RtspServerResult<()> {
        self.with_session(session_id, connection_id, |session| {
            session.add_track(path, track_id, transport, stream)
        })
    }

    pub(crate) fn announce(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
        stream: Arc<RtspStream>,
    ) -> RtspServerResult<()> {
        self.with_session(session_id, connection_id, |session| {
            session.announce(stream)
        })
    }

    pub(crate) fn announced_stream(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
    ) -> RtspServerResult<Option<Arc<RtspStream>>> {
        self.with_session(session_id, connection_id, |session| {
            Ok(session.announced.clone())
        })
    }

    pub(crate) fn check_start(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
        mode: TransportMode,
    ) -> RtspServerResult<()> {
        self.with_session(session_id, connection_id, |session| {
            session.check_start(mode)
        })
    }

    /// Moves the session to `Ready`, returns the stream and rtp channels for PLAY.
    pub(crate) fn start(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
        mode: TransportMode,
    ) -> RtspServerResult<Option<(Arc<RtspStream>, HashMap<usize, u8>)>> {
        self.with_session(session_id, connection_id, |session| {
            session.start(mode)?;
            if !session.is_playing() {
                return Ok(None);
            }
            Ok(session
                .stream
                .clone()
                .map(|stream| (stream, session.rtp_channels().collect())))
        })
    }

    pub(crate) fn touch(&self, session_id: Uuid) {
        if let Some(session) = self.inner.lock().sessions.get_mut(&session_id) {
            session.last_activity = Instant::now();
        }
    }

    /// Marks the session closed and asks its connection to terminate.
    pub(crate) fn request_close(&self, session_id: Uuid) {
        let mut inner = self.inner.lock();
        let RegistryInner {
            sessions,
            connections,
        } = &mut *inner;
        let Some(session) = sessions.get_mut(&session_id) else {
            return;
        };
        if session.state == RtspSessionState::Closed {
            return;
        }
        session.state = RtspSessionState::Closed;
        tracing::debug!("close requested for session {}", session.id);
        if let Some(entry) = connections.get(&session.connection) {
            // the connection may be exiting on its own already
            let _ = entry.commands.send(ConnectionCommand::Terminate);
        }
    }

    fn with_session<T>(
        &self,
        session_id: Uuid,
        connection_id: ConnectionId,
        f: impl FnOnce(&mut RtspSession) -> RtspServerResult<T>,
    ) -> RtspServerResult<T> {
        let mut inner = self.inner.lock();
        let session = inner
            .sessions
            .get_mut(&session_id)
            .ok_or(RtspServerError::SessionNotFound)?;
        if session.connection != connection_id {
            return Err(RtspServerError::TwoConnOneSession);
        }
        if session.state == RtspSessionState::Closed {
            return Err(RtspServerError::SessionNotFound);
        }
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use uuid::Uuid;

    use super::SessionRegistry;
    use crate::{
        connection::ConnectionCommand, errors::RtspServerError, session::RtspSessionState,
    };

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    #[test]
    fn test_one_session_per_connection() {
        let registry = SessionRegistry::new();
        let (info, _commands) = registry.register_connection(peer());
        let session_id = registry.open_session(info.id, "teststream").unwrap();
        assert!(matches!(
            registry.open_session(info.id, "teststream"),
            Err(RtspServerError::OneConnTwoSessions)
        ));
        assert_eq!(registry.session_state(session_id), RtspSessionState::Init);
        registry.touch(session_id);
        assert!(registry.session_idle_time(session_id).is_some());

        registry.remove_session(session_id);
        assert_eq!(registry.session_state(session_id), RtspSessionState::Closed);
        assert!(registry.open_session(info.id, "teststream").is_ok());
    }

    #[test]
    fn test_session_bound_to_connection() {
        let registry = SessionRegistry::new();
        let (first, _first_commands) = registry.register_connection(peer());
        let (second, _second_commands) = registry.register_connection(peer());
        assert_ne!(first.id, second.id);

        let session_id = registry.open_session(first.id, "teststream").unwrap();
        assert!(registry.check_owner(session_id, first.id).is_ok());
        assert!(matches!(
            registry.check_owner(session_id, second.id),
            Err(RtspServerError::TwoConnOneSession)
        ));
        assert!(matches!(
            registry.check_owner(Uuid::now_v7(), first.id),
            Err(RtspServerError::SessionNotFound)
        ));
    }

    #[test]
    fn test_request_close_is_idempotent() {
        let registry = SessionRegistry::new();
        let (info, mut commands) = registry.register_connection(peer());
        let session_id = registry.open_session(info.id, "teststream").unwrap();

        registry.request_close(session_id);
        registry.request_close(session_id);
        assert!(matches!(commands.try_recv(), Ok(ConnectionCommand::Terminate)));
        assert!(commands.try_recv().is_err());
        assert_eq!(registry.session_state(session_id), RtspSessionState::Closed);
        assert!(matches!(
            registry.check_owner(session_id, info.id),
            Err(RtspServerError::SessionNotFound)
        ));
    }

    #[test]
    fn test_deregister_drops_session() {
        let registry = SessionRegistry::new();
        let (info, _commands) = registry.register_connection(peer());
        registry.open_session(info.id, "teststream").unwrap();
        assert_eq!(registry.session_count(), 1);
        assert_eq!(registry.connection_count(), 1);
        registry.deregister_connection(info.id);
        assert_eq!(registry.session_count(), 0);
        assert_eq!(registry.connection_count(), 0);
    }
}
