use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::{
    config::RtspServerConfig,
    connection::RtspConnection,
    errors::RtspServerResult,
    handler::RtspServerHandler,
    middleware::{RtspMiddleware, response_header_appender::ResponseHeaderAppender},
    registry::SessionRegistry,
};

/// State shared by the accept loop and every connection task.
pub(crate) struct ServerContext<H> {
    pub(crate) config: RtspServerConfig,
    pub(crate) handler: Arc<H>,
    pub(crate) registry: Arc<SessionRegistry>,
    pub(crate) middlewares: Vec<Box<dyn RtspMiddleware>>,
}

pub struct RtspServer<H: RtspServerHandler> {
    listener: TcpListener,
    context: Arc<ServerContext<H>>,
    cancel: CancellationToken,
}

impl<H: RtspServerHandler> RtspServer<H> {
    pub async fn bind(config: RtspServerConfig, handler: Arc<H>) -> RtspServerResult<Self> {
        let listener = TcpListener::bind((config.address, config.port)).await?;
        tracing::info!(
            "rtsp server listening on {}, config: {:?}",
            listener.local_addr()?,
            config
        );
        Ok(Self {
            listener,
            context: Arc::new(ServerContext {
                config,
                handler,
                registry: Arc::new(SessionRegistry::new()),
                middlewares: vec![Box::new(ResponseHeaderAppender)],
            }),
            cancel: CancellationToken::new(),
        })
    }

    /// Appends a middleware, only effective before `run`.
    pub fn with_middleware(mut self, middleware: Box<dyn RtspMiddleware>) -> Self {
        match Arc::get_mut(&mut self.context) {
            Some(context) => context.middlewares.push(middleware),
            None => tracing::warn!("server is already running, middleware ignored"),
        }
        self
    }

    pub fn local_addr(&self) -> RtspServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &RtspServerConfig {
        &self.context.config
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.context.registry
    }

    /// Accepts connections until [`RtspServer::close`] is called.
    pub async fn run(&self) -> RtspServerResult<()> {
        tracing::info!("rtsp server is running");
        loop {
            let (tcp_stream, peer_addr) = tokio::select! {
                _ = self.cancel.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        // per connection failures such as EMFILE must not stop the server
                        tracing::error!("accept failed: {}", err);
                        continue;
                    }
                },
            };
            if let Err(err) = tcp_stream.set_nodelay(true) {
                tracing::warn!("set_nodelay failed for {}: {}", peer_addr, err);
            }

            let (info, commands_rx) = self.context.registry.register_connection(peer_addr);
            tracing::info!(
                "got new rtsp connection, id: {}, peer addr: {}",
                info.id,
                peer_addr
            );
            let span = tracing::info_span!(
                "rtsp_connection",
                connection_id = info.id,
                peer_addr = %peer_addr,
            );
            let connection = RtspConnection::new(
                tcp_stream,
                info,
                commands_rx,
                self.context.clone(),
                self.cancel.child_token(),
            );
            tokio::spawn(connection.run().instrument(span));
        }
        tracing::info!("rtsp server stopped");
        Ok(())
    }

    /// Stops accepting and closes every connection, repeated calls do nothing.
    pub fn close(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        tracing::info!("closing rtsp server");
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
