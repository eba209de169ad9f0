//! Connection establishment and the session run loop.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use mikobot_proto::Message;

use crate::codec::LineCodec;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::event::ChatMessage;
use crate::handler::EventHandler;
use crate::session::{Session, SessionState};

/// Capacity of the outbound action queue.
///
/// A staging buffer only: the event loop keeps draining the queue
/// while a handler runs, so a burst larger than this backpressures
/// the handler instead of stalling the session.
const OUTBOUND_QUEUE: usize = 64;

/// How long to wait for the server to close after our QUIT.
const QUIT_GRACE: Duration = Duration::from_secs(5);

/// Alternate nicknames tried when registration hits a collision.
const MAX_NICK_TRIES: u32 = 5;

/// Transport requirements for a session stream.
pub trait SessionIo: AsyncRead + AsyncWrite + Unpin + Send + Sync {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send + Sync> SessionIo for T {}

type SessionStream = Framed<Box<dyn SessionIo>, LineCodec>;

// =============================================================================
// Connection
// =============================================================================

/// A single client connection and its event loop.
///
/// The handler is supplied at construction, before anything is dialed.
/// The lifecycle is [`connect`](Self::connect) followed by
/// [`run`](Self::run); the run loop blocks its caller until the
/// session terminates.
pub struct Connection {
    config: ClientConfig,
    handler: Arc<dyn EventHandler>,
    session: Arc<Session>,
    out_rx: Option<mpsc::Receiver<Message>>,
    stream: Option<SessionStream>,
}

impl Connection {
    /// Creates a connection in the unconnected state.
    pub fn new(config: ClientConfig, handler: Arc<dyn EventHandler>) -> Self {
        let (out_tx, out_rx) = mpsc::channel(OUTBOUND_QUEUE);
        let session = Arc::new(Session::new(config.nick.clone(), out_tx));
        Self {
            config,
            handler,
            session,
            out_rx: Some(out_rx),
            stream: None,
        }
    }

    /// Shared view of the session, usable from any task (for signal
    /// wiring, typically).
    pub fn session(&self) -> Arc<Session> {
        self.session.clone()
    }

    /// Dials the server (TCP, then TLS when configured) and sends
    /// protocol registration.
    ///
    /// Failures here are fatal to the session; there is no retry.
    pub async fn connect(&mut self) -> ClientResult<()> {
        self.session.set_state(SessionState::Connecting);
        let mode = if self.config.tls { "tls" } else { "plain" };
        info!(server = %self.config.server, mode, "Connecting");

        let tcp = TcpStream::connect(&self.config.server)
            .await
            .map_err(|e| ClientError::ConnectFailed {
                addr: self.config.server.clone(),
                reason: e.to_string(),
            })?;

        let io: Box<dyn SessionIo> = if self.config.tls {
            let connector = TlsConnector::from(Arc::new(tls_client_config()));
            let server_name =
                rustls::pki_types::ServerName::try_from(self.config.host().to_string())
                    .map_err(|e| ClientError::Tls(e.to_string()))?;
            let tls = connector
                .connect(server_name, tcp)
                .await
                .map_err(|e| ClientError::Tls(e.to_string()))?;
            debug!("TLS handshake complete");
            Box::new(tls)
        } else {
            Box::new(tcp)
        };

        let mut stream = Framed::new(io, LineCodec::default());
        register(&mut stream, &self.config.nick).await?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Runs the event loop to completion.
    ///
    /// Blocks until the session reaches `Terminated`. Connection loss
    /// outside a deliberate quit is returned as an error.
    pub async fn run(&mut self) -> ClientResult<()> {
        let stream = self.stream.take().ok_or(ClientError::ConnectionClosed {
            reason: "no established transport to run".to_string(),
        })?;
        self.pump(stream).await
    }

    /// Registers and runs the event loop over a pre-established
    /// transport, for embedders that dial on their own.
    pub async fn run_with_stream<S>(&mut self, io: S) -> ClientResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + Sync + 'static,
    {
        self.session.set_state(SessionState::Connecting);
        let mut stream: SessionStream = Framed::new(Box::new(io), LineCodec::default());
        register(&mut stream, &self.config.nick).await?;
        self.pump(stream).await
    }

    // =========================================================================
    // Event loop
    // =========================================================================

    async fn pump(&mut self, mut stream: SessionStream) -> ClientResult<()> {
        let mut out_rx = self
            .out_rx
            .take()
            .ok_or(ClientError::ConnectionClosed {
                reason: "the run loop was already consumed".to_string(),
            })?;
        let quit = self.session.quit_signal();
        let mut nick_tries: u32 = 0;

        let result = loop {
            tokio::select! {
                // Inbound protocol lines
                frame = stream.next() => {
                    match frame {
                        Some(Ok(line)) => {
                            if let Err(err) = self.dispatch(&mut stream, &mut out_rx, &line, &mut nick_tries).await {
                                break Err(err);
                            }
                        }
                        Some(Err(err)) => break Err(err),
                        None => break Err(ClientError::ConnectionClosed {
                            reason: "server closed the connection".to_string(),
                        }),
                    }
                }
                // Actions queued by handlers or other tasks
                Some(msg) = out_rx.recv() => {
                    debug!(line = %msg, "Send");
                    if let Err(err) = stream.send(msg).await {
                        break Err(err);
                    }
                }
                // External quit request; leaving the loop here is what
                // makes the Quitting transition happen at most once
                _ = quit.cancelled() => break Ok(()),
            }
        };

        match result {
            Ok(()) => self.shutdown(stream).await,
            Err(err) => {
                self.session.set_state(SessionState::Terminated);
                Err(err)
            }
        }
    }

    /// Sends QUIT and drains until the server closes, bounded by a
    /// grace period so a silent server cannot hang shutdown.
    async fn shutdown(&mut self, mut stream: SessionStream) -> ClientResult<()> {
        self.session.set_state(SessionState::Quitting);
        info!("Quit requested, closing session");

        if let Err(err) = stream.send(Message::quit(&self.config.quit_message)).await {
            debug!(error = %err, "QUIT write failed; server already closed");
            self.session.set_state(SessionState::Terminated);
            return Ok(());
        }

        let drain = async {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(line) => debug!(line = %line, "Recv (draining)"),
                    Err(_) => break,
                }
            }
        };
        if tokio::time::timeout(QUIT_GRACE, drain).await.is_err() {
            debug!("Server did not close within the quit grace period");
        }

        self.session.set_state(SessionState::Terminated);
        info!("Session terminated");
        Ok(())
    }

    /// Runs the line handler while draining the actions it queues.
    ///
    /// Handlers still run one at a time, but their sends always make
    /// progress: a queue-filling burst backpressures the handler
    /// against the write side instead of stalling the whole session.
    async fn dispatch(
        &self,
        stream: &mut SessionStream,
        out_rx: &mut mpsc::Receiver<Message>,
        line: &str,
        nick_tries: &mut u32,
    ) -> ClientResult<()> {
        let handling = self.handle_line(line, nick_tries);
        tokio::pin!(handling);
        loop {
            tokio::select! {
                result = &mut handling => return result,
                Some(msg) = out_rx.recv() => {
                    debug!(line = %msg, "Send");
                    stream.send(msg).await?;
                }
            }
        }
    }

    async fn handle_line(&self, line: &str, nick_tries: &mut u32) -> ClientResult<()> {
        debug!(line = %line, "Recv");
        let msg = match Message::parse(line) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(error = %err, line = %line, "Ignoring unparseable line");
                return Ok(());
            }
        };

        match msg.command.as_str() {
            // Keepalive: the answer is queued ahead of anything the
            // handler produces, so it always reaches the wire first
            "PING" => {
                self.session.send(Message::pong(msg.params.clone())).await?;
                self.handler.on_ping(&self.session).await;
            }
            // RPL_WELCOME: the server's record of our nick is
            // authoritative
            "001" => {
                if let Some(nick) = msg.param(0) {
                    self.session.set_nick(nick);
                }
            }
            // RPL_ISUPPORT
            "005" => self.session.absorb_isupport(&msg.params),
            // RPL_ENDOFMOTD / ERR_NOMOTD: registration is complete
            "376" | "422" => {
                if self.session.state() == SessionState::Connecting {
                    self.session.set_state(SessionState::Connected);
                    info!(nick = %self.session.current_nick(), "Registered");
                    self.handler.on_registered(&self.session).await;
                }
            }
            // ERR_NICKNAMEINUSE: try numbered alternates while we are
            // still registering
            "433" => {
                if self.session.state() != SessionState::Connecting {
                    return Ok(());
                }
                *nick_tries += 1;
                if *nick_tries > MAX_NICK_TRIES {
                    return Err(ClientError::RegistrationFailed {
                        reason: format!(
                            "nickname '{}' and {MAX_NICK_TRIES} alternates in use",
                            self.config.nick
                        ),
                    });
                }
                let alt = format!("{}{}", self.config.nick, nick_tries);
                warn!(nick = %alt, "Nickname in use, trying alternate");
                self.session.set_nick(&alt);
                self.session.send(Message::nick(&alt)).await?;
            }
            // A rename of the bot applied server-side
            "NICK" => {
                let renamed_us = msg
                    .source
                    .as_ref()
                    .is_some_and(|s| s.nick.eq_ignore_ascii_case(&self.session.current_nick()));
                if renamed_us {
                    if let Some(new_nick) = msg.param(0) {
                        info!(nick = %new_nick, "Nickname changed by server");
                        self.session.set_nick(new_nick);
                    }
                }
            }
            "PRIVMSG" => {
                match ChatMessage::from_privmsg(&msg, &self.session.current_nick()) {
                    Some(chat) => self.handler.on_message(&self.session, &chat).await,
                    None => debug!(line = %line, "Ignoring malformed chat message"),
                }
            }
            // The server is terminating the connection
            "ERROR" => {
                return Err(ClientError::ConnectionClosed {
                    reason: msg.param(0).unwrap_or("server sent ERROR").to_string(),
                });
            }
            _ => {}
        }
        Ok(())
    }
}

/// Sends the registration burst. Username and realname fall back to
/// the nickname.
async fn register(stream: &mut SessionStream, nick: &str) -> ClientResult<()> {
    stream.send(Message::nick(nick)).await?;
    stream.send(Message::user(nick, nick)).await?;
    Ok(())
}

fn tls_client_config() -> rustls::ClientConfig {
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}
