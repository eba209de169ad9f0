//! The shared view of a live session.

use std::fmt;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use mikobot_proto::{Isupport, Message};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Session State
// =============================================================================

/// Lifecycle states of a client session.
///
/// The state only ever moves forward; no state is entered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No transport established yet.
    Unconnected,
    /// Transport up, protocol registration in flight.
    Connecting,
    /// Registration complete; the session is live.
    Connected,
    /// A quit was requested; draining until the server closes.
    Quitting,
    /// The run loop has returned.
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unconnected => "unconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Quitting => "quitting",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Session
// =============================================================================

/// Shared, non-owning view of a live session.
///
/// Handlers receive a reference valid for the life of the process. The
/// quit and send operations are safe to call from any task, not just
/// the one running the event loop.
#[derive(Debug)]
pub struct Session {
    /// The nickname the server currently knows the bot by.
    nick: RwLock<String>,
    /// ISUPPORT tokens accumulated during registration.
    isupport: RwLock<Isupport>,
    /// Current lifecycle state.
    state: RwLock<SessionState>,
    /// Outbound action queue, drained by the event loop.
    out_tx: mpsc::Sender<Message>,
    /// One-shot quit signal.
    quit: CancellationToken,
}

impl Session {
    pub(crate) fn new(nick: String, out_tx: mpsc::Sender<Message>) -> Self {
        Self {
            nick: RwLock::new(nick),
            isupport: RwLock::new(Isupport::new()),
            state: RwLock::new(SessionState::Unconnected),
            out_tx,
            quit: CancellationToken::new(),
        }
    }

    /// The nickname the server currently knows the bot by.
    ///
    /// This follows alternate-nick fallback during registration and
    /// server-applied renames afterwards.
    pub fn current_nick(&self) -> String {
        self.nick.read().clone()
    }

    /// Looks up an ISUPPORT token advertised by the server.
    ///
    /// A bare token yields an empty string; an absent one yields
    /// `None`.
    pub fn isupport(&self, name: &str) -> Option<String> {
        self.isupport.read().get(name).map(str::to_string)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Queues a JOIN for a channel.
    pub async fn join(&self, channel: &str) -> ClientResult<()> {
        self.send(Message::join(channel)).await
    }

    /// Queues a chat message.
    pub async fn privmsg(&self, target: &str, text: &str) -> ClientResult<()> {
        self.send(Message::privmsg(target, text)).await
    }

    /// Queues a MODE change.
    pub async fn send_mode(&self, target: &str, modes: &str) -> ClientResult<()> {
        self.send(Message::mode(target, modes)).await
    }

    /// Queues a raw protocol message.
    ///
    /// The queue is bounded and drained by the event loop, which keeps
    /// draining while a handler runs; a full queue backpressures the
    /// sender without stalling the session.
    pub async fn send(&self, msg: Message) -> ClientResult<()> {
        self.out_tx
            .send(msg)
            .await
            .map_err(|e| ClientError::SendFailed(e.to_string()))
    }

    /// Requests a graceful quit.
    ///
    /// Idempotent: further calls after the first have no effect.
    pub fn quit(&self) {
        self.quit.cancel();
    }

    /// Whether a quit has been requested.
    pub fn quit_requested(&self) -> bool {
        self.quit.is_cancelled()
    }

    pub(crate) fn quit_signal(&self) -> CancellationToken {
        self.quit.clone()
    }

    pub(crate) fn set_nick(&self, nick: &str) {
        *self.nick.write() = nick.to_string();
    }

    pub(crate) fn absorb_isupport(&self, params: &[String]) {
        self.isupport.write().absorb(params);
    }

    pub(crate) fn set_state(&self, next: SessionState) {
        let mut state = self.state.write();
        debug!(from = %*state, to = %next, "Session state change");
        *state = next;
    }
}
