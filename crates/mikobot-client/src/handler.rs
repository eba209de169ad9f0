//! The handler interface for session events.

use async_trait::async_trait;

use crate::event::ChatMessage;
use crate::session::Session;

/// Receives session events, one at a time, on the event-loop task.
///
/// Handlers get a shared [`Session`] view they may use to queue
/// outbound actions. The handler is supplied when the connection is
/// constructed, before anything is dialed. All methods default to
/// doing nothing.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Called once, after protocol registration completes (end of the
    /// server MOTD). The server's ISUPPORT tokens are available by the
    /// time this runs.
    async fn on_registered(&self, _session: &Session) {}

    /// Called for each incoming chat message, channel or private.
    async fn on_message(&self, _session: &Session, _msg: &ChatMessage) {}

    /// Called for each server keepalive PING, after the session has
    /// already queued the protocol-level answer.
    async fn on_ping(&self, _session: &Session) {}
}
