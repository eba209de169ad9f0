//! Connection lifecycle and event dispatch for mikobot.
//!
//! The crate is organized around a single long-lived [`Connection`]:
//! - `codec`: CRLF line framing over the transport
//! - `session`: the shared view handlers act through
//! - `handler`: the event interface the bot implements
//! - `connection`: dialing, registration, and the run loop
//!
//! The intended lifecycle is construct (with a handler), `connect`,
//! then `run`; a signal task calls [`Session::quit`] to end things
//! gracefully.

pub mod codec;
pub mod config;
pub mod connection;
pub mod error;
pub mod event;
pub mod handler;
pub mod session;

pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{ClientError, ClientResult};
pub use event::ChatMessage;
pub use handler::EventHandler;
pub use session::{Session, SessionState};
