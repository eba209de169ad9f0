//! Client connection configuration.

/// Configuration for a client session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address in `host:port` form.
    pub server: String,
    /// Nickname to register with.
    pub nick: String,
    /// Whether to wrap the connection in TLS.
    pub tls: bool,
    /// Text sent with the protocol QUIT.
    pub quit_message: String,
}

impl ClientConfig {
    /// Creates a config for a plain connection.
    pub fn new(server: impl Into<String>, nick: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            nick: nick.into(),
            tls: false,
            quit_message: "leaving".to_string(),
        }
    }

    /// Sets the TLS toggle.
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the quit message.
    pub fn with_quit_message(mut self, message: impl Into<String>) -> Self {
        self.quit_message = message.into();
        self
    }

    /// Host part of the server address, for the TLS server-name check.
    ///
    /// Everything before the last colon, so hosts that themselves
    /// contain colons keep their full name.
    pub(crate) fn host(&self) -> &str {
        self.server
            .rsplit_once(':')
            .map_or(self.server.as_str(), |(host, _)| host)
    }
}
