//! Server configuration.
//!
//! Configuration comes from environment variables with local-development
//! defaults; a missing or malformed value falls back rather than aborting
//! startup, with a warning in the log.

/// Listener configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: [u8; 4],
    pub port: u16,
}

impl ServerConfig {
    /// Read `SERVER_PORT` from the environment; defaults to 5000.
    pub fn from_env() -> Self {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("invalid SERVER_PORT {raw:?}, falling back to 5000");
                5000
            }),
            Err(_) => 5000,
        };
        Self {
            host: [0, 0, 0, 0],
            port,
        }
    }

    pub fn addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from((self.host, self.port))
    }
}
