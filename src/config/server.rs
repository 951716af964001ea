use std::net::SocketAddr;
use std::path::PathBuf;

/// Fallback signing secret used when `LINKDECK_SECRET` is unset. Startup
/// logs a warning whenever this value is in effect: tokens signed with it
/// are forgeable by anyone who reads the source.
pub const DEFAULT_SIGNING_SECRET: &str = "change-this-secret-key-in-production";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// HMAC secret for bearer tokens, taken from `LINKDECK_SECRET`.
    pub signing_secret: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("linkdeck.db")
    }

    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.signing_secret == DEFAULT_SIGNING_SECRET
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            signing_secret: DEFAULT_SIGNING_SECRET.to_string(),
        }
    }
}
