mod server;

pub use server::{DEFAULT_SIGNING_SECRET, ServerConfig};
