use std::net::SocketAddr;

/// Runtime limits and the listen address of the coordinator.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound on display name length, in characters.
    pub max_display_name_len: usize,
    /// Upper bound on chat message length, in characters.
    pub max_message_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_display_name_len: 64,
            max_message_len: 4096,
        }
    }
}
