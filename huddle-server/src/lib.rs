mod app;
mod config;
mod connection;
mod coordinator;
mod error;
mod presence;
mod room;
mod signaling;

pub use app::*;
pub use config::*;
pub use connection::*;
pub use coordinator::*;
pub use error::*;
pub use presence::*;
pub use room::*;
pub use signaling::*;
