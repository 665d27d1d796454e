mod room_broadcaster;
mod signaling_relay;
mod ws_handler;

pub use room_broadcaster::*;
pub use signaling_relay::*;
pub use ws_handler::*;
