mod room;
mod room_directory;
mod room_registry;

pub use room::*;
pub use room_directory::*;
pub use room_registry::*;
