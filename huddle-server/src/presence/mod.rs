mod presence_manager;

pub use presence_manager::*;
