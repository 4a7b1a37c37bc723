mod game_room;
mod roster;
mod session_handle;

pub use self::game_room::GameRoom;
pub use self::session_handle::{PlayerSessionHandle, SessionAndUsername};
