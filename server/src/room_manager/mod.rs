pub use self::error::GameError;
pub use self::room::{PlayerSessionHandle, SessionAndUsername};
pub use self::room_manager::{RoomJoinResult, RoomManager};

mod error;
mod room;
#[allow(clippy::module_inception)]
mod room_manager;

/// Deployment knobs for how rooms treat extra joiners and mid-game
/// departures.
///
/// Both default to off: a third join is turned away with
/// [GameError::RoomFull] and an abandoned game waits for a replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomPolicy {
    /// Admit connections beyond the two seated players as watch-only
    /// spectators instead of rejecting them
    pub admit_spectators: bool,
    /// End a running game when one of its seated players disconnects
    pub end_abandoned_games: bool,
}
