use thiserror::Error;

/// Reasons a join, move or reset request is turned down.
///
/// Every variant is local to the offending request: the room state stays
/// untouched and other players never observe the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("room not found")]
    RoomNotFound,
    #[error("room is full")]
    RoomFull,
    #[error("session is already bound to a room")]
    AlreadyJoined,
    #[error("the game is not active")]
    GameNotActive,
    #[error("it is not your turn")]
    OutOfTurn,
    #[error("cell index is out of bounds")]
    InvalidIndex,
    #[error("cell is already occupied")]
    CellOccupied,
}
