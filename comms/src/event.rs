use serde::{Deserialize, Serialize};

use crate::game::{Board, Symbol};

/// A seat as seen by clients: who plays which symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// The display name of the player holding the seat
    pub username: String,
    /// The symbol the player controls
    pub symbol: Symbol,
}

/// The most recently accepted move of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastMove {
    /// The cell that was marked
    pub index: usize,
    /// The symbol that marked it
    pub player: Symbol,
}

/// Reply to a join: which symbol this connection controls.
/// Spectators never receive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedSymbolReplyEvent {
    pub symbol: Symbol,
}

/// The canonical full-room snapshot.
///
/// Sent as a reply to a join and broadcast to the whole room after every
/// accepted transition; clients are expected to replace their local state
/// with it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateEvent {
    pub board: Board,
    /// The symbol expected to move next
    pub current_turn: Symbol,
    /// False once a winner is found or the board is full
    pub game_active: bool,
    pub winner: Option<Symbol>,
    /// The three cells forming the winning line; null until `winner` is set
    pub winning_indices: Option<[usize; 3]>,
    /// Seats in join order
    pub players: Vec<PlayerInfo>,
    pub last_move: Option<LastMove>,
}

/// Both seats are filled; play may begin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReadyBroadcastEvent;

/// A player took a seat in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerJoinedBroadcastEvent {
    pub username: String,
    pub symbol: Symbol,
}

/// A player gave up their seat (disconnect or quit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLeftBroadcastEvent {
    pub username: String,
}

/// Unicast rejection of a move that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidMoveReplyEvent {
    pub message: String,
}

/// Terminal notification, broadcast exactly once per game end.
/// A null winner means the game ended in a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverBroadcastEvent {
    pub winner: Option<Symbol>,
    pub winning_indices: Option<[usize; 3]>,
}

/// The board was cleared and the game resumed; seats are unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResetBroadcastEvent;

/// Unicast structural rejection: unknown room binding, full room, double join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReplyEvent {
    pub message: String,
}

/// Events that can be sent to the client.
/// Reply events go to a single session; Broadcast events fan out to a whole room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "camelCase")]
pub enum Event {
    AssignedSymbol(AssignedSymbolReplyEvent),
    GameState(GameStateEvent),
    GameReady(GameReadyBroadcastEvent),
    PlayerJoined(PlayerJoinedBroadcastEvent),
    PlayerLeft(PlayerLeftBroadcastEvent),
    InvalidMove(InvalidMoveReplyEvent),
    GameOver(GameOverBroadcastEvent),
    GameReset(GameResetBroadcastEvent),
    Error(ErrorReplyEvent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;

    // given an event enum, and an expect string, asserts that event is serialized / deserialized appropiately
    fn assert_event_serialization(event: &Event, expected: &str) {
        let serialized = serde_json::to_string(&event).unwrap();
        assert_eq!(serialized, expected);
        let deserialized: Event = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, *event);
    }

    #[test]
    fn test_assigned_symbol_event() {
        let event = Event::AssignedSymbol(AssignedSymbolReplyEvent { symbol: Symbol::X });

        assert_event_serialization(&event, r#"{"t":"assignedSymbol","symbol":"X"}"#);
    }

    #[test]
    fn test_game_state_event() {
        let mut board = Board::new();
        board.place(0, Symbol::X);

        let event = Event::GameState(GameStateEvent {
            board,
            current_turn: Symbol::O,
            game_active: true,
            winner: None,
            winning_indices: None,
            players: vec![PlayerInfo {
                username: "alice".to_string(),
                symbol: Symbol::X,
            }],
            last_move: Some(LastMove {
                index: 0,
                player: Symbol::X,
            }),
        });

        assert_event_serialization(
            &event,
            concat!(
                r#"{"t":"gameState","board":["X","","","","","","","",""],"#,
                r#""currentTurn":"O","gameActive":true,"winner":null,"winningIndices":null,"#,
                r#""players":[{"username":"alice","symbol":"X"}],"#,
                r#""lastMove":{"index":0,"player":"X"}}"#,
            ),
        );
    }

    #[test]
    fn test_game_ready_event() {
        let event = Event::GameReady(GameReadyBroadcastEvent);

        assert_event_serialization(&event, r#"{"t":"gameReady"}"#);
    }

    #[test]
    fn test_player_joined_event() {
        let event = Event::PlayerJoined(PlayerJoinedBroadcastEvent {
            username: "bob".to_string(),
            symbol: Symbol::O,
        });

        assert_event_serialization(
            &event,
            r#"{"t":"playerJoined","username":"bob","symbol":"O"}"#,
        );
    }

    #[test]
    fn test_player_left_event() {
        let event = Event::PlayerLeft(PlayerLeftBroadcastEvent {
            username: "bob".to_string(),
        });

        assert_event_serialization(&event, r#"{"t":"playerLeft","username":"bob"}"#);
    }

    #[test]
    fn test_invalid_move_event() {
        let event = Event::InvalidMove(InvalidMoveReplyEvent {
            message: "that cell is already taken".to_string(),
        });

        assert_event_serialization(
            &event,
            r#"{"t":"invalidMove","message":"that cell is already taken"}"#,
        );
    }

    #[test]
    fn test_game_over_event_with_winner() {
        let event = Event::GameOver(GameOverBroadcastEvent {
            winner: Some(Symbol::X),
            winning_indices: Some([0, 1, 2]),
        });

        assert_event_serialization(
            &event,
            r#"{"t":"gameOver","winner":"X","winningIndices":[0,1,2]}"#,
        );
    }

    #[test]
    fn test_game_over_event_for_draw() {
        let event = Event::GameOver(GameOverBroadcastEvent {
            winner: None,
            winning_indices: None,
        });

        assert_event_serialization(&event, r#"{"t":"gameOver","winner":null,"winningIndices":null}"#);
    }

    #[test]
    fn test_game_reset_event() {
        let event = Event::GameReset(GameResetBroadcastEvent);

        assert_event_serialization(&event, r#"{"t":"gameReset"}"#);
    }

    #[test]
    fn test_error_event() {
        let event = Event::Error(ErrorReplyEvent {
            message: "room 'r1' is full".to_string(),
        });

        assert_event_serialization(&event, r#"{"t":"error","message":"room 'r1' is full"}"#);
    }
}
