use circular_queue::CircularQueue;
use comms::{event, game::Symbol};

/// One line of the rolling room activity log.
#[derive(Debug, Clone)]
pub enum ActivityItem {
    Notice(String),
    Rejection(String),
}

const MAX_ACTIVITY_ITEMS_TO_STORE: usize = 100;

#[derive(Debug, Clone)]
pub enum ServerConnectionStatus {
    Uninitialized,
    Connecting,
    Connected { addr: String },
    Errored { err: String },
}

/// The single source of truth the UI renders from.
#[derive(Debug, Clone)]
pub struct State {
    pub server_connection_status: ServerConnectionStatus,
    /// The name this client plays under
    pub username: String,
    /// The key of the room the client asked to join
    pub room: String,
    /// The seat the server assigned to this connection; stays [None] until
    /// the join reply arrives, and permanently for spectators
    pub my_symbol: Option<Symbol>,
    /// The latest full snapshot received from the server
    pub game: Option<event::GameStateEvent>,
    /// History of what happened in the room
    pub activity: CircularQueue<ActivityItem>,
    /// Seconds since the connection came up
    pub timer: usize,
}

impl Default for State {
    fn default() -> Self {
        State {
            server_connection_status: ServerConnectionStatus::Uninitialized,
            username: String::new(),
            room: String::new(),
            my_symbol: None,
            game: None,
            activity: CircularQueue::with_capacity(MAX_ACTIVITY_ITEMS_TO_STORE),
            timer: 0,
        }
    }
}

impl State {
    pub fn handle_server_event(&mut self, event: &event::Event) {
        match event {
            event::Event::AssignedSymbol(event) => {
                self.my_symbol = Some(event.symbol);
            }
            // the server is authoritative, every snapshot replaces the local copy wholesale
            event::Event::GameState(event) => {
                self.game = Some(event.clone());
            }
            event::Event::GameReady(_) => {
                self.activity.push(ActivityItem::Notice(String::from(
                    "both seats are taken, game on",
                )));
            }
            event::Event::PlayerJoined(event) => {
                self.activity.push(ActivityItem::Notice(format!(
                    "{} joined as {}",
                    event.username, event.symbol
                )));
            }
            event::Event::PlayerLeft(event) => {
                self.activity.push(ActivityItem::Notice(format!(
                    "{} left the room",
                    event.username
                )));
            }
            event::Event::InvalidMove(event) => {
                self.activity.push(ActivityItem::Rejection(format!(
                    "move rejected: {}",
                    event.message
                )));
            }
            event::Event::GameOver(event) => {
                self.activity.push(ActivityItem::Notice(match event.winner {
                    Some(symbol) => format!("{} wins the game", symbol),
                    None => String::from("the game ended in a draw"),
                }));
            }
            event::Event::GameReset(_) => {
                self.activity.push(ActivityItem::Notice(String::from(
                    "the board was cleared for a new game",
                )));
            }
            event::Event::Error(event) => {
                self.activity
                    .push(ActivityItem::Rejection(event.message.clone()));
            }
        }
    }

    /// Records who and where we are about to play before the connection
    /// attempt starts.
    pub fn mark_connection_request_start(&mut self, username: &str, room: &str) {
        self.server_connection_status = ServerConnectionStatus::Connecting;
        self.username = String::from(username);
        self.room = String::from(room);
    }

    pub fn process_connection_request_result(&mut self, result: anyhow::Result<String>) {
        self.server_connection_status = match result {
            Ok(addr) => ServerConnectionStatus::Connected { addr },
            Err(err) => ServerConnectionStatus::Errored {
                err: err.to_string(),
            },
        }
    }

    pub fn tick_timer(&mut self) {
        self.timer += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comms::event::{
        AssignedSymbolReplyEvent, ErrorReplyEvent, Event, GameOverBroadcastEvent,
        PlayerJoinedBroadcastEvent,
    };

    #[test]
    fn snapshots_replace_the_local_game_wholesale() {
        let mut state = State::default();
        assert!(state.game.is_none());

        let mut board = comms::game::Board::new();
        board.place(4, Symbol::X);
        let snapshot = comms::event::GameStateEvent {
            board,
            current_turn: Symbol::O,
            game_active: true,
            winner: None,
            winning_indices: None,
            players: vec![],
            last_move: None,
        };

        state.handle_server_event(&Event::GameState(snapshot.clone()));
        assert_eq!(state.game, Some(snapshot));
    }

    #[test]
    fn the_assigned_seat_is_remembered() {
        let mut state = State::default();

        state.handle_server_event(&Event::AssignedSymbol(AssignedSymbolReplyEvent {
            symbol: Symbol::O,
        }));

        assert_eq!(state.my_symbol, Some(Symbol::O));
    }

    #[test]
    fn room_happenings_land_in_the_activity_log() {
        let mut state = State::default();

        state.handle_server_event(&Event::PlayerJoined(PlayerJoinedBroadcastEvent {
            username: String::from("bob"),
            symbol: Symbol::O,
        }));
        state.handle_server_event(&Event::GameOver(GameOverBroadcastEvent {
            winner: None,
            winning_indices: None,
        }));
        state.handle_server_event(&Event::Error(ErrorReplyEvent {
            message: String::from("room is full"),
        }));

        let items: Vec<_> = state.activity.asc_iter().cloned().collect();
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], ActivityItem::Notice(text) if text.contains("bob")));
        assert!(matches!(&items[1], ActivityItem::Notice(text) if text.contains("draw")));
        assert!(matches!(&items[2], ActivityItem::Rejection(text) if text.contains("full")));
    }

    #[test]
    fn a_connection_request_records_the_join_details() {
        let mut state = State::default();

        state.mark_connection_request_start("alice", "room-1");

        assert!(matches!(
            state.server_connection_status,
            ServerConnectionStatus::Connecting
        ));
        assert_eq!(state.username, "alice");
        assert_eq!(state.room, "room-1");

        state.process_connection_request_result(Ok(String::from("localhost:8080")));
        assert!(matches!(
            state.server_connection_status,
            ServerConnectionStatus::Connected { .. }
        ));
    }
}
