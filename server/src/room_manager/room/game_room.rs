use comms::{
    event::{self, Event, GameStateEvent, LastMove},
    game::{Board, Symbol, Win},
};
use tokio::sync::broadcast;
use tracing::info;

use super::roster::PlayerRoster;
use super::session_handle::{PlayerSessionHandle, SessionAndUsername};
use crate::room_manager::{GameError, RoomPolicy};

const BROADCAST_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug)]
/// [GameRoom] owns the authoritative state of one match and the broadcast
/// channel its participants listen on.
///
/// Every transition runs as a short synchronous critical section under the
/// room lock; the room itself never awaits anything.
pub struct GameRoom {
    key: String,
    policy: RoomPolicy,
    board: Board,
    current_turn: Symbol,
    game_active: bool,
    win: Option<Win>,
    last_move: Option<LastMove>,
    roster: PlayerRoster,
    /// Sessions currently bound to the room, spectators included
    connected: usize,
    broadcast_tx: broadcast::Sender<Event>,
}

impl GameRoom {
    pub fn new(key: String, policy: RoomPolicy) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);

        GameRoom {
            key,
            policy,
            board: Board::new(),
            current_turn: Symbol::X,
            game_active: true,
            win: None,
            last_move: None,
            roster: PlayerRoster::new(),
            connected: 0,
            broadcast_tx,
        }
    }

    /// A full-state snapshot in the shape clients consume.
    pub fn game_state(&self) -> GameStateEvent {
        GameStateEvent {
            board: self.board,
            current_turn: self.current_turn,
            game_active: self.game_active,
            winner: self.win.map(|win| win.symbol),
            winning_indices: self.win.map(|win| win.line),
            players: self.roster.players(),
            last_move: self.last_move,
        }
    }

    /// Bind a session to the room, seating it when a symbol is free.
    ///
    /// A join with both seats taken is rejected with [GameError::RoomFull],
    /// or admitted without a symbol when the spectator policy allows it.
    ///
    /// # Returns
    ///
    /// - A broadcast receiver for the session to receive room events
    /// - A [PlayerSessionHandle] for the session to interact with the room
    /// - The assigned symbol, None for spectators
    /// - A state snapshot to bring the session up to date
    pub fn join(
        &mut self,
        session_and_username: &SessionAndUsername,
    ) -> Result<
        (
            broadcast::Receiver<Event>,
            PlayerSessionHandle,
            Option<Symbol>,
            GameStateEvent,
        ),
        GameError,
    > {
        let assigned_symbol = match self.roster.assign_seat(
            &session_and_username.session_id,
            &session_and_username.username,
        ) {
            Some(symbol) => Some(symbol),
            None if self.policy.admit_spectators => None,
            None => return Err(GameError::RoomFull),
        };

        match assigned_symbol {
            // Seated joiners are announced before they subscribe, so nobody
            // ever sees their own join notification
            Some(symbol) => {
                info!(
                    "room {}: {} seated as {}",
                    self.key, session_and_username.username, symbol
                );
                let _ = self
                    .broadcast_tx
                    .send(Event::PlayerJoined(event::PlayerJoinedBroadcastEvent {
                        username: session_and_username.username.clone(),
                        symbol,
                    }));
            }
            None => info!(
                "room {}: {} admitted as a spectator",
                self.key, session_and_username.username
            ),
        }

        let broadcast_rx = self.broadcast_tx.subscribe();
        let player_session_handle =
            PlayerSessionHandle::new(self.key.clone(), session_and_username.clone());
        self.connected += 1;

        // The second seat filling up means play can begin
        if assigned_symbol.is_some() && self.roster.is_full() {
            let _ = self
                .broadcast_tx
                .send(Event::GameReady(event::GameReadyBroadcastEvent));
        }

        Ok((
            broadcast_rx,
            player_session_handle,
            assigned_symbol,
            self.game_state(),
        ))
    }

    /// Validate and apply one move for the session holding `session_id`.
    ///
    /// The checks run in a fixed order so the reported rejection is
    /// deterministic: game over, turn, index, cell. Spectators fail the
    /// turn check since they hold no symbol.
    pub fn submit_move(&mut self, session_id: &str, index: usize) -> Result<(), GameError> {
        if !self.game_active {
            return Err(GameError::GameNotActive);
        }

        let symbol = self
            .roster
            .symbol_of(session_id)
            .filter(|symbol| *symbol == self.current_turn)
            .ok_or(GameError::OutOfTurn)?;

        if index >= Board::SIZE {
            return Err(GameError::InvalidIndex);
        }
        if !self.board.place(index, symbol) {
            return Err(GameError::CellOccupied);
        }

        info!("room {}: {} marked cell {}", self.key, symbol, index);
        self.last_move = Some(LastMove {
            index,
            player: symbol,
        });

        if let Some(win) = self.board.winner() {
            self.win = Some(win);
            self.game_active = false;
        } else if self.board.is_full() {
            self.game_active = false;
        } else {
            self.current_turn = self.current_turn.opponent();
        }

        // every accepted move answers with a fresh snapshot for the whole room
        let _ = self.broadcast_tx.send(Event::GameState(self.game_state()));

        // the game ending on this move additionally gets the one-shot
        // terminal notification
        if !self.game_active {
            match self.win {
                Some(win) => info!("room {}: {} wins", self.key, win.symbol),
                None => info!("room {}: draw", self.key),
            }
            let _ = self
                .broadcast_tx
                .send(Event::GameOver(event::GameOverBroadcastEvent {
                    winner: self.win.map(|win| win.symbol),
                    winning_indices: self.win.map(|win| win.line),
                }));
        }

        Ok(())
    }

    /// Start a fresh game on the same table: seats and spectators stay, the
    /// board, turn and outcome reset.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_turn = Symbol::X;
        self.game_active = true;
        self.win = None;
        self.last_move = None;
        info!("room {}: board reset", self.key);

        let _ = self.broadcast_tx.send(Event::GameState(self.game_state()));
        let _ = self
            .broadcast_tx
            .send(Event::GameReset(event::GameResetBroadcastEvent));
    }

    /// Remove a session from the room, broadcasting the departure when it
    /// held a seat. Consumes the [PlayerSessionHandle] to drop the binding.
    pub fn leave(&mut self, player_session_handle: PlayerSessionHandle) {
        self.connected -= 1;

        if let Some((username, _)) = self
            .roster
            .release_seat(player_session_handle.session_id())
        {
            info!("room {}: {} left", self.key, username);
            let _ = self
                .broadcast_tx
                .send(Event::PlayerLeft(event::PlayerLeftBroadcastEvent {
                    username,
                }));

            if self.policy.end_abandoned_games && self.game_active {
                info!("room {}: game halted, a seat was abandoned", self.key);
                self.game_active = false;
                let _ = self.broadcast_tx.send(Event::GameState(self.game_state()));
            }
        }
    }

    /// True when no session is bound to the room anymore.
    pub fn is_empty(&self) -> bool {
        self.connected == 0
    }
}
