use std::sync::Arc;

use anyhow::Context;
use comms::{
    command::UserCommand,
    event::{self, Event},
};
use tokio::{
    sync::mpsc,
    task::{AbortHandle, JoinSet},
};
use tracing::debug;

use crate::room_manager::{GameError, PlayerSessionHandle, RoomManager, SessionAndUsername};

/// [GameSession] drives one connection's participation in the game: it
/// binds the session to at most one room, turns rejected requests into
/// unicast reply events and funnels room broadcasts into a single channel
/// for the session loop to drain.
pub(super) struct GameSession {
    session_id: String,
    room_manager: Arc<RoomManager>,
    joined_room: Option<(PlayerSessionHandle, AbortHandle)>,
    join_set: JoinSet<()>,
    mpsc_tx: mpsc::Sender<Event>,
    mpsc_rx: mpsc::Receiver<Event>,
}

impl GameSession {
    pub fn new(session_id: &str, room_manager: Arc<RoomManager>) -> Self {
        let (mpsc_tx, mpsc_rx) = mpsc::channel(100);

        GameSession {
            session_id: String::from(session_id),
            room_manager,
            joined_room: None,
            join_set: JoinSet::new(),
            mpsc_tx,
            mpsc_rx,
        }
    }

    /// Handle a command sent by the user: join, move or reset.
    ///
    /// Rejections never tear the session down; they are answered with an
    /// [Event::Error] or [Event::InvalidMove] reply and the session lives on.
    pub async fn handle_user_command(&mut self, cmd: UserCommand) -> anyhow::Result<()> {
        match cmd {
            UserCommand::JoinRoom(cmd) => {
                // a session binds to one room for its lifetime
                if self.joined_room.is_some() {
                    self.mpsc_tx
                        .send(Event::Error(event::ErrorReplyEvent {
                            message: GameError::AlreadyJoined.to_string(),
                        }))
                        .await?;
                    return Ok(());
                }

                let session_and_username = SessionAndUsername {
                    session_id: self.session_id.clone(),
                    username: cmd.username.clone(),
                };

                match self
                    .room_manager
                    .join_room(&cmd.room, &session_and_username)
                    .await
                {
                    Ok((mut broadcast_rx, player_session_handle, assigned_symbol, game_state)) => {
                        // the symbol reply and the snapshot go into the queue before
                        // any forwarded broadcast, so the joiner always sees them first
                        if let Some(symbol) = assigned_symbol {
                            self.mpsc_tx
                                .send(Event::AssignedSymbol(event::AssignedSymbolReplyEvent {
                                    symbol,
                                }))
                                .await?;
                        }
                        self.mpsc_tx.send(Event::GameState(game_state)).await?;

                        // spawn a task to forward room broadcasts to the session's own
                        // mpsc channel, so the session loop reads from a single place
                        let abort_handle = self.join_set.spawn({
                            let mpsc_tx = self.mpsc_tx.clone();

                            async move {
                                while let Ok(event) = broadcast_rx.recv().await {
                                    let _ = mpsc_tx.send(event).await;
                                }
                            }
                        });

                        self.joined_room = Some((player_session_handle, abort_handle));
                    }
                    Err(err) => {
                        debug!("session {}: join rejected: {}", self.session_id, err);
                        self.mpsc_tx
                            .send(Event::Error(event::ErrorReplyEvent {
                                message: err.to_string(),
                            }))
                            .await?;
                    }
                }
            }
            UserCommand::PlayerMove(cmd) => {
                let outcome = match &self.joined_room {
                    Some((player_session_handle, _)) => {
                        self.room_manager
                            .submit_move(player_session_handle, cmd.index)
                            .await
                    }
                    None => Err(GameError::RoomNotFound),
                };

                match outcome {
                    // accepted moves answer through the room broadcast
                    Ok(()) => {}
                    Err(err @ GameError::RoomNotFound) => {
                        self.mpsc_tx
                            .send(Event::Error(event::ErrorReplyEvent {
                                message: err.to_string(),
                            }))
                            .await?;
                    }
                    Err(err) => {
                        debug!("session {}: move rejected: {}", self.session_id, err);
                        self.mpsc_tx
                            .send(Event::InvalidMove(event::InvalidMoveReplyEvent {
                                message: err.to_string(),
                            }))
                            .await?;
                    }
                }
            }
            UserCommand::RequestReset(_) => {
                // a reset from a session that never joined a room is dropped
                if let Some((player_session_handle, _)) = &self.joined_room {
                    if let Err(err) = self.room_manager.reset_game(player_session_handle).await {
                        self.mpsc_tx
                            .send(Event::Error(event::ErrorReplyEvent {
                                message: err.to_string(),
                            }))
                            .await?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Unbind from the joined room, if any, and stop forwarding its
    /// broadcasts. The room notifies the remaining participants itself.
    pub async fn leave_room(&mut self) -> anyhow::Result<()> {
        if let Some((player_session_handle, abort_handle)) = self.joined_room.take() {
            self.room_manager
                .drop_player_session_handle(player_session_handle)
                .await?;

            abort_handle.abort();
        }

        Ok(())
    }

    /// Receive the next event to be written to this session's connection,
    /// whether a unicast reply or a forwarded room broadcast.
    pub async fn recv(&mut self) -> anyhow::Result<Event> {
        self.mpsc_rx
            .recv()
            .await
            .context("could not recv from the aggregation channel")
    }
}
