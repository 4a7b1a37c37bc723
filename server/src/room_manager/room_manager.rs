use std::{collections::HashMap, sync::Arc};

use comms::{
    event::{Event, GameStateEvent},
    game::Symbol,
};
use tokio::sync::{broadcast, Mutex, RwLock};

use super::room::{GameRoom, PlayerSessionHandle, SessionAndUsername};
use super::{GameError, RoomPolicy};

/// What a successful join hands back to the session: the room's broadcast
/// receiver, the handle binding the session to the room, the assigned symbol
/// (None for spectators) and a snapshot to catch the session up.
pub type RoomJoinResult = (
    broadcast::Receiver<Event>,
    PlayerSessionHandle,
    Option<Symbol>,
    GameStateEvent,
);

#[derive(Debug)]
/// [RoomManager] is the room store of the process: a room comes to life on
/// the first join of its key and is dropped when its last session leaves.
pub struct RoomManager {
    game_rooms: RwLock<HashMap<String, Arc<Mutex<GameRoom>>>>,
    policy: RoomPolicy,
}

impl RoomManager {
    pub fn new(policy: RoomPolicy) -> Self {
        RoomManager {
            game_rooms: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Number of rooms currently alive.
    pub async fn room_count(&self) -> usize {
        self.game_rooms.read().await.len()
    }

    async fn room_by_key(&self, room_key: &str) -> Result<Arc<Mutex<GameRoom>>, GameError> {
        let game_rooms = self.game_rooms.read().await;

        game_rooms
            .get(room_key)
            .cloned()
            .ok_or(GameError::RoomNotFound)
    }

    /// Bind a session to a room, creating the room on first use of its key.
    pub async fn join_room(
        &self,
        room_key: &str,
        session_and_username: &SessionAndUsername,
    ) -> Result<RoomJoinResult, GameError> {
        // the map stays write-locked across the room lock so a join cannot
        // race the removal of the same room
        let mut game_rooms = self.game_rooms.write().await;
        let room = Arc::clone(game_rooms.entry(String::from(room_key)).or_insert_with(|| {
            Arc::new(Mutex::new(GameRoom::new(
                String::from(room_key),
                self.policy,
            )))
        }));

        let mut room = room.lock().await;
        room.join(session_and_username)
    }

    /// Validate and apply a move for the session holding the handle.
    pub async fn submit_move(
        &self,
        player_session_handle: &PlayerSessionHandle,
        index: usize,
    ) -> Result<(), GameError> {
        let room = self.room_by_key(player_session_handle.room()).await?;
        let mut room = room.lock().await;

        room.submit_move(player_session_handle.session_id(), index)
    }

    /// Reset the game in the room the handle is bound to.
    pub async fn reset_game(
        &self,
        player_session_handle: &PlayerSessionHandle,
    ) -> Result<(), GameError> {
        let room = self.room_by_key(player_session_handle.room()).await?;
        let mut room = room.lock().await;
        room.reset();

        Ok(())
    }

    /// A point-in-time snapshot of the room the handle is bound to.
    pub async fn game_state(
        &self,
        player_session_handle: &PlayerSessionHandle,
    ) -> Result<GameStateEvent, GameError> {
        let room = self.room_by_key(player_session_handle.room()).await?;
        let room = room.lock().await;

        Ok(room.game_state())
    }

    /// Unbind a session from its room, removing the room when nobody is
    /// left in it.
    pub async fn drop_player_session_handle(
        &self,
        player_session_handle: PlayerSessionHandle,
    ) -> Result<(), GameError> {
        let room_key = String::from(player_session_handle.room());
        // write-locked for the same reason as join_room: observing the room
        // as empty and removing it must be atomic
        let mut game_rooms = self.game_rooms.write().await;
        let room = game_rooms
            .get(&room_key)
            .cloned()
            .ok_or(GameError::RoomNotFound)?;

        let mut locked_room = room.lock().await;
        locked_room.leave(player_session_handle);

        if locked_room.is_empty() {
            game_rooms.remove(&room_key);
        }

        Ok(())
    }
}
