#[derive(Debug, Clone)]
pub struct SessionAndUsername {
    pub session_id: String,
    pub username: String,
}

#[derive(Debug)]
/// [PlayerSessionHandle] ties a connected session to the room it joined.
///
/// It is created when a session binds to a room and is handed out to the
/// session. Holding one does not imply a seat at the board; under the
/// spectator policy watch-only connections hold one too.
pub struct PlayerSessionHandle {
    /// The key of the room which is associated with this handle
    room: String,
    /// The session and username associated with this handle
    session_and_username: SessionAndUsername,
}

impl PlayerSessionHandle {
    pub(super) fn new(room: String, session_and_username: SessionAndUsername) -> Self {
        PlayerSessionHandle {
            room,
            session_and_username,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn session_id(&self) -> &str {
        &self.session_and_username.session_id
    }

    pub fn username(&self) -> &str {
        &self.session_and_username.username
    }
}
