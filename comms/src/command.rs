use serde::{Deserialize, Serialize};

/// User Command for joining a game room under a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRoomCommand {
    // The display name to play under.
    pub username: String,
    // The room to join; an unseen key creates the room.
    pub room: String,
}

/// User Command for placing a mark on a board cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMoveCommand {
    // Board cell in row-major order, 0 through 8.
    pub index: usize,
}

/// User Command for restarting the game in the joined room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResetCommand;

/// User Command for quitting the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuitCommand;

/// A user command which can be sent to the server by a single user session.
/// All commands are processed in the context of the game server paired with an individual user session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_ct", rename_all = "camelCase")]
pub enum UserCommand {
    JoinRoom(JoinRoomCommand),
    PlayerMove(PlayerMoveCommand),
    RequestReset(RequestResetCommand),
    Quit(QuitCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    // given a command enum, and an expect string, asserts that command is serialized / deserialized appropiately
    fn assert_command_serialization(command: &UserCommand, expected: &str) {
        let serialized = serde_json::to_string(&command).unwrap();
        assert_eq!(serialized, expected);
        let deserialized: UserCommand = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, *command);
    }

    #[test]
    fn test_join_command() {
        let command = UserCommand::JoinRoom(JoinRoomCommand {
            username: "alice".to_string(),
            room: "r1".to_string(),
        });

        assert_command_serialization(
            &command,
            r#"{"_ct":"joinRoom","username":"alice","room":"r1"}"#,
        );
    }

    #[test]
    fn test_player_move_command() {
        let command = UserCommand::PlayerMove(PlayerMoveCommand { index: 4 });

        assert_command_serialization(&command, r#"{"_ct":"playerMove","index":4}"#);
    }

    #[test]
    fn test_request_reset_command() {
        let command = UserCommand::RequestReset(RequestResetCommand);

        assert_command_serialization(&command, r#"{"_ct":"requestReset"}"#);
    }

    #[test]
    fn test_quit_command() {
        let command = UserCommand::Quit(QuitCommand);

        assert_command_serialization(&command, r#"{"_ct":"quit"}"#);
    }
}
