use std::net::SocketAddr;
use std::sync::Arc;

use comms::{
    command::{self, UserCommand},
    event::{self, Event},
    game::{Cell, Symbol},
    transport,
};
use server::room_manager::{RoomManager, RoomPolicy};
use server::session;
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    sync::broadcast,
};
use tokio_stream::StreamExt;

/// Binds an ephemeral port and accepts connections into user session
/// handlers, exactly like the server binary does.
async fn spawn_test_server() -> anyhow::Result<(SocketAddr, broadcast::Sender<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let room_manager = Arc::new(RoomManager::new(RoomPolicy::default()));
    let (quit_tx, _) = broadcast::channel::<()>(1);

    tokio::spawn({
        let quit_tx = quit_tx.clone();

        async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        tokio::spawn(session::handle_user_session(
                            Arc::clone(&room_manager),
                            quit_tx.subscribe(),
                            socket,
                        ));
                    }
                    Err(_) => break,
                }
            }
        }
    });

    Ok((addr, quit_tx))
}

struct TestClient {
    events: transport::client::EventStream,
    commands: transport::client::CommandWriter,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let tcp_stream = TcpStream::connect(addr).await?;
        let (events, commands) = transport::client::split_tcp_stream(tcp_stream);

        Ok(TestClient { events, commands })
    }

    async fn join(&mut self, username: &str, room: &str) -> anyhow::Result<()> {
        self.commands
            .write(&UserCommand::JoinRoom(command::JoinRoomCommand {
                username: String::from(username),
                room: String::from(room),
            }))
            .await
    }

    async fn place(&mut self, index: usize) -> anyhow::Result<()> {
        self.commands
            .write(&UserCommand::PlayerMove(command::PlayerMoveCommand {
                index,
            }))
            .await
    }

    async fn next_event(&mut self) -> anyhow::Result<Event> {
        match self.events.next().await {
            Some(result) => result,
            None => Err(anyhow::anyhow!("server closed the connection")),
        }
    }

    async fn expect_game_state(&mut self) -> anyhow::Result<event::GameStateEvent> {
        match self.next_event().await? {
            Event::GameState(state) => Ok(state),
            other => Err(anyhow::anyhow!("expected a state broadcast, got {:?}", other)),
        }
    }
}

#[tokio::test]
async fn two_clients_play_a_full_game_over_tcp() -> anyhow::Result<()> {
    let (addr, _quit_tx) = spawn_test_server().await?;

    let mut alice = TestClient::connect(addr).await?;
    alice.join("alice", "r1").await?;
    assert_eq!(
        alice.next_event().await?,
        Event::AssignedSymbol(event::AssignedSymbolReplyEvent { symbol: Symbol::X })
    );
    let state = alice.expect_game_state().await?;
    assert!(state.game_active);
    assert_eq!(state.players.len(), 1);

    let mut bob = TestClient::connect(addr).await?;
    bob.join("bob", "r1").await?;
    assert_eq!(
        bob.next_event().await?,
        Event::AssignedSymbol(event::AssignedSymbolReplyEvent { symbol: Symbol::O })
    );
    let state = bob.expect_game_state().await?;
    assert_eq!(state.players.len(), 2);
    assert_eq!(
        bob.next_event().await?,
        Event::GameReady(event::GameReadyBroadcastEvent)
    );

    assert_eq!(
        alice.next_event().await?,
        Event::PlayerJoined(event::PlayerJoinedBroadcastEvent {
            username: String::from("bob"),
            symbol: Symbol::O,
        })
    );
    assert_eq!(
        alice.next_event().await?,
        Event::GameReady(event::GameReadyBroadcastEvent)
    );

    // X sweeps the top row while O fills the middle
    alice.place(0).await?;
    alice.expect_game_state().await?;
    bob.expect_game_state().await?;

    bob.place(3).await?;
    alice.expect_game_state().await?;
    bob.expect_game_state().await?;

    alice.place(1).await?;
    alice.expect_game_state().await?;
    bob.expect_game_state().await?;

    bob.place(4).await?;
    alice.expect_game_state().await?;
    let state = bob.expect_game_state().await?;
    assert_eq!(state.board.cell(4), Some(Cell::O));
    assert_eq!(state.current_turn, Symbol::X);

    alice.place(2).await?;
    let state = alice.expect_game_state().await?;
    assert!(!state.game_active);
    assert_eq!(state.winner, Some(Symbol::X));
    assert_eq!(state.winning_indices, Some([0, 1, 2]));
    bob.expect_game_state().await?;

    let game_over = Event::GameOver(event::GameOverBroadcastEvent {
        winner: Some(Symbol::X),
        winning_indices: Some([0, 1, 2]),
    });
    assert_eq!(alice.next_event().await?, game_over);
    assert_eq!(bob.next_event().await?, game_over);

    Ok(())
}

#[tokio::test]
async fn a_move_before_joining_any_room_is_answered_with_an_error() -> anyhow::Result<()> {
    let (addr, _quit_tx) = spawn_test_server().await?;

    let mut client = TestClient::connect(addr).await?;
    client.place(0).await?;

    assert_eq!(
        client.next_event().await?,
        Event::Error(event::ErrorReplyEvent {
            message: String::from("room not found"),
        })
    );

    Ok(())
}

#[tokio::test]
async fn a_second_join_is_rejected_without_disturbing_the_first_binding() -> anyhow::Result<()> {
    let (addr, _quit_tx) = spawn_test_server().await?;

    let mut alice = TestClient::connect(addr).await?;
    alice.join("alice", "r1").await?;
    alice.next_event().await?;
    alice.expect_game_state().await?;

    // a bound session cannot join again, not even a different room
    alice.join("alice", "r2").await?;
    assert_eq!(
        alice.next_event().await?,
        Event::Error(event::ErrorReplyEvent {
            message: String::from("session is already bound to a room"),
        })
    );

    // the first binding is untouched: alice still hears her room
    let mut bob = TestClient::connect(addr).await?;
    bob.join("bob", "r1").await?;
    bob.next_event().await?;
    bob.expect_game_state().await?;
    bob.next_event().await?;

    assert_eq!(
        alice.next_event().await?,
        Event::PlayerJoined(event::PlayerJoinedBroadcastEvent {
            username: String::from("bob"),
            symbol: Symbol::O,
        })
    );
    assert_eq!(
        alice.next_event().await?,
        Event::GameReady(event::GameReadyBroadcastEvent)
    );

    // and she still holds her X seat in it
    alice.place(0).await?;
    let state = alice.expect_game_state().await?;
    assert_eq!(state.board.cell(0), Some(Cell::X));

    Ok(())
}

#[tokio::test]
async fn a_rejected_move_is_answered_only_to_its_sender() -> anyhow::Result<()> {
    let (addr, _quit_tx) = spawn_test_server().await?;

    let mut alice = TestClient::connect(addr).await?;
    alice.join("alice", "r1").await?;
    alice.next_event().await?;
    alice.expect_game_state().await?;

    let mut bob = TestClient::connect(addr).await?;
    bob.join("bob", "r1").await?;
    bob.next_event().await?;
    bob.expect_game_state().await?;
    bob.next_event().await?;
    alice.next_event().await?;
    alice.next_event().await?;

    // it is alice's turn, so this must come back as a unicast rejection
    bob.place(4).await?;
    assert_eq!(
        bob.next_event().await?,
        Event::InvalidMove(event::InvalidMoveReplyEvent {
            message: String::from("it is not your turn"),
        })
    );

    // alice sees nothing of it; her next event is her own accepted move
    alice.place(4).await?;
    let state = alice.expect_game_state().await?;
    assert_eq!(state.board.cell(4), Some(Cell::X));

    Ok(())
}

#[tokio::test]
async fn a_quitting_player_frees_their_seat_for_a_replacement() -> anyhow::Result<()> {
    let (addr, _quit_tx) = spawn_test_server().await?;

    let mut alice = TestClient::connect(addr).await?;
    alice.join("alice", "r1").await?;
    alice.next_event().await?;
    alice.expect_game_state().await?;

    let mut bob = TestClient::connect(addr).await?;
    bob.join("bob", "r1").await?;
    bob.next_event().await?;
    bob.expect_game_state().await?;
    bob.next_event().await?;

    // the room is full, so carol is turned away
    let mut carol = TestClient::connect(addr).await?;
    carol.join("carol", "r1").await?;
    assert_eq!(
        carol.next_event().await?,
        Event::Error(event::ErrorReplyEvent {
            message: String::from("room is full"),
        })
    );

    alice
        .commands
        .write(&UserCommand::Quit(command::QuitCommand))
        .await?;

    assert_eq!(
        bob.next_event().await?,
        Event::PlayerLeft(event::PlayerLeftBroadcastEvent {
            username: String::from("alice"),
        })
    );

    // a failed join leaves the session unbound, so carol may try again
    carol.join("carol", "r1").await?;
    assert_eq!(
        carol.next_event().await?,
        Event::AssignedSymbol(event::AssignedSymbolReplyEvent { symbol: Symbol::X })
    );

    Ok(())
}

#[tokio::test]
async fn malformed_lines_are_skipped_without_dropping_the_session() -> anyhow::Result<()> {
    let (addr, _quit_tx) = spawn_test_server().await?;

    let mut tcp_stream = TcpStream::connect(addr).await?;
    tcp_stream.write_all(b"this is not a command\r\n").await?;

    let (mut events, mut commands) = transport::client::split_tcp_stream(tcp_stream);
    commands
        .write(&UserCommand::JoinRoom(command::JoinRoomCommand {
            username: String::from("alice"),
            room: String::from("r1"),
        }))
        .await?;

    match events.next().await {
        Some(Ok(Event::AssignedSymbol(event))) => assert_eq!(event.symbol, Symbol::X),
        other => panic!("session did not survive the malformed line: {:?}", other),
    }

    Ok(())
}
