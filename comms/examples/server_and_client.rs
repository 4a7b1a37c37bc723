use anyhow::Context;
use comms::{
    command::{self, UserCommand},
    event::{self, Event},
    game::{Board, Symbol},
    transport,
};
use tokio::net::{TcpListener, TcpStream};
use tokio_stream::StreamExt;

const PORT: usize = 8081;

/// Accepts one connection and referees it like a tiny single-player server:
/// a join gets a symbol assignment, every move gets checked against a real
/// board and answered with either an acknowledgement or a rejection.
async fn server_example() -> anyhow::Result<()> {
    let listener = TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .context("could not bind to the example port")?;

    let (tcp_stream, _addr) = listener
        .accept()
        .await
        .context("failed to accept the client connection")?;

    // the server half of the transport: commands in, events out
    let (mut command_stream, mut event_writer) = transport::server::split_tcp_stream(tcp_stream);

    let mut board = Board::new();
    while let Some(result) = command_stream.next().await {
        match result {
            Ok(UserCommand::JoinRoom(command::JoinRoomCommand { username, room })) => {
                println!("SERVER: @{} wants to play in #{}", username, room);

                event_writer
                    .write(&Event::AssignedSymbol(event::AssignedSymbolReplyEvent {
                        symbol: Symbol::X,
                    }))
                    .await?;
            }
            Ok(UserCommand::PlayerMove(command::PlayerMoveCommand { index })) => {
                let event = if board.place(index, Symbol::X) {
                    Event::GameState(event::GameStateEvent {
                        board,
                        current_turn: Symbol::O,
                        game_active: true,
                        winner: None,
                        winning_indices: None,
                        players: vec![event::PlayerInfo {
                            username: "alice".into(),
                            symbol: Symbol::X,
                        }],
                        last_move: Some(event::LastMove {
                            index,
                            player: Symbol::X,
                        }),
                    })
                } else {
                    Event::InvalidMove(event::InvalidMoveReplyEvent {
                        message: format!("cell {} cannot be played", index),
                    })
                };

                event_writer.write(&event).await?;
            }
            Ok(UserCommand::Quit(_)) => break,
            Ok(command) => println!("SERVER: ignoring {:?}", command),
            // unparseable input is reported but does not end the example
            Err(e) => println!("SERVER: failed to read command: {}", e),
        }
    }

    Ok(())
}

/// Connects to the example server, joins, then plays the same cell twice to
/// show both the happy path and a rejection going over the wire.
async fn client_example() -> anyhow::Result<()> {
    let tcp_stream = TcpStream::connect(format!("localhost:{}", PORT))
        .await
        .context("failed to connect to the example server")?;

    // the client half of the transport: events in, commands out
    let (mut event_stream, mut command_writer) = transport::client::split_tcp_stream(tcp_stream);

    command_writer
        .write(&UserCommand::JoinRoom(command::JoinRoomCommand {
            username: "alice".into(),
            room: "example-room".into(),
        }))
        .await?;

    for index in [4, 4] {
        command_writer
            .write(&UserCommand::PlayerMove(command::PlayerMoveCommand {
                index,
            }))
            .await?;
    }

    command_writer
        .write(&UserCommand::Quit(command::QuitCommand))
        .await?;

    // drain replies until the server hangs up: assignedSymbol, one
    // acknowledgement, then the rejection of the doubled move
    while let Some(result) = event_stream.next().await {
        match result {
            Ok(event) => println!("CLIENT: received event: {:?}", event),
            Err(e) => println!("CLIENT: failed to read event: {}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tokio::try_join!(server_example(), client_example()).context("one of the examples failed")?;

    println!("example ran without problems");

    Ok(())
}
