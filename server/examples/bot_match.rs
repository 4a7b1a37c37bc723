use std::time::Duration;

use comms::{
    command::{self, UserCommand},
    event::Event,
    game::Symbol,
    transport,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::net::TcpStream;
use tokio_stream::StreamExt;

/// Bot Match demo for the Game Server
///
/// Connects two bots to the same room and lets them play random legal moves
/// against each other for a configured number of games, resetting the board
/// between games. Start a server on SERVER_ADDR before running this.

const SERVER_ADDR: &str = "localhost:8080";
const ROOM: &str = "bot-arena";
// How many games to play before the bots disconnect
const GAMES_TO_PLAY: usize = 5;
// How many milliseconds a bot waits before each of its moves
const BOT_MOVE_DELAY_MILLIS: u64 = 250;

async fn run_bot(username: &str) -> anyhow::Result<()> {
    let tcp_stream = TcpStream::connect(SERVER_ADDR).await?;
    let (mut event_stream, mut command_writer) = transport::client::split_tcp_stream(tcp_stream);
    let mut rng = StdRng::from_entropy();
    let to_sleep = Duration::from_millis(BOT_MOVE_DELAY_MILLIS);

    command_writer
        .write(&UserCommand::JoinRoom(command::JoinRoomCommand {
            username: String::from(username),
            room: String::from(ROOM),
        }))
        .await?;

    let mut my_symbol: Option<Symbol> = None;
    let mut games_played: usize = 0;

    while let Some(result) = event_stream.next().await {
        match result? {
            Event::AssignedSymbol(event) => {
                println!("{}: playing as {}", username, event.symbol);
                my_symbol = Some(event.symbol);
            }
            // move whenever a fresh snapshot says it is our turn
            Event::GameState(state) => {
                let symbol = match my_symbol {
                    Some(symbol) => symbol,
                    None => continue,
                };
                if !state.game_active || state.current_turn != symbol {
                    continue;
                }

                let open_cells: Vec<usize> = state
                    .board
                    .cells()
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_empty())
                    .map(|(index, _)| index)
                    .collect();
                if open_cells.is_empty() {
                    continue;
                }

                tokio::time::sleep(to_sleep).await;
                let index = open_cells[rng.gen_range(0..open_cells.len())];
                command_writer
                    .write(&UserCommand::PlayerMove(command::PlayerMoveCommand {
                        index,
                    }))
                    .await?;
            }
            Event::GameOver(event) => {
                match event.winner {
                    Some(winner) => println!("{}: game over, {} won", username, winner),
                    None => println!("{}: game over, draw", username),
                }

                games_played += 1;

                // the X bot is in charge of resets and of calling it a day
                if my_symbol == Some(Symbol::X) {
                    if games_played >= GAMES_TO_PLAY {
                        command_writer
                            .write(&UserCommand::Quit(command::QuitCommand))
                            .await?;
                        break;
                    }

                    command_writer
                        .write(&UserCommand::RequestReset(command::RequestResetCommand))
                        .await?;
                }
            }
            // the opponent disconnecting after the last game ends the match
            Event::PlayerLeft(event) => {
                println!("{}: {} left, wrapping up", username, event.username);
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (first, second) = tokio::join!(run_bot("bot-1"), run_bot("bot-2"));

    first?;
    second?;

    println!("bot match finished");

    Ok(())
}
