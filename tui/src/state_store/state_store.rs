use std::time::Duration;

use anyhow::Context;
use comms::{
    command,
    transport::{
        self,
        client::{CommandWriter, EventStream},
    },
};
use tokio::{
    net::TcpStream,
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
};
use tokio_stream::StreamExt;

use crate::{Interrupted, Terminator};

use super::{action::Action, State};

type ServerConnection = (EventStream, CommandWriter);

pub struct StateStore {
    state_tx: UnboundedSender<State>,
}

impl StateStore {
    pub fn new() -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (StateStore { state_tx }, state_rx)
    }

    pub async fn main_loop(
        self,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let mut opt_connection: Option<ServerConnection> = None;
        let mut state = State::default();

        // push the initial state so the UI has something to draw
        self.state_tx.send(state.clone())?;

        let mut ticker = tokio::time::interval(Duration::from_secs(1));

        let result = loop {
            if let Some((event_stream, command_writer)) = opt_connection.as_mut() {
                tokio::select! {
                    // server events mutate the state snapshot directly
                    maybe_event = event_stream.next() => match maybe_event {
                        Some(Ok(event)) => {
                            state.handle_server_event(&event);
                        },
                        // a closed stream drops us back to the connect page
                        None => {
                            opt_connection = None;
                            state = State::default();
                        },
                        _ => (),
                    },
                    // UI actions either go over the wire or end the session
                    Some(action) = action_rx.recv() => match action {
                        Action::PlaceMark { index } => {
                            command_writer
                                .write(&command::UserCommand::PlayerMove(
                                    command::PlayerMoveCommand { index },
                                ))
                                .await
                                .context("could not send the move")?;
                        },
                        Action::RequestReset => {
                            command_writer
                                .write(&command::UserCommand::RequestReset(
                                    command::RequestResetCommand,
                                ))
                                .await
                                .context("could not request a reset")?;
                        },
                        Action::Exit => {
                            // best effort goodbye, dropping the socket has the same effect
                            let _ = command_writer
                                .write(&command::UserCommand::Quit(command::QuitCommand))
                                .await;
                            let _ = terminator.terminate(Interrupted::UserInt);

                            break Interrupted::UserInt;
                        },
                        _ => (),
                    },
                    // once a second for the play timer
                    _ = ticker.tick() => {
                        state.tick_timer();
                    },
                    Ok(interrupted) = interrupt_rx.recv() => {
                        break interrupted;
                    }
                }
            } else {
                tokio::select! {
                    Some(action) = action_rx.recv() => match action {
                        Action::ConnectToServerRequest { addr, username, room } => {
                            // show the connecting status while the dial is in flight
                            state.mark_connection_request_start(&username, &room);
                            self.state_tx.send(state.clone())?;

                            match connect_and_join(&addr, &username, &room).await {
                                Ok(connection) => {
                                    let _ = opt_connection.insert(connection);
                                    state.process_connection_request_result(Ok(addr));
                                    // count play time from the moment the connection is up
                                    ticker.reset();
                                },
                                Err(err) => {
                                    state.process_connection_request_result(Err(err));
                                }
                            }
                        },
                        Action::Exit => {
                            let _ = terminator.terminate(Interrupted::UserInt);

                            break Interrupted::UserInt;
                        },
                        _ => (),
                    },
                    Ok(interrupted) = interrupt_rx.recv() => {
                        break interrupted;
                    }
                }
            }

            self.state_tx.send(state.clone())?;
        };

        Ok(result)
    }
}

/// Connects to the server and greets it with a join right away, so the
/// `assignedSymbol` and `gameState` replies arrive through the regular
/// event stream.
async fn connect_and_join(
    addr: &str,
    username: &str,
    room: &str,
) -> anyhow::Result<ServerConnection> {
    let stream = TcpStream::connect(addr).await?;
    let (event_stream, mut command_writer) = transport::client::split_tcp_stream(stream);

    command_writer
        .write(&command::UserCommand::JoinRoom(command::JoinRoomCommand {
            username: String::from(username),
            room: String::from(room),
        }))
        .await
        .context("could not send the join command")?;

    Ok((event_stream, command_writer))
}
