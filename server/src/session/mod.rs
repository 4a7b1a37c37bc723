use std::sync::Arc;

use comms::{command::UserCommand, transport};
use nanoid::nanoid;
use tokio::{net::TcpStream, sync::broadcast};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::room_manager::RoomManager;

use self::game_session::GameSession;

mod game_session;

/// Given a tcp stream and the room manager, handles the user session until
/// the user quits, the tcp stream is closed for some reason, or the server
/// shuts down.
pub async fn handle_user_session(
    room_manager: Arc<RoomManager>,
    mut quit_rx: broadcast::Receiver<()>,
    stream: TcpStream,
) -> anyhow::Result<()> {
    let session_id = nanoid!();
    let (mut commands, mut event_writer) = transport::server::split_tcp_stream(stream);
    let mut game_session = GameSession::new(&session_id, Arc::clone(&room_manager));

    info!("session {} connected", session_id);

    loop {
        tokio::select! {
            cmd = commands.next() => match cmd {
                // If the user closes the tcp stream, or sends a quit command,
                // we fall through to the cleanup below so the opponent hears about it
                None | Some(Ok(UserCommand::Quit(_))) => {
                    break;
                }
                Some(Ok(cmd)) => {
                    game_session.handle_user_command(cmd).await?;
                }
                // A line we could not parse must not take the session down
                Some(Err(err)) => {
                    warn!("session {} sent an unreadable command: {}", session_id, err);
                }
            },
            // Aggregated replies and room broadcasts are written back to the user
            Ok(event) = game_session.recv() => {
                if let Err(err) = event_writer.write(&event).await {
                    // the connection is gone, free the seat like any other leave
                    debug!("session {} became unwritable: {}", session_id, err);
                    break;
                }
            }
            // On server shutdown every session closes its stream at once,
            // so there is nobody left to notify and no cleanup to run
            Ok(_) = quit_rx.recv() => {
                drop(event_writer);
                debug!("session {}: gracefully shutting down user tcp stream", session_id);
                return Ok(());
            }
        }
    }

    game_session.leave_room().await?;
    info!(
        "session {} left, {} rooms open",
        session_id,
        room_manager.room_count().await
    );

    Ok(())
}
