use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::{
    net::TcpListener,
    signal::unix::{signal, SignalKind},
    sync::broadcast,
    task::JoinSet,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::room_manager::{RoomManager, RoomPolicy};
use server::session;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = "0.0.0.0")]
    host: String,
    /// Server port to listen on
    #[clap(short, long, default_value = "8080")]
    port: u16,
    /// Admit joins beyond two players as watch-only spectators instead of
    /// rejecting them
    #[clap(long)]
    admit_spectators: bool,
    /// End a running game when one of its players disconnects instead of
    /// waiting for a replacement
    #[clap(long)]
    end_abandoned_games: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("server=info")),
        )
        .init();

    let room_manager = Arc::new(RoomManager::new(RoomPolicy {
        admit_spectators: args.admit_spectators,
        end_abandoned_games: args.end_abandoned_games,
    }));

    let mut join_set: JoinSet<anyhow::Result<()>> = JoinSet::new();
    let mut interrupt =
        signal(SignalKind::interrupt()).expect("failed to create interrupt signal stream");
    let server = TcpListener::bind(format!("{}:{}", args.host, args.port))
        .await
        .expect("could not bind to the port");
    let (quit_tx, quit_rx) = broadcast::channel::<()>(1);

    info!("listening on {}:{}", args.host, args.port);
    loop {
        tokio::select! {
            _ = interrupt.recv() => {
                info!("server interrupted, gracefully shutting down");
                quit_tx.send(()).context("failed to send quit signal").unwrap();
                break;
            }
            Ok((socket, _)) = server.accept() => {
                join_set.spawn(session::handle_user_session(
                    Arc::clone(&room_manager),
                    quit_rx.resubscribe(),
                    socket,
                ));
            }
        }
    }

    while join_set.join_next().await.is_some() {}
    info!("server shut down");
}
