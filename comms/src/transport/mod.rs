/// The client half: event reader and command writer
#[cfg(feature = "client")]
pub mod client;
/// Newline-delimited JSON framing shared by both halves
#[cfg(any(feature = "client", feature = "server"))]
mod common;
/// The server half: command reader and event writer, one per client connection
#[cfg(feature = "server")]
pub mod server;
