use tokio::net::TcpStream;

use crate::{command, event};

use super::common::{json_line_stream, BoxedStream, JsonLineWriter};

/// [EventStream] yields the [crate::event::Event]s the server sends, one
/// JSON line each.
///
/// # Cancel Safety
///
/// Polling the stream from a [tokio::select!] arm is safe; an abandoned
/// poll never swallows an event.
pub type EventStream = BoxedStream<anyhow::Result<event::Event>>;

/// [CommandWriter] writes [crate::command::UserCommand]s onto the write
/// half of the connection.
pub struct CommandWriter {
    inner: JsonLineWriter,
}

impl CommandWriter {
    /// Sends one [crate::command::UserCommand] to the server.
    ///
    /// # Cancel Safety
    ///
    /// Not cancel-safe. Dropping the future mid-write can leave a partial
    /// line on the wire, and the following write starts a fresh buffer, so
    /// the framing would be corrupted for the rest of the connection.
    pub async fn write(&mut self, command: &command::UserCommand) -> anyhow::Result<()> {
        self.inner.write(command).await
    }
}

/// Splits the client side of a connection into its two directions:
/// events in, commands out.
pub fn split_tcp_stream(stream: TcpStream) -> (EventStream, CommandWriter) {
    let (reader, writer) = stream.into_split();

    (
        json_line_stream(reader),
        CommandWriter {
            inner: JsonLineWriter::new(writer),
        },
    )
}
