use tokio::net::TcpStream;

use crate::{command, event};

use super::common::{json_line_stream, BoxedStream, JsonLineWriter};

/// [CommandStream] yields the [crate::command::UserCommand]s a client
/// sends, one JSON line each.
///
/// # Cancel Safety
///
/// Polling the stream from a [tokio::select!] arm is safe; an abandoned
/// poll never swallows a command.
pub type CommandStream = BoxedStream<anyhow::Result<command::UserCommand>>;

/// [EventWriter] writes [crate::event::Event]s onto the write half of the
/// connection.
pub struct EventWriter {
    inner: JsonLineWriter,
}

impl EventWriter {
    /// Sends one [crate::event::Event] to the client.
    ///
    /// # Cancel Safety
    ///
    /// Not cancel-safe. Dropping the future mid-write can leave a partial
    /// line on the wire, and the following write starts a fresh buffer, so
    /// the framing would be corrupted for the rest of the connection.
    pub async fn write(&mut self, event: &event::Event) -> anyhow::Result<()> {
        self.inner.write(event).await
    }
}

/// Splits the server side of a connection into its two directions:
/// commands in, events out.
pub fn split_tcp_stream(stream: TcpStream) -> (CommandStream, EventWriter) {
    let (reader, writer) = stream.into_split();

    (
        json_line_stream(reader),
        EventWriter {
            inner: JsonLineWriter::new(writer),
        },
    )
}
