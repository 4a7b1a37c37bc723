use std::pin::Pin;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::tcp::{OwnedReadHalf, OwnedWriteHalf},
};
use tokio_stream::{wrappers::LinesStream, Stream, StreamExt};

pub const NEW_LINE: &[u8; 2] = b"\r\n";

pub type BoxedStream<Item> = Pin<Box<dyn Stream<Item = Item> + Send>>;

/// Turns the read half of a TCP stream into a stream of newline-delimited
/// JSON messages. Both directions of the protocol use the same framing, so
/// the client and server halves only differ in the message type they expect.
pub(super) fn json_line_stream<T>(reader: OwnedReadHalf) -> BoxedStream<anyhow::Result<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    Box::pin(
        LinesStream::new(BufReader::new(reader).lines()).map(|line| {
            line.context("could not read line from the socket")
                .and_then(|line| {
                    serde_json::from_str::<T>(&line)
                        .context("failed to deserialize message from the socket")
                })
        }),
    )
}

/// Writes values as newline-delimited JSON onto the write half of a TCP stream.
pub(super) struct JsonLineWriter {
    writer: OwnedWriteHalf,
}

impl JsonLineWriter {
    pub(super) fn new(writer: OwnedWriteHalf) -> Self {
        Self { writer }
    }

    pub(super) async fn write<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let mut serialized_bytes = serde_json::to_vec(value)?;
        serialized_bytes.extend_from_slice(NEW_LINE);

        self.writer.write_all(serialized_bytes.as_slice()).await?;

        Ok(())
    }
}
