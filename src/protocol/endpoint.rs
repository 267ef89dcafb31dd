use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use super::commands::{Command, Message, ProtocolError};

pub struct CommandReader<I: Read> {
    inner: BufReader<I>,
}
impl<I: Read> CommandReader<I> {
    // Creates a new command reader with the given input stream.
    pub fn new(input: I) -> Self {
        Self {
            inner: BufReader::new(input),
        }
    }

    /// Reads a command.
    ///
    /// Returns `None` once the input stream is exhausted. A line that is not
    /// valid UTF-8 is reported as a protocol error, not as an I/O failure.
    pub fn read_command(&mut self) -> std::io::Result<Option<Result<Command, ProtocolError>>> {
        let mut buffer = Vec::new();
        if self.inner.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(match String::from_utf8(buffer) {
            Ok(line) => line.parse(),
            Err(_) => Err(ProtocolError::InvalidUtf8),
        }))
    }
}

pub struct MessageWriter<O: Write> {
    inner: BufWriter<O>,
}
impl<O: Write> MessageWriter<O> {
    // Creates a new message writer with the given output stream.
    pub fn new(output: O) -> Self {
        Self {
            inner: BufWriter::new(output),
        }
    }

    /// Sends a message.
    pub fn send_message(&mut self, message: Message) -> std::io::Result<()> {
        write!(self.inner, "{message}")?;
        self.inner.flush()
    }

    /// Flushes and returns the underlying output stream.
    pub fn into_inner(self) -> std::io::Result<O> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}
