use super::{Command, ControlError, Reply};
use i2pkeys_common::config::protocol::READ_CHUNK_LEN;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream};
use tracing::debug;

/// One connection to the control endpoint
///
/// Owns the stream exclusively; dropping the session shuts it down. Bytes
/// received past the end of one reply stay buffered for the next.
pub(crate) struct ControlSession {
    reader: BufReader<TcpStream>,
    max_reply_len: usize,
}

impl ControlSession {
    pub fn connect(address: &str, max_reply_len: usize) -> Result<Self, ControlError> {
        let stream = TcpStream::connect(address).map_err(|source| ControlError::Connect {
            address: address.to_string(),
            source,
        })?;

        debug!(address, "connected to control endpoint");
        Ok(Self {
            reader: BufReader::with_capacity(READ_CHUNK_LEN, stream),
            max_reply_len,
        })
    }

    /// Send a command and read its reply
    pub fn request(&mut self, command: &Command) -> Result<String, ControlError> {
        self.send(command)?;
        self.read_reply()
    }

    fn send(&mut self, command: &Command) -> Result<(), ControlError> {
        debug!(command = command.name(), "sending command");
        let stream = self.reader.get_mut();
        stream
            .write_all(command.to_line().as_bytes())
            .map_err(ControlError::Write)?;
        stream.flush().map_err(ControlError::Write)
    }

    /// Read one line; the peer closing after sending data also ends it
    fn read_reply(&mut self) -> Result<String, ControlError> {
        let mut text = String::new();
        if !self.read_more(&mut text)? {
            return Err(ControlError::EmptyReply);
        }
        Ok(text)
    }

    /// Append the next line of the current reply to `text`
    ///
    /// Returns `false` once the peer has closed and nothing more arrived.
    /// The whole of `text` stays within `max_reply_len`.
    pub fn read_more(&mut self, text: &mut String) -> Result<bool, ControlError> {
        let limit = self.max_reply_len.saturating_sub(text.len());
        let mut line = Vec::new();

        let n = (&mut self.reader)
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut line)
            .map_err(ControlError::Read)?;

        if n == 0 {
            return Ok(false);
        }
        if line.len() > limit {
            return Err(ControlError::ReplyTooLarge {
                limit: self.max_reply_len,
            });
        }

        let line = String::from_utf8(line).map_err(|_| ControlError::InvalidUtf8)?;
        debug!(len = line.len(), "received reply line");
        text.push_str(&line);
        Ok(true)
    }
}

/// Parse a reply and require `RESULT=OK`
pub(crate) fn expect_ok(text: &str) -> Result<Reply, ControlError> {
    let reply = Reply::parse(text);
    if !reply.is_ok() {
        return Err(ControlError::NoResult {
            result: reply.result().map(str::to_string),
            message: reply.message().map(str::to_string),
        });
    }
    Ok(reply)
}

impl Drop for ControlSession {
    fn drop(&mut self) {
        // Already-closed peers make shutdown fail; nothing left to release then.
        let _ = self.reader.get_ref().shutdown(Shutdown::Both);
        debug!("closed control connection");
    }
}
