//! Framed blocking TCP connection.
//!
//! Turns a raw byte stream into a sequence of discrete, length-delimited
//! messages. Every message is preceded on the wire by a 4-byte big-endian
//! length; the length prefix always equals the exact byte length of the
//! payload that follows. Violating that desynchronizes the stream for the
//! remainder of the connection, so any I/O failure closes it immediately.
//!
//! # State Machine
//!
//! ```text
//! Unconnected → Connected → Closed
//! ```
//!
//! `send_message` and `receive_message` are only valid in `Connected`.
//! `Closed` is terminal; there is no reconnect.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};

use keywire_core::frame::{self, LENGTH_PREFIX_SIZE};

use crate::error::TransportError;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Created but not yet connected.
    Unconnected,
    /// Stream established; framed I/O is valid.
    Connected,
    /// Closed after completion or first I/O error. Terminal.
    Closed,
}

/// A framed connection to one peer.
///
/// Owned exclusively by a single handshake; does not implement `Clone`.
pub struct Connection {
    state: ConnectionState,
    stream: Option<TcpStream>,
    host: String,
    port: u16,
}

impl Connection {
    /// Create an unconnected connection for the given remote endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            state: ConnectionState::Unconnected,
            stream: None,
            host: host.into(),
            port,
        }
    }

    /// Wrap an already-established stream (accepting side).
    pub fn from_stream(stream: TcpStream) -> Self {
        let (host, port) = match stream.peer_addr() {
            Ok(addr) => (addr.ip().to_string(), addr.port()),
            Err(_) => (String::from("unknown"), 0),
        };
        Self {
            state: ConnectionState::Connected,
            stream: Some(stream),
            host,
            port,
        }
    }

    /// Dial the remote endpoint.
    ///
    /// Transitions: Unconnected → Connected.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ConnectionFailed` if the connection was
    /// already used or the dial fails.
    pub fn connect(&mut self) -> Result<(), TransportError> {
        if self.state != ConnectionState::Unconnected {
            return Err(TransportError::ConnectionFailed(
                "connection already used".into(),
            ));
        }
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        self.stream = Some(stream);
        self.state = ConnectionState::Connected;
        Ok(())
    }

    /// Send one framed message: 4-byte big-endian length, then the payload.
    ///
    /// Returns the total number of bytes put on the wire. Empty payloads
    /// are valid and produce a zero-length frame.
    ///
    /// # Errors
    ///
    /// `PayloadTooLarge` if the length does not fit the prefix (nothing is
    /// written and the connection stays open); any socket error closes the
    /// connection and surfaces as `SendFailed`.
    pub fn send_message(&mut self, payload: &[u8]) -> Result<usize, TransportError> {
        if self.state != ConnectionState::Connected {
            return Err(TransportError::NotConnected);
        }
        let header = frame::encode_length(payload.len())?;
        let result = self.send_inner(&header, payload);
        if result.is_err() {
            self.close();
        }
        result
    }

    fn send_inner(&mut self, header: &[u8], payload: &[u8]) -> Result<usize, TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;
        stream
            .write_all(header)
            .and_then(|_| stream.write_all(payload))
            .and_then(|_| stream.flush())
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;
        Ok(LENGTH_PREFIX_SIZE + payload.len())
    }

    /// Receive one framed message.
    ///
    /// Reads exactly 4 length bytes, then exactly that many payload bytes,
    /// looping until the full payload has arrived. An OS short read is
    /// therefore never surfaced as a truncated message. A declared length
    /// of zero yields an empty payload and is not an error.
    ///
    /// # Errors
    ///
    /// `PeerClosed` if the peer closes mid-frame; `ReceiveFailed` for any
    /// other socket error. Both close the connection.
    pub fn receive_message(&mut self) -> Result<Vec<u8>, TransportError> {
        if self.state != ConnectionState::Connected {
            return Err(TransportError::NotConnected);
        }
        let result = self.receive_inner();
        if result.is_err() {
            self.close();
        }
        result
    }

    fn receive_inner(&mut self) -> Result<Vec<u8>, TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;

        let mut header = [0u8; LENGTH_PREFIX_SIZE];
        stream.read_exact(&mut header).map_err(map_read_error)?;

        let length = frame::decode_length(&header);
        let mut payload = vec![0u8; length];
        if length > 0 {
            stream.read_exact(&mut payload).map_err(map_read_error)?;
        }
        Ok(payload)
    }

    /// Close the connection. Idempotent; any state transitions to Closed.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.state = ConnectionState::Closed;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The remote endpoint this connection targets.
    pub fn remote_endpoint(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state)
            .field("remote", &format_args!("{}:{}", self.host, self.port))
            .finish()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Defensive close if not already closed.
        self.close();
    }
}

fn map_read_error(e: std::io::Error) -> TransportError {
    if e.kind() == ErrorKind::UnexpectedEof {
        TransportError::PeerClosed
    } else {
        TransportError::ReceiveFailed(e.to_string())
    }
}
