//! Transport errors.

use std::fmt;

use keywire_core::{CryptoError, FrameError};

/// Errors that can occur while running a handshake.
///
/// Every variant is terminal for the current handshake attempt: the
/// connection is closed and the caller must restart from scratch.
#[derive(Debug)]
pub enum TransportError {
    // --- Connection & Setup ---
    /// Failed to resolve or connect to the peer endpoint.
    ConnectionFailed(String),
    /// Operation attempted outside the Connected state.
    NotConnected,

    // --- Framed I/O ---
    /// The socket reported an error or short write while sending.
    SendFailed(String),
    /// The socket reported an error while receiving.
    ReceiveFailed(String),
    /// Peer closed the connection before a full frame arrived.
    PeerClosed,
    /// Payload length does not fit the 4-byte length prefix.
    PayloadTooLarge,
    /// Received payload is too short to carry its tag.
    MalformedPayload,

    // --- Key Agreement ---
    /// Cryptographic failure from keywire-core.
    Crypto(CryptoError),
    /// The peer's confirmation secret does not match the local derivation.
    SecretMismatch,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "connection failed: {}", msg),
            Self::NotConnected => write!(f, "connection not open"),
            Self::SendFailed(msg) => write!(f, "send failed: {}", msg),
            Self::ReceiveFailed(msg) => write!(f, "receive failed: {}", msg),
            Self::PeerClosed => write!(f, "peer closed connection"),
            Self::PayloadTooLarge => write!(f, "payload too large"),
            Self::MalformedPayload => write!(f, "malformed payload"),
            Self::Crypto(e) => write!(f, "crypto error: {}", e),
            Self::SecretMismatch => write!(f, "shared secret mismatch"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<CryptoError> for TransportError {
    fn from(e: CryptoError) -> Self {
        Self::Crypto(e)
    }
}

impl From<FrameError> for TransportError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::PayloadTooLarge => Self::PayloadTooLarge,
            FrameError::MissingTag => Self::MalformedPayload,
        }
    }
}
