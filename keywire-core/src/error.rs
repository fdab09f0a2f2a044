//! Protocol errors.
//!
//! All errors are terminal. There is no recovery.
//! When an error occurs, the handshake must be aborted and key material
//! discarded; the caller restarts with a fresh connection and key pair.

use std::fmt;

/// Errors from the key-agreement engine.
///
/// Each variant aborts the current handshake attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Curve domain parameter setup failed.
    ///
    /// Unreachable while the curve is a compile-time constant; reserved.
    ParamGenFailed,

    /// Key pair generation failed.
    KeyGenFailed,

    /// Peer-supplied public key did not decode to a valid point on the curve.
    InvalidPeerKey,

    /// Shared-secret derivation failed (degenerate ECDH output).
    DerivationFailed,

    /// Public key could not be rendered in its wire encoding.
    EncodingFailed,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Deliberately terse. Do not leak details.
        match self {
            Self::ParamGenFailed => write!(f, "parameter generation failed"),
            Self::KeyGenFailed => write!(f, "key generation failed"),
            Self::InvalidPeerKey => write!(f, "invalid peer public key"),
            Self::DerivationFailed => write!(f, "shared secret derivation failed"),
            Self::EncodingFailed => write!(f, "key encoding failed"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// Errors from the framing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Payload length does not fit in the 4-byte length prefix.
    PayloadTooLarge,

    /// Payload is shorter than the 3-byte tag convention requires.
    MissingTag,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge => write!(f, "payload too large"),
            Self::MissingTag => write!(f, "payload missing tag"),
        }
    }
}

impl std::error::Error for FrameError {}
