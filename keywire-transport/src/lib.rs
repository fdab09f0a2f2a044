//! KeyWire Transport
//!
//! Blocking TCP transport for the KeyWire entropy handshake.
//!
//! This crate wraps `keywire-core` and provides a synchronous API for
//! running the two-round-trip key exchange over a stream socket: framed
//! message delivery on a `Connection`, and a `Handshake` orchestrator that
//! yields a `NegotiatedSecret`.
//!
//! # Hard Failures
//!
//! KeyWire follows a hard-fail philosophy: any transport or cryptographic
//! error aborts the whole handshake and closes the connection.
//!
//! - **No retries**: the caller restarts with a fresh connection and a
//!   fresh key pair.
//! - **No timeouts**: every send/receive blocks until completion or socket
//!   error; an unresponsive peer hangs the handshake. Cancellation means
//!   closing the socket out-of-band, which surfaces as a transport error.
//! - **No duplication**: `NegotiatedSecret` does not implement `Clone`,
//!   and secret material is zeroized on drop.
//! - **Single ownership**: each handshake owns its connection and key pair
//!   exclusively; concurrent handshakes need no shared state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod config;
pub mod connection;
pub mod error;
pub mod handshake;
pub mod secret;

pub use config::{HandshakeConfig, Role, DEFAULT_PORT};
pub use connection::{Connection, ConnectionState};
pub use error::TransportError;
pub use handshake::Handshake;
pub use secret::NegotiatedSecret;
