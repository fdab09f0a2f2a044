//! KeyWire Protocol Core
//!
//! Sans-IO implementation of the KeyWire entropy handshake: two endpoints
//! exchange elliptic-curve public keys over a framed byte stream and each
//! independently derives the same shared secret, suitable as entropy for a
//! downstream symmetric cipher.
//!
//! This crate provides:
//! - Wire framing helpers (big-endian length codec, payload tag convention)
//! - The ECDH key-agreement engine (P-256, SHA-256, base64 rendering)
//!
//! # Security Invariants
//!
//! - The exchange is anonymous Diffie-Hellman: it does not authenticate the
//!   peer and offers no protection against an active man-in-the-middle
//! - Any cryptographic failure aborts the handshake; no retries, no recovery
//! - Derived secret material is zeroized on drop and never cloned
//! - Direct use of `unsafe` is forbidden (#![forbid(unsafe_code)])

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod ecdh;
pub mod error;
pub mod frame;

pub use ecdh::{EncodedPublicKey, KeyPair, PeerPublicKey, SharedSecret};
pub use error::{CryptoError, FrameError};
