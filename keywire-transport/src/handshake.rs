//! Handshake orchestration.
//!
//! Sequences the two round trips of the exchange and exposes a single
//! synchronous call that yields the negotiated secret:
//!
//! 1. Generate a local key pair; send the encoded public key tagged
//!    `"pk~"`; receive the peer's.
//! 2. Derive the shared secret; send its rendering tagged `"ss~"`;
//!    receive the peer's confirmation.
//!
//! The responder runs the mirror image (receive before send in each round
//! trip). Any failure at any step aborts the whole handshake and closes
//! the connection; key material lives only for the duration of the call.

use std::net::TcpStream;

use keywire_core::frame;
use keywire_core::{KeyPair, PeerPublicKey};

use crate::config::{HandshakeConfig, Role};
use crate::connection::Connection;
use crate::error::TransportError;
use crate::secret::NegotiatedSecret;

/// A single handshake attempt over one connection.
///
/// Does not implement `Clone`; running it consumes it.
pub struct Handshake {
    connection: Connection,
    role: Role,
    verify_secret: bool,
}

impl Handshake {
    /// Dial the configured endpoint and run the handshake to completion.
    ///
    /// # Errors
    ///
    /// Any transport or cryptographic failure aborts the attempt; the
    /// caller must restart with a fresh configuration.
    pub fn connect(config: HandshakeConfig) -> Result<NegotiatedSecret, TransportError> {
        let mut connection = Connection::new(config.host, config.port);
        connection.connect()?;
        Self::over(connection, config.role, config.verify_secret).run()
    }

    /// Run the responder side over an already-accepted stream.
    pub fn accept(stream: TcpStream) -> Result<NegotiatedSecret, TransportError> {
        Self::over(Connection::from_stream(stream), Role::Responder, true).run()
    }

    /// Build a handshake over an existing connection.
    pub fn over(connection: Connection, role: Role, verify_secret: bool) -> Self {
        Self {
            connection,
            role,
            verify_secret,
        }
    }

    /// Run the handshake to completion.
    ///
    /// On return (success or failure) the connection is closed and all key
    /// material has been dropped; only the `NegotiatedSecret` survives.
    pub fn run(mut self) -> Result<NegotiatedSecret, TransportError> {
        let result = self.run_inner();
        self.connection.close();
        result
    }

    fn run_inner(&mut self) -> Result<NegotiatedSecret, TransportError> {
        let (key_pair, local_public) = KeyPair::generate()?;

        // Round trip 1: public keys.
        let inbound = self.exchange(frame::PUBLIC_KEY_TAG, local_public.as_bytes())?;
        let (_, peer_key_body) = frame::split_tag(&inbound)?;
        let peer_key = PeerPublicKey::import(peer_key_body)?;
        let peer_public = String::from_utf8_lossy(peer_key_body).into_owned();

        // Round trip 2: confirmation secrets.
        let secret = key_pair.derive_shared_secret(&peer_key)?;
        let inbound = self.exchange(frame::SHARED_SECRET_TAG, secret.encoded().as_bytes())?;
        let (_, peer_secret_body) = frame::split_tag(&inbound)?;

        if self.verify_secret && !secret.matches_encoded(peer_secret_body) {
            return Err(TransportError::SecretMismatch);
        }

        let peer_secret = String::from_utf8_lossy(peer_secret_body).into_owned();
        Ok(NegotiatedSecret::new(
            local_public.into_string(),
            peer_public,
            secret,
            peer_secret,
        ))
    }

    /// One round trip: send our tagged payload and receive the peer's.
    ///
    /// The initiator sends first; the responder receives first. The tag on
    /// the inbound payload is not inspected here.
    fn exchange(&mut self, tag: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        match self.role {
            Role::Initiator => {
                self.connection.send_message(&frame::tag_payload(tag, body))?;
                self.connection.receive_message()
            }
            Role::Responder => {
                let inbound = self.connection.receive_message()?;
                self.connection.send_message(&frame::tag_payload(tag, body))?;
                Ok(inbound)
            }
        }
    }
}
