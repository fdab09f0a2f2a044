//! Negotiated secret wrapper.
//!
//! The caller-facing result of a completed handshake. Secret-bearing
//! fields zeroize on drop; callers must opt-in to copying.

use keywire_core::SharedSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The outcome of one completed handshake.
///
/// This type does not implement `Clone` to prevent accidental secret
/// duplication. The exchanged public keys and the peer's confirmation
/// rendering are kept for display.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct NegotiatedSecret {
    #[zeroize(skip)]
    local_public: String,
    #[zeroize(skip)]
    peer_public: String,
    secret: SharedSecret,
    peer_secret: String,
}

impl NegotiatedSecret {
    pub(crate) fn new(
        local_public: String,
        peer_public: String,
        secret: SharedSecret,
        peer_secret: String,
    ) -> Self {
        Self {
            local_public,
            peer_public,
            secret,
            peer_secret,
        }
    }

    /// The raw 32-byte secret, for seeding a downstream cipher.
    pub fn entropy(&self) -> &[u8; 32] {
        self.secret.as_bytes()
    }

    /// The local base64 rendering of the secret, as sent on the wire.
    pub fn encoded(&self) -> &str {
        self.secret.encoded()
    }

    /// The peer's confirmation rendering, as received on the wire.
    pub fn peer_encoded(&self) -> &str {
        &self.peer_secret
    }

    /// The local encoded public key that was sent.
    pub fn local_public_key(&self) -> &str {
        &self.local_public
    }

    /// The peer's encoded public key that was received.
    pub fn peer_public_key(&self) -> &str {
        &self.peer_public
    }

    /// Short hex fingerprint for eyeball comparison across both ends.
    pub fn fingerprint(&self) -> String {
        self.secret.fingerprint()
    }

    /// Whether the peer's confirmation matches the local derivation
    /// (constant time).
    pub fn matched(&self) -> bool {
        self.secret.matches_encoded(self.peer_secret.as_bytes())
    }
}

impl std::fmt::Debug for NegotiatedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NegotiatedSecret")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}
