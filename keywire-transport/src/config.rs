//! Handshake configuration.

/// Default peer port.
pub const DEFAULT_PORT: u16 = 27015;

/// Role in the handshake.
///
/// The role only fixes who sends first in each round trip; the derivation
/// itself is symmetric. "Local" and "peer" are established by connection
/// role, never by anything inside a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Dialing side. Sends its public key first.
    Initiator,
    /// Accepting side. Receives the peer's public key first.
    Responder,
}

/// Configuration for running a handshake against a remote endpoint.
#[derive(Debug)]
pub struct HandshakeConfig {
    /// Peer host name or address.
    pub host: String,
    /// Peer TCP port.
    pub port: u16,
    /// Role in the handshake (Initiator or Responder).
    pub role: Role,
    /// Compare the peer's confirmation secret against the local derivation
    /// (constant time) and abort on mismatch. Enabled by default.
    pub verify_secret: bool,
}

impl HandshakeConfig {
    /// Create a new configuration for an initiator.
    pub fn initiator(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            role: Role::Initiator,
            verify_secret: true,
        }
    }

    /// Create a new configuration for a dialing responder.
    pub fn responder(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            role: Role::Responder,
            verify_secret: true,
        }
    }

    /// Skip the confirmation-secret comparison; the peer's value is kept
    /// for display only.
    ///
    /// # Security Warning
    ///
    /// Without the check, a corrupted exchange is only detectable by
    /// comparing the printed values out-of-band.
    pub fn without_verification(mut self) -> Self {
        self.verify_secret = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        let config = HandshakeConfig::initiator("localhost", DEFAULT_PORT);
        assert_eq!(config.role, Role::Initiator);
        assert!(config.verify_secret);

        let config = HandshakeConfig::responder("localhost", DEFAULT_PORT);
        assert_eq!(config.role, Role::Responder);
    }

    #[test]
    fn test_without_verification() {
        let config = HandshakeConfig::initiator("localhost", 1234).without_verification();
        assert!(!config.verify_secret);
    }
}
