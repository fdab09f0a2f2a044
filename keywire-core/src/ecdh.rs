//! ECDH key-agreement engine.
//!
//! Fixed suite: NIST P-256 key pairs, SubjectPublicKeyInfo DER public-key
//! encoding rendered as single-line padded base64, and SHA-256 over the raw
//! ECDH output for the final secret material.
//!
//! # Security Properties
//!
//! - Fresh key pair per handshake (ephemeral, never persisted)
//! - Degenerate (all-zero) ECDH output rejection
//! - Secret material zeroized on drop, constant-time comparisons
//! - No algorithm negotiation

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use p256::ecdh::EphemeralSecret;
use p256::pkcs8::{DecodePublicKey, EncodePublicKey};
use p256::PublicKey;
use rand_core::OsRng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Digest length in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// An ephemeral P-256 key pair, scoped to a single handshake.
///
/// The private scalar is zeroized when the pair is dropped.
pub struct KeyPair {
    secret: EphemeralSecret,
}

impl KeyPair {
    /// Generate a fresh key pair and its wire encoding.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EncodingFailed` if the public key cannot be
    /// rendered in its DER form.
    pub fn generate() -> Result<(Self, EncodedPublicKey), CryptoError> {
        let pair = Self {
            secret: EphemeralSecret::random(&mut OsRng),
        };
        let encoded = pair.encode_public_key()?;
        Ok((pair, encoded))
    }

    /// Render the public key for the wire.
    ///
    /// The encoding is the standard self-describing SubjectPublicKeyInfo
    /// DER structure (algorithm identifier + uncompressed point), base64
    /// rendered as a single line with no envelope markers or line breaks.
    /// Deterministic: repeated calls on the same pair yield identical text.
    pub fn encode_public_key(&self) -> Result<EncodedPublicKey, CryptoError> {
        let der = self
            .secret
            .public_key()
            .to_public_key_der()
            .map_err(|_| CryptoError::EncodingFailed)?;
        Ok(EncodedPublicKey(BASE64.encode(der.as_bytes())))
    }

    /// Derive the shared secret with a peer's public key.
    ///
    /// Computes the raw ECDH value, rejects a degenerate all-zero result,
    /// and hashes the raw bytes (not their textual rendering) with SHA-256.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DerivationFailed` if the ECDH output is the
    /// all-zero string.
    pub fn derive_shared_secret(&self, peer: &PeerPublicKey) -> Result<SharedSecret, CryptoError> {
        let raw = self.secret.diffie_hellman(&peer.0);
        let raw_bytes = raw.raw_secret_bytes();
        if bool::from(raw_bytes.as_slice().ct_eq(&[0u8; 32])) {
            return Err(CryptoError::DerivationFailed);
        }
        let digest: [u8; DIGEST_LEN] = Sha256::digest(raw_bytes).into();
        Ok(SharedSecret::new(digest))
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("KeyPair([REDACTED])")
    }
}

/// The single-line base64 wire encoding of a local public key.
///
/// Immutable once produced. Public data; safe to log and clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPublicKey(String);

impl EncodedPublicKey {
    /// The encoded key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The encoded key as bytes, ready for a wire payload.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume and return the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// A peer's public key, imported from its wire encoding.
pub struct PeerPublicKey(PublicKey);

impl PeerPublicKey {
    /// Parse a peer-supplied encoded public key.
    ///
    /// Accepts the same encoding `encode_public_key` produces: UTF-8 text,
    /// single-line padded base64 of a SubjectPublicKeyInfo DER structure
    /// describing a valid point on P-256. The curve identity element cannot
    /// be expressed in this encoding and is rejected at parse time.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidPeerKey` for any malformed, truncated,
    /// or off-curve input.
    pub fn import(bytes: &[u8]) -> Result<Self, CryptoError> {
        let text = std::str::from_utf8(bytes).map_err(|_| CryptoError::InvalidPeerKey)?;
        let der = BASE64
            .decode(text)
            .map_err(|_| CryptoError::InvalidPeerKey)?;
        let key = PublicKey::from_public_key_der(&der).map_err(|_| CryptoError::InvalidPeerKey)?;
        Ok(Self(key))
    }
}

impl core::fmt::Debug for PeerPublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PeerPublicKey(..)")
    }
}

/// The finalized secret material of one handshake.
///
/// Holds the SHA-256 digest of the raw ECDH output together with its
/// padded base64 transport rendering. Does not implement `Clone`;
/// zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    digest: [u8; DIGEST_LEN],
    encoded: String,
}

impl SharedSecret {
    fn new(digest: [u8; DIGEST_LEN]) -> Self {
        let encoded = BASE64.encode(digest);
        Self { digest, encoded }
    }

    /// The raw 32-byte digest, for use as downstream entropy.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.digest
    }

    /// The padded base64 transport rendering of the digest.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Short hex fingerprint (first 8 digest bytes) for display.
    ///
    /// Both peers can compare this value by eye; it is not a substitute
    /// for the constant-time confirmation check.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..8])
    }

    /// Constant-time comparison against a peer's transport rendering.
    pub fn matches_encoded(&self, peer_encoded: &[u8]) -> bool {
        self.encoded.as_bytes().ct_eq(peer_encoded).into()
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_symmetric() {
        let (pair_a, encoded_a) = KeyPair::generate().unwrap();
        let (pair_b, encoded_b) = KeyPair::generate().unwrap();

        let peer_b = PeerPublicKey::import(encoded_b.as_bytes()).unwrap();
        let peer_a = PeerPublicKey::import(encoded_a.as_bytes()).unwrap();

        let secret_a = pair_a.derive_shared_secret(&peer_b).unwrap();
        let secret_b = pair_b.derive_shared_secret(&peer_a).unwrap();

        assert_eq!(secret_a.as_bytes(), secret_b.as_bytes());
        assert_eq!(secret_a.encoded(), secret_b.encoded());
        assert!(secret_a.matches_encoded(secret_b.encoded().as_bytes()));
    }

    #[test]
    fn test_encoding_is_stable_and_single_line() {
        let (pair, encoded) = KeyPair::generate().unwrap();

        assert!(!encoded.as_str().contains('\n'));
        assert!(!encoded.as_str().contains('\r'));
        assert!(!encoded.as_str().contains("BEGIN"));

        // Idempotent across repeated calls on the same pair.
        let again = pair.encode_public_key().unwrap();
        assert_eq!(encoded, again);
    }

    #[test]
    fn test_encoding_is_self_describing_der() {
        let (_, encoded) = KeyPair::generate().unwrap();
        let der = BASE64.decode(encoded.as_str()).unwrap();
        // SubjectPublicKeyInfo is a DER SEQUENCE.
        assert_eq!(der[0], 0x30);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert_eq!(
            PeerPublicKey::import(b"not base64 at all!").unwrap_err(),
            CryptoError::InvalidPeerKey
        );
        assert_eq!(
            PeerPublicKey::import(&[0xFF, 0xFE, 0x00]).unwrap_err(),
            CryptoError::InvalidPeerKey
        );
        // Valid base64, but not a DER key structure.
        assert_eq!(
            PeerPublicKey::import(BASE64.encode(b"hello world").as_bytes()).unwrap_err(),
            CryptoError::InvalidPeerKey
        );
    }

    #[test]
    fn test_import_rejects_truncated_key() {
        let (_, encoded) = KeyPair::generate().unwrap();
        let text = encoded.as_str();
        // Chop the tail off the valid encoding.
        let truncated = &text[..text.len() / 2];
        assert_eq!(
            PeerPublicKey::import(truncated.as_bytes()).unwrap_err(),
            CryptoError::InvalidPeerKey
        );
    }

    #[test]
    fn test_import_rejects_corrupted_point() {
        let (_, encoded) = KeyPair::generate().unwrap();
        let mut der = BASE64.decode(encoded.as_str()).unwrap();
        // Flip a bit inside the encoded point coordinates.
        let last = der.len() - 1;
        der[last] ^= 0x01;
        let corrupted = BASE64.encode(&der);
        assert_eq!(
            PeerPublicKey::import(corrupted.as_bytes()).unwrap_err(),
            CryptoError::InvalidPeerKey
        );
    }

    #[test]
    fn test_secret_rendering() {
        let (pair_a, _) = KeyPair::generate().unwrap();
        let (_, encoded_b) = KeyPair::generate().unwrap();
        let peer_b = PeerPublicKey::import(encoded_b.as_bytes()).unwrap();

        let secret = pair_a.derive_shared_secret(&peer_b).unwrap();
        // 32 bytes of digest render as 44 characters of padded base64.
        assert_eq!(secret.encoded().len(), 44);
        assert!(secret.encoded().ends_with('='));
        assert_eq!(secret.fingerprint().len(), 16);
        assert_eq!(BASE64.decode(secret.encoded()).unwrap(), secret.as_bytes());
    }

    #[test]
    fn test_mismatched_rendering_fails_comparison() {
        let (pair_a, _) = KeyPair::generate().unwrap();
        let (_, encoded_b) = KeyPair::generate().unwrap();
        let peer_b = PeerPublicKey::import(encoded_b.as_bytes()).unwrap();

        let secret = pair_a.derive_shared_secret(&peer_b).unwrap();
        assert!(!secret.matches_encoded(b"AAAA"));
        assert!(!secret.matches_encoded(b""));

        let mut altered = secret.encoded().to_string().into_bytes();
        altered[0] ^= 0x01;
        assert!(!secret.matches_encoded(&altered));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let (pair, _) = KeyPair::generate().unwrap();
        assert_eq!(format!("{:?}", pair), "KeyPair([REDACTED])");

        let (_, encoded_b) = KeyPair::generate().unwrap();
        let peer_b = PeerPublicKey::import(encoded_b.as_bytes()).unwrap();
        let secret = pair.derive_shared_secret(&peer_b).unwrap();
        assert_eq!(format!("{:?}", secret), "SharedSecret([REDACTED])");
    }
}
