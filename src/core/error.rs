//! Error types for the CLOAK data channel.
//!
//! Insufficient input is deliberately absent from this taxonomy: "need more
//! bytes" is a normal reassembly outcome
//! ([`Resolution::NeedMore`](crate::channel::Resolution)), not an error.

use thiserror::Error;

/// Setup-time configuration errors.
///
/// Raised before any connection is admitted; an instance that failed
/// configuration must never process traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The cipher method string is not in the supported table.
    #[error("unknown cipher method: {0:?}")]
    UnknownCipher(String),
}

/// Errors in the cipher layer.
///
/// Tag verification failures are fatal for the connection: an AEAD failure
/// is indistinguishable from active tampering, so no retry or resync is
/// ever attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Session key derivation failed.
    #[error("session key derivation failed")]
    KeyDerivationFailed,

    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    EncryptionFailed,

    /// AEAD decryption failed (invalid tag or truncated input).
    #[error("AEAD decryption failed (invalid tag or truncated input)")]
    DecryptionFailed,

    /// The length field's tag did not verify.
    #[error("length tag verification failed (wire bytes: {excerpt})")]
    BadLengthTag {
        /// Hex excerpt of the offending wire bytes.
        excerpt: String,
    },

    /// A data field's tag did not verify.
    #[error("data tag verification failed (wire bytes: {excerpt})")]
    BadDataTag {
        /// Hex excerpt of the offending wire bytes.
        excerpt: String,
    },
}

/// Wire-format violations by the peer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The declared chunk length exceeds the 0x3FFF maximum.
    #[error("declared chunk length {declared:#06x} exceeds maximum 0x3fff")]
    OversizedChunk {
        /// The decrypted declared length.
        declared: usize,
    },
}

/// Top-level channel errors.
///
/// Every fatal condition surfaces exactly once through this type; the
/// caller is expected to tear the connection down in response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Crypto error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Protocol violation.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
}
