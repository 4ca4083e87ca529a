//! Cipher profile table.
//!
//! The supported methods form a fixed closed set; everything the framing
//! layer needs to know about a method (key, salt, and tag sizes) is derived
//! from the [`CipherKind`] value selected at configuration time.

use std::fmt;
use std::str::FromStr;

use crate::core::{ConfigError, TAG_SIZE};

/// A supported AEAD cipher method.
///
/// Every variant uses a 12-byte nonce and a 16-byte tag; key and salt
/// sizes vary per the table below.
///
/// | method                   | key | salt |
/// |--------------------------|-----|------|
/// | `aes-128-gcm`            | 16  | 16   |
/// | `aes-192-gcm`            | 24  | 24   |
/// | `aes-256-gcm`            | 32  | 32   |
/// | `chacha20-ietf-poly1305` | 32  | 32   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherKind {
    /// AES-128-GCM.
    Aes128Gcm,
    /// AES-192-GCM.
    Aes192Gcm,
    /// AES-256-GCM.
    Aes256Gcm,
    /// ChaCha20-Poly1305 (IETF variant, 12-byte nonce).
    ChaCha20Poly1305,
}

impl CipherKind {
    /// Every supported method, in table order.
    pub const ALL: [CipherKind; 4] = [
        CipherKind::Aes128Gcm,
        CipherKind::Aes192Gcm,
        CipherKind::Aes256Gcm,
        CipherKind::ChaCha20Poly1305,
    ];

    /// Look up a method by its configuration identifier.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownCipher`] for identifiers outside the
    /// fixed table.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "aes-128-gcm" => Ok(CipherKind::Aes128Gcm),
            "aes-192-gcm" => Ok(CipherKind::Aes192Gcm),
            "aes-256-gcm" => Ok(CipherKind::Aes256Gcm),
            "chacha20-ietf-poly1305" => Ok(CipherKind::ChaCha20Poly1305),
            other => Err(ConfigError::UnknownCipher(other.to_string())),
        }
    }

    /// The configuration identifier for this method.
    pub fn name(self) -> &'static str {
        match self {
            CipherKind::Aes128Gcm => "aes-128-gcm",
            CipherKind::Aes192Gcm => "aes-192-gcm",
            CipherKind::Aes256Gcm => "aes-256-gcm",
            CipherKind::ChaCha20Poly1305 => "chacha20-ietf-poly1305",
        }
    }

    /// Session key size in bytes.
    pub fn key_size(self) -> usize {
        match self {
            CipherKind::Aes128Gcm => 16,
            CipherKind::Aes192Gcm => 24,
            CipherKind::Aes256Gcm | CipherKind::ChaCha20Poly1305 => 32,
        }
    }

    /// Per-connection salt size in bytes (matches the key size).
    pub fn salt_size(self) -> usize {
        self.key_size()
    }

    /// Authentication tag size in bytes.
    pub fn tag_size(self) -> usize {
        TAG_SIZE
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
