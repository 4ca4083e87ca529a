//! Channel configuration.
//!
//! One [`ChannelConfig`] is constructed at startup and shared read-only
//! (typically behind an `Arc`) by every connection it admits. Keeping the
//! cipher table lookup and password stretching here means an unknown method
//! fails synchronously, before any connection exists, and per-connection
//! instances carry no hidden shared mutable state.

use crate::cipher::{CipherKind, MasterKey, stretch_password};

use super::error::ConfigError;

/// Immutable per-process channel configuration.
#[derive(Clone, Debug)]
pub struct ChannelConfig {
    /// Selected cipher profile.
    kind: CipherKind,
    /// Stretched long-term secret, sized for `kind`.
    master_key: MasterKey,
}

impl ChannelConfig {
    /// Build a configuration from a cipher method string and an operator
    /// password.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownCipher`] if `method` is not in the
    /// supported table.
    pub fn new(method: &str, password: &str) -> Result<Self, ConfigError> {
        let kind = CipherKind::from_name(method)?;
        let master_key = stretch_password(password, kind.key_size());
        Ok(Self { kind, master_key })
    }

    /// Build a configuration from pre-stretched key material.
    ///
    /// `master_key` must already be `kind.key_size()` bytes.
    pub fn from_master_key(kind: CipherKind, master_key: MasterKey) -> Self {
        Self { kind, master_key }
    }

    /// Get the configured cipher profile.
    pub fn cipher(&self) -> CipherKind {
        self.kind
    }

    /// Get the stretched long-term secret.
    pub fn master_key(&self) -> &MasterKey {
        &self.master_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods_accepted() {
        for method in [
            "aes-128-gcm",
            "aes-192-gcm",
            "aes-256-gcm",
            "chacha20-ietf-poly1305",
        ] {
            let config = ChannelConfig::new(method, "pass").unwrap();
            assert_eq!(config.cipher().name(), method);
            assert_eq!(
                config.master_key().as_bytes().len(),
                config.cipher().key_size()
            );
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = ChannelConfig::new("rc4-md5", "pass").unwrap_err();
        assert_eq!(err, ConfigError::UnknownCipher("rc4-md5".into()));
    }
}
