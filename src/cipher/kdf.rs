//! Key material and key derivation.
//!
//! Two derivation steps feed the data channel:
//!
//! 1. Password stretching: the operator credential becomes the long-term
//!    [`MasterKey`] via the OpenSSL `EVP_BytesToKey` construction over MD5
//!    (`D1 = MD5(password)`, `Di = MD5(Di-1 || password)`, concatenated and
//!    truncated to the key size). Performed once per process.
//! 2. Session subkeys: each connection direction derives its own
//!    [`SessionKey`] with HKDF-SHA1 over the master key, salted by that
//!    direction's connection salt, info `"ss-subkey"`.

use hkdf::Hkdf;
use md5::{Digest, Md5};
use sha1::Sha1;
use zeroize::Zeroize;

use crate::core::{CryptoError, SUBKEY_INFO};

/// Long-term key material stretched from the operator credential.
///
/// Shared read-only across connections; zeroized on drop.
#[derive(Clone)]
pub struct MasterKey {
    bytes: Vec<u8>,
}

impl MasterKey {
    /// Wrap pre-stretched key material.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// A per-connection, per-direction session key.
///
/// Exists only once the direction's salt is known; zeroized on drop.
pub struct SessionKey {
    bytes: Vec<u8>,
}

impl SessionKey {
    /// Get the raw key bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Stretch an operator password to `key_size` bytes of master key.
pub fn stretch_password(password: &str, key_size: usize) -> MasterKey {
    let mut key = Vec::with_capacity(key_size);
    let mut digest: Vec<u8> = Vec::new();

    while key.len() < key_size {
        let mut hasher = Md5::new();
        hasher.update(&digest);
        hasher.update(password.as_bytes());
        digest = hasher.finalize().to_vec();
        key.extend_from_slice(&digest);
    }
    digest.zeroize();
    key.truncate(key_size);

    MasterKey { bytes: key }
}

/// Derive a session subkey from the master key and a connection salt.
///
/// Pure function over HKDF-SHA1 extract-and-expand with info
/// `"ss-subkey"`; both peers derive the identical key from the same salt.
///
/// # Errors
/// Returns [`CryptoError::KeyDerivationFailed`] if `key_size` is not a
/// valid HKDF output length.
pub fn derive_session_key(
    master: &MasterKey,
    salt: &[u8],
    key_size: usize,
) -> Result<SessionKey, CryptoError> {
    let hk = Hkdf::<Sha1>::new(Some(salt), master.as_bytes());
    let mut okm = vec![0u8; key_size];
    hk.expand(SUBKEY_INFO, &mut okm)
        .map_err(|_| CryptoError::KeyDerivationFailed)?;

    Ok(SessionKey { bytes: okm })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_password_deterministic() {
        let a = stretch_password("pass", 32);
        let b = stretch_password("pass", 32);
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes().len(), 32);
    }

    #[test]
    fn test_stretch_password_prefix_consistent() {
        // EVP_BytesToKey truncates one digest stream, so a shorter key is
        // a prefix of a longer one for the same password.
        let short = stretch_password("pass", 16);
        let long = stretch_password("pass", 32);
        assert_eq!(short.as_bytes(), &long.as_bytes()[..16]);
    }

    // ===== Test Vector Validation =====

    #[test]
    fn test_vector_stretch_password() {
        // EVP_BytesToKey("pass", 32): MD5("pass") || MD5(MD5("pass") || "pass").
        let key = stretch_password("pass", 32);
        assert_eq!(
            hex::encode(key.as_bytes()),
            "1a1dc91c907325c69271ddf0c944bc72535355012788d8b1893a4eb06864f3e1"
        );
    }

    #[test]
    fn test_vector_session_subkey() {
        let master = stretch_password("pass", 16);
        let key = derive_session_key(&master, &[0x24; 16], 16).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "3e209b8857398144c9cd062f466d18ee"
        );
    }

    #[test]
    fn test_vector_hkdf_sha1_rfc5869_case_4() {
        // RFC 5869 A.4 pins the HKDF-SHA1 machinery this module builds on.
        let ikm = hex::decode("0b0b0b0b0b0b0b0b0b0b0b").unwrap();
        let salt = hex::decode("000102030405060708090a0b0c").unwrap();
        let info = hex::decode("f0f1f2f3f4f5f6f7f8f9").unwrap();

        let hk = Hkdf::<Sha1>::new(Some(&salt), &ikm);
        let mut okm = [0u8; 42];
        hk.expand(&info, &mut okm).unwrap();

        assert_eq!(
            hex::encode(okm),
            "085a01ea1b10f36933068b56efa5ad81a4f14b822f5b091568a9cdd4f155fda2c22e422478d305f3f896"
        );
    }

    #[test]
    fn test_derive_session_key_deterministic() {
        let master = stretch_password("pass", 16);
        let salt = [0x42u8; 16];

        let a = derive_session_key(&master, &salt, 16).unwrap();
        let b = derive_session_key(&master, &salt, 16).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes().len(), 16);
    }

    #[test]
    fn test_derive_session_key_salt_separation() {
        let master = stretch_password("pass", 32);

        let a = derive_session_key(&master, &[0x01; 32], 32).unwrap();
        let b = derive_session_key(&master, &[0x02; 32], 32).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_derive_session_key_secret_separation() {
        let salt = [0x42u8; 32];

        let a = derive_session_key(&stretch_password("pass", 32), &salt, 32).unwrap();
        let b = derive_session_key(&stretch_password("word", 32), &salt, 32).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
