//! AEAD chunk cipher with monotonic nonce management.
//!
//! A [`ChunkCipher`] owns one direction of a connection: the AEAD instance
//! built from that direction's session key, and the direction's 12-byte
//! little-endian nonce counter. The counter starts at zero and advances by
//! exactly 1 after each *successful* operation, so a nonce is never reused
//! under one key and a failed verification cannot desynchronize the
//! sequence.

use aes_gcm::{
    Aes128Gcm, Aes256Gcm, AesGcm,
    aead::{
        Aead, KeyInit,
        generic_array::{GenericArray, typenum::U12},
    },
    aes::Aes192,
};
use chacha20poly1305::ChaCha20Poly1305;

use crate::core::{CryptoError, NONCE_SIZE, TAG_SIZE};

use super::kdf::SessionKey;
use super::profile::CipherKind;

/// AES-192-GCM (no type alias provided upstream).
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Enum-dispatched AEAD instance; every variant has a 12-byte nonce and a
/// 16-byte tag.
enum AeadCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
    ChaCha20(ChaCha20Poly1305),
}

impl AeadCipher {
    fn new(kind: CipherKind, key: &SessionKey) -> Result<Self, CryptoError> {
        let key = key.as_bytes();
        match kind {
            CipherKind::Aes128Gcm => Aes128Gcm::new_from_slice(key).map(AeadCipher::Aes128),
            CipherKind::Aes192Gcm => Aes192Gcm::new_from_slice(key).map(AeadCipher::Aes192),
            CipherKind::Aes256Gcm => Aes256Gcm::new_from_slice(key).map(AeadCipher::Aes256),
            CipherKind::ChaCha20Poly1305 => {
                ChaCha20Poly1305::new_from_slice(key).map(AeadCipher::ChaCha20)
            }
        }
        .map_err(|_| CryptoError::KeyDerivationFailed)
    }

    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = GenericArray::from_slice(&nonce[..]);
        match self {
            AeadCipher::Aes128(c) => c.encrypt(nonce, plaintext),
            AeadCipher::Aes192(c) => c.encrypt(nonce, plaintext),
            AeadCipher::Aes256(c) => c.encrypt(nonce, plaintext),
            AeadCipher::ChaCha20(c) => c.encrypt(nonce, plaintext),
        }
        .map_err(|_| CryptoError::EncryptionFailed)
    }

    fn open(&self, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = GenericArray::from_slice(&nonce[..]);
        match self {
            AeadCipher::Aes128(c) => c.decrypt(nonce, ciphertext),
            AeadCipher::Aes192(c) => c.decrypt(nonce, ciphertext),
            AeadCipher::Aes256(c) => c.decrypt(nonce, ciphertext),
            AeadCipher::ChaCha20(c) => c.decrypt(nonce, ciphertext),
        }
        .map_err(|_| CryptoError::DecryptionFailed)
    }
}

/// One direction's cipher engine: AEAD instance plus nonce counter.
pub struct ChunkCipher {
    cipher: AeadCipher,
    /// Little-endian counter used directly as the AEAD nonce.
    nonce: [u8; NONCE_SIZE],
}

impl ChunkCipher {
    /// Build a cipher engine from a session key, counter at zero.
    ///
    /// # Errors
    /// Returns [`CryptoError::KeyDerivationFailed`] if the key length does
    /// not match the cipher profile.
    pub fn new(kind: CipherKind, key: &SessionKey) -> Result<Self, CryptoError> {
        Ok(Self {
            cipher: AeadCipher::new(kind, key)?,
            nonce: [0u8; NONCE_SIZE],
        })
    }

    /// Encrypt one field with the current nonce.
    ///
    /// Returns `ciphertext || tag` and advances the counter.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sealed = self.cipher.seal(&self.nonce, plaintext)?;
        self.advance();
        Ok(sealed)
    }

    /// Decrypt one `ciphertext || tag` field with the current nonce.
    ///
    /// The counter advances only on successful verification; a failed tag
    /// leaves it untouched so an attacker cannot burn nonces with garbage.
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < TAG_SIZE {
            return Err(CryptoError::DecryptionFailed);
        }
        let plaintext = self.cipher.open(&self.nonce, ciphertext)?;
        self.advance();
        Ok(plaintext)
    }

    /// The nonce the next operation will use. Diagnostics only.
    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    /// Increment the little-endian counter by 1 with carry.
    ///
    /// Wrap past 2^96 is an accepted operational ceiling, not guarded.
    fn advance(&mut self) {
        for byte in &mut self.nonce {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::kdf::{derive_session_key, stretch_password};

    fn cipher_pair(kind: CipherKind) -> (ChunkCipher, ChunkCipher) {
        let master = stretch_password("pass", kind.key_size());
        let salt = vec![0x42u8; kind.salt_size()];
        let key = derive_session_key(&master, &salt, kind.key_size()).unwrap();
        let peer_key = derive_session_key(&master, &salt, kind.key_size()).unwrap();
        (
            ChunkCipher::new(kind, &key).unwrap(),
            ChunkCipher::new(kind, &peer_key).unwrap(),
        )
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip_all_profiles() {
        for kind in CipherKind::ALL {
            let (mut sender, mut receiver) = cipher_pair(kind);

            let sealed = sender.encrypt(b"hello world").unwrap();
            assert_eq!(sealed.len(), 11 + TAG_SIZE);

            let opened = receiver.decrypt(&sealed).unwrap();
            assert_eq!(opened, b"hello world");
        }
    }

    #[test]
    fn test_nonce_starts_at_zero_and_advances_per_op() {
        let (mut sender, _) = cipher_pair(CipherKind::Aes128Gcm);
        assert_eq!(sender.nonce(), &[0u8; NONCE_SIZE]);

        for i in 1u64..=5 {
            sender.encrypt(b"x").unwrap();
            let mut expected = [0u8; NONCE_SIZE];
            expected[..8].copy_from_slice(&i.to_le_bytes());
            assert_eq!(sender.nonce(), &expected);
        }
    }

    #[test]
    fn test_nonce_carry_across_byte_boundary() {
        let (mut sender, _) = cipher_pair(CipherKind::ChaCha20Poly1305);
        for _ in 0..256 {
            sender.encrypt(b"x").unwrap();
        }
        assert_eq!(sender.nonce()[0], 0);
        assert_eq!(sender.nonce()[1], 1);
    }

    #[test]
    fn test_peer_consumes_identical_nonce_sequence() {
        let (mut sender, mut receiver) = cipher_pair(CipherKind::Aes256Gcm);

        let sealed: Vec<Vec<u8>> = (0..10)
            .map(|i| sender.encrypt(format!("frame {i}").as_bytes()).unwrap())
            .collect();

        for (i, frame) in sealed.iter().enumerate() {
            let opened = receiver.decrypt(frame).unwrap();
            assert_eq!(opened, format!("frame {i}").as_bytes());
            assert_eq!(receiver.nonce(), &sender_nonce_after(i + 1));
        }
    }

    fn sender_nonce_after(ops: usize) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        nonce[..8].copy_from_slice(&(ops as u64).to_le_bytes());
        nonce
    }

    #[test]
    fn test_failed_decrypt_leaves_counter_untouched() {
        let (mut sender, mut receiver) = cipher_pair(CipherKind::Aes128Gcm);

        let mut sealed = sender.encrypt(b"payload").unwrap();
        sealed[0] ^= 0x01;

        assert_eq!(
            receiver.decrypt(&sealed),
            Err(CryptoError::DecryptionFailed)
        );
        assert_eq!(receiver.nonce(), &[0u8; NONCE_SIZE]);

        // The untampered frame still verifies with the unmoved counter.
        sealed[0] ^= 0x01;
        assert_eq!(receiver.decrypt(&sealed).unwrap(), b"payload");
    }

    #[test]
    fn test_truncated_input_rejected() {
        let (_, mut receiver) = cipher_pair(CipherKind::Aes128Gcm);
        assert_eq!(
            receiver.decrypt(&[0u8; TAG_SIZE - 1]),
            Err(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn test_reordered_frames_fail_authentication() {
        let (mut sender, mut receiver) = cipher_pair(CipherKind::Aes192Gcm);

        let first = sender.encrypt(b"first").unwrap();
        let second = sender.encrypt(b"second").unwrap();

        // Delivering the second frame first hits the wrong nonce.
        assert!(receiver.decrypt(&second).is_err());
        // The counter did not move, so in-order delivery still succeeds.
        assert_eq!(receiver.decrypt(&first).unwrap(), b"first");
        assert_eq!(receiver.decrypt(&second).unwrap(), b"second");
    }
}
