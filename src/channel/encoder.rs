//! Outbound chunk framing.
//!
//! The encoder turns application bytes into wire bytes: a one-time
//! connection salt, then chunks of `seal(len) || seal(data)`. Chunk sizes
//! are randomized to blur the payload-size fingerprint of the traffic.

use std::sync::Arc;

use rand::{Rng, RngCore, rngs::OsRng};

use crate::cipher::{ChunkCipher, derive_session_key};
use crate::core::{ChannelConfig, ChannelError, MAX_CHUNK_SIZE, MIN_SPLIT_SIZE, TAG_SIZE};

/// The encode half of one connection.
///
/// The salt, session key, and nonce counter are created lazily on the
/// first [`StreamEncoder::encode`] and never shared with another
/// connection.
pub struct StreamEncoder {
    config: Arc<ChannelConfig>,
    cipher: Option<ChunkCipher>,
}

impl StreamEncoder {
    /// Create an encoder for one connection.
    pub fn new(config: Arc<ChannelConfig>) -> Self {
        Self {
            config,
            cipher: None,
        }
    }

    /// Frame and encrypt `data` into wire bytes.
    ///
    /// The first call generates the connection salt, derives the send-side
    /// session key, and prepends the salt exactly once. Empty input emits
    /// the salt (if not yet sent) and no chunks.
    pub fn encode(&mut self, data: &[u8]) -> Result<Vec<u8>, ChannelError> {
        let mut wire = Vec::with_capacity(data.len() + 2 * TAG_SIZE + 64);

        if self.cipher.is_none() {
            let kind = self.config.cipher();
            let mut salt = vec![0u8; kind.salt_size()];
            OsRng.fill_bytes(&mut salt);

            let key = derive_session_key(self.config.master_key(), &salt, kind.key_size())?;
            wire.extend_from_slice(&salt);
            tracing::debug!(method = %kind, "send-side session key established");
            self.cipher = Some(ChunkCipher::new(kind, &key)?);
        }
        let cipher = self
            .cipher
            .as_mut()
            .expect("session key established above");

        let mut rng = rand::thread_rng();
        let mut offset = 0;
        while offset < data.len() {
            let target = rng.gen_range(MIN_SPLIT_SIZE..=MAX_CHUNK_SIZE);
            let take = target.min(data.len() - offset);
            let chunk = &data[offset..offset + take];
            offset += take;

            let len_be = (take as u16).to_be_bytes();
            wire.extend_from_slice(&cipher.encrypt(&len_be)?);
            wire.extend_from_slice(&cipher.encrypt(chunk)?);
        }

        Ok(wire)
    }

    /// Whether the salt has been generated and sent.
    pub fn is_established(&self) -> bool {
        self.cipher.is_some()
    }

    /// Drop the keyed state; the next encode starts a fresh stream.
    pub fn clear(&mut self) {
        self.cipher = None;
    }
}
