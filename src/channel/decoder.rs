//! Inbound chunk parsing and decryption.
//!
//! The decoder owns the receive half of one connection. It feeds every
//! transport read into a [`Reassembler`] and supplies the length
//! resolution policy:
//!
//! 1. No session key yet: wait for `salt_size` bytes, derive the key,
//!    and drop the salt from the buffer without emitting a chunk.
//! 2. Wait for the minimum possible chunk before touching the length
//!    field.
//! 3. Decrypt and verify the length field; a bad tag is fatal.
//! 4. A declared length above the chunk maximum is fatal, checked before
//!    any data-tag work.
//! 5. Otherwise the complete chunk is `2 + 16 + len + 16` bytes.
//!
//! Each delivered chunk's data portion is decrypted against its trailing
//! tag and the plaintext emitted to the application-facing callback.

use std::mem;
use std::sync::Arc;

use crate::cipher::{ChunkCipher, derive_session_key};
use crate::core::{
    ChannelConfig, ChannelError, CryptoError, LEN_FIELD_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_WIRE_SIZE,
    ProtocolError, TAG_SIZE,
};

use super::reassembly::{Delimit, Reassembler, Resolution};

/// The decode half of one connection.
pub struct StreamDecoder {
    reassembler: Reassembler,
    inner: DecoderInner,
}

/// Key state and chunk policy, split from the reassembler so one handler
/// can borrow it mutably while the engine drives the buffer.
struct DecoderInner {
    config: Arc<ChannelConfig>,
    /// `None` until the peer's salt has arrived.
    cipher: Option<ChunkCipher>,
    /// Plaintext chunks decoded during the current put.
    decoded: Vec<Vec<u8>>,
}

impl Delimit for DecoderInner {
    fn resolve(&mut self, buffer: &[u8]) -> Result<Resolution, ChannelError> {
        let kind = self.config.cipher();

        if let Some(cipher) = self.cipher.as_mut() {
            if buffer.len() < MIN_CHUNK_WIRE_SIZE {
                return Ok(Resolution::NeedMore);
            }

            let len_field = &buffer[..LEN_FIELD_SIZE + TAG_SIZE];
            let len_bytes = cipher.decrypt(len_field).map_err(|_| {
                tracing::warn!(method = %kind, "length tag verification failed");
                CryptoError::BadLengthTag {
                    excerpt: hex_excerpt(len_field),
                }
            })?;

            let declared = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
            if declared > MAX_CHUNK_SIZE {
                tracing::warn!(declared, "oversized chunk length declared by peer");
                return Err(ProtocolError::OversizedChunk { declared }.into());
            }

            Ok(Resolution::Deliver(
                LEN_FIELD_SIZE + TAG_SIZE + declared + TAG_SIZE,
            ))
        } else {
            let salt_size = kind.salt_size();
            if buffer.len() < salt_size {
                return Ok(Resolution::NeedMore);
            }
            let key = derive_session_key(
                self.config.master_key(),
                &buffer[..salt_size],
                kind.key_size(),
            )?;
            self.cipher = Some(ChunkCipher::new(kind, &key)?);
            tracing::debug!(method = %kind, "receive-side session key established");
            Ok(Resolution::Replace(buffer[salt_size..].to_vec()))
        }
    }

    fn deliver(&mut self, unit: &[u8]) -> Result<(), ChannelError> {
        let cipher = self
            .cipher
            .as_mut()
            .expect("chunk delivered before key establishment");

        let data = &unit[LEN_FIELD_SIZE + TAG_SIZE..];
        let plaintext = cipher.decrypt(data).map_err(|_| {
            tracing::warn!(method = %self.config.cipher(), "data tag verification failed");
            CryptoError::BadDataTag {
                excerpt: hex_excerpt(data),
            }
        })?;

        self.decoded.push(plaintext);
        Ok(())
    }
}

impl StreamDecoder {
    /// Create a decoder for one connection.
    pub fn new(config: Arc<ChannelConfig>) -> Self {
        Self {
            reassembler: Reassembler::new(),
            inner: DecoderInner {
                config,
                cipher: None,
                decoded: Vec::new(),
            },
        }
    }

    /// Absorb inbound wire bytes, invoking `deliver` once per
    /// reconstructed chunk.
    ///
    /// Chunks that verified before a mid-stream failure are still
    /// delivered; the error then surfaces once and the decoder discards
    /// all further input.
    pub fn decode(
        &mut self,
        data: &[u8],
        deliver: &mut dyn FnMut(&[u8]),
    ) -> Result<(), ChannelError> {
        let result = self.reassembler.put(data, &mut self.inner);
        for chunk in mem::take(&mut self.inner.decoded) {
            deliver(&chunk);
        }
        result
    }

    /// Whether the peer's salt has arrived and the session key exists.
    pub fn is_established(&self) -> bool {
        self.inner.cipher.is_some()
    }

    /// Drop all buffered and keyed state; the next decode expects a fresh
    /// stream starting with a salt.
    pub fn clear(&mut self) {
        self.reassembler.clear();
        self.inner.cipher = None;
        self.inner.decoded.clear();
    }
}

/// Short hex excerpt of wire bytes for failure diagnostics.
fn hex_excerpt(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(8)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join("")
}
