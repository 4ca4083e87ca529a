//! # CLOAK Protocol
//!
//! The encrypted data-channel layer of a proxy protocol: it turns an
//! application byte stream into an authenticated, chunked,
//! traffic-shape-obfuscated wire stream, and reverses that transform on
//! receipt.
//!
//! - **Confidentiality and integrity**: every chunk is sealed by an AEAD
//!   cipher; any tag failure is terminal for the connection
//! - **Per-connection keys**: one HKDF-SHA1 subkey per direction, derived
//!   from a shared long-term secret and a per-connection salt
//! - **Traffic shaping**: outbound data is split into randomly sized
//!   chunks to blur payload-size fingerprints
//! - **Fragmentation tolerance**: inbound bytes may arrive in any
//!   fragmentation, down to one byte at a time
//!
//! ## Modules
//!
//! - [`core`]: Configuration, constants, errors, and the transform trait
//! - [`cipher`]: Cipher profiles, key derivation, and the chunk cipher
//! - [`channel`]: Stream reassembly, chunk framing, and the preset adapter
//!
//! ## Wire format
//!
//! ```text
//! Stream := Salt Chunk*
//! Chunk  := EncLen(2) LenTag(16) EncData(len) DataTag(16)
//! ```
//!
//! `Salt` is sent exactly once per direction, sized by the cipher profile;
//! `len` never exceeds `0x3FFF`.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use cloak_protocol::prelude::*;
//!
//! # fn main() -> Result<(), ChannelError> {
//! let config = Arc::new(ChannelConfig::new("aes-256-gcm", "correct horse")?);
//!
//! // One preset per connection; directions are keyed independently.
//! let mut client = AeadPreset::new(config.clone());
//! let mut server = AeadPreset::new(config);
//!
//! let wire = client.encode(b"hello world")?;
//! server.decode(&wire, &mut |chunk| {
//!     assert_eq!(chunk, b"hello world");
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline that owns sockets and scheduling depends only on the
//! [`DuplexTransform`] trait; it supplies raw bytes and receives either
//! transformed bytes or a single fatal error, then tears the channel down.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod channel;
pub mod cipher;
pub mod core;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::channel::*;
    pub use crate::cipher::*;
    pub use crate::core::*;
}

// Re-export commonly used items at crate root
pub use self::channel::AeadPreset;
pub use self::cipher::CipherKind;
pub use self::core::{ChannelConfig, ChannelError, DuplexTransform};
