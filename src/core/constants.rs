//! Protocol constants for the CLOAK data channel.
//!
//! These values are fixed by the wire format and MUST NOT be changed.

// =============================================================================
// CHUNK FRAMING
// =============================================================================

/// Maximum application bytes carried by one chunk.
pub const MAX_CHUNK_SIZE: usize = 0x3FFF;

/// Lower bound for randomized chunk splitting on send.
///
/// Chunk sizes are drawn uniformly from `[MIN_SPLIT_SIZE, MAX_CHUNK_SIZE]`
/// to blur payload-size fingerprints; the final chunk takes the remainder.
pub const MIN_SPLIT_SIZE: usize = 0x0800;

/// Size of the encrypted big-endian length field.
pub const LEN_FIELD_SIZE: usize = 2;

/// Smallest possible wire chunk: length field, both tags, one data byte.
pub const MIN_CHUNK_WIRE_SIZE: usize = LEN_FIELD_SIZE + 2 * TAG_SIZE + 1;

// =============================================================================
// AEAD PARAMETERS
// =============================================================================

/// Authentication tag size, identical for every supported cipher.
pub const TAG_SIZE: usize = 16;

/// AEAD nonce size; the nonce is the little-endian per-direction counter.
pub const NONCE_SIZE: usize = 12;

// =============================================================================
// KEY DERIVATION
// =============================================================================

/// HKDF info string for session subkey derivation.
pub const SUBKEY_INFO: &[u8] = b"ss-subkey";
