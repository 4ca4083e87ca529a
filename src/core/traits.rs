//! Core traits for the CLOAK data channel.
//!
//! The pipeline that owns sockets and scheduling depends only on these
//! traits, never on a concrete preset's internals.

use super::error::ChannelError;

/// A two-directional byte-stream transform driven by an external pipeline.
///
/// One instance serves exactly one connection. Calls are synchronous and
/// non-blocking: a transform either makes progress with the bytes it was
/// given or buffers them internally and returns.
///
/// # Requirements
///
/// - `decode(encode(m))` MUST reconstruct `m` for any fragmentation of the
///   intermediate bytes across `decode` calls
/// - A fatal error MUST be returned exactly once; afterwards the instance
///   discards input until torn down
/// - `teardown` MUST clear all buffered and keyed state
///
/// # Example
///
/// ```ignore
/// let config = Arc::new(ChannelConfig::new("aes-256-gcm", "secret")?);
/// let mut preset = AeadPreset::new(config);
///
/// let wire = preset.encode(b"hello")?;
/// preset.decode(&wire, &mut |chunk| assert_eq!(chunk, b"hello"))?;
/// preset.teardown();
/// ```
pub trait DuplexTransform {
    /// Transform outbound application bytes into wire bytes.
    fn encode(&mut self, data: &[u8]) -> Result<Vec<u8>, ChannelError>;

    /// Transform inbound wire bytes, invoking `deliver` once per
    /// reconstructed application chunk.
    ///
    /// Zero deliveries is normal when the input is an incomplete fragment.
    /// An `Err` is the single failure notification for the connection.
    fn decode(
        &mut self,
        data: &[u8],
        deliver: &mut dyn FnMut(&[u8]),
    ) -> Result<(), ChannelError>;

    /// Clear all buffered and keyed state.
    fn teardown(&mut self);
}
