//! The AEAD preset: the transform pair the pipeline stacks.

use std::sync::Arc;

use crate::core::{ChannelConfig, ChannelError, DuplexTransform};

use super::decoder::StreamDecoder;
use super::encoder::StreamEncoder;

/// One connection's encrypted data channel.
///
/// Pairs a [`StreamEncoder`] and a [`StreamDecoder`] over one shared
/// immutable [`ChannelConfig`]. Each direction lazily derives its own
/// session key from its own salt; nothing here is shared with any other
/// connection.
pub struct AeadPreset {
    encoder: StreamEncoder,
    decoder: StreamDecoder,
}

impl AeadPreset {
    /// Create the transform pair for one connection.
    pub fn new(config: Arc<ChannelConfig>) -> Self {
        Self {
            encoder: StreamEncoder::new(config.clone()),
            decoder: StreamDecoder::new(config),
        }
    }
}

impl DuplexTransform for AeadPreset {
    fn encode(&mut self, data: &[u8]) -> Result<Vec<u8>, ChannelError> {
        self.encoder.encode(data)
    }

    fn decode(
        &mut self,
        data: &[u8],
        deliver: &mut dyn FnMut(&[u8]),
    ) -> Result<(), ChannelError> {
        self.decoder.decode(data, deliver)
    }

    fn teardown(&mut self) {
        self.encoder.clear();
        self.decoder.clear();
        tracing::debug!("data channel torn down");
    }
}
