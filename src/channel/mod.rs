//! CLOAK Protocol - Data Channel Layer
//!
//! Implements the stream transforms the pipeline drives:
//! - Stream reassembly (transport-fragmentation tolerant delimiting)
//! - Outbound chunk framing with randomized splitting
//! - Inbound chunk parsing with the length resolution policy
//! - The AEAD preset adapter

mod decoder;
mod encoder;
mod preset;
mod reassembly;

pub use decoder::*;
pub use encoder::*;
pub use preset::*;
pub use reassembly::*;
