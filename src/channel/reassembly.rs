//! Length-prefixed stream reassembly.
//!
//! The transport hands the channel arbitrarily fragmented reads: one byte
//! at a time, several chunks at once, or anything between. [`Reassembler`]
//! absorbs that by accumulating bytes and asking a caller-supplied
//! [`Delimit`] handler where the unit boundaries are. It knows nothing
//! about salts, ciphers, or the chunk format - only about buffering and
//! delimiting.

use std::mem;

use crate::core::ChannelError;

/// Outcome of a [`Delimit::resolve`] call against the buffered bytes.
///
/// The fatal case is carried by `Result::Err`, so matches on this enum
/// stay exhaustive as the protocol evolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not enough bytes buffered to make a decision; wait for the next put.
    NeedMore,
    /// The current unit is `n` bytes; deliver once that many are buffered.
    Deliver(usize),
    /// Swap the buffer contents without emitting a unit (salt consumption).
    Replace(Vec<u8>),
}

/// Caller-supplied delimiting policy and unit consumer.
pub trait Delimit {
    /// Decide what the buffered bytes mean. Called once per unit: after a
    /// `Deliver(n)` the engine waits for `n` bytes without re-resolving.
    fn resolve(&mut self, buffer: &[u8]) -> Result<Resolution, ChannelError>;

    /// Consume one complete unit removed from the front of the buffer.
    fn deliver(&mut self, unit: &[u8]) -> Result<(), ChannelError>;
}

/// Accumulates transport reads and emits complete logical units.
///
/// A fatal error from the handler moves the engine into a terminal failed
/// state: the error is surfaced once, buffered bytes are dropped, and all
/// further input is discarded until [`Reassembler::clear`].
pub struct Reassembler {
    buffer: Vec<u8>,
    /// Cached unit length from the last `Deliver` resolution.
    pending: Option<usize>,
    failed: bool,
}

impl Reassembler {
    /// Create an empty reassembler.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            pending: None,
            failed: false,
        }
    }

    /// Append `data` and drive the handler until it needs more input.
    ///
    /// Multiple units arriving in one read are delivered back to back;
    /// byte-at-a-time delivery behaves identically.
    ///
    /// # Errors
    /// Propagates the handler's fatal error exactly once; the engine is
    /// terminal afterwards.
    pub fn put<H: Delimit>(&mut self, data: &[u8], handler: &mut H) -> Result<(), ChannelError> {
        if self.failed {
            return Ok(());
        }
        self.buffer.extend_from_slice(data);

        loop {
            let needed = match self.pending {
                Some(n) => n,
                None => match handler.resolve(&self.buffer) {
                    Ok(Resolution::NeedMore) => return Ok(()),
                    Ok(Resolution::Replace(next)) => {
                        self.buffer = next;
                        continue;
                    }
                    Ok(Resolution::Deliver(n)) => {
                        self.pending = Some(n);
                        n
                    }
                    Err(err) => return self.fail(err),
                },
            };

            if self.buffer.len() < needed {
                return Ok(());
            }
            self.pending = None;

            let rest = self.buffer.split_off(needed);
            let unit = mem::replace(&mut self.buffer, rest);
            if let Err(err) = handler.deliver(&unit) {
                return self.fail(err);
            }
        }
    }

    /// Reset buffer, cached length, and failure mode for reuse.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pending = None;
        self.failed = false;
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Whether a fatal outcome has been surfaced.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn fail(&mut self, err: ChannelError) -> Result<(), ChannelError> {
        self.failed = true;
        self.pending = None;
        self.buffer.clear();
        Err(err)
    }
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}
