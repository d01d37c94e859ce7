//! Convenience interfaces for scanning byte slices for frames.
//!
//! The [`frames`] function walks a slice of concatenated UBX frames and yields
//! each one in order, resynchronizing past corrupt data. Frames carry their
//! raw payload; see [`crate::fix`] for decoding position fixes from them.

pub mod slice;

pub use slice::{Error as FrameError, Frames, frames};

/// A structurally valid frame with a matching checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Byte offset of the synchronization marker within the scanned slice.
    pub offset: usize,
    pub class: u8,
    pub id: u8,
    pub payload: &'a [u8],
    pub checksum: [u8; 2],
}

impl Frame<'_> {
    /// The `(class, id)` pair identifying the message type.
    pub fn identity(&self) -> (u8, u8) {
        (self.class, self.id)
    }

    /// The number of bytes this frame occupies, from marker to checksum.
    pub fn encoded_len(&self) -> usize {
        8 + self.payload.len()
    }
}
