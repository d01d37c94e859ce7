//! States processing a single UBX frame.

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::FromBytes;

/// The two-byte synchronization marker opening every frame.
pub const SYNC: [u8; 2] = [0xb5, 0x62];

/// State token to search for the synchronization marker.
#[derive(Debug)]
pub struct Preamble;

impl Preamble {
    /// Transition to another state by comparing a two-byte window against
    /// the synchronization marker.
    ///
    /// Returns a header state token if the window holds the marker. Otherwise
    /// returns the preamble again, and the window should be slid forward by a
    /// single byte.
    pub fn advance(self, r: [u8; 2]) -> Either<Header, Preamble> {
        if r == SYNC {
            Left(Header(()))
        } else {
            Right(self)
        }
    }
}

/// The class, id and declared payload length of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub class: u8,
    pub id: u8,
    pub length: u16,
}

/// State token to decode a frame header.
#[derive(Debug)]
pub struct Header(pub(super) ());

impl Header {
    /// Transition to another state by decoding a frame header.
    ///
    /// These four bytes are the first covered by the checksum.
    ///
    /// Returns the decoded header, and a successor state token.
    pub fn advance(self, r: [u8; 4]) -> (FrameHeader, Body) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeader {
            class: u8,
            id: u8,
            length: [u8; 2],
        }

        let RawHeader { class, id, length } = zerocopy::transmute!(r);
        let length = u16::from_le_bytes(length);

        (FrameHeader { class, id, length }, Body { length })
    }
}

/// State token to accept a frame payload.
#[derive(Debug)]
pub struct Body {
    length: u16,
}

impl Body {
    /// Transition to another state by splitting the payload from the front of
    /// the remaining bytes.
    ///
    /// Returns the payload and a successor state token, or `None` if fewer
    /// bytes remain than the header declared.
    pub fn advance(self, r: &[u8]) -> Option<(&[u8], Trailer)> {
        let payload = r.get(..usize::from(self.length))?;

        Some((payload, Trailer(())))
    }
}

/// An error advancing over a frame trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrailerError {
    /// Calculated and found checksum values do not match.
    #[error("Calculated ({calculated:02x?}) and found ({found:02x?}) checksums do not match.")]
    Checksum { found: [u8; 2], calculated: [u8; 2] },
}

/// State token to validate a frame checksum.
#[derive(Debug)]
pub struct Trailer(pub(super) ());

impl Trailer {
    /// Transition to another state by comparing the trailing checksum bytes
    /// against the value accumulated over the header and payload.
    ///
    /// Returns a preamble token to search for the next frame. On a mismatch,
    /// the search should restart one byte past the rejected marker rather than
    /// after this trailer.
    pub fn advance(self, r: [u8; 2], calculated: [u8; 2]) -> Result<Preamble, TrailerError> {
        if r != calculated {
            Err(TrailerError::Checksum { found: r, calculated })?;
        }

        Ok(Preamble)
    }
}
