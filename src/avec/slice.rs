//! Slice-based frame scanner implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    check::compute_checksum,
    frame::{Preamble, TrailerError},
};

use super::Frame;

/// Errors occurring while scanning a slice.
///
/// A checksum error is recoverable, and scanning continues after it. A
/// truncated frame is always the final item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Fewer bytes remain than the frame at this offset declares.
    #[error("Truncated frame at offset {offset} ({remaining} of {needed} bytes).")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// Calculated and found checksum values do not match.
    #[error(
        "Calculated ({calculated:02x?}) and found ({found:02x?}) checksums do not match for frame at offset {offset}."
    )]
    Checksum {
        offset: usize,
        found: [u8; 2],
        calculated: [u8; 2],
    },
}

/// Scan a slice of concatenated frames.
///
/// This method is also re-exported as `ubxfence::avec::frames`.
pub fn frames(r: &[u8]) -> Frames<'_> {
    Frames {
        r,
        i: 0,
        done: false,
    }
}

/// Iterator over the frames of a slice. See [`frames`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    r: &'a [u8],
    i: usize, // Offset at which to resume searching for a marker.
    done: bool,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<Frame<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let r = self.r;
        let mut preamble: Decoder = Preamble;

        let (s, header) = loop {
            let Some(window) = take(r, self.i) else {
                self.done = true;
                return None;
            };

            preamble = match preamble.advance(window) {
                Left(state) => break (self.i, state),
                Right(state) => {
                    self.i += 1;
                    state
                }
            };
        };

        let Some(header_bytes) = take::<4>(r, s + 2) else {
            return Some(Err(self.truncate(s, 4, r.len() - (s + 2))));
        };

        let (header, body) = header.advance(header_bytes);

        let rest = r.get(s + 6..).unwrap_or_default();
        let needed = usize::from(header.length) + 2;

        let Some((payload, trailer)) = body.advance(rest) else {
            return Some(Err(self.truncate(s, needed, rest.len())));
        };
        let Some(found) = take::<2>(rest, payload.len()) else {
            return Some(Err(self.truncate(s, needed, rest.len())));
        };

        let calculated = compute_checksum(compute_checksum([0, 0], &header_bytes), payload);

        match trailer.advance(found, calculated) {
            Ok(_) => {
                let frame = Frame {
                    offset: s,
                    class: header.class,
                    id: header.id,
                    payload,
                    checksum: found,
                };
                self.i = s + frame.encoded_len();

                Some(Ok(frame))
            }
            Err(TrailerError::Checksum { found, calculated }) => {
                // Resume inside the rejected frame, which may hide a real one.
                self.i = s + 1;

                Some(Err(Error::Checksum {
                    offset: s,
                    found,
                    calculated,
                }))
            }
        }
    }
}

impl Frames<'_> {
    fn truncate(&mut self, offset: usize, needed: usize, remaining: usize) -> Error {
        self.done = true;

        Error::Truncated {
            offset,
            needed,
            remaining,
        }
    }
}

impl core::iter::FusedIterator for Frames<'_> {}

/// Take an exact number of bytes from an offset in a slice.
fn take<const N: usize>(r: &[u8], i: usize) -> Option<[u8; N]> {
    r.get(i..)?.first_chunk().copied()
}
