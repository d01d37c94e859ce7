//! Internal finite-state machine for implementing frame decoders.
//!
//! This module is intended for applications that need fine control over how
//! bytes reach the decoder (for example, those reading from a serial port
//! into a fixed buffer). See [`crate::avec`] for a slice-based implementation
//! covering the common case.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance` method.
//! This will return a successor state token, along with any extracted data.
//!
//! A UBX frame is walked through four states:
//!
//! 1. [`frame::Preamble`], searching for the two-byte synchronization marker.
//! 2. [`frame::Header`], reading the message class, id and payload length.
//! 3. [`frame::Body`], accepting the payload.
//! 4. [`frame::Trailer`], comparing the checksum, returning to the preamble.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Sliding the preamble window forward a single byte at a time when the
//! marker does not match, so that misaligned frames are still found.
//!
//! - Checking that enough bytes remain for the length declared in the header
//! before reading the payload.
//!
//! - Accumulating the checksum over the header and payload bytes. A helper
//! function is provided in the [`check`] module.
//!
//! - Restarting the search one byte past a rejected marker, rather than after
//! the rejected frame.

pub mod check;
pub mod frame;

/// Entrypoint to the finite-state machine.
pub type Decoder = frame::Preamble;
