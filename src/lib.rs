#![no_std]

//! A decoder for u-blox UBX position fixes, with coarse geofence
//! classification.
//!
//! Ubxfence reads receiver logs made of concatenated UBX frames, extracts the
//! `NAV-PVT` position/time fixes, normalizes them into timestamped
//! coordinates, and assigns each one a region from an ordered table of
//! bounding boxes.
//!
//! Most users should begin with [`aggregate::process`], which takes a
//! gzip-compressed log and returns every sample along with any warnings
//! raised while decoding. The layers beneath it are public for applications
//! that need finer control: [`avec`] scans slices for frames, [`fix`] and
//! [`sample`] decode and normalize fixes, and [`geofence`] classifies
//! coordinates. The [`sans`] module exposes the underlying finite-state
//! machine for a single frame.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the gzip file aggregator (default).

pub mod avec;
pub mod fix;
pub mod geofence;
pub mod sample;
pub mod sans;

#[cfg(feature = "std")]
pub mod aggregate;

#[cfg(feature = "std")]
pub use aggregate::{FileResult, process};
