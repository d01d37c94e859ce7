//! Per-file decoding of compressed receiver logs.
//!
//! _Requires Cargo feature `std`._
//!
//! [`process`] decompresses a gzip stream, reading every concatenated member,
//! and drives every stage of the decoder over it. Failures are isolated to the
//! smallest unit they affect: a bad frame or fix is skipped, and only an
//! unreadable stream leaves a file without samples. Each is recorded as a [`Warning`] on the returned
//! [`FileResult`]; nothing is printed.

use std::{io::Read, string::String, vec::Vec};

use chrono::{NaiveDateTime, TimeDelta};
use flate2::read::MultiGzDecoder;
use log::{debug, trace, warn};
use thiserror::Error;

use crate::{
    avec::{FrameError, frames},
    fix::{self, FixError},
    geofence::{ClassifiedSample, Geofence, Region, classify},
    sample::{self, Sample, SampleError},
};

extern crate std;

/// Options controlling how fixes are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Skip fixes whose date and time the receiver has not flagged valid.
    pub strict_time: bool,
}

/// A recoverable problem encountered while processing a file.
#[derive(Debug, Error)]
pub enum Warning {
    /// The stream could not be read or decompressed. No samples were kept.
    #[error("Failed to read compressed stream: {0}.")]
    Stream(#[from] std::io::Error),
    /// A frame was rejected, or frame production ended early.
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// A fix frame did not hold the expected fields.
    #[error("Skipped fix at offset {offset}: {source}")]
    Fix { offset: usize, source: FixError },
    /// A fix could not be normalized.
    #[error("Skipped fix at offset {offset}: {source}")]
    Sample { offset: usize, source: SampleError },
}

/// The samples decoded from one file.
#[derive(Debug)]
pub struct FileResult {
    pub filename: String,
    /// Samples in the order their fixes appear in the file.
    pub samples: Vec<Sample>,
    pub warnings: Vec<Warning>,
}

/// An overview of a file's samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileSummary<'a> {
    /// Region of the first sample.
    pub location: Region<'a>,
    /// Timestamp of the first sample.
    pub start: NaiveDateTime,
    /// Time from the first sample to the last.
    pub duration: TimeDelta,
}

impl FileSummary<'_> {
    pub fn duration_minutes(&self) -> f64 {
        self.duration.num_milliseconds() as f64 / 60_000.0
    }
}

impl FileResult {
    fn new(filename: String) -> Self {
        Self {
            filename,
            samples: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Classify every sample against a geofence table.
    pub fn classified<'a>(
        &self,
        fences: &[Geofence<'a>],
    ) -> impl Iterator<Item = ClassifiedSample<'a>> {
        self.samples
            .iter()
            .map(move |sample| ClassifiedSample::new(*sample, fences))
    }

    /// Summarize the file, or `None` if it has no samples.
    pub fn summary<'a>(&self, fences: &[Geofence<'a>]) -> Option<FileSummary<'a>> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;

        Some(FileSummary {
            location: classify(fences, first.coordinate),
            start: first.timestamp,
            duration: last.timestamp - first.timestamp,
        })
    }
}

/// Decode every sample from a gzip-compressed stream, with default options.
///
/// This method is also re-exported as `ubxfence::process`.
pub fn process(filename: impl Into<String>, source: impl Read) -> FileResult {
    process_with(Options::default(), filename, source)
}

/// Decode every sample from a gzip-compressed stream.
///
/// The source is consumed and dropped before returning.
pub fn process_with(options: Options, filename: impl Into<String>, source: impl Read) -> FileResult {
    let mut result = FileResult::new(filename.into());

    let data = match decompress(source) {
        Ok(data) => data,
        Err(err) => {
            warn!("{}: failed to decompress: {err}", result.filename);
            result.warnings.push(Warning::Stream(err));
            return result;
        }
    };

    let normalize = if options.strict_time {
        sample::normalize_confirmed
    } else {
        sample::normalize
    };

    for frame in frames(&data) {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                debug!("{}: {err}", result.filename);
                result.warnings.push(err.into());
                continue;
            }
        };

        let Some(fix) = fix::decode(&frame) else {
            continue;
        };

        let offset = frame.offset;
        let sample = fix
            .map_err(|source| Warning::Fix { offset, source })
            .and_then(|fix| normalize(fix).map_err(|source| Warning::Sample { offset, source }));

        match sample {
            Ok(sample) => result.samples.push(sample),
            Err(warning) => {
                debug!("{}: {warning}", result.filename);
                result.warnings.push(warning);
            }
        }
    }

    trace!(
        "{}: {} samples from {} bytes, {} warnings",
        result.filename,
        result.samples.len(),
        data.len(),
        result.warnings.len()
    );

    result
}

fn decompress(source: impl Read) -> Result<Vec<u8>, std::io::Error> {
    let mut data = Vec::new();
    MultiGzDecoder::new(source).read_to_end(&mut data)?;

    Ok(data)
}
