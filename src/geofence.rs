//! Coarse region classification by bounding box.
//!
//! A table of [`Geofence`]s is searched in order, and the first box strictly
//! containing a coordinate names its region. Boxes may overlap, so order is
//! significant. [`REGIONS`] holds the default table; any slice of geofences
//! may be used in its place.

use core::fmt;

use crate::sample::{Coordinate, Sample};

/// Label given to coordinates outside every geofence.
pub const UNKNOWN: &str = "unknown";

/// A named latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence<'a> {
    pub region: &'a str,
    /// Exclusive latitude bounds, in degrees.
    pub latitude: (f64, f64),
    /// Exclusive longitude bounds, in degrees.
    pub longitude: (f64, f64),
}

impl<'a> Geofence<'a> {
    pub const fn new(region: &'a str, latitude: (f64, f64), longitude: (f64, f64)) -> Self {
        Self {
            region,
            latitude,
            longitude,
        }
    }

    /// Whether a coordinate lies strictly inside the box.
    pub fn contains(&self, c: Coordinate) -> bool {
        let within = |(min, max): (f64, f64), v: f64| min < v && v < max;

        within(self.latitude, c.latitude) && within(self.longitude, c.longitude)
    }
}

/// The default geofence table.
pub const REGIONS: &[Geofence<'static>] = &[
    Geofence::new("Finland", (59.83333, 68.90596), (21.37596, 30.93276)),
    Geofence::new("Switzerland", (45.83203, 47.69732), (6.07544, 9.83723)),
    Geofence::new("China", (18.24306, 52.33333), (75.98951, 134.28917)),
    Geofence::new("Japan", (24.34478, 45.40944), (124.15717, 145.575)),
    Geofence::new("Singapore", (1.28967, 1.32808), (103.804641, 103.84)),
    Geofence::new("United States", (19.50139, 64.85694), (-161.75583, -68.01197)),
];

/// The region a coordinate was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region<'a> {
    Known(&'a str),
    Unknown,
}

impl<'a> Region<'a> {
    /// The region name, or [`UNKNOWN`].
    pub fn label(&self) -> &'a str {
        match *self {
            Self::Known(region) => region,
            Self::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Region<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a coordinate by the first geofence containing it.
pub fn classify<'a>(fences: &[Geofence<'a>], c: Coordinate) -> Region<'a> {
    fences
        .iter()
        .find(|fence| fence.contains(c))
        .map_or(Region::Unknown, |fence| Region::Known(fence.region))
}

/// A sample with the region it was taken in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSample<'a> {
    pub sample: Sample,
    pub region: Region<'a>,
}

impl<'a> ClassifiedSample<'a> {
    pub fn new(sample: Sample, fences: &[Geofence<'a>]) -> Self {
        Self {
            region: classify(fences, sample.coordinate),
            sample,
        }
    }
}
