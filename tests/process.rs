#![cfg(feature = "std")]

mod support;

use std::path::Path;

use chrono::{NaiveDateTime, Timelike};
use csv::ReaderBuilder;
use support::{Pvt, frame, gzip};
use ubxfence::{
    aggregate::{Options, Warning, process_with},
    avec::FrameError,
    fix::FixError,
    geofence::{REGIONS, Region},
    process,
    sample::SampleError,
};

#[test]
fn process_fixture_walk() {
    const PATH: &str = "fixtures/singapore-walk.ubz";
    let file = std::fs::File::open(PATH).unwrap();

    let result = process("singapore-walk.ubz", file);

    let path = Path::new(PATH).with_extension("csv");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    let expected: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
        .collect();

    assert_eq!(result.filename, "singapore-walk.ubz");
    assert_eq!(result.samples.len(), expected.len());

    for (sample, row) in result.classified(REGIONS).zip(&expected) {
        let timestamp = NaiveDateTime::parse_from_str(&row[0], "%Y-%m-%dT%H:%M:%S%.f").unwrap();
        let latitude: f64 = row[1].parse().unwrap();
        let longitude: f64 = row[2].parse().unwrap();

        assert_eq!(sample.sample.timestamp, timestamp);
        assert!((sample.sample.coordinate.latitude - latitude).abs() < 1e-9);
        assert!((sample.sample.coordinate.longitude - longitude).abs() < 1e-9);
        assert_eq!(sample.region.label(), row[3]);
    }

    let warnings = &result.warnings[..];
    assert_eq!(warnings.len(), 4, "{warnings:?}");
    assert!(matches!(
        warnings[0],
        Warning::Frame(FrameError::Checksum { offset: 228, .. })
    ));
    assert!(matches!(
        warnings[1],
        Warning::Sample {
            offset: 328,
            source: SampleError::InvalidTimestamp { month: 13, .. },
        }
    ));
    assert!(matches!(
        warnings[2],
        Warning::Fix {
            offset: 528,
            source: FixError::MissingFields { len: 28, .. },
        }
    ));
    assert!(matches!(
        warnings[3],
        Warning::Frame(FrameError::Truncated {
            offset: 612,
            needed: 94,
            remaining: 30,
        })
    ));
}

#[test]
fn empty_stream_has_no_warnings() {
    let result = process("empty.ubz", &gzip(&[])[..]);

    assert!(result.samples.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.summary(REGIONS).is_none());
}

#[test]
fn corrupt_archive_is_empty_with_warning() {
    let data = Pvt::default().frame();

    let result = process("plain.ubx", &data[..]);

    assert!(result.samples.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(result.warnings[0], Warning::Stream(_)));
}

#[test]
fn concatenated_members_are_all_read() {
    let mut data = gzip(&Pvt::default().at_second(40).frame());
    data.extend(gzip(&Pvt::default().at_second(41).frame()));

    let result = process("joined.ubz", &data[..]);

    assert!(result.warnings.is_empty());
    let seconds: Vec<_> = result.samples.iter().map(|s| s.timestamp.second()).collect();
    assert_eq!(seconds, [40, 41]);
}

#[test]
fn truncated_archive_keeps_no_samples() {
    let mut data = Vec::new();
    for second in 40..50 {
        data.extend(Pvt::default().at_second(second).frame());
    }
    let compressed = gzip(&data);

    let result = process("cut.ubz", &compressed[..compressed.len() / 2]);

    assert!(result.samples.is_empty());
    assert!(matches!(result.warnings[..], [Warning::Stream(_)]));
}

#[test]
fn invalid_month_keeps_other_samples_in_order() {
    let mut data = Vec::new();
    data.extend(Pvt::default().at_second(40).frame());
    data.extend(
        Pvt {
            month: 13,
            ..Pvt::default()
        }
        .at_second(41)
        .frame(),
    );
    data.extend(frame(0x01, 0x03, &[0; 16]));
    data.extend(Pvt::default().at_second(42).frame());

    let result = process("walk.ubz", &gzip(&data)[..]);

    let seconds: Vec<_> = result
        .samples
        .iter()
        .map(|s| s.timestamp.second())
        .collect();
    assert_eq!(seconds, [40, 42]);

    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0],
        Warning::Sample {
            offset: 100,
            source: SampleError::InvalidTimestamp { .. },
        }
    ));
    assert!(result.warnings[0].to_string().starts_with("Skipped fix at offset 100"));
}

#[test]
fn strict_time_skips_unconfirmed_fixes() {
    let mut data = Pvt {
        valid: 0x00,
        ..Pvt::default()
    }
    .frame();
    data.extend(Pvt::default().at_second(41).frame());
    let compressed = gzip(&data);

    let lenient = process("walk.ubz", &compressed[..]);
    assert_eq!(lenient.samples.len(), 2);
    assert!(lenient.warnings.is_empty());

    let options = Options { strict_time: true };
    let strict = process_with(options, "walk.ubz", &compressed[..]);
    assert_eq!(strict.samples.len(), 1);
    assert!(matches!(
        strict.warnings[..],
        [Warning::Sample {
            source: SampleError::UnconfirmedTime,
            ..
        }]
    ));
}

#[test]
fn summarizes_first_and_last_samples() {
    let mut data = Vec::new();
    data.extend(Pvt::default().at_second(40).frame());
    data.extend(
        Pvt {
            minute: 55,
            latitude: 610_000_000,
            longitude: 250_000_000,
            ..Pvt::default()
        }
        .at_second(10)
        .frame(),
    );

    let result = process("walk.ubz", &gzip(&data)[..]);
    let summary = result.summary(REGIONS).unwrap();

    assert_eq!(summary.location, Region::Known("Singapore"));
    assert_eq!(summary.start, result.samples[0].timestamp);
    assert_eq!(summary.duration.num_seconds(), 90);
    assert_eq!(summary.duration_minutes(), 1.5);

    let regions: Vec<_> = result.classified(REGIONS).map(|s| s.region.label()).collect();
    assert_eq!(regions, ["Singapore", "Finland"]);
}

#[test]
fn results_cross_threads() {
    let handles: Vec<_> = (40..44)
        .map(|second| {
            std::thread::spawn(move || {
                let data = gzip(&Pvt::default().at_second(second).frame());
                process(format!("{second}.ubz"), &data[..])
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.samples.len(), 1);
    }
}
