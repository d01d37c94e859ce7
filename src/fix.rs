//! Decoding of `NAV-PVT` position/time fixes.
//!
//! Only the leading fields of the message are decoded. Receivers of different
//! protocol versions append fields to the end of the payload, so anything past
//! what is read here is ignored.

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

use crate::avec::Frame;

/// The `(class, id)` pair of the `NAV-PVT` message.
pub const NAV_PVT: (u8, u8) = (0x01, 0x07);

/// Payload bytes needed to reach the end of the latitude field.
pub const MIN_PAYLOAD_LEN: usize = 32;

/// Payload bytes needed to reach the end of the horizontal accuracy field.
const ALTITUDE_PAYLOAD_LEN: usize = 44;

/// An error decoding a fix payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixError {
    /// The payload ends before the fields of a fix.
    #[error("Payload too short for a position fix ({len} of {required} bytes).")]
    MissingFields { len: usize, required: usize },
}

/// A decoded `NAV-PVT` message.
///
/// Calendar fields are stored as received, and may not form a valid date. See
/// [`crate::sample::normalize`] for validated conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixRecord {
    /// GPS time of week of the navigation epoch, in milliseconds.
    pub time_of_week: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub validity: Validity,
    /// Signed fraction of a second, in nanoseconds.
    pub nano: i32,
    pub fix_type: FixType,
    /// Whether the fix is within the receiver's accuracy masks.
    pub gnss_fix_ok: bool,
    pub satellites: u8,
    /// Longitude, in units of 1e-7 degrees.
    pub longitude: i32,
    /// Latitude, in units of 1e-7 degrees.
    pub latitude: i32,
    /// Height above mean sea level, in millimetres.
    pub height_msl: Option<i32>,
    /// Horizontal accuracy estimate, in millimetres.
    pub horizontal_accuracy: Option<u32>,
}

/// Validity flags of the fix's calendar fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validity {
    pub valid_date: bool,
    pub valid_time: bool,
    /// Whether the time of day is free of sub-second ambiguity.
    pub fully_resolved: bool,
    pub valid_magnetic: bool,
}

impl From<u8> for Validity {
    fn from(r: u8) -> Self {
        bitfield! {
            struct ValidFlags(u8) {
                [0] valid_date,
                [1] valid_time,
                [2] fully_resolved,
                [3] valid_magnetic,
            }
        }

        let flags = ValidFlags(r);

        Self {
            valid_date: flags.valid_date(),
            valid_time: flags.valid_time(),
            fully_resolved: flags.fully_resolved(),
            valid_magnetic: flags.valid_magnetic(),
        }
    }
}

/// The kind of navigation solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixType {
    NoFix,
    DeadReckoning,
    TwoDimensional,
    ThreeDimensional,
    GnssDeadReckoning,
    TimeOnly,
    Reserved(u8),
}

impl From<u8> for FixType {
    fn from(r: u8) -> Self {
        match r {
            0 => Self::NoFix,
            1 => Self::DeadReckoning,
            2 => Self::TwoDimensional,
            3 => Self::ThreeDimensional,
            4 => Self::GnssDeadReckoning,
            5 => Self::TimeOnly,
            r => Self::Reserved(r),
        }
    }
}

/// Decode a fix from a frame.
///
/// Returns `None` for frames of any message type other than `NAV-PVT`.
pub fn decode(frame: &Frame<'_>) -> Option<Result<FixRecord, FixError>> {
    (frame.identity() == NAV_PVT).then(|| FixRecord::from_payload(frame.payload))
}

impl FixRecord {
    /// Decode a fix from a `NAV-PVT` payload.
    pub fn from_payload(r: &[u8]) -> Result<Self, FixError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct PositionTime {
            time_of_week: [u8; 4],
            year: [u8; 2],
            month: u8,
            day: u8,
            hour: u8,
            minute: u8,
            second: u8,
            valid: u8,
            _time_accuracy: [u8; 4],
            nano: [u8; 4],
            fix_type: u8,
            flags: u8,
            _flags2: u8,
            satellites: u8,
            longitude: [u8; 4],
            latitude: [u8; 4],
        }

        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct Altitude {
            _height: [u8; 4],
            height_msl: [u8; 4],
            horizontal_accuracy: [u8; 4],
        }

        bitfield! {
            struct FixFlags(u8) {
                [0] gnss_fix_ok,
            }
        }

        let Some(&head) = r.first_chunk::<MIN_PAYLOAD_LEN>() else {
            return Err(FixError::MissingFields {
                len: r.len(),
                required: MIN_PAYLOAD_LEN,
            });
        };

        let PositionTime {
            time_of_week,
            year,
            month,
            day,
            hour,
            minute,
            second,
            valid,
            nano,
            fix_type,
            flags,
            satellites,
            longitude,
            latitude,
            ..
        } = zerocopy::transmute!(head);

        let altitude = r
            .get(MIN_PAYLOAD_LEN..)
            .and_then(|r| r.first_chunk::<{ ALTITUDE_PAYLOAD_LEN - MIN_PAYLOAD_LEN }>())
            .map(|&tail| {
                let Altitude {
                    height_msl,
                    horizontal_accuracy,
                    ..
                } = zerocopy::transmute!(tail);

                (
                    i32::from_le_bytes(height_msl),
                    u32::from_le_bytes(horizontal_accuracy),
                )
            });

        Ok(Self {
            time_of_week: u32::from_le_bytes(time_of_week),
            year: u16::from_le_bytes(year),
            month,
            day,
            hour,
            minute,
            second,
            validity: Validity::from(valid),
            nano: i32::from_le_bytes(nano),
            fix_type: FixType::from(fix_type),
            gnss_fix_ok: FixFlags(flags).gnss_fix_ok(),
            satellites,
            longitude: i32::from_le_bytes(longitude),
            latitude: i32::from_le_bytes(latitude),
            height_msl: altitude.map(|(h, _)| h),
            horizontal_accuracy: altitude.map(|(_, a)| a),
        })
    }
}
