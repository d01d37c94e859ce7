#![allow(dead_code)]

use std::io::Write;

use flate2::{Compression, write::GzEncoder};

/// Build a frame with a correct checksum.
pub fn frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
    let mut body = vec![class, id];
    body.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    body.extend_from_slice(payload);

    let (mut a, mut b) = (0u8, 0u8);
    for byte in &body {
        a = a.wrapping_add(*byte);
        b = b.wrapping_add(a);
    }

    let mut frame = vec![0xb5, 0x62];
    frame.extend_from_slice(&body);
    frame.extend_from_slice(&[a, b]);
    frame
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Fields of a synthetic `NAV-PVT` message.
#[derive(Debug, Clone, Copy)]
pub struct Pvt {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub valid: u8,
    pub nano: i32,
    pub latitude: i32,
    pub longitude: i32,
}

impl Default for Pvt {
    fn default() -> Self {
        Self {
            year: 2025,
            month: 9,
            day: 12,
            hour: 0,
            minute: 53,
            second: 40,
            valid: 0x37,
            nano: 0,
            latitude: 13_000_000,
            longitude: 1_038_200_000,
        }
    }
}

impl Pvt {
    pub fn payload(&self) -> Vec<u8> {
        let mut p = Vec::with_capacity(92);
        p.extend_from_slice(&449_638_000u32.to_le_bytes());
        p.extend_from_slice(&self.year.to_le_bytes());
        p.extend_from_slice(&[
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.valid,
        ]);
        p.extend_from_slice(&30u32.to_le_bytes());
        p.extend_from_slice(&self.nano.to_le_bytes());
        p.extend_from_slice(&[3, 0x01, 0xea, 12]);
        p.extend_from_slice(&self.longitude.to_le_bytes());
        p.extend_from_slice(&self.latitude.to_le_bytes());
        p.extend_from_slice(&20_000i32.to_le_bytes());
        p.extend_from_slice(&15_000i32.to_le_bytes());
        p.extend_from_slice(&2_500u32.to_le_bytes());
        p.resize(92, 0);
        p
    }

    pub fn frame(&self) -> Vec<u8> {
        frame(0x01, 0x07, &self.payload())
    }

    pub fn at_second(self, second: u8) -> Self {
        Self { second, ..self }
    }
}
