//! Helper for computing frame checksums.

/// Accumulate a slice of bytes into a checksum value.
///
/// The checksum is the 8-bit Fletcher algorithm used by UBX: two running sums
/// `[ck_a, ck_b]`, both wrapping at 256. Start from `[0, 0]`.
pub fn compute_checksum(init: [u8; 2], r: &[u8]) -> [u8; 2] {
    r.iter().fold(init, |acc, b| checksum_byte(acc, *b))
}

/// Accumulate a single byte into a checksum value.
fn checksum_byte([a, b]: [u8; 2], byte: u8) -> [u8; 2] {
    let a = a.wrapping_add(byte);
    let b = b.wrapping_add(a);

    [a, b]
}
