//! Conversion between [`DateTime`] and the seven timekeeping registers.
//!
//! Register image layout, one byte each, all packed BCD:
//! seconds, minutes, hours (24h), weekday, day of month, month, year - 2000.
//! Bit 7 of the seconds byte is the clock-halt flag and never part of the
//! seconds value.
//!
//! Nothing here validates its input. Invalid BCD decodes to garbage and
//! out-of-range fields encode to garbage; callers check ranges first.

use crate::time::DateTime;

/// Number of timekeeping registers.
pub const IMAGE_LEN: usize = 7;

/// First year the year register can represent.
pub const BASE_YEAR: u16 = 2000;

/// Last year the year register can represent. The register holds two BCD
/// digits, so later years would wrap or produce invalid BCD.
pub const MAX_YEAR: u16 = BASE_YEAR + 99;

const CLOCK_HALT: u8 = 0b1000_0000;

pub fn is_encodable_year(year: u16) -> bool {
    (BASE_YEAR..=MAX_YEAR).contains(&year)
}

pub fn decimal_to_packed_bcd(value: u8) -> u8 {
    value.wrapping_add(6u8.wrapping_mul(value / 10))
}

pub fn packed_bcd_to_decimal(bcd: u8) -> u8 {
    bcd.wrapping_sub(6 * (bcd >> 4))
}

pub fn encode(datetime: &DateTime) -> [u8; IMAGE_LEN] {
    let year = datetime.year().wrapping_sub(BASE_YEAR) as u8;
    [
        decimal_to_packed_bcd(datetime.second()) & !CLOCK_HALT,
        decimal_to_packed_bcd(datetime.minute()),
        decimal_to_packed_bcd(datetime.hour()),
        decimal_to_packed_bcd(datetime.weekday()),
        decimal_to_packed_bcd(datetime.day()),
        decimal_to_packed_bcd(datetime.month()),
        decimal_to_packed_bcd(year),
    ]
}

pub fn decode(image: &[u8; IMAGE_LEN]) -> DateTime {
    DateTime::new(
        u16::from(packed_bcd_to_decimal(image[6])) + BASE_YEAR,
        packed_bcd_to_decimal(image[5]),
        packed_bcd_to_decimal(image[4]),
        packed_bcd_to_decimal(image[3]),
        packed_bcd_to_decimal(image[2]),
        packed_bcd_to_decimal(image[1]),
        packed_bcd_to_decimal(image[0] & !CLOCK_HALT),
    )
}
