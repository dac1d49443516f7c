use crate::time::DateTime;

/// Operations shared by real-time clock chips.
///
/// Chips without alarm hardware set `HAS_ALARM` to `false` and fail the
/// alarm methods with an error instead of ignoring them.
pub trait Rtc {
    type Error;

    const HAS_ALARM: bool;

    fn get_time(&mut self) -> Result<DateTime, Self::Error>;

    fn set_time(&mut self, datetime: &DateTime) -> Result<(), Self::Error>;

    fn get_alarm(&mut self) -> Result<DateTime, Self::Error>;

    fn set_alarm(&mut self, alarm: &DateTime) -> Result<(), Self::Error>;
}
