use core::convert::TryFrom;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use ufmt::{uDebug, uDisplay, uWrite, uwrite};

/// Calendar date and time as kept by the clock.
///
/// `weekday` is carried as an opaque 0-6 counter. The chip never checks it
/// against the date, so it holds whatever was last written.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    weekday: u8,
}

impl DateTime {
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        weekday: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
        }
    }

    /// Midnight on the given date, weekday 0.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    pub fn with_hms(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    pub fn with_weekday(mut self, weekday: u8) -> Self {
        self.weekday = weekday;
        self
    }

    pub fn year(&self) -> u16 {
        self.year
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn day(&self) -> u8 {
        self.day
    }
    pub fn weekday(&self) -> u8 {
        self.weekday
    }
    pub fn hour(&self) -> u8 {
        self.hour
    }
    pub fn minute(&self) -> u8 {
        self.minute
    }
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Seconds since 1970-01-01T00:00:00 UTC.
    ///
    /// The weekday field is ignored. Returns `None` if the fields do not
    /// name a real calendar date or time of day.
    pub fn to_epoch_seconds(&self) -> Option<i64> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?;
        let time = NaiveTime::from_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )?;
        Some(NaiveDateTime::new(date, time).and_utc().timestamp())
    }

    /// Inverse of [`DateTime::to_epoch_seconds`].
    ///
    /// The weekday is computed from the date with Monday as 0. It can
    /// disagree with the weekday register of a chip that was set with a
    /// different numbering; the two are never reconciled.
    pub fn from_epoch_seconds(seconds: i64) -> Option<Self> {
        let datetime = chrono::DateTime::from_timestamp(seconds, 0)?.naive_utc();
        Some(Self {
            year: u16::try_from(datetime.year()).ok()?,
            month: datetime.month() as u8,
            day: datetime.day() as u8,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
            second: datetime.second() as u8,
            weekday: datetime.weekday().num_days_from_monday() as u8,
        })
    }

    pub fn add_duration(self, dur: Duration) -> Option<Self> {
        let seconds = self.to_epoch_seconds()?.checked_add(dur.0)?;
        Self::from_epoch_seconds(seconds)
    }

    pub fn since(&self, other: &DateTime) -> Option<Duration> {
        Some(Duration(
            self.to_epoch_seconds()? - other.to_epoch_seconds()?,
        ))
    }
}

fn write_two_digits<W: ?Sized>(f: &mut ufmt::Formatter<W>, value: u8) -> Result<(), W::Error>
where
    W: uWrite,
{
    if value < 10 {
        f.write_str("0")?;
    }
    uwrite!(f, "{}", value)
}

impl uDisplay for DateTime {
    fn fmt<W: ?Sized>(&self, f: &mut ufmt::Formatter<W>) -> Result<(), W::Error>
    where
        W: uWrite,
    {
        uwrite!(f, "{}-", self.year)?;
        write_two_digits(f, self.month)?;
        f.write_str("-")?;
        write_two_digits(f, self.day)?;
        f.write_str(" ")?;
        write_two_digits(f, self.hour)?;
        f.write_str(":")?;
        write_two_digits(f, self.minute)?;
        f.write_str(":")?;
        write_two_digits(f, self.second)
    }
}

impl uDebug for DateTime {
    fn fmt<W: ?Sized>(&self, f: &mut ufmt::Formatter<W>) -> Result<(), W::Error>
    where
        W: uWrite,
    {
        uwrite!(f, "{} (weekday {})", self, self.weekday)
    }
}

/// Signed span of whole seconds.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Duration(pub i64);

impl Duration {
    pub fn seconds(&self) -> i64 {
        self.0
    }
    pub fn minutes(&self) -> i64 {
        self.0 / 60
    }
    pub fn hours(&self) -> i64 {
        self.0 / 3600
    }
}

impl uDebug for Duration {
    fn fmt<W: ?Sized>(&self, f: &mut ufmt::Formatter<W>) -> Result<(), W::Error>
    where
        W: uWrite,
    {
        uwrite!(f, "{}s", self.0)
    }
}
