//! Driver for the Maxim DS1307 real-time clock over I2C.
//!
//! Built on the `embedded-hal` 0.2 blocking I2C traits. The chip keeps a
//! BCD calendar in seven registers, has an oscillator halt bit and 56 bytes
//! of battery-backed RAM. It has no alarms and no sub-second resolution.
//!
//! ```ignore
//! let mut rtc = Ds1307::new(i2c)?;
//! rtc.set_time(&DateTime::from_ymd(2024, 3, 15).with_hms(13, 45, 30))?;
//! let now = rtc.get_time()?;
//! ```
#![cfg_attr(not(test), no_std)]

pub mod codec;
mod config;
mod ds1307;
mod error;
mod rtc;
mod time;

pub use config::{Config, SetTimeMode};
pub use ds1307::{BitFlags, Ds1307, Register, ADDR, NVRAM_LEN};
pub use error::Error;
pub use rtc::Rtc;
pub use time::{DateTime, Duration};
