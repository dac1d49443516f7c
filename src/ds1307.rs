use crate::codec::{self, IMAGE_LEN};
use crate::config::{Config, SetTimeMode};
use crate::error::Error;
use crate::rtc::Rtc;
use crate::time::DateTime;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use log::{debug, trace, warn};

pub struct Register;
impl Register {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DOW: u8 = 0x03;
    pub const DOM: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const SQWOUT: u8 = 0x07;
    pub const RAM_BEGIN: u8 = 0x08;
    pub const RAM_END: u8 = 0x3F;
}

pub struct BitFlags;
impl BitFlags {
    pub const CH: u8 = 0b1000_0000;
    pub const SQWE: u8 = 0b0001_0000;
    pub const OUTLEVEL: u8 = 0b1000_0000;
    pub const OUTRATERS0: u8 = 0b0000_0001;
    pub const OUTRATERS1: u8 = 0b0000_0010;
}

pub const ADDR: u8 = 0b110_1000;

/// Size of the battery-backed scratch memory in bytes.
pub const NVRAM_LEN: usize = (Register::RAM_END - Register::RAM_BEGIN + 1) as usize;

// bits of the control register that read back as 1 on a DS1307
const IDENTITY_PATTERN: u8 = BitFlags::OUTRATERS1 | BitFlags::OUTRATERS0;

// register pointer plus the whole register file
const MAX_PAYLOAD: usize = 1 + Register::RAM_END as usize + 1;

/// DS1307 driver.
///
/// Every method performs complete I2C transactions and holds nothing
/// between calls, so `I2C` may be a proxy onto a bus shared with other
/// devices. Flag updates are read-modify-write over two transactions and
/// are not atomic against other writers of the same register.
pub struct Ds1307<I2C> {
    i2c: I2C,
    address: u8,
    set_time_mode: SetTimeMode,
}

impl<I2C, E> Ds1307<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Bind to a DS1307 at the default address and check that it is there.
    pub fn new(i2c: I2C) -> Result<Self, Error<E>> {
        Self::new_with_config(i2c, Config::default())
    }

    /// Fails with [`Error::DeviceNotFound`] if the control register does not
    /// carry the DS1307 identity bits, or if the read itself fails.
    pub fn new_with_config(i2c: I2C, config: Config) -> Result<Self, Error<E>> {
        let mut rtc = Self {
            i2c,
            address: config.address,
            set_time_mode: config.set_time_mode,
        };
        rtc.verify_identity()?;
        Ok(rtc)
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    fn verify_identity(&mut self) -> Result<(), Error<E>> {
        let control = match self.read_register(Register::SQWOUT) {
            Ok(control) => control,
            Err(_) => {
                warn!("ds1307: no answer at {:#04x}", self.address);
                return Err(Error::DeviceNotFound);
            }
        };
        if control & IDENTITY_PATTERN != IDENTITY_PATTERN {
            warn!(
                "ds1307: unexpected control register {:#04x} at {:#04x}",
                control, self.address
            );
            return Err(Error::DeviceNotFound);
        }
        debug!("ds1307: found at {:#04x}", self.address);
        Ok(())
    }

    /// Read the current date and time.
    ///
    /// The weekday is the raw register value as last written. It is not
    /// derived from the date.
    pub fn get_time(&mut self) -> Result<DateTime, Error<E>> {
        let mut image = [0; IMAGE_LEN];
        self.read_registers(Register::SECONDS, &mut image)?;
        Ok(codec::decode(&image))
    }

    /// Write the date and time. The handling of the clock-halt bit follows
    /// the configured [`SetTimeMode`].
    pub fn set_time(&mut self, datetime: &DateTime) -> Result<(), Error<E>> {
        if !codec::is_encodable_year(datetime.year()) {
            return Err(Error::Range);
        }
        let halted_from = if self.set_time_mode == SetTimeMode::HaltFirst {
            let seconds = self.read_register(Register::SECONDS)?;
            self.write_register(Register::SECONDS, seconds | BitFlags::CH)?;
            Some(seconds)
        } else {
            None
        };
        let image = codec::encode(datetime);
        let result = self.write_registers(Register::SECONDS, &image);
        if let (Err(_), Some(seconds)) = (&result, halted_from) {
            // put the halt bit back the way it was, the write error is what gets reported
            if self.write_register(Register::SECONDS, seconds).is_err() {
                warn!("ds1307: oscillator left halted after failed time write");
            }
        }
        result
    }

    /// Current time as seconds since the Unix epoch.
    ///
    /// Fails with [`Error::Range`] if the registers hold an impossible date.
    pub fn get_epoch_seconds(&mut self) -> Result<i64, Error<E>> {
        self.get_time()?.to_epoch_seconds().ok_or(Error::Range)
    }

    pub fn set_epoch_seconds(&mut self, seconds: i64) -> Result<(), Error<E>> {
        let datetime = DateTime::from_epoch_seconds(seconds).ok_or(Error::Range)?;
        self.set_time(&datetime)
    }

    pub fn is_oscillator_enabled(&mut self) -> Result<bool, Error<E>> {
        Ok(!self.read_flag(Register::SECONDS, BitFlags::CH)?)
    }

    /// Start or halt the oscillator. The seconds value is left as it is.
    pub fn set_oscillator_enabled(&mut self, enabled: bool) -> Result<(), Error<E>> {
        self.write_flag(Register::SECONDS, BitFlags::CH, !enabled)
    }

    /// Fill `buffer` from NVRAM starting at `offset`.
    pub fn read_memory(&mut self, offset: u8, buffer: &mut [u8]) -> Result<(), Error<E>> {
        let register = nvram_register(offset, buffer.len()).ok_or(Error::Range)?;
        if buffer.is_empty() {
            return Ok(());
        }
        self.read_registers(register, buffer)
    }

    /// Store `data` in NVRAM starting at `offset`.
    pub fn write_memory(&mut self, offset: u8, data: &[u8]) -> Result<(), Error<E>> {
        let register = nvram_register(offset, data.len()).ok_or(Error::Range)?;
        if data.is_empty() {
            return Ok(());
        }
        self.write_registers(register, data)
    }

    /// The DS1307 has no alarm, this always fails with [`Error::Unsupported`].
    pub fn get_alarm(&mut self) -> Result<DateTime, Error<E>> {
        Err(Error::Unsupported)
    }

    /// The DS1307 has no alarm, this always fails with [`Error::Unsupported`].
    pub fn set_alarm(&mut self, _alarm: &DateTime) -> Result<(), Error<E>> {
        Err(Error::Unsupported)
    }

    pub fn read_flag(&mut self, register: u8, bitmask: u8) -> Result<bool, Error<E>> {
        let data = self.read_register(register)?;
        Ok((data & bitmask) != 0)
    }

    pub fn write_flag(&mut self, register: u8, bitmask: u8, value: bool) -> Result<(), Error<E>> {
        let data = self.read_register(register)?;
        let data = if value {
            data | bitmask
        } else {
            data & !bitmask
        };
        self.write_register(register, data)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut data = [0];
        self.read_registers(register, &mut data)?;
        Ok(data[0])
    }

    pub fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Error<E>> {
        trace!("ds1307: read {} at {:#04x}", buffer.len(), register);
        self.i2c
            .write_read(self.address, &[register], buffer)
            .map_err(Error::I2C)
    }

    pub fn write_register(&mut self, register: u8, data: u8) -> Result<(), Error<E>> {
        self.write_registers(register, &[data])
    }

    /// Write consecutive registers in a single transfer.
    ///
    /// Fails with [`Error::Range`] if `data` is longer than the register file.
    pub fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), Error<E>> {
        if data.len() >= MAX_PAYLOAD {
            return Err(Error::Range);
        }
        let mut payload = [0; MAX_PAYLOAD];
        payload[0] = register;
        payload[1..=data.len()].copy_from_slice(data);
        trace!("ds1307: write {} at {:#04x}", data.len(), register);
        self.i2c
            .write(self.address, &payload[..=data.len()])
            .map_err(Error::I2C)
    }
}

impl<I2C, E> Rtc for Ds1307<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    type Error = Error<E>;

    const HAS_ALARM: bool = false;

    fn get_time(&mut self) -> Result<DateTime, Self::Error> {
        Ds1307::get_time(self)
    }

    fn set_time(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        Ds1307::set_time(self, datetime)
    }

    fn get_alarm(&mut self) -> Result<DateTime, Self::Error> {
        Ds1307::get_alarm(self)
    }

    fn set_alarm(&mut self, alarm: &DateTime) -> Result<(), Self::Error> {
        Ds1307::set_alarm(self, alarm)
    }
}

fn nvram_register(offset: u8, len: usize) -> Option<u8> {
    if usize::from(offset) + len > NVRAM_LEN {
        None
    } else {
        Some(Register::RAM_BEGIN + offset)
    }
}
