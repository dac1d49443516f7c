use ufmt::{uDebug, uWrite};

/// All possible errors in this crate.
///
/// `E` is the error type of the underlying I2C bus and is passed through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The bus transfer failed.
    I2C(E),
    /// The identity check at construction failed. No DS1307 answered at the
    /// address, or something else did.
    DeviceNotFound,
    /// Year outside 2000-2099, or an access past the end of the NVRAM.
    Range,
    /// The chip has no such feature (alarms).
    Unsupported,
}

impl<E> uDebug for Error<E> {
    fn fmt<W: ?Sized>(&self, f: &mut ufmt::Formatter<W>) -> Result<(), W::Error>
    where
        W: uWrite,
    {
        match self {
            Error::I2C(_) => f.write_str("I2C"),
            Error::DeviceNotFound => f.write_str("DeviceNotFound"),
            Error::Range => f.write_str("Range"),
            Error::Unsupported => f.write_str("Unsupported"),
        }
    }
}
