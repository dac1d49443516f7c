use crate::ds1307::ADDR;

/// What [`set_time`](crate::Ds1307::set_time) does with the clock-halt bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetTimeMode {
    /// Write the seven time registers in one transfer. The written seconds
    /// byte has the halt bit clear, so a stopped oscillator starts again.
    Direct,
    /// Halt the oscillator first, then write the time registers. Counting
    /// resumes from exactly the written value. If the time write fails the
    /// original seconds byte is written back, restoring the halt bit.
    HaltFirst,
}

impl Default for SetTimeMode {
    fn default() -> Self {
        SetTimeMode::Direct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit bus address.
    pub address: u8,
    pub set_time_mode: SetTimeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: ADDR,
            set_time_mode: SetTimeMode::default(),
        }
    }
}
