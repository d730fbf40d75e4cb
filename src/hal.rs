use core::time::Duration;
use derive_more::Display;

/// Timeout in milliseconds as understood by the board support code.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timeout(pub u32);

impl Timeout {
    pub const WAIT_FOREVER: Self = Self(0xFFFFFFFF);
}

/// Whole milliseconds, saturating at `u32::MAX`.
pub fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl From<Option<Duration>> for Timeout {
    fn from(value: Option<Duration>) -> Self {
        match value {
            // Saturate below the wait-forever marker.
            Some(d) => Self(millis(d).min(u32::MAX - 1)),
            None => Self::WAIT_FOREVER,
        }
    }
}

/// Status returned by the vendor HAL.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RetCode {
    /// Success
    #[display(fmt = "ok")]
    Success = 0x00,
    /// Generic failure
    #[display(fmt = "error")]
    Failure = 0x01,
    /// Peripheral is in use
    #[display(fmt = "busy")]
    Busy = 0x02,
    /// Timeout exceeded
    #[display(fmt = "timeout")]
    TimedOut = 0x03,
}

impl RetCode {
    pub fn into_result(self) -> Result<(), RetCode> {
        if self == RetCode::Success {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(feature = "real")]
extern "C" {
    fn hal_fatal() -> !;
}

/// Halt the system.
#[cfg(feature = "real")]
pub fn fatal() -> ! {
    unsafe { hal_fatal() }
}
