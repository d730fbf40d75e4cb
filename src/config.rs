use crate::units::Uv;
use core::time::Duration;

/// Number of analog channels in one scan.
pub const CHANNEL_COUNT: usize = 5;

pub const RESOLUTION_BITS: u32 = 12;

/// 3.3 V reference over 4096 counts. Same for every channel.
pub const MICROVOLTS_PER_DIGIT: Uv = 805;

/// Period of the TIM3 TRGO event starting each scan.
pub const SCAN_PERIOD: Duration = Duration::from_millis(1);

pub const LOOP_PERIOD: Duration = Duration::from_millis(25);
/// Pause after each LED toggle in the test pattern.
pub const LED_STEP_DELAY: Duration = Duration::from_millis(25);

/// Display counter wraps at this value.
pub const COUNTER_MODULO: u8 = 100;

/// Print statistics every this many loop iterations (~10 s).
pub const STATS_PERIOD_TICKS: u32 = 400;

pub const DEBUG_BUFFER_LEN: usize = 1024;
/// Upper bound of bytes sent to the transport per loop iteration.
pub const DEBUG_FLUSH_MAX: usize = 128;
pub const TRANSPORT_TIMEOUT: Duration = Duration::from_millis(20);
