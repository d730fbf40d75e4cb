//! Converter and transfer hardware behind the acquisition engine.

#[cfg(feature = "real")]
pub mod real;

#[cfg(feature = "fake")]
pub mod emul;

use crate::{
    acquisition::Shared,
    channel::ChannelInfo,
    config::{CHANNEL_COUNT, RESOLUTION_BITS},
    hal::RetCode,
};

/// Hardware input selected for a scan rank.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdcInput {
    In1 = 1,
    In2 = 2,
    TempSensor = 16,
    Vbat = 17,
    VrefInt = 18,
}

/// Sampling time in converter clock cycles.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SampleTime {
    Cycles2_5 = 0,
    Cycles6_5 = 1,
    Cycles12_5 = 2,
    Cycles24_5 = 3,
    Cycles47_5 = 4,
    Cycles92_5 = 5,
    Cycles247_5 = 6,
    Cycles640_5 = 7,
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClockPrescaler {
    SyncPclkDiv1 = 1,
    SyncPclkDiv2 = 2,
    SyncPclkDiv4 = 4,
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    Software = 0,
    Tim3Trgo = 1,
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TriggerEdge {
    None = 0,
    Rising = 1,
    Falling = 2,
    Both = 3,
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverrunPolicy {
    /// Keep the unread value and raise the error interrupt.
    Preserve = 0,
    Overwrite = 1,
}

/// Converter setup for one scan of every configured channel per trigger.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanConfig {
    pub prescaler: ClockPrescaler,
    pub resolution_bits: u32,
    pub trigger: Trigger,
    pub edge: TriggerEdge,
    /// Conversions per scan.
    pub conversions: u32,
    pub overrun: OverrunPolicy,
    /// Keep issuing transfer requests after the last entry and wrap around.
    pub circular: bool,
}

impl ScanConfig {
    pub const DEFAULT: Self = Self {
        prescaler: ClockPrescaler::SyncPclkDiv4,
        resolution_bits: RESOLUTION_BITS,
        trigger: Trigger::Tim3Trgo,
        edge: TriggerEdge::Rising,
        conversions: CHANNEL_COUNT as u32,
        overrun: OverrunPolicy::Preserve,
        circular: true,
    };
}

/// Steps needed to bring up triggered scanning with circular transfer.
///
/// Each call maps onto one vendor HAL configuration call and reports its status.
pub trait AdcDma {
    /// Enable the transfer controller and its interrupt.
    fn enable_dma(&mut self) -> Result<(), RetCode>;
    /// Initialize the converter in independent mode.
    fn init(&mut self, config: &ScanConfig) -> Result<(), RetCode>;
    fn configure_channel(&mut self, info: &ChannelInfo) -> Result<(), RetCode>;
    fn calibrate(&mut self) -> Result<(), RetCode>;
    /// Arm the circular transfer into the buffer of `target` and start conversions.
    ///
    /// Transfer complete and error interrupts must reach `target` from now on.
    fn start(&mut self, target: &'static Shared) -> Result<(), RetCode>;
}
