//! Static table of the sampled analog channels.
//!
//! The converter fills the acquisition buffer in rank order, so each channel's
//! slot is its rank. The table is checked at compile time.

use crate::{
    adc::{AdcInput, SampleTime},
    config::{CHANNEL_COUNT, MICROVOLTS_PER_DIGIT},
    units::{scalar_fits, uv_range, Uv},
};
use core::ops::RangeInclusive;
use derive_more::Display;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Channel {
    /// Potentiometer 1.
    #[display(fmt = "INPUT0")]
    Input0 = 0,
    /// Potentiometer 2.
    #[display(fmt = "INPUT1")]
    Input1 = 1,
    /// Internal temperature sensor.
    #[display(fmt = "TEMP")]
    Temp = 2,
    #[display(fmt = "VBAT")]
    Vbat = 3,
    /// Internal reference voltage.
    #[display(fmt = "VREF")]
    Vref = 4,
}

#[derive(Clone, Copy, Debug)]
pub struct ChannelInfo {
    pub channel: Channel,
    /// Position in the scan sequence.
    pub rank: usize,
    pub input: AdcInput,
    pub sampling: SampleTime,
    /// Microvolts per count.
    pub scalar: Uv,
}

const fn entry(channel: Channel, input: AdcInput, scalar: Uv) -> ChannelInfo {
    ChannelInfo {
        channel,
        rank: channel as usize,
        input,
        sampling: SampleTime::Cycles92_5,
        scalar,
    }
}

const TABLE: [ChannelInfo; CHANNEL_COUNT] = [
    entry(Channel::Input0, AdcInput::In1, MICROVOLTS_PER_DIGIT),
    entry(Channel::Input1, AdcInput::In2, MICROVOLTS_PER_DIGIT),
    entry(Channel::Temp, AdcInput::TempSensor, MICROVOLTS_PER_DIGIT),
    entry(Channel::Vbat, AdcInput::Vbat, MICROVOLTS_PER_DIGIT),
    entry(Channel::Vref, AdcInput::VrefInt, MICROVOLTS_PER_DIGIT),
];

const fn check_table(table: &[ChannelInfo; CHANNEL_COUNT]) {
    let mut i = 0;
    while i < CHANNEL_COUNT {
        let info = &table[i];
        assert!(info.channel as usize == i, "channel is not at its slot");
        assert!(info.rank == i, "rank differs from slot");
        assert!(scalar_fits(info.scalar), "conversion overflows for full scale sample");
        i += 1;
    }
}
const _: () = check_table(&TABLE);

pub static CHANNEL_TABLE: [ChannelInfo; CHANNEL_COUNT] = TABLE;

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Input0,
        Channel::Input1,
        Channel::Temp,
        Channel::Vbat,
        Channel::Vref,
    ];

    pub fn info(self) -> &'static ChannelInfo {
        &CHANNEL_TABLE[self as usize]
    }
    /// Index of the channel's sample in the acquisition buffer.
    pub fn slot(self) -> usize {
        self as usize
    }
    pub fn scalar(self) -> Uv {
        self.info().scalar
    }
    /// Values `read_channel` can return for this channel.
    pub fn uv_range(self) -> RangeInclusive<Uv> {
        uv_range(self.scalar())
    }
}

/// Slot index and conversion scalar of `channel`.
pub fn lookup(channel: Channel) -> (usize, Uv) {
    let info = channel.info();
    (info.rank, info.scalar)
}
