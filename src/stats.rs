use crate::{channel::Channel, config::CHANNEL_COUNT, error::TransferFault, units::Uv};
use core::{
    fmt::{self, Display, Formatter, Write},
    sync::atomic::{fence, AtomicU32, Ordering},
};
use indenter::indented;

/// Counters updated from interrupt context.
#[derive(Default)]
pub struct Statistics {
    /// Number of completed scans.
    scan_count: AtomicU32,
    overrun_count: AtomicU32,
    dma_error_count: AtomicU32,
    internal_error_count: AtomicU32,
}

impl Statistics {
    pub const fn new() -> Self {
        Self {
            scan_count: AtomicU32::new(0),
            overrun_count: AtomicU32::new(0),
            dma_error_count: AtomicU32::new(0),
            internal_error_count: AtomicU32::new(0),
        }
    }

    /// Publishes the slots written before the call.
    pub(crate) fn report_scan(&self) {
        self.scan_count.fetch_add(1, Ordering::Release);
    }
    pub(crate) fn report_fault(&self, fault: TransferFault) {
        self.fault_counter(fault).fetch_add(1, Ordering::AcqRel);
    }

    pub fn scan_count(&self) -> u32 {
        self.scan_count.load(Ordering::Acquire)
    }
    pub fn fault_count(&self, fault: TransferFault) -> u32 {
        self.fault_counter(fault).load(Ordering::Acquire)
    }

    fn fault_counter(&self, fault: TransferFault) -> &AtomicU32 {
        match fault {
            TransferFault::Overrun => &self.overrun_count,
            TransferFault::Dma => &self.dma_error_count,
            TransferFault::Internal => &self.internal_error_count,
        }
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fence(Ordering::Acquire);
        writeln!(f, "scan_count: {}", self.scan_count.load(Ordering::Relaxed))?;
        writeln!(f, "overrun_count: {}", self.overrun_count.load(Ordering::Relaxed))?;
        writeln!(f, "dma_error_count: {}", self.dma_error_count.load(Ordering::Relaxed))?;
        writeln!(
            f,
            "internal_error_count: {}",
            self.internal_error_count.load(Ordering::Relaxed)
        )?;
        Ok(())
    }
}

/// Converted values seen by the foreground loop.
#[derive(Clone, Copy, Debug)]
pub struct ValueStats {
    sum: i64,
    count: u32,
    last: Uv,
    min: Uv,
    max: Uv,
}

impl Default for ValueStats {
    fn default() -> Self {
        Self {
            sum: 0,
            count: 0,
            last: 0,
            min: Uv::MAX,
            max: Uv::MIN,
        }
    }
}

impl ValueStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
    pub fn update(&mut self, value: Uv) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.last = value;
        self.sum += value as i64;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }
    pub fn last(&self) -> Uv {
        self.last
    }
    pub fn min(&self) -> Option<Uv> {
        (self.count != 0).then_some(self.min)
    }
    pub fn max(&self) -> Option<Uv> {
        (self.count != 0).then_some(self.max)
    }
    pub fn avg(&self) -> Option<Uv> {
        (self.count != 0).then(|| (self.sum / self.count as i64) as Uv)
    }
}

impl Display for ValueStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.min(), self.max(), self.avg()) {
            (Some(min), Some(max), Some(avg)) => {
                writeln!(f, "last: {} uV", self.last)?;
                writeln!(f, "min: {} uV", min)?;
                writeln!(f, "max: {} uV", max)?;
                writeln!(f, "avg: {} uV", avg)?;
            }
            _ => writeln!(f, "no samples")?,
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChannelStats {
    values: [ValueStats; CHANNEL_COUNT],
}

impl ChannelStats {
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(ValueStats::reset);
    }
    pub fn update(&mut self, channel: Channel, value: Uv) {
        self.values[channel.slot()].update(value);
    }
    pub fn get(&self, channel: Channel) -> &ValueStats {
        &self.values[channel.slot()]
    }
}

impl Display for ChannelStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for ch in Channel::ALL {
            writeln!(f, "{}:", ch)?;
            write!(indented(f).with_str("    "), "{}", self.get(ch))?;
        }
        Ok(())
    }
}
