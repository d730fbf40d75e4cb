//! Continuous multi-channel acquisition.
//!
//! Once started, the converter scans every channel on each timer trigger and the
//! transfer controller writes the results into [`ScanBuffer`] in a circular
//! fashion. Software never touches individual samples on the write side; the
//! interrupt glue only counts completed scans and records faults.
//!
//! Reads go straight to the buffer without locking. A value is always from the
//! last completed scan or from the scan in flight. Different channels read one
//! after another may come from different scans.

use crate::{
    adc::{AdcDma, ScanConfig},
    buffers::ScanBuffer,
    channel::{lookup, Channel, CHANNEL_TABLE},
    config::{CHANNEL_COUNT, SCAN_PERIOD},
    error::{InitError, InitStep, TransferFault},
    hal::RetCode,
    stats::Statistics,
    units::{sample_from_word, to_uv, Sample, Uv},
};
use core::sync::atomic::{AtomicU8, Ordering};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Session {
    Uninitialized = 0,
    /// Converter and channels are set up, transfer is not armed.
    Configured = 1,
    Running = 2,
    /// Transfer fault occurred. Terminal.
    Faulted = 3,
}

impl Session {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Session::Uninitialized,
            1 => Session::Configured,
            2 => Session::Running,
            _ => Session::Faulted,
        }
    }
}

/// State shared between the interrupt glue and the foreground.
///
/// Samples are only reachable through a started [`Acquisition`]:
///
/// ```compile_fail
/// let shared = acquire::Shared::new();
/// let _ = shared.buffer();
/// ```
///
/// Scans and faults are only reported by the interrupt glue:
///
/// ```compile_fail
/// let shared = acquire::Shared::new();
/// shared.on_scan_complete();
/// ```
pub struct Shared {
    buffer: ScanBuffer,
    stats: Statistics,
    session: AtomicU8,
    /// First transfer fault, `0` if none.
    fault: AtomicU8,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            buffer: ScanBuffer::new(),
            stats: Statistics::new(),
            session: AtomicU8::new(Session::Uninitialized as u8),
            fault: AtomicU8::new(0),
        }
    }

    pub(crate) fn buffer(&self) -> &ScanBuffer {
        &self.buffer
    }
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn session(&self) -> Session {
        Session::from_raw(self.session.load(Ordering::Acquire))
    }
    fn set_session(&self, session: Session) {
        self.session.store(session as u8, Ordering::Release);
    }

    pub fn fault(&self) -> Option<TransferFault> {
        TransferFault::from_raw(self.fault.load(Ordering::Acquire))
    }

    /// Transfer complete interrupt.
    pub(crate) fn on_scan_complete(&self) {
        self.stats.report_scan();
    }

    /// Transfer error interrupt.
    ///
    /// Only the first fault is kept. Returns `true` if this call recorded it.
    pub(crate) fn on_transfer_error(&self, fault: TransferFault) -> bool {
        self.stats.report_fault(fault);
        if self
            .fault
            .compare_exchange(0, fault as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.set_session(Session::Faulted);
            true
        } else {
            false
        }
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

/// Acquisition hardware that has not been started yet.
pub struct Engine<A: AdcDma> {
    adc: A,
    shared: &'static Shared,
}

impl<A: AdcDma> Engine<A> {
    pub fn new(adc: A, shared: &'static Shared) -> Self {
        Self { adc, shared }
    }

    pub fn session(&self) -> Session {
        self.shared.session()
    }

    fn step<F>(&mut self, step: InitStep, f: F) -> Result<(), InitError>
    where
        F: FnOnce(&mut A) -> Result<(), RetCode>,
    {
        log::debug!("Acquisition init: {}", step);
        f(&mut self.adc).map_err(|code| {
            log::error!("Acquisition init: {} rejected: {}", step, code);
            InitError { step, code }
        })
    }

    /// Configure scanning over the channel table and start the circular transfer.
    ///
    /// Any rejected step is returned as is. A partially configured converter
    /// cannot be run, so the caller should halt.
    pub fn initialize(mut self) -> Result<Acquisition<A>, InitError> {
        let config = ScanConfig::DEFAULT;

        self.step(InitStep::Dma, |adc| adc.enable_dma())?;
        self.step(InitStep::Adc, |adc| adc.init(&config))?;
        for info in CHANNEL_TABLE.iter() {
            self.step(InitStep::Channel(info.channel), |adc| adc.configure_channel(info))?;
        }
        self.step(InitStep::Calibration, |adc| adc.calibrate())?;
        self.shared.set_session(Session::Configured);

        let shared = self.shared;
        self.step(InitStep::Start, |adc| adc.start(shared))?;
        self.shared.set_session(Session::Running);
        log::info!(
            "Acquisition running, {} channels every {:?}",
            CHANNEL_COUNT,
            SCAN_PERIOD
        );

        Ok(Acquisition {
            _adc: self.adc,
            shared: self.shared,
        })
    }
}

/// Running acquisition. The only way to read samples.
pub struct Acquisition<A: AdcDma> {
    _adc: A,
    shared: &'static Shared,
}

impl<A: AdcDma> Acquisition<A> {
    /// Latest raw sample of `channel`.
    pub fn read_channel_raw(&self, channel: Channel) -> Sample {
        let (slot, _) = lookup(channel);
        sample_from_word(self.shared.buffer.load(slot))
    }

    /// Latest sample of `channel` in microvolts.
    pub fn read_channel(&self, channel: Channel) -> Uv {
        let (slot, scalar) = lookup(channel);
        to_uv(sample_from_word(self.shared.buffer.load(slot)), scalar)
    }

    /// Raw samples of every channel, read slot by slot.
    ///
    /// Not a consistent snapshot, see the module docs.
    pub fn read_all_raw(&self) -> [Sample; CHANNEL_COUNT] {
        Channel::ALL.map(|ch| self.read_channel_raw(ch))
    }

    pub fn session(&self) -> Session {
        self.shared.session()
    }

    /// Fails once a transfer fault has been reported. Values read after that
    /// must not be trusted.
    pub fn check(&self) -> Result<(), TransferFault> {
        match self.shared.fault() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    pub fn scan_count(&self) -> u32 {
        self.shared.stats.scan_count()
    }
    pub fn statistics(&self) -> &Statistics {
        &self.shared.stats
    }
}
