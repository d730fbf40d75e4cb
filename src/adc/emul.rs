extern crate std;

use super::{AdcDma, AdcInput, SampleTime, ScanConfig};
use crate::{
    acquisition::Shared,
    channel::ChannelInfo,
    config::CHANNEL_COUNT,
    error::{InitStep, TransferFault},
    hal::RetCode,
    units::Sample,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
    time::Duration,
    vec::Vec,
};

#[derive(Default)]
struct Recorded {
    dma_enabled: bool,
    config: Option<ScanConfig>,
    channels: Vec<(usize, AdcInput, SampleTime)>,
    calibrated: bool,
    transfer_len: Option<usize>,
}

#[derive(Default)]
struct EmulState {
    recorded: Mutex<Recorded>,
    failure: Mutex<Option<(InitStep, RetCode)>>,
    target: Mutex<Option<&'static Shared>>,
}

/// Emulated converter and transfer controller.
///
/// Samples are written by the owner of the paired [`EmulHandle`].
pub struct EmulAdc {
    state: Arc<EmulState>,
}

/// Test side of [`EmulAdc`]: injects failures, inspects configuration and plays the
/// role of the transfer hardware.
#[derive(Clone)]
pub struct EmulHandle {
    state: Arc<EmulState>,
}

impl EmulAdc {
    pub fn new() -> (Self, EmulHandle) {
        let state = Arc::new(EmulState::default());
        (
            Self {
                state: state.clone(),
            },
            EmulHandle { state },
        )
    }

    fn check(&self, step: InitStep) -> Result<(), RetCode> {
        match *self.state.failure.lock().unwrap() {
            Some((failing, code)) if failing == step => Err(code),
            _ => Ok(()),
        }
    }
    fn record<R>(&self, f: impl FnOnce(&mut Recorded) -> R) -> R {
        f(&mut self.state.recorded.lock().unwrap())
    }
}

impl AdcDma for EmulAdc {
    fn enable_dma(&mut self) -> Result<(), RetCode> {
        self.check(InitStep::Dma)?;
        self.record(|r| r.dma_enabled = true);
        Ok(())
    }
    fn init(&mut self, config: &ScanConfig) -> Result<(), RetCode> {
        self.check(InitStep::Adc)?;
        if !self.record(|r| r.dma_enabled) {
            return Err(RetCode::Failure);
        }
        self.record(|r| r.config = Some(*config));
        Ok(())
    }
    fn configure_channel(&mut self, info: &ChannelInfo) -> Result<(), RetCode> {
        self.check(InitStep::Channel(info.channel))?;
        self.record(|r| match r.config {
            Some(config) if info.rank < config.conversions as usize => {
                r.channels.push((info.rank, info.input, info.sampling));
                Ok(())
            }
            _ => Err(RetCode::Failure),
        })
    }
    fn calibrate(&mut self) -> Result<(), RetCode> {
        self.check(InitStep::Calibration)?;
        self.record(|r| r.calibrated = true);
        Ok(())
    }
    fn start(&mut self, target: &'static Shared) -> Result<(), RetCode> {
        self.check(InitStep::Start)?;
        self.record(|r| r.transfer_len = Some(target.buffer().len()));
        *self.state.target.lock().unwrap() = Some(target);
        Ok(())
    }
}

impl EmulHandle {
    /// Make `step` of the bring-up fail with `code`.
    pub fn fail_at(&self, step: InitStep, code: RetCode) {
        *self.state.failure.lock().unwrap() = Some((step, code));
    }

    pub fn config(&self) -> Option<ScanConfig> {
        self.state.recorded.lock().unwrap().config
    }
    /// Configured `(rank, input, sampling)` in call order.
    pub fn channels(&self) -> Vec<(usize, AdcInput, SampleTime)> {
        self.state.recorded.lock().unwrap().channels.clone()
    }
    pub fn is_calibrated(&self) -> bool {
        self.state.recorded.lock().unwrap().calibrated
    }
    /// Number of words per transfer cycle, `None` until started.
    pub fn transfer_len(&self) -> Option<usize> {
        self.state.recorded.lock().unwrap().transfer_len
    }
    pub fn is_started(&self) -> bool {
        self.state.target.lock().unwrap().is_some()
    }

    fn target(&self) -> &'static Shared {
        (*self.state.target.lock().unwrap()).expect("Transfer is not started")
    }

    /// Write a single transfer word.
    pub fn write_word(&self, slot: usize, word: u32) {
        self.target().buffer().store(slot, word);
    }
    pub fn write_slot(&self, slot: usize, sample: Sample) {
        self.write_word(slot, sample as u32);
    }
    /// Raise the transfer complete interrupt.
    pub fn complete_scan(&self) {
        self.target().on_scan_complete();
    }
    /// Write a whole scan in rank order and complete it.
    pub fn scan(&self, samples: [Sample; CHANNEL_COUNT]) {
        for (slot, sample) in samples.into_iter().enumerate() {
            self.write_slot(slot, sample);
        }
        self.complete_scan();
    }
    /// Raise the error interrupt.
    pub fn fault(&self, fault: TransferFault) -> bool {
        self.target().on_transfer_error(fault)
    }

    /// Produce scans from a background thread until stopped.
    ///
    /// `next` is called with the scan index.
    pub fn spawn_scanner<F>(&self, period: Duration, mut next: F) -> Scanner
    where
        F: FnMut(u32) -> [Sample; CHANNEL_COUNT] + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = self.clone();
        let thread = {
            let stop = stop.clone();
            thread::spawn(move || {
                let mut count = 0;
                while !stop.load(Ordering::Acquire) {
                    handle.scan(next(count));
                    count += 1;
                    if period.is_zero() {
                        thread::yield_now();
                    } else {
                        thread::sleep(period);
                    }
                }
                count
            })
        };
        Scanner {
            stop,
            thread: Some(thread),
        }
    }
}

pub struct Scanner {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<u32>>,
}

impl Scanner {
    /// Stop producing and return the number of scans written.
    pub fn stop(mut self) -> u32 {
        self.join()
    }
    fn join(&mut self) -> u32 {
        self.stop.store(true, Ordering::Release);
        match self.thread.take() {
            Some(thread) => thread.join().unwrap(),
            None => 0,
        }
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        self.join();
    }
}
