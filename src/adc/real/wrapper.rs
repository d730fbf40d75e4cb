use super::raw;
use crate::{
    acquisition::Shared,
    adc::{AdcDma, ScanConfig},
    channel::ChannelInfo,
    error::TransferFault,
    hal::RetCode,
};
use core::{
    ptr,
    sync::atomic::{AtomicBool, AtomicPtr, Ordering},
};

static ADC: GlobalAdc = GlobalAdc::new();

struct GlobalAdc {
    acquired: AtomicBool,
    /// Where interrupts are routed to, null until the transfer is started.
    target: AtomicPtr<Shared>,
}

impl GlobalAdc {
    const fn new() -> Self {
        Self {
            acquired: AtomicBool::new(false),
            target: AtomicPtr::new(ptr::null_mut()),
        }
    }

    fn try_acquire(&self) -> Option<Adc> {
        if !self.acquired.fetch_or(true, Ordering::AcqRel) {
            Some(Adc::new())
        } else {
            None
        }
    }

    fn set_target(&self, target: &'static Shared) {
        self.target
            .store(target as *const Shared as *mut Shared, Ordering::Release);
    }
    fn target(&self) -> Option<&'static Shared> {
        // Only ever set from a `&'static Shared`.
        unsafe { self.target.load(Ordering::Acquire).as_ref() }
    }
}

/// ADC1 with DMA1 channel 1. At most one instance exists.
pub fn handle() -> Option<Adc> {
    ADC.try_acquire()
}

pub struct Adc {
    _unused: [u8; 0],
}

impl Adc {
    fn new() -> Self {
        Self { _unused: [] }
    }
}

impl AdcDma for Adc {
    fn enable_dma(&mut self) -> Result<(), RetCode> {
        unsafe { raw::acq_hal_dma_init() }.into_result()
    }
    fn init(&mut self, config: &ScanConfig) -> Result<(), RetCode> {
        unsafe { raw::acq_hal_adc_init(config as *const _) }.into_result()
    }
    fn configure_channel(&mut self, info: &ChannelInfo) -> Result<(), RetCode> {
        // HAL ranks start from 1.
        unsafe { raw::acq_hal_adc_config_channel(info.input, info.rank as u32 + 1, info.sampling) }
            .into_result()
    }
    fn calibrate(&mut self) -> Result<(), RetCode> {
        unsafe { raw::acq_hal_adc_calibrate() }.into_result()
    }
    fn start(&mut self, target: &'static Shared) -> Result<(), RetCode> {
        ADC.set_target(target);
        let buffer = target.buffer();
        unsafe { raw::acq_hal_adc_start_dma(buffer.as_mut_ptr(), buffer.len() as u32) }.into_result()
    }
}

/// Called from `HAL_ADC_ConvCpltCallback`.
#[no_mangle]
extern "C" fn acq_user_transfer_complete() {
    if let Some(target) = ADC.target() {
        target.on_scan_complete();
    }
}

/// Called from `HAL_ADC_ErrorCallback` with the handle's `ErrorCode`.
#[no_mangle]
extern "C" fn acq_user_transfer_error(code: u32) {
    if let Some(target) = ADC.target() {
        target.on_transfer_error(TransferFault::from_error_code(code));
    }
}
