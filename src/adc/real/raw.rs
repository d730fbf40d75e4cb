use crate::{
    adc::{AdcInput, SampleTime, ScanConfig},
    hal::RetCode,
};

extern "C" {
    /// DMA1 and DMAMUX clocks, DMA1 channel 1 interrupt.
    pub fn acq_hal_dma_init() -> RetCode;
    /// ADC12 clock from SYSCLK, analog pins, DMA1 channel 1 linked to ADC1,
    /// `HAL_ADC_Init` and independent multimode.
    pub fn acq_hal_adc_init(config: *const ScanConfig) -> RetCode;
    pub fn acq_hal_adc_config_channel(input: AdcInput, rank: u32, sampling: SampleTime) -> RetCode;
    pub fn acq_hal_adc_calibrate() -> RetCode;
    pub fn acq_hal_adc_start_dma(buffer: *mut u32, len: u32) -> RetCode;
}
