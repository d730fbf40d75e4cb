use crate::{channel::Channel, hal::RetCode};
use derive_more::{Display, From};

/// Hardware configuration step of the acquisition bring-up.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum InitStep {
    #[display(fmt = "DMA setup")]
    Dma,
    #[display(fmt = "ADC init")]
    Adc,
    #[display(fmt = "channel {} config", _0)]
    Channel(Channel),
    #[display(fmt = "calibration")]
    Calibration,
    #[display(fmt = "transfer start")]
    Start,
}

/// Acquisition engine could not be brought up.
///
/// There is no degraded mode, the caller is expected to halt.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display(fmt = "{} rejected: {}", step, code)]
pub struct InitError {
    pub step: InitStep,
    pub code: RetCode,
}

/// Fault reported by the converter or transfer interrupt while running.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TransferFault {
    /// Converter produced data faster than it was transferred.
    #[display(fmt = "overrun")]
    Overrun = 1,
    #[display(fmt = "DMA transfer error")]
    Dma = 2,
    #[display(fmt = "internal ADC error")]
    Internal = 3,
}

impl TransferFault {
    const ADC_ERROR_OVR: u32 = 0x02;
    const ADC_ERROR_DMA: u32 = 0x04;

    /// Decode the converter's error code.
    pub fn from_error_code(code: u32) -> Self {
        if code & Self::ADC_ERROR_OVR != 0 {
            TransferFault::Overrun
        } else if code & Self::ADC_ERROR_DMA != 0 {
            TransferFault::Dma
        } else {
            TransferFault::Internal
        }
    }

    pub(crate) fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(TransferFault::Overrun),
            2 => Some(TransferFault::Dma),
            3 => Some(TransferFault::Internal),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TransportError {
    #[display(fmt = "transport timed out")]
    TimedOut,
    #[display(fmt = "transport failure")]
    Failure,
}

impl From<RetCode> for TransportError {
    fn from(code: RetCode) -> Self {
        match code {
            RetCode::TimedOut => TransportError::TimedOut,
            _ => TransportError::Failure,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, From)]
pub enum Error {
    Init(InitError),
    Transfer(TransferFault),
    Transport(TransportError),
    #[from(ignore)]
    #[display(fmt = "display: {}", _0)]
    Display(RetCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_codes() {
        assert_eq!(TransferFault::from_error_code(0x02), TransferFault::Overrun);
        assert_eq!(TransferFault::from_error_code(0x06), TransferFault::Overrun);
        assert_eq!(TransferFault::from_error_code(0x04), TransferFault::Dma);
        assert_eq!(TransferFault::from_error_code(0x01), TransferFault::Internal);
        for fault in [TransferFault::Overrun, TransferFault::Dma, TransferFault::Internal] {
            assert_eq!(TransferFault::from_raw(fault as u8), Some(fault));
        }
        assert_eq!(TransferFault::from_raw(0), None);
    }

    #[test]
    fn messages() {
        let err = InitError {
            step: InitStep::Channel(Channel::Vbat),
            code: RetCode::Busy,
        };
        assert_eq!(format!("{}", err), "channel VBAT config rejected: busy");
        assert_eq!(format!("{}", Error::from(err)), "channel VBAT config rejected: busy");
        assert_eq!(format!("{}", Error::from(TransferFault::Overrun)), "overrun");
        assert_eq!(TransportError::from(RetCode::TimedOut), TransportError::TimedOut);
    }
}
