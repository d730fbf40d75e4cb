#![cfg_attr(not(any(test, feature = "fake")), no_std)]
#![allow(clippy::missing_safety_doc)]

pub mod acquisition;
pub mod adc;
pub mod board;
pub mod buffers;
pub mod channel;
pub mod config;
pub mod control;
pub mod error;
pub mod hal;
pub mod io;
pub mod stats;
pub mod units;

#[cfg(all(feature = "real", not(feature = "fake"), not(test)))]
mod panic;

pub use acquisition::{Acquisition, Engine, Session, Shared};
pub use channel::Channel;
pub use control::Control;
pub use error::{Error, InitError};

#[cfg(feature = "real")]
#[no_mangle]
pub extern "C" fn user_main() -> ! {
    use crate::{
        board::real::RealBoard,
        config::TRANSPORT_TIMEOUT,
        io::{real::UartTransport, DebugOut},
    };
    use core::convert::Infallible;

    io::real::init_logger(log::LevelFilter::Info);
    log::info!("Enter user code");

    let (Some(shared), Some(debug_buffer), Some(adc)) = (
        buffers::ACQ_STATE.take(),
        buffers::DEBUG_BUFFER.take(),
        adc::real::handle(),
    ) else {
        log::error!("Acquisition resources are already taken");
        hal::fatal()
    };

    let acq = match Engine::new(adc, shared).initialize() {
        Ok(acq) => acq,
        Err(err) => {
            log::error!("Acquisition init failed: {}", err);
            hal::fatal()
        }
    };

    let mut control = Control::new(
        acq,
        RealBoard::new(),
        UartTransport::new(Some(TRANSPORT_TIMEOUT)),
        DebugOut::new(debug_buffer),
    );
    let never = control.run_or_halt(|err| -> Infallible {
        log::error!("Fatal: {}", err);
        hal::fatal()
    });
    match never {}
}
