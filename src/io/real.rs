use super::Transport;
use crate::{
    config::TRANSPORT_TIMEOUT,
    error::TransportError,
    hal::{RetCode, Timeout},
};
use core::{
    fmt::{self, Write},
    time::Duration,
};
use log::{LevelFilter, Log, Metadata, Record};

extern "C" {
    fn uart_send_data(data: *const u8, len: u32, timeout: Timeout) -> RetCode;
}

/// LPUART1, initialized by the board support code.
pub struct UartTransport {
    timeout: Timeout,
}

impl UartTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout: timeout.into(),
        }
    }
}

impl Transport for UartTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        unsafe { uart_send_data(data.as_ptr(), data.len() as u32, self.timeout) }
            .into_result()
            .map_err(TransportError::from)
    }
}

impl Write for UartTransport {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Writes records straight to the UART. Blocking, meant for bring-up and fatal paths.
struct UartLogger;

static LOGGER: UartLogger = UartLogger;

impl Log for UartLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        let mut uart = UartTransport::new(Some(TRANSPORT_TIMEOUT));
        let _ = write!(uart, "[{}] {}\r\n", record.level(), record.args());
    }
    fn flush(&self) {}
}

pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
