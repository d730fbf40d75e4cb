//! Debug output.
//!
//! Text is queued in a fixed ring and handed to the blocking transport in
//! bounded chunks, so the control loop never waits for more than one flush.

#[cfg(feature = "real")]
pub mod real;

#[cfg(feature = "fake")]
pub mod emul;

use crate::{
    buffers::{DebugCons, DebugProd, DebugRb},
    error::TransportError,
};
use core::fmt::{self, Write};
use ringbuf::traits::*;

const FLUSH_CHUNK: usize = 32;

/// Byte sink with a maximum wait per call.
pub trait Transport {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

pub struct DebugOut<'a> {
    prod: DebugProd<'a>,
    cons: DebugCons<'a>,
    /// Bytes dropped because the queue was full.
    lost: usize,
}

impl<'a> DebugOut<'a> {
    pub fn new(buffer: &'a mut DebugRb) -> Self {
        let (prod, cons) = buffer.split_ref();
        Self { prod, cons, lost: 0 }
    }

    pub fn pending(&self) -> usize {
        self.cons.occupied_len()
    }
    pub fn lost(&self) -> usize {
        self.lost
    }

    /// Send at most `max` queued bytes.
    pub fn flush<T: Transport>(&mut self, transport: &mut T, max: usize) -> Result<usize, TransportError> {
        let mut chunk = [0u8; FLUSH_CHUNK];
        let mut sent = 0;
        while sent < max {
            let len = self.cons.pop_slice(&mut chunk[..FLUSH_CHUNK.min(max - sent)]);
            if len == 0 {
                break;
            }
            transport.send(&chunk[..len])?;
            sent += len;
        }
        Ok(sent)
    }
}

impl<'a> Write for DebugOut<'a> {
    /// Queues `s` whole or drops it.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.prod.vacant_len() >= bytes.len() {
            self.prod.push_slice(bytes);
        } else {
            self.lost += bytes.len();
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "fake"))]
mod tests {
    use super::{emul::EmulTransport, *};

    #[test]
    fn bounded_flush() {
        let mut rb = DebugRb::default();
        let mut out = DebugOut::new(&mut rb);
        let mut tx = EmulTransport::new();

        write!(out, "ADC Val: {}\n\r", 1_648_640).unwrap();
        assert_eq!(out.pending(), 18);
        assert_eq!(out.flush(&mut tx, 10).unwrap(), 10);
        assert_eq!(out.flush(&mut tx, 100).unwrap(), 8);
        assert_eq!(out.flush(&mut tx, 100).unwrap(), 0);
        assert_eq!(tx.sent, b"ADC Val: 1648640\n\r");
    }

    #[test]
    fn chunks() {
        let mut rb = DebugRb::default();
        let mut out = DebugOut::new(&mut rb);
        let mut tx = EmulTransport::new();

        out.write_str(&"x".repeat(100)).unwrap();
        assert_eq!(out.flush(&mut tx, 1000).unwrap(), 100);
        assert_eq!(tx.calls, 4);
    }

    #[test]
    fn overflow_is_counted() {
        let mut rb = DebugRb::default();
        let mut out = DebugOut::new(&mut rb);
        let cap = out.prod.capacity().get();

        out.write_str(&"a".repeat(cap - 2)).unwrap();
        out.write_str("bcd").unwrap();
        out.write_str("ef").unwrap();
        assert_eq!(out.lost(), 3);
        assert_eq!(out.pending(), cap);
    }

    #[test]
    fn transport_error() {
        let mut rb = DebugRb::default();
        let mut out = DebugOut::new(&mut rb);
        let mut tx = EmulTransport::new();
        tx.fail = Some(TransportError::TimedOut);

        out.write_str("hello").unwrap();
        assert_eq!(out.flush(&mut tx, 100), Err(TransportError::TimedOut));
    }
}
