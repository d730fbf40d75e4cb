extern crate std;

use super::Transport;
use crate::error::TransportError;
use std::vec::Vec;

/// Collects everything sent.
#[derive(Clone, Debug, Default)]
pub struct EmulTransport {
    pub sent: Vec<u8>,
    /// Number of `send` calls.
    pub calls: usize,
    /// Make every `send` fail.
    pub fail: Option<TransportError>,
}

impl EmulTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for EmulTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.calls += 1;
        if let Some(err) = self.fail {
            return Err(err);
        }
        self.sent.extend_from_slice(data);
        Ok(())
    }
}
