use crate::{
    acquisition::Shared,
    config::{CHANNEL_COUNT, DEBUG_BUFFER_LEN},
};
use core::sync::atomic::{AtomicU32, Ordering};
use once_mut::once_mut;
use ringbuf::{traits::SplitRef, StaticRb};

/// One word per channel, filled by the transfer hardware in rank order.
///
/// Slots are independent word atomics. A reader may see some slots from the
/// scan in flight and others from the previous one.
#[repr(C)]
pub struct ScanBuffer {
    slots: [AtomicU32; CHANNEL_COUNT],
}

impl ScanBuffer {
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const ZERO: AtomicU32 = AtomicU32::new(0);
        Self {
            slots: [ZERO; CHANNEL_COUNT],
        }
    }

    pub(crate) const fn len(&self) -> usize {
        CHANNEL_COUNT
    }

    /// Transfer destination address.
    pub(crate) fn as_mut_ptr(&self) -> *mut u32 {
        self.slots.as_ptr() as *mut u32
    }

    pub(crate) fn load(&self, slot: usize) -> u32 {
        self.slots[slot].load(Ordering::Relaxed)
    }
    /// Software stand-in for a hardware write.
    #[cfg(any(test, feature = "fake"))]
    pub(crate) fn store(&self, slot: usize, word: u32) {
        self.slots[slot].store(word, Ordering::Relaxed);
    }
}

impl Default for ScanBuffer {
    fn default() -> Self {
        Self::new()
    }
}

pub type DebugRb = StaticRb<u8, DEBUG_BUFFER_LEN>;

pub type DebugProd<'a> = <DebugRb as SplitRef>::RefProd<'a>;
pub type DebugCons<'a> = <DebugRb as SplitRef>::RefCons<'a>;

once_mut! {
    pub static mut ACQ_STATE: Shared = Shared::new();
    pub static mut DEBUG_BUFFER: DebugRb = DebugRb::default();
}
