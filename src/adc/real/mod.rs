mod raw;
mod wrapper;

pub use wrapper::{handle, Adc};
