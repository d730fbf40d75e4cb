//! Digital I/O collaborators of the control loop.

#[cfg(feature = "real")]
pub mod real;

#[cfg(feature = "fake")]
pub mod emul;

use crate::hal::RetCode;
use core::time::Duration;

pub const LED_COUNT: usize = 5;
pub const BUTTON_COUNT: usize = 3;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Led {
    Led0 = 0,
    Led1 = 1,
    Led2 = 2,
    Led3 = 3,
    Led4 = 4,
}

impl Led {
    pub const ALL: [Led; LED_COUNT] = [Led::Led0, Led::Led1, Led::Led2, Led::Led3, Led::Led4];
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    Sw1 = 0,
    Sw2 = 1,
    /// User button of the Nucleo board.
    B1 = 2,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

/// One of the two 7-segment digits.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplaySide {
    Left = 0,
    Right = 1,
}

pub trait Board {
    fn button(&mut self, button: Button) -> ButtonState;
    fn toggle_led(&mut self, led: Led);
    fn set_beeper(&mut self, on: bool);
    /// Show hex digit `0..=15`.
    fn show_digit(&mut self, side: DisplaySide, digit: u8) -> Result<(), RetCode>;
    /// Busy wait.
    fn delay(&mut self, duration: Duration);
}
