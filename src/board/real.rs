use super::{Board, Button, ButtonState, DisplaySide, Led};
use crate::hal::{self, RetCode};
use core::time::Duration;

extern "C" {
    fn board_button_status(button: u8) -> u8;
    fn board_led_toggle(led: u8);
    /// Beeper is driven low-active by the shim.
    fn board_beep_write(on: bool);
    fn board_display_show_digit(display: u8, digit: i8) -> RetCode;
    fn hal_delay_ms(ms: u32);
}

/// PiEye EduShield attached to the Nucleo board.
pub struct RealBoard {
    _unused: [u8; 0],
}

impl RealBoard {
    /// GPIOs must have been initialized by the board support code.
    pub fn new() -> Self {
        Self { _unused: [] }
    }
}

impl Board for RealBoard {
    fn button(&mut self, button: Button) -> ButtonState {
        if unsafe { board_button_status(button as u8) } != 0 {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
    fn toggle_led(&mut self, led: Led) {
        unsafe { board_led_toggle(led as u8) }
    }
    fn set_beeper(&mut self, on: bool) {
        unsafe { board_beep_write(on) }
    }
    fn show_digit(&mut self, side: DisplaySide, digit: u8) -> Result<(), RetCode> {
        unsafe { board_display_show_digit(side as u8, digit as i8) }.into_result()
    }
    fn delay(&mut self, duration: Duration) {
        unsafe { hal_delay_ms(hal::millis(duration)) }
    }
}
