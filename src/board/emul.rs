extern crate std;

use super::{Board, Button, ButtonState, DisplaySide, Led, BUTTON_COUNT, LED_COUNT};
use crate::hal::RetCode;
use core::time::Duration;
use std::vec::Vec;

/// Board state kept in memory.
#[derive(Clone, Debug, Default)]
pub struct EmulBoard {
    pub buttons: [ButtonState; BUTTON_COUNT],
    pub leds: [bool; LED_COUNT],
    /// Every toggle in order.
    pub toggles: Vec<Led>,
    pub beeper: bool,
    pub digits: [Option<u8>; 2],
    /// Sum of all delays.
    pub elapsed: Duration,
    /// Make the display reject digits.
    pub display_error: Option<RetCode>,
}

impl EmulBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.buttons[button as usize] = ButtonState::Pressed;
    }
    pub fn release(&mut self, button: Button) {
        self.buttons[button as usize] = ButtonState::Released;
    }
    pub fn digit(&self, side: DisplaySide) -> Option<u8> {
        self.digits[side as usize]
    }
}

impl Board for EmulBoard {
    fn button(&mut self, button: Button) -> ButtonState {
        self.buttons[button as usize]
    }
    fn toggle_led(&mut self, led: Led) {
        self.leds[led as usize] ^= true;
        self.toggles.push(led);
    }
    fn set_beeper(&mut self, on: bool) {
        self.beeper = on;
    }
    fn show_digit(&mut self, side: DisplaySide, digit: u8) -> Result<(), RetCode> {
        if let Some(code) = self.display_error {
            return Err(code);
        }
        if digit > 15 {
            return Err(RetCode::Failure);
        }
        self.digits[side as usize] = Some(digit);
        Ok(())
    }
    fn delay(&mut self, duration: Duration) {
        self.elapsed += duration;
    }
}
