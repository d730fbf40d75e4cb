use crate::{
    acquisition::Acquisition,
    adc::AdcDma,
    board::{Board, Button, DisplaySide, Led},
    channel::Channel,
    config::{COUNTER_MODULO, DEBUG_FLUSH_MAX, LED_STEP_DELAY, LOOP_PERIOD, STATS_PERIOD_TICKS},
    error::Error,
    io::{DebugOut, Transport},
    stats::ChannelStats,
};
use core::{convert::Infallible, fmt::Write};
use indenter::indented;

/// Foreground loop.
pub struct Control<'a, A: AdcDma, B: Board, T: Transport> {
    acq: Acquisition<A>,
    board: B,
    transport: T,
    debug: DebugOut<'a>,

    /// Two-digit counter shown on the display.
    counter: u8,
    /// Next update goes to the left digit.
    left: bool,
    ticks: u32,
    stats: ChannelStats,
}

impl<'a, A: AdcDma, B: Board, T: Transport> Control<'a, A, B, T> {
    pub fn new(acq: Acquisition<A>, board: B, transport: T, debug: DebugOut<'a>) -> Self {
        Self {
            acq,
            board,
            transport,
            debug,
            counter: 0,
            left: false,
            ticks: 0,
            stats: ChannelStats::default(),
        }
    }

    pub fn acquisition(&self) -> &Acquisition<A> {
        &self.acq
    }
    pub fn board(&self) -> &B {
        &self.board
    }
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
    pub fn transport(&self) -> &T {
        &self.transport
    }
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
    pub fn channel_stats(&self) -> &ChannelStats {
        &self.stats
    }
    pub fn debug_lost(&self) -> usize {
        self.debug.lost()
    }

    /// One loop iteration.
    ///
    /// Fails on a transfer fault, a display error or a transport timeout. None
    /// of them is recoverable here.
    pub fn step(&mut self) -> Result<(), Error> {
        self.acq.check()?;

        let sw1 = self.board.button(Button::Sw1);
        let sw2 = self.board.button(Button::Sw2);
        let b1 = self.board.button(Button::B1);

        let value = self.acq.read_channel(Channel::Input0);
        for ch in Channel::ALL {
            self.stats.update(ch, self.acq.read_channel(ch));
        }

        // LED test pattern
        if sw1.is_pressed() {
            for led in Led::ALL {
                self.board.toggle_led(led);
                self.board.delay(LED_STEP_DELAY);
            }
        }

        self.board.set_beeper(sw2.is_pressed());

        if b1.is_pressed() {
            let _ = write!(self.debug, "ADC Val: {}\n\r", value);
        }

        self.counter = (self.counter + 1) % COUNTER_MODULO;
        let (side, digit) = if self.left {
            (DisplaySide::Left, self.counter / 10)
        } else {
            (DisplaySide::Right, self.counter % 10)
        };
        self.board.show_digit(side, digit).map_err(Error::Display)?;
        self.left = !self.left;

        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % STATS_PERIOD_TICKS == 0 {
            self.print_stats();
        }

        self.debug.flush(&mut self.transport, DEBUG_FLUSH_MAX)?;
        self.board.delay(LOOP_PERIOD);
        Ok(())
    }

    fn print_stats(&mut self) {
        let _ = writeln!(self.debug, "[Statistics]");
        let _ = write!(indented(&mut self.debug).with_str("    "), "{}", self.acq.statistics());
        let lost = self.debug.lost();
        let _ = writeln!(self.debug, "    debug_lost: {}", lost);
        let _ = writeln!(self.debug, "channels:");
        let _ = write!(indented(&mut self.debug).with_str("    "), "{}", self.stats);
        self.stats.reset();
    }

    /// Run until the first error. The caller is expected to halt.
    pub fn run(&mut self) -> Result<Infallible, Error> {
        log::info!("Enter control loop");
        loop {
            if let Err(err) = self.step() {
                log::error!("Control loop stopped: {}", err);
                return Err(err);
            }
        }
    }

    /// Run until the first error and pass it to `halt`.
    pub fn run_or_halt<R, H: FnOnce(Error) -> R>(&mut self, halt: H) -> R {
        match self.run() {
            Ok(never) => match never {},
            Err(err) => halt(err),
        }
    }
}
