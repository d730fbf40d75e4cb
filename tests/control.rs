use acquire::{
    adc::emul::{EmulAdc, EmulHandle},
    board::{emul::EmulBoard, Button, DisplaySide, Led},
    buffers::DebugRb,
    error::{TransferFault, TransportError},
    hal::RetCode,
    io::{emul::EmulTransport, DebugOut},
    Channel, Control, Engine, Error, Shared,
};
use std::{thread, time::Duration};

type TestControl = Control<'static, EmulAdc, EmulBoard, EmulTransport>;

fn control() -> (TestControl, EmulHandle) {
    let _ = env_logger::builder().is_test(true).try_init();
    let shared: &'static Shared = Box::leak(Box::new(Shared::new()));
    let debug: &'static mut DebugRb = Box::leak(Box::default());
    let (adc, handle) = EmulAdc::new();
    let acq = Engine::new(adc, shared).initialize().unwrap();
    let control = Control::new(acq, EmulBoard::new(), EmulTransport::new(), DebugOut::new(debug));
    (control, handle)
}

fn sent(control: &TestControl) -> String {
    String::from_utf8(control.transport().sent.clone()).unwrap()
}

#[test]
fn led_pattern() {
    let (mut control, handle) = control();
    handle.scan([0; 5]);

    control.step().unwrap();
    assert!(control.board().toggles.is_empty());
    assert_eq!(control.board().elapsed, Duration::from_millis(25));

    control.board_mut().press(Button::Sw1);
    control.step().unwrap();
    assert_eq!(control.board().toggles, Led::ALL);
    assert_eq!(control.board().leds, [true; 5]);
    assert_eq!(control.board().elapsed, Duration::from_millis(25 + 6 * 25));

    control.step().unwrap();
    assert_eq!(control.board().leds, [false; 5]);
    assert_eq!(control.board().toggles.len(), 10);
}

#[test]
fn beeper_follows_sw2() {
    let (mut control, _handle) = control();

    control.board_mut().press(Button::Sw2);
    control.step().unwrap();
    assert!(control.board().beeper);

    control.board_mut().release(Button::Sw2);
    control.step().unwrap();
    assert!(!control.board().beeper);
}

#[test]
fn value_on_b1() {
    let (mut control, handle) = control();
    handle.scan([2048, 0, 0, 0, 0]);

    control.step().unwrap();
    assert!(control.transport().sent.is_empty());

    control.board_mut().press(Button::B1);
    control.step().unwrap();
    assert_eq!(sent(&control), "ADC Val: 1648640\n\r");

    let input0 = control.channel_stats().get(Channel::Input0);
    assert_eq!(input0.count(), 2);
    assert_eq!(input0.last(), 1_648_640);
}

#[test]
fn counter_digits() {
    let (mut control, _handle) = control();

    control.step().unwrap();
    assert_eq!(control.board().digit(DisplaySide::Right), Some(1));
    assert_eq!(control.board().digit(DisplaySide::Left), None);
    control.step().unwrap();
    assert_eq!(control.board().digit(DisplaySide::Left), Some(0));
    control.step().unwrap();
    assert_eq!(control.board().digit(DisplaySide::Right), Some(3));

    for _ in 3..98 {
        control.step().unwrap();
    }
    assert_eq!(control.board().digit(DisplaySide::Right), Some(7));
    assert_eq!(control.board().digit(DisplaySide::Left), Some(9));

    control.step().unwrap();
    assert_eq!(control.board().digit(DisplaySide::Right), Some(9));
    control.step().unwrap();
    assert_eq!(control.board().digit(DisplaySide::Left), Some(0));
    control.step().unwrap();
    assert_eq!(control.board().digit(DisplaySide::Right), Some(1));
}

#[test]
fn stops_on_fault() {
    let (mut control, handle) = control();
    control.step().unwrap();

    assert!(handle.fault(TransferFault::Dma));
    assert_eq!(control.step(), Err(Error::Transfer(TransferFault::Dma)));
}

#[test]
fn halts_once() {
    let (mut control, handle) = control();
    control.step().unwrap();

    let injector = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        assert!(handle.fault(TransferFault::Dma));
        assert!(!handle.fault(TransferFault::Overrun));
    });

    let mut halts = 0;
    let err = control.run_or_halt(|err| {
        halts += 1;
        err
    });
    injector.join().unwrap();

    assert_eq!(halts, 1);
    assert_eq!(err, Error::Transfer(TransferFault::Dma));
    let stats = control.acquisition().statistics();
    assert_eq!(stats.fault_count(TransferFault::Dma), 1);
    assert_eq!(stats.fault_count(TransferFault::Overrun), 1);
}

#[test]
fn display_error() {
    let (mut control, _handle) = control();
    control.board_mut().display_error = Some(RetCode::Busy);
    assert_eq!(control.step(), Err(Error::Display(RetCode::Busy)));
}

#[test]
fn transport_timeout() {
    let (mut control, _handle) = control();
    control.step().unwrap();

    control.transport_mut().fail = Some(TransportError::TimedOut);
    control.board_mut().press(Button::B1);
    assert_eq!(control.step(), Err(Error::Transport(TransportError::TimedOut)));
}

#[test]
fn periodic_statistics() {
    let (mut control, handle) = control();
    handle.scan([2048, 0, 0, 0, 0]);

    for _ in 0..399 {
        control.step().unwrap();
    }
    assert!(control.transport().sent.is_empty());

    for _ in 0..10 {
        control.step().unwrap();
    }
    let text = sent(&control);
    assert!(text.starts_with("[Statistics]\n    scan_count: 1\n"));
    assert!(text.contains("    debug_lost: 0\n"));
    assert!(text.contains("    INPUT0:\n        last: 1648640 uV\n"));
    assert!(text.contains("    VREF:\n"));
    assert_eq!(control.debug_lost(), 0);
    assert_eq!(control.channel_stats().get(Channel::Input0).count(), 9);
}
