use acquire::{
    adc::{
        emul::{EmulAdc, EmulHandle},
        AdcInput, SampleTime, ScanConfig,
    },
    error::{InitStep, TransferFault},
    hal::RetCode,
    units::{Sample, SAMPLE_MAX},
    Acquisition, Channel, Engine, Session, Shared,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128PlusPlus as SomeRng;
use std::{thread, time::Duration};

fn engine() -> (Engine<EmulAdc>, EmulHandle, &'static Shared) {
    let _ = env_logger::builder().is_test(true).try_init();
    let shared: &'static Shared = Box::leak(Box::new(Shared::new()));
    let (adc, handle) = EmulAdc::new();
    (Engine::new(adc, shared), handle, shared)
}

fn running() -> (Acquisition<EmulAdc>, EmulHandle) {
    let (engine, handle, _) = engine();
    (engine.initialize().unwrap(), handle)
}

#[test]
fn init_sequence() {
    let (engine, handle, shared) = engine();
    assert_eq!(engine.session(), Session::Uninitialized);
    assert!(!handle.is_started());

    let acq = engine.initialize().unwrap();
    assert_eq!(acq.session(), Session::Running);
    assert_eq!(shared.session(), Session::Running);
    assert!(acq.check().is_ok());

    assert_eq!(handle.config(), Some(ScanConfig::DEFAULT));
    assert_eq!(
        handle.channels(),
        [
            (0, AdcInput::In1, SampleTime::Cycles92_5),
            (1, AdcInput::In2, SampleTime::Cycles92_5),
            (2, AdcInput::TempSensor, SampleTime::Cycles92_5),
            (3, AdcInput::Vbat, SampleTime::Cycles92_5),
            (4, AdcInput::VrefInt, SampleTime::Cycles92_5),
        ]
    );
    assert!(handle.is_calibrated());
    assert_eq!(handle.transfer_len(), Some(5));
    assert!(handle.is_started());
}

#[test]
fn init_failure_reports_step() {
    let mut steps = vec![InitStep::Dma, InitStep::Adc];
    steps.extend(Channel::ALL.map(InitStep::Channel));
    steps.push(InitStep::Calibration);

    for step in steps {
        let (engine, handle, shared) = engine();
        handle.fail_at(step, RetCode::Busy);
        let err = engine.initialize().err().unwrap();
        assert_eq!(err.step, step);
        assert_eq!(err.code, RetCode::Busy);
        assert_eq!(shared.session(), Session::Uninitialized);
        assert!(!handle.is_started());
    }
}

#[test]
fn start_failure_leaves_configured() {
    let (engine, handle, shared) = engine();
    handle.fail_at(InitStep::Start, RetCode::Failure);
    let err = engine.initialize().err().unwrap();
    assert_eq!(err.step, InitStep::Start);
    assert_eq!(err.code, RetCode::Failure);
    assert_eq!(shared.session(), Session::Configured);
    assert!(handle.is_calibrated());
    assert!(!handle.is_started());
}

#[test]
#[should_panic(expected = "Transfer is not started")]
fn no_writes_before_start() {
    let (engine, handle, _) = engine();
    handle.write_slot(0, 2048);
    drop(engine);
}

#[test]
fn half_scale_input() {
    let (acq, handle) = running();
    handle.scan([2048, 0, 0, 0, 0]);
    assert_eq!(acq.read_channel_raw(Channel::Input0), 2048);
    assert_eq!(acq.read_channel(Channel::Input0), 1_648_640);
}

#[test]
fn reads_follow_table() {
    let (acq, handle) = running();
    let mut rng = SomeRng::seed_from_u64(0xdeadbeef);
    for _ in 0..256 {
        let samples: [Sample; 5] = [(); 5].map(|()| rng.gen_range(0..=SAMPLE_MAX));
        handle.scan(samples);

        assert_eq!(acq.read_all_raw(), samples);
        for (ch, raw) in Channel::ALL.into_iter().zip(samples) {
            let uv = acq.read_channel(ch);
            assert!(acq.read_channel_raw(ch) < 4096);
            assert_eq!(uv, raw as i32 * ch.scalar());
            assert!(ch.uv_range().contains(&uv));
            // Nothing written in between.
            assert_eq!(acq.read_channel(ch), uv);
        }
    }
}

#[test]
fn every_channel_in_range_after_init() {
    let (acq, handle) = running();
    handle.scan([SAMPLE_MAX; 5]);
    for ch in Channel::ALL {
        let uv = acq.read_channel(ch);
        assert_eq!(uv, *ch.uv_range().end());
    }
    assert_eq!(acq.read_channel(Channel::Vbat), 3_296_475);
}

#[test]
fn vbat_is_not_rescaled() {
    let (acq, handle) = running();
    handle.scan([0, 0, 0, 1000, 0]);
    assert_eq!(acq.read_channel(Channel::Vbat), 805_000);
}

#[test]
fn scan_in_flight() {
    let (acq, handle) = running();
    handle.scan([100; 5]);
    assert_eq!(acq.scan_count(), 1);

    handle.write_slot(0, 200);
    handle.write_slot(1, 200);
    assert_eq!(acq.read_all_raw(), [200, 200, 100, 100, 100]);
    assert_eq!(acq.scan_count(), 1);

    handle.write_word(2, 0xffff_f123);
    assert_eq!(acq.read_channel_raw(Channel::Temp), 0x123);
}

#[test]
fn never_older_than_last_scan() {
    let (acq, handle) = running();
    let scanner = handle.spawn_scanner(Duration::ZERO, |k| [k.min(SAMPLE_MAX as u32) as Sample; 5]);

    let mut last = [0; 5];
    for _ in 0..20_000 {
        for ch in Channel::ALL {
            let completed = acq.scan_count();
            let raw = acq.read_channel_raw(ch);
            if completed < SAMPLE_MAX as u32 {
                assert!(raw as u32 + 1 >= completed, "{}: {} after {} scans", ch, raw, completed);
            }
            assert!(raw >= last[ch.slot()]);
            last[ch.slot()] = raw;
        }
        thread::yield_now();
    }

    let scans = scanner.stop();
    assert_eq!(acq.scan_count(), scans);
}

#[test]
fn transfer_fault() {
    let (acq, handle) = running();
    handle.scan([1; 5]);

    assert!(handle.fault(TransferFault::Overrun));
    assert_eq!(acq.session(), Session::Faulted);
    assert_eq!(acq.check(), Err(TransferFault::Overrun));

    assert!(!handle.fault(TransferFault::Dma));
    assert_eq!(acq.check(), Err(TransferFault::Overrun));
    assert_eq!(acq.statistics().fault_count(TransferFault::Overrun), 1);
    assert_eq!(acq.statistics().fault_count(TransferFault::Dma), 1);

    assert_eq!(acq.read_channel_raw(Channel::Vref), 1);
}
