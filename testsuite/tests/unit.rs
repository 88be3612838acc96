//! Component-level tests of the public crate surface, run against the
//! simulated platform.

use blink_periodic::{
    wait_for, Completion, CycleDelay, Error, GpioPort, HardwareFault, OneshotBridge, Pin,
};

fn signal_done(_: usize, _: usize, _: usize, user_data: *mut ()) {
    let done = unsafe { &*(user_data as *const Completion) };
    done.signal();
}

fn leak_flag() -> &'static Completion {
    &*Box::leak(Box::new(Completion::new()))
}

// - delay --------------------------------------------------------------------

#[test]
fn calibration_tracks_the_clock() {
    assert_eq!(14, CycleDelay::new(16_000_000).nops_for_us(1));
    assert_eq!(46, CycleDelay::new(48_000_000).nops_for_us(1));
}

#[test]
fn millisecond_and_microsecond_waits_are_consistent() {
    let delay = CycleDelay::new(16_000_000);
    for ms in [1, 10, 500, 1000] {
        assert_eq!(ms as u64 * delay.nops_for_us(1000), delay.nops_for_ms(ms));
    }
}

// - gpio ---------------------------------------------------------------------

#[test]
fn port_rejects_an_unknown_line() {
    let fix = testsuite::fixture();
    assert_eq!(
        Err(Error::InvalidPin(9)),
        fix.port.enable_output(Pin::new(9))
    );
}

// - timer bridge -------------------------------------------------------------

#[test]
fn firing_protocol_round_trip() {
    let fix = testsuite::fixture();
    let flag = leak_flag();
    let mut bridge = OneshotBridge::new(fix.timer);

    bridge.subscribe(signal_done, flag).unwrap();
    bridge.arm_oneshot(250).unwrap();

    fix.timer.advance(249);
    assert!(!flag.is_set());
    fix.timer.advance(1);
    assert!(flag.is_set());

    wait_for(flag);
    assert_eq!(Ok(()), bridge.poll_fired(flag));
    assert!(!flag.is_set());
    assert_eq!(1, fix.timer.fired_count());
}

#[test]
fn second_arm_without_a_wait_is_a_conflict() {
    let fix = testsuite::fixture();
    let flag = leak_flag();
    let mut bridge = OneshotBridge::new(fix.timer);

    bridge.subscribe(signal_done, flag).unwrap();
    bridge.arm_oneshot(500).unwrap();
    assert_eq!(Err(Error::AlreadyArmed), bridge.arm_oneshot(500));
}

#[test]
fn bridge_can_be_rearmed_after_the_firing_is_consumed() {
    let fix = testsuite::fixture();
    let flag = leak_flag();
    let mut bridge = OneshotBridge::new(fix.timer);

    for round in 1..=3 {
        bridge.subscribe(signal_done, flag).unwrap();
        bridge.arm_oneshot(100).unwrap();
        fix.timer.advance(100);
        assert_eq!(Ok(()), bridge.poll_fired(flag));
        assert_eq!(round, fix.timer.fired_count());
    }
}

#[test]
fn failed_arm_is_fatal_not_silent() {
    let fix = testsuite::fixture();
    let flag = leak_flag();
    let mut bridge = OneshotBridge::new(fix.timer);

    bridge.subscribe(signal_done, flag).unwrap();
    fix.timer.inject_fault();
    assert_eq!(Err(Error::Hardware(HardwareFault)), bridge.arm_oneshot(500));
}

#[test]
fn bounded_wait_reports_a_hung_timer() {
    let fix = testsuite::fixture();
    let flag = leak_flag();
    let mut bridge = OneshotBridge::new(fix.timer);
    let delay = CycleDelay::new(1_000_000);

    bridge.subscribe(signal_done, flag).unwrap();
    bridge.arm_oneshot(500).unwrap();
    // The simulated clock never advances, so the one-shot never fires.
    assert_eq!(Err(Error::TimedOut), bridge.wait_timeout(flag, 10, &delay));
}
