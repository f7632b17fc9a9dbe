//! Clock Interaction Tests.
//!
//! The policy must read logical time exactly once per `touch`, `reset` and
//! fallback demotion, and never for `invalidate`, `instantiate` or a victim
//! taken from probation.

use pretty_assertions::assert_eq;
use slru_core::common::Tick;
use slru_core::config::SlruConfig;
use slru_core::policy::{Segment, Slru};
use slru_core::sim::{Clock, SimClock};

use crate::common::mocks::MockTimer;

fn policy_with(clock: MockTimer, protected: usize) -> Slru<MockTimer> {
    Slru::new(&SlruConfig::new(protected, 4), clock).unwrap()
}

#[test]
fn touch_reads_the_clock_once() {
    let mut clock = MockTimer::new();
    let _ = clock.expect_now().times(1).return_const(Tick(42));
    let mut policy = policy_with(clock, 2);
    let e = policy.instantiate();

    policy.touch(e);
    assert_eq!(policy.entry(e).last_access(), Tick(42));
}

#[test]
fn reset_reads_the_clock_once() {
    let mut clock = MockTimer::new();
    let _ = clock.expect_now().times(1).return_const(Tick(7));
    let mut policy = policy_with(clock, 2);
    let e = policy.instantiate();

    policy.reset(e);
    assert_eq!(policy.entry(e).last_access(), Tick(7));
}

#[test]
fn invalidate_and_probation_victims_do_not_read_the_clock() {
    let mut clock = MockTimer::new();
    let _ = clock.expect_now().never();
    let mut policy = policy_with(clock, 2);
    let a = policy.instantiate();
    let b = policy.instantiate();

    policy.invalidate(a);
    assert_eq!(policy.get_victim(&[a, b]), a);
}

#[test]
fn fallback_demotion_reads_the_clock() {
    let mut clock = MockTimer::new();
    let mut seq = mockall::Sequence::new();
    let _ = clock
        .expect_now()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(Tick(10));
    let _ = clock
        .expect_now()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(Tick(20));
    let mut policy = policy_with(clock, 1);
    let e = policy.instantiate();

    policy.touch(e);
    assert_eq!(policy.get_victim(&[e]), e);
    assert_eq!(policy.entry(e).segment(), Segment::Probation);
    assert_eq!(policy.entry(e).last_access(), Tick(20));
}

#[test]
fn shared_clock_is_seen_by_the_policy() {
    let clock = SimClock::starting_at(Tick(100));
    let mut policy = Slru::new(&SlruConfig::default(), clock.clone()).unwrap();
    let e = policy.instantiate();

    clock.advance(5);
    policy.touch(e);
    assert_eq!(policy.entry(e).last_access(), Tick(105));
    assert_eq!(policy.clock().now(), Tick(105));
}

#[test]
fn policy_can_borrow_its_clock() {
    let clock = SimClock::new();
    let mut policy = Slru::new(&SlruConfig::default(), &clock).unwrap();
    let e = policy.instantiate();
    clock.set(Tick(3));
    policy.reset(e);
    assert_eq!(policy.entry(e).last_access(), Tick(3));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "moved backwards")]
fn clock_refuses_to_run_backwards() {
    let clock = SimClock::starting_at(Tick(10));
    clock.set(Tick(9));
}
