// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Safety properties checked over every short request sequence.

mod common;

use common::{Bench, ScopePwm, SharedPin};

use embedded_hal::PwmPin;
use magloop::config::Settings;
use magloop::control::{Actor, Direction, MotionRequest, Phase, Rejection, Response};
use magloop::drivers::{HBridge, Motion, MotorDrive};
use magloop::hw::{ActiveLevel, EdgeDetector, Immediate, LimitSwitch, MinStableTime};

fn all_requests() -> Vec<MotionRequest> {
    let mut v = Vec::new();
    for actor in Actor::ALL {
        v.push(MotionRequest::press(actor));
        v.push(MotionRequest::release(actor));
    }
    v
}

/// Every sequence of `len` requests.
fn sequences(len: usize) -> Vec<Vec<MotionRequest>> {
    let reqs = all_requests();
    let mut out: Vec<Vec<MotionRequest>> = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|seq| {
                reqs.iter().map(move |r| {
                    let mut next = seq.clone();
                    next.push(*r);
                    next
                })
            })
            .collect();
    }
    out
}

fn direction_of(motion: Motion) -> Option<Direction> {
    match motion {
        Motion::Up => Some(Direction::Up),
        Motion::Down => Some(Direction::Down),
        Motion::Stop => None,
    }
}

#[test]
fn opposing_motion_never_granted_while_moving() {
    for seq in sequences(4) {
        let mut b = Bench::new();
        for (step, req) in seq.iter().enumerate() {
            let now = step as u32 * 20;
            let before = direction_of(b.ctl.motor().motion);
            let resp = b.ctl.handle(*req, now);

            if let (Some(moving), Response::Started(dir)) = (before, resp) {
                assert_eq!(dir, moving, "direction reversed by {:?} in {:?}", req, seq);
            }
            if before == Some(Direction::Up)
                && req.actor == Actor::ScanDown
                && req.phase == Phase::Press
            {
                assert_eq!(resp, Response::Rejected(Rejection::OpposingEngaged));
            }
            if before == Some(Direction::Down)
                && req.actor == Actor::ScanUp
                && req.phase == Phase::Press
            {
                assert_eq!(resp, Response::Rejected(Rejection::OpposingEngaged));
            }

            b.ctl.tick(now + 10);
        }
    }
}

#[test]
fn never_moves_toward_an_active_limit() {
    for (up, down) in [(true, false), (false, true), (true, true)] {
        for seq in sequences(3) {
            let mut b = Bench::with(up, down, Settings::default());
            b.ctl.tick(0);
            for (step, req) in seq.iter().enumerate() {
                b.ctl.handle(*req, step as u32 * 10);
                let motion = b.ctl.motor().motion;
                assert!(!(up && motion == Motion::Up), "{:?}", seq);
                assert!(!(down && motion == Motion::Down), "{:?}", seq);
            }
        }
    }
}

#[test]
fn rising_limit_stops_on_the_same_tick() {
    for actor in Actor::ALL {
        let mut b = Bench::new();
        b.ctl.handle(MotionRequest::press(actor), 0);
        assert!(b.ctl.motor().is_moving());

        let writes = (b.in1.writes(), b.in2.writes());
        match actor.direction() {
            Direction::Up => b.up.set(true),
            Direction::Down => b.down.set(true),
        }
        b.ctl.tick(10);

        // Exactly one drive command on this tick, and it is a brake.
        assert_eq!(b.in1.writes(), writes.0 + 1);
        assert_eq!(b.in2.writes(), writes.1 + 1);
        assert!(b.braked());
        assert!(!b.ctl.button(actor).depressed);
    }
}

#[test]
fn unchanged_signal_reports_no_edges() {
    let pin = SharedPin::default();
    let mut plain = LimitSwitch::new(pin.clone(), ActiveLevel::High, Immediate);
    let mut filtered = LimitSwitch::new(pin.clone(), ActiveLevel::High, MinStableTime::new(50));

    pin.set(true);
    plain.poll(0);
    assert!(plain.rose());
    plain.poll(1);
    assert!(!plain.rose());
    assert!(!plain.fell());

    filtered.poll(0);
    filtered.poll(60);
    assert!(filtered.rose());
    filtered.poll(70);
    assert!(!filtered.rose());
    assert!(!filtered.fell());
    assert!(filtered.is_active());
}

#[test]
fn out_of_range_speed_is_clamped() {
    let cases = [
        (Motion::Up, 150, 100),
        (Motion::Up, -20, 0),
        (Motion::Down, 1000, 100),
        (Motion::Down, i32::MIN, 0),
    ];

    for (motion, raw, clamped) in cases {
        let (a1, a2) = (ScopePwm::default(), ScopePwm::default());
        let (c1, c2) = (ScopePwm::default(), ScopePwm::default());
        let mut a = HBridge::new(a1.clone(), a2.clone());
        let mut c = HBridge::new(c1.clone(), c2.clone());

        a.set_motion(motion, raw);
        c.set_motion(motion, clamped);

        assert_eq!(a1.get_duty(), c1.get_duty());
        assert_eq!(a2.get_duty(), c2.get_duty());
        assert_eq!(a.speed(), c.speed());
    }
}

#[test]
fn unknown_direction_code_brakes() {
    let (p1, p2) = (ScopePwm::default(), ScopePwm::default());
    let mut h = HBridge::new(p1.clone(), p2.clone());
    h.set_motion(Motion::Up, 100);
    h.set_motion(Motion::from_raw(7), 100);

    assert_eq!(h.motion(), Motion::Stop);
    assert_eq!(p1.duty(), Some(common::PWM_MAX));
    assert_eq!(p2.duty(), Some(common::PWM_MAX));
}
