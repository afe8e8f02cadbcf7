// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Limit-gated motion controller for the tuning capacitor motor.
//!
//! The controller owns both limit switches, the motor drive and the broadcaster. Button requests
//! are applied with [`handle`](MotionController::handle) between control ticks, and
//! [`tick`](MotionController::tick) must run periodically to sample the limits and expire jogs.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut ctl = MotionController::new(limit_up, limit_down, h_bridge, notifier, settings);
//!
//! loop {
//!     while let Some(req) = next_request() {
//!         ctl.handle(req, millis());
//!     }
//!     ctl.tick(millis());
//! }
//! ```
//!
//! Rules enforced here:
//! - motion toward a limit is only started while that limit is inactive;
//! - motion in one direction is only started while nothing is engaged in the other direction;
//! - a jog is refused while a scan runs;
//! - a limit becoming active stops the motor no matter who started it.

use crate::config::Settings;
use crate::control::state::*;
use crate::drivers::{Motion, MotorDrive};
use crate::hw::EdgeDetector;
use crate::protocol::{Broadcaster, Notifier};

/// What is currently driving the motor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Activity {
    Idle,
    /// Latched scan, runs until toggled off or a limit trips.
    Scanning(Direction),
    /// Bounded jog, runs until `deadline_ms` or a limit trips.
    Jogging {
        direction: Direction,
        deadline_ms: u32,
    },
}

impl Activity {
    /// Direction being driven, if any.
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            Activity::Idle => None,
            Activity::Scanning(d) => Some(d),
            Activity::Jogging { direction, .. } => Some(direction),
        }
    }

    /// Actor that owns the current motion, if any.
    pub fn actor(&self) -> Option<Actor> {
        match *self {
            Activity::Idle => None,
            Activity::Scanning(d) => Some(Actor::scan(d)),
            Activity::Jogging { direction, .. } => Some(Actor::jog(direction)),
        }
    }
}

pub struct MotionController<L, M, N> {
    limit_up: L,
    limit_down: L,
    drive: M,
    broadcaster: Broadcaster<N>,
    settings: Settings,

    buttons: [ButtonState; 4],
    activity: Activity,
    motor: MotorState,

    /// Both limits active at once.
    limits_faulted: bool,
}

impl<L, M, N> MotionController<L, M, N>
where
    L: EdgeDetector,
    M: MotorDrive,
    N: Notifier,
{
    /// Create the controller with the motor braked and every button released.
    pub fn new(limit_up: L, limit_down: L, mut drive: M, notifier: N, settings: Settings) -> Self {
        drive.set_motion(Motion::Stop, 0);

        Self {
            limit_up,
            limit_down,
            drive,
            broadcaster: Broadcaster::new(notifier),
            settings,
            buttons: [ButtonState::default(); 4],
            activity: Activity::Idle,
            motor: MotorState::STOPPED,
            limits_faulted: false,
        }
    }

    #[inline]
    pub fn motor(&self) -> MotorState {
        self.motor
    }

    #[inline]
    pub fn activity(&self) -> Activity {
        self.activity
    }

    #[inline]
    pub fn button(&self, actor: Actor) -> ButtonState {
        self.buttons[usize::from(actor.index())]
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in new settings. A jog already in flight keeps its deadline.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn limit_active(&self, direction: Direction) -> bool {
        self.limit(direction).is_active()
    }

    /// True while both limits report active, which points at a wiring fault.
    #[inline]
    pub fn limits_faulted(&self) -> bool {
        self.limits_faulted
    }

    #[inline]
    pub fn broadcaster(&mut self) -> &mut Broadcaster<N> {
        &mut self.broadcaster
    }

    #[inline]
    pub fn drive(&mut self) -> &mut M {
        &mut self.drive
    }

    /// Replay every button and limit LED, e.g. when a client attaches.
    pub fn announce_all(&mut self) {
        let limits = [self.limit_up.is_active(), self.limit_down.is_active()];
        self.broadcaster.announce_all(&self.buttons, limits);
    }

    /// Apply one button request. Every request that reaches a decision is broadcast.
    pub fn handle(&mut self, request: MotionRequest, now_ms: u32) -> Response {
        let response = if request.actor.is_scan() {
            self.handle_scan(request.actor, request.phase)
        } else {
            self.handle_jog(request.actor, request.phase, now_ms)
        };

        match response {
            Response::Rejected(why) => log::info!("{:?} rejected: {:?}", request.actor, why),
            other => log::debug!("{:?} {:?}: {:?}", request.actor, request.phase, other),
        }
        response
    }

    /// Run one control step: sample both limits, enforce them, then expire a finished jog.
    pub fn tick(&mut self, now_ms: u32) {
        self.limit_up.poll(now_ms);
        self.limit_down.poll(now_ms);

        for dir in Direction::ALL {
            if self.limit(dir).rose() {
                self.halt_for_limit(dir);
                log::warn!("{:?} limit reached, motor stopped", dir);
                self.broadcaster.announce_limit(dir, true);
            }
        }

        for dir in Direction::ALL {
            if self.limit(dir).fell() {
                log::info!("{:?} limit cleared", dir);
                self.limit_cleared(dir);
            }
        }

        let both = self.limit_up.is_active() && self.limit_down.is_active();
        if both && !self.limits_faulted {
            log::warn!("both limits active, motion disabled");
        }
        self.limits_faulted = both;

        // An active limit seen without an edge, e.g. a missed sample.
        if let Some(dir) = self.activity.direction() {
            if self.limit(dir).is_active() {
                self.halt_for_limit(dir);
                log::warn!("{:?} limit active while moving, motor stopped", dir);
            }
        }

        if let Activity::Jogging {
            direction,
            deadline_ms,
        } = self.activity
        {
            if deadline_reached(now_ms, deadline_ms) {
                self.stop_motor();
                self.activity = Activity::Idle;
                let actor = Actor::jog(direction);
                if self.button(actor).depressed {
                    self.set_button(actor, false, Hint::Inactive);
                }
            }
        }
    }

    fn handle_scan(&mut self, actor: Actor, phase: Phase) -> Response {
        if phase == Phase::Release {
            return Response::Ignored;
        }

        let dir = actor.direction();

        // Second press on a running scan toggles it off.
        if self.activity == Activity::Scanning(dir) {
            self.stop_motor();
            self.activity = Activity::Idle;
            self.set_button(actor, false, Hint::Inactive);
            return Response::Stopped;
        }

        if self.engaged(dir.opposite()) {
            self.announce(actor);
            return Response::Rejected(Rejection::OpposingEngaged);
        }

        if self.limit_active(dir) {
            self.set_button(actor, false, Hint::Disabled);
            return Response::Rejected(Rejection::LimitActive);
        }

        // A same-direction jog is taken over by the scan.
        if let Activity::Jogging { .. } = self.activity {
            let jog = Actor::jog(dir);
            if self.button(jog).depressed {
                self.set_button(jog, false, Hint::Inactive);
            }
        }

        self.start_motor(dir, self.settings.scan_speed());
        self.activity = Activity::Scanning(dir);
        self.set_button(actor, true, Hint::Active);
        Response::Started(dir)
    }

    fn handle_jog(&mut self, actor: Actor, phase: Phase, now_ms: u32) -> Response {
        let dir = actor.direction();

        if phase == Phase::Release {
            // Fixed-duration jog: releasing only updates the button, the motor runs to the deadline.
            if self.button(actor).depressed {
                self.set_button(actor, false, Hint::Inactive);
                return Response::Released;
            }
            return Response::Ignored;
        }

        if let Activity::Scanning(_) = self.activity {
            self.announce(actor);
            return Response::Rejected(Rejection::ScanEngaged);
        }

        if self.engaged(dir.opposite()) {
            self.announce(actor);
            return Response::Rejected(Rejection::OpposingEngaged);
        }

        if self.limit_active(dir) {
            self.set_button(actor, false, Hint::Disabled);
            return Response::Rejected(Rejection::LimitActive);
        }

        let deadline_ms = now_ms.wrapping_add(self.settings.jog_duration_ms());

        if self.activity.direction() == Some(dir) {
            // Repeat press while in flight: keep going, push the deadline out.
            self.activity = Activity::Jogging {
                direction: dir,
                deadline_ms,
            };
            self.set_button(actor, true, Hint::Active);
            return Response::Extended;
        }

        self.start_motor(dir, self.settings.jog_speed());
        self.activity = Activity::Jogging {
            direction: dir,
            deadline_ms,
        };
        self.set_button(actor, true, Hint::Active);
        Response::Started(dir)
    }

    /// Forced stop because the `dir` limit is (or just became) active.
    fn halt_for_limit(&mut self, dir: Direction) {
        self.stop_motor();

        let interrupted = self.activity.actor();
        self.activity = Activity::Idle;

        for actor in [Actor::scan(dir), Actor::jog(dir)] {
            self.set_button(actor, false, Hint::Disabled);
        }
        if let Some(actor) = interrupted {
            if actor.direction() != dir {
                self.set_button(actor, false, Hint::Disabled);
            }
        }
    }

    /// The `dir` limit cleared. Drop the disabled hint wherever the actor's own limit is clear.
    fn limit_cleared(&mut self, dir: Direction) {
        self.broadcaster.announce_limit(dir, false);

        for actor in Actor::ALL {
            let state = self.button(actor);
            if state.hint == Hint::Disabled && !self.limit_active(actor.direction()) {
                self.set_button(actor, state.depressed, Hint::Inactive);
            }
        }
    }

    /// Something is driving (or about to drive) toward `dir`.
    fn engaged(&self, dir: Direction) -> bool {
        self.activity.direction() == Some(dir)
            || self.button(Actor::scan(dir)).depressed
            || self.button(Actor::jog(dir)).depressed
    }

    fn start_motor(&mut self, dir: Direction, speed: u8) {
        let motion = dir.motion();
        self.drive.set_motion(motion, speed.into());
        self.motor = MotorState { motion, speed };
    }

    fn stop_motor(&mut self) {
        self.drive.set_motion(Motion::Stop, 0);
        self.motor = MotorState::STOPPED;
    }

    fn set_button(&mut self, actor: Actor, depressed: bool, hint: Hint) {
        self.buttons[usize::from(actor.index())] = ButtonState { depressed, hint };
        self.announce(actor);
    }

    fn announce(&mut self, actor: Actor) {
        let state = self.button(actor);
        self.broadcaster.announce(actor, &state);
    }

    fn limit(&self, dir: Direction) -> &L {
        match dir {
            Direction::Up => &self.limit_up,
            Direction::Down => &self.limit_down,
        }
    }
}

/// `now_ms` is at or past `deadline_ms`, tolerating millisecond counter wraparound.
#[inline]
fn deadline_reached(now_ms: u32, deadline_ms: u32) -> bool {
    (now_ms.wrapping_sub(deadline_ms) as i32) >= 0
}
