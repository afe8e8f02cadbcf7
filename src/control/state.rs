// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Value types shared by the motion controller, the broadcaster and the inbound parser.

use crate::drivers::Motion;

/// Travel direction of the tuning capacitor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Up, Direction::Down];

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Index of this direction's limit LED on the wire (`led~<index>`).
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
        }
    }

    #[inline]
    pub fn motion(self) -> Motion {
        match self {
            Direction::Up => Motion::Up,
            Direction::Down => Motion::Down,
        }
    }
}

/// A UI button that can request motion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Actor {
    /// Latching, toggled by each press.
    ScanUp = 0,
    ScanDown = 1,
    /// Momentary, bounded duration.
    JogUp = 2,
    JogDown = 3,
}

impl Actor {
    pub const ALL: [Actor; 4] = [Actor::ScanUp, Actor::ScanDown, Actor::JogUp, Actor::JogDown];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Actor::ScanUp | Actor::JogUp => Direction::Up,
            Actor::ScanDown | Actor::JogDown => Direction::Down,
        }
    }

    #[inline]
    pub fn is_scan(self) -> bool {
        matches!(self, Actor::ScanUp | Actor::ScanDown)
    }

    pub fn scan(direction: Direction) -> Self {
        match direction {
            Direction::Up => Actor::ScanUp,
            Direction::Down => Actor::ScanDown,
        }
    }

    pub fn jog(direction: Direction) -> Self {
        match direction {
            Direction::Up => Actor::JogUp,
            Direction::Down => Actor::JogDown,
        }
    }
}

/// Button edge reported by the UI.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Press,
    Release,
}

/// Decoded request from the transport layer. Consumed immediately by the controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MotionRequest {
    pub actor: Actor,
    pub phase: Phase,
}

impl MotionRequest {
    pub fn press(actor: Actor) -> Self {
        Self {
            actor,
            phase: Phase::Press,
        }
    }

    pub fn release(actor: Actor) -> Self {
        Self {
            actor,
            phase: Phase::Release,
        }
    }
}

/// Display hint shown next to a button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Hint {
    #[default]
    Inactive,
    /// The button is engaged.
    Active,
    /// A travel limit blocks or stopped this button.
    Disabled,
}

/// Mirror of one UI button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct ButtonState {
    pub depressed: bool,
    pub hint: Hint,
}

/// What the controller last commanded the motor to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct MotorState {
    pub motion: Motion,
    /// Percent. Meaningless while `motion` is `Stop`.
    pub speed: u8,
}

impl MotorState {
    pub const STOPPED: MotorState = MotorState {
        motion: Motion::Stop,
        speed: 0,
    };

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion != Motion::Stop
    }
}

/// Why a request did not change the motion state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The limit in the requested direction is active.
    LimitActive,
    /// An actor for the opposite direction is engaged.
    OpposingEngaged,
    /// A jog was requested while a scan is running.
    ScanEngaged,
}

/// Outcome of a single [`MotionRequest`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Response {
    /// Motor started in the given direction.
    Started(Direction),
    /// A running scan was toggled off.
    Stopped,
    /// A jog already in flight had its deadline pushed out.
    Extended,
    /// Jog button released; the jog itself runs to its deadline.
    Released,
    /// Nothing to do for this request (e.g. releasing a scan button).
    Ignored,
    Rejected(Rejection),
}
