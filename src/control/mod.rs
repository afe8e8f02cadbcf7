// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motion Control
//!
//! Button arbitration and limit enforcement for the tuning motor.
//!
//! ## Modules
//!
//! - [`state`] - Value types shared with the protocol layer.
//! - [`motion_controller`] - Scan/jog state machine gated by the travel limits.

pub mod motion_controller;
pub mod state;

pub use motion_controller::{Activity, MotionController};
pub use state::{
    Actor, ButtonState, Direction, Hint, MotionRequest, MotorState, Phase, Rejection, Response,
};
