// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic.
//!
//! ## Existing drivers
//!
//! - [`h_bridge`] – Two-input PWM H-bridge driven in fast-stop (inverted) mode

pub mod h_bridge;

pub use h_bridge::{HBridge, Motion, MotorDrive};
