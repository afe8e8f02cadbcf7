// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Magloop Tuner Firmware
//!
//! This crate contains the firmware for a motorized magnetic-loop antenna tuner, written in Rust,
//! targeting an STM32F767 MCU. A DC motor turns the tuning capacitor through an H-bridge, two
//! limit switches bound its travel, and a client UI drives it through scan and jog buttons.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Limit switch sampling, debounce, and (with `board`) USART, ADC, EXTI and pins |
//! | [`drivers`] | H-bridge motor driver |
//! | [`control`] | Limit-gated scan/jog motion controller |
//! | [`protocol`] | `~`-delimited client messages, in and out |
//! | [`config`] | Operator settings and their persistence |
//! | [`telemetry`] | Periodic SWR reports |
//! | [`signal`] | Interrupt-to-main-loop flags |
//!
//! ## Getting Started
//!
//! Run host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod protocol;
pub mod signal;
pub mod telemetry;
