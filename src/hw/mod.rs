// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! Pin-level building blocks. [`debounce`] and [`limit_switch`] only depend on `embedded-hal`
//! traits; everything else talks to the STM32F7 and needs the `board` feature.

pub mod debounce;
pub mod limit_switch;

#[cfg(feature = "board")]
pub mod adc;
#[cfg(feature = "board")]
pub mod exti;
#[cfg(feature = "board")]
pub mod pins;
#[cfg(feature = "board")]
pub mod usart;

pub use debounce::{Debounce, Immediate, MinStableTime};
pub use limit_switch::{ActiveLevel, EdgeDetector, LimitSwitch};

#[cfg(feature = "board")]
pub use adc::{Adc, CouplerAdc};
#[cfg(feature = "board")]
pub use pins::BoardPins;
#[cfg(feature = "board")]
pub use usart::{SerialLink, SerialLogger, Usart};
