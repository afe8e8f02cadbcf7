// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767 tuner controller board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Analog, ErasedPin, Input, PullDown},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub link: Usart1Pins,
    pub debug: Usart2Pins,
    pub bridge: BridgePins,
    pub limits: LimitPins,
    pub swr: SwrPins,
}

/// Client transport
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Debug log output
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// H-bridge inputs
pub struct BridgePins {
    pub in1: gpiod::PD12<Alternate<2>>, // TIM4_CH1 (PWM)
    pub in2: gpiod::PD13<Alternate<2>>, // TIM4_CH2 (PWM)
}

/// Travel limit switches on PE7/PE8, closed = high. Both share EXTI9_5.
///
/// Erased so both switches have the same type.
pub struct LimitPins {
    pub up: ErasedPin<Input<PullDown>>,
    pub down: ErasedPin<Input<PullDown>>,
}

/// Directional coupler detector outputs
pub struct SwrPins {
    pub forward: gpioc::PC4<Analog>,   // ADC1_IN14
    pub reflected: gpioc::PC5<Analog>, // ADC1_IN15
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            link: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            debug: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            bridge: BridgePins {
                in1: gpiod.pd12.into_alternate::<2>(),
                in2: gpiod.pd13.into_alternate::<2>(),
            },

            limits: LimitPins {
                up: gpioe.pe7.into_pull_down_input().erase(),
                down: gpioe.pe8.into_pull_down_input().erase(),
            },

            swr: SwrPins {
                forward: gpioc.pc4.into_analog(),
                reflected: gpioc.pc5.into_analog(),
            },
        }
    }
}
