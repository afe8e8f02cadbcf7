// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Text message schema shared with the web UI.
//!
//! Fields are separated by `~` because the command language uses `:` and `;`.
//!
//! | Direction | Form                                   |
//! | --------- | -------------------------------------- |
//! | out       | `btn~<actor>~<true\|false>~<color>`    |
//! | out       | `led~<limit>~<color>`                  |
//! | out       | `swr~<ratio>`                          |
//! | in        | `btn~<actor>~<pressed\|released>`      |
//! | in        | `scp~<command>`                        |
//! | in        | `sys~attach`                           |

use crate::control::{Actor, ButtonState, Direction, Hint};

pub const SEPARATOR: char = '~';

// Message prefixes
pub const PREFIX_BUTTON: &str = "btn";
pub const PREFIX_LED: &str = "led";
pub const PREFIX_SWR: &str = "swr";
pub const PREFIX_COMMAND: &str = "scp";
pub const PREFIX_SYSTEM: &str = "sys";

pub const PHASE_PRESSED: &str = "pressed";
pub const PHASE_RELEASED: &str = "released";
pub const SYSTEM_ATTACH: &str = "attach";

// Limit LED colors
pub const LED_COLOR_CLEAR: &str = "LimeGreen";
pub const LED_COLOR_HIT: &str = "Red";

// Button colors
pub const BTN_UP_COLOR: &str = "RoyalBlue";
pub const BTN_DOWN_COLOR: &str = "Lime";
pub const BTN_UNPRESSED_COLOR: &str = "DimGray";
pub const BTN_DISABLED_COLOR: &str = "Cloud";

/// Color shown for `actor` in `state`.
pub fn button_color(actor: Actor, state: &ButtonState) -> &'static str {
    if state.depressed {
        return match actor.direction() {
            Direction::Up => BTN_UP_COLOR,
            Direction::Down => BTN_DOWN_COLOR,
        };
    }
    match state.hint {
        Hint::Disabled => BTN_DISABLED_COLOR,
        Hint::Active | Hint::Inactive => BTN_UNPRESSED_COLOR,
    }
}

/// Color shown for a limit LED.
#[inline]
pub fn led_color(limit_active: bool) -> &'static str {
    if limit_active {
        LED_COLOR_HIT
    } else {
        LED_COLOR_CLEAR
    }
}
