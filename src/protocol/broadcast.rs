// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Outbound state notifications.
//!
//! The broadcaster owns no hardware. It renders controller state into protocol strings and hands
//! them to a [`Notifier`], which is expected to return immediately and may drop messages when no
//! client is attached.

use core::fmt::Write;

use heapless::String;

use crate::control::{Actor, ButtonState, Direction};
use crate::protocol::messages::*;

/// Longest outbound message, e.g. `btn~3~false~RoyalBlue`.
pub const MAX_MESSAGE_LEN: usize = 48;

pub type Message = String<MAX_MESSAGE_LEN>;

/// Transport sink for outbound messages. Must not block.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

pub struct Broadcaster<N> {
    notifier: N,
}

impl<N: Notifier> Broadcaster<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    /// Report one button.
    pub fn announce(&mut self, actor: Actor, state: &ButtonState) {
        let msg = button_message(actor, state);
        self.send(&msg);
    }

    /// Report one limit LED.
    pub fn announce_limit(&mut self, which: Direction, active: bool) {
        let msg = limit_message(which, active);
        self.send(&msg);
    }

    /// Replay the full snapshot, e.g. for a freshly attached client.
    pub fn announce_all(&mut self, buttons: &[ButtonState; 4], limits: [bool; 2]) {
        for dir in Direction::ALL {
            self.announce_limit(dir, limits[usize::from(dir.index())]);
        }
        for actor in Actor::ALL {
            self.announce(actor, &buttons[usize::from(actor.index())]);
        }
    }

    /// Report the latest SWR reading. `None` renders as `--`.
    pub fn announce_swr(&mut self, swr: Option<f32>) {
        let mut msg = Message::new();
        let _ = match swr {
            Some(v) => write!(msg, "{}{}{:.2}", PREFIX_SWR, SEPARATOR, v),
            None => write!(msg, "{}{}--", PREFIX_SWR, SEPARATOR),
        };
        self.send(&msg);
    }

    #[inline]
    pub fn notifier(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn send(&mut self, msg: &str) {
        log::debug!("notify {}", msg);
        self.notifier.notify(msg);
    }
}

/// `btn~<actor>~<depressed>~<color>`
pub fn button_message(actor: Actor, state: &ButtonState) -> Message {
    let mut msg = Message::new();
    let _ = write!(
        msg,
        "{p}{s}{i}{s}{d}{s}{c}",
        p = PREFIX_BUTTON,
        s = SEPARATOR,
        i = actor.index(),
        d = state.depressed,
        c = button_color(actor, state),
    );
    msg
}

/// `led~<limit>~<color>`
pub fn limit_message(which: Direction, active: bool) -> Message {
    let mut msg = Message::new();
    let _ = write!(
        msg,
        "{p}{s}{i}{s}{c}",
        p = PREFIX_LED,
        s = SEPARATOR,
        i = which.index(),
        c = led_color(active),
    );
    msg
}
