// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Travel-limit sensor with edge detection.
//!
//! All hardware access happens in [`EdgeDetector::poll`]. The queries only look at the last two
//! committed samples, so several consumers can ask `rose()` / `fell()` / `is_active()` within the
//! same control tick and see a consistent answer.
//!
//! Example:
//! ```ignore
//! let mut up = LimitSwitch::new(pin, ActiveLevel::High, MinStableTime::new(50));
//!
//! loop {
//!     up.poll(now_ms);
//!     if up.rose() {
//!         // end of travel reached
//!     }
//! }
//! ```

use embedded_hal::digital::v2::InputPin;

use crate::hw::debounce::{Debounce, Immediate};

/// Electrical level at which the switch reports "limit reached".
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// Sampled digital signal with rising/falling edge queries.
pub trait EdgeDetector {
    /// Take one sample, shifting the current state into the previous one.
    fn poll(&mut self, now_ms: u32);

    /// Inactive on the previous poll, active now.
    fn rose(&self) -> bool;

    /// Active on the previous poll, inactive now.
    fn fell(&self) -> bool;

    /// Active as of the last poll.
    fn is_active(&self) -> bool;
}

/// One physical limit switch.
pub struct LimitSwitch<PIN, F = Immediate> {
    pin: PIN,
    active: ActiveLevel,
    filter: F,
    current: bool,
    previous: bool,
}

impl<PIN: InputPin, F: Debounce> LimitSwitch<PIN, F> {
    /// Bind a switch to `pin` and take the initial sample. No edge is reported for the initial
    /// state.
    pub fn new(pin: PIN, active: ActiveLevel, mut filter: F) -> Self {
        let level = read_active(&pin, active);
        filter.reset(level);
        Self {
            pin,
            active,
            filter,
            current: level,
            previous: level,
        }
    }
}

impl<PIN: InputPin> LimitSwitch<PIN, Immediate> {
    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High, Immediate)
    }
    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low, Immediate)
    }
}

impl<PIN: InputPin, F: Debounce> EdgeDetector for LimitSwitch<PIN, F> {
    fn poll(&mut self, now_ms: u32) {
        let raw = read_active(&self.pin, self.active);
        self.previous = self.current;
        self.current = self.filter.filter(raw, now_ms);
    }

    #[inline]
    fn rose(&self) -> bool {
        !self.previous && self.current
    }

    #[inline]
    fn fell(&self) -> bool {
        self.previous && !self.current
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.current
    }
}

/// Read the pin as "limit active". A failed read counts as active.
fn read_active<PIN: InputPin>(pin: &PIN, active: ActiveLevel) -> bool {
    let high = match active {
        ActiveLevel::High => pin.is_high(),
        ActiveLevel::Low => pin.is_low(),
    };
    match high {
        Ok(level) => level,
        Err(_) => {
            log::warn!("limit switch read failed, assuming limit reached");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::debounce::MinStableTime;
    use core::cell::Cell;
    use core::convert::Infallible;

    struct FakePin<'a>(&'a Cell<bool>);

    impl InputPin for FakePin<'_> {
        type Error = Infallible;
        fn is_high(&self) -> Result<bool, Infallible> {
            Ok(self.0.get())
        }
        fn is_low(&self) -> Result<bool, Infallible> {
            Ok(!self.0.get())
        }
    }

    struct BrokenPin;

    impl InputPin for BrokenPin {
        type Error = ();
        fn is_high(&self) -> Result<bool, ()> {
            Err(())
        }
        fn is_low(&self) -> Result<bool, ()> {
            Err(())
        }
    }

    #[test]
    fn initial_state_has_no_edges() {
        let level = Cell::new(true);
        let sw = LimitSwitch::active_high(FakePin(&level));
        assert!(sw.is_active());
        assert!(!sw.rose());
        assert!(!sw.fell());
    }

    #[test]
    fn reports_rise_then_fall() {
        let level = Cell::new(false);
        let mut sw = LimitSwitch::active_high(FakePin(&level));

        level.set(true);
        sw.poll(1);
        assert!(sw.rose());
        assert!(!sw.fell());
        assert!(sw.is_active());

        level.set(false);
        sw.poll(2);
        assert!(sw.fell());
        assert!(!sw.rose());
        assert!(!sw.is_active());
    }

    #[test]
    fn second_poll_without_change_clears_edge() {
        let level = Cell::new(false);
        let mut sw = LimitSwitch::active_high(FakePin(&level));

        level.set(true);
        sw.poll(1);
        assert!(sw.rose());
        sw.poll(2);
        assert!(!sw.rose());
        assert!(!sw.fell());
        assert!(sw.is_active());
    }

    #[test]
    fn active_low_inverts_the_pin() {
        let level = Cell::new(true);
        let mut sw = LimitSwitch::active_low(FakePin(&level));
        assert!(!sw.is_active());

        level.set(false);
        sw.poll(1);
        assert!(sw.rose());
    }

    #[test]
    fn debounced_edge_waits_for_stable_time() {
        let level = Cell::new(false);
        let mut sw = LimitSwitch::new(FakePin(&level), ActiveLevel::High, MinStableTime::new(50));

        level.set(true);
        sw.poll(0);
        assert!(!sw.rose());
        sw.poll(20);
        assert!(!sw.is_active());
        sw.poll(50);
        assert!(sw.rose());
        sw.poll(60);
        assert!(!sw.rose());
    }

    #[test]
    fn read_error_counts_as_active() {
        let sw = LimitSwitch::active_high(BrokenPin);
        assert!(sw.is_active());
    }
}
