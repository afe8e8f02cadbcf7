// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Debounce strategies for digital inputs.
//!
//! A [`Debounce`] sits between the raw pin sample and the committed level that edge detection
//! works on. Swapping the strategy changes how noisy inputs are treated without changing the
//! [`LimitSwitch`](crate::hw::LimitSwitch) interface.

/// Turns raw samples into a committed level.
pub trait Debounce {
    /// Feed one raw sample taken at `now_ms` and return the committed level.
    fn filter(&mut self, raw: bool, now_ms: u32) -> bool;

    /// Force the committed level, e.g. from the first sample at startup.
    fn reset(&mut self, level: bool);
}

/// No filtering: the raw sample is committed as-is.
#[derive(Copy, Clone, Debug, Default)]
pub struct Immediate;

impl Debounce for Immediate {
    #[inline]
    fn filter(&mut self, raw: bool, _now_ms: u32) -> bool {
        raw
    }

    #[inline]
    fn reset(&mut self, _level: bool) {}
}

/// Minimum stable-time filter.
///
/// A new level is committed only after every sample for `stable_ms` has differed from the
/// committed level. A single sample matching the committed level restarts the timer.
#[derive(Copy, Clone, Debug)]
pub struct MinStableTime {
    stable_ms: u32,
    committed: bool,
    /// Time of the first sample in the current run that differs from `committed`.
    pending_since: Option<u32>,
}

impl MinStableTime {
    pub fn new(stable_ms: u32) -> Self {
        Self {
            stable_ms,
            committed: false,
            pending_since: None,
        }
    }
}

impl Debounce for MinStableTime {
    fn filter(&mut self, raw: bool, now_ms: u32) -> bool {
        if raw == self.committed {
            self.pending_since = None;
            return self.committed;
        }

        let since = *self.pending_since.get_or_insert(now_ms);
        if now_ms.wrapping_sub(since) >= self.stable_ms {
            self.committed = raw;
            self.pending_since = None;
        }

        self.committed
    }

    fn reset(&mut self, level: bool) {
        self.committed = level;
        self.pending_since = None;
    }
}
