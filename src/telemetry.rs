// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic SWR reporting.
//!
//! A directional coupler gives two detector voltages, forward and reflected. The standing wave
//! ratio follows from their ratio and is pushed to attached clients on a fixed interval.

use crate::protocol::{Broadcaster, Notifier};

/// Source of raw forward/reflected detector readings.
pub trait SwrSource {
    /// Returns `(forward, reflected)` in ADC counts.
    fn read(&mut self) -> (u16, u16);
}

/// `(fwd + rfl) / (fwd - rfl)`, or `None` when there is no forward power to speak of.
pub fn swr_from_readings(forward: u16, reflected: u16) -> Option<f32> {
    if forward <= reflected {
        return None;
    }
    let f = f32::from(forward);
    let r = f32::from(reflected);
    Some((f + r) / (f - r))
}

pub struct Telemetry {
    interval_ms: u32,
    last_ms: Option<u32>,
}

impl Telemetry {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Sample and broadcast if the interval has elapsed. The first call always reports.
    ///
    /// Returns `true` when a reading was sent.
    pub fn tick<S, N>(&mut self, now_ms: u32, source: &mut S, out: &mut Broadcaster<N>) -> bool
    where
        S: SwrSource,
        N: Notifier,
    {
        if let Some(last) = self.last_ms {
            if now_ms.wrapping_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);

        let (fwd, rfl) = source.read();
        let swr = swr_from_readings(fwd, rfl);
        if swr.is_none() {
            log::debug!("no forward power (fwd={}, rfl={})", fwd, rfl);
        }
        out.announce_swr(swr);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u16, u16);

    impl SwrSource for Fixed {
        fn read(&mut self) -> (u16, u16) {
            (self.0, self.1)
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Notifier for Recorder {
        fn notify(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    #[test]
    fn ratio() {
        assert_eq!(swr_from_readings(300, 100), Some(2.0));
        assert_eq!(swr_from_readings(1000, 0), Some(1.0));
        assert_eq!(swr_from_readings(100, 100), None);
        assert_eq!(swr_from_readings(0, 50), None);
    }

    #[test]
    fn reports_on_interval() {
        let mut t = Telemetry::new(5000);
        let mut src = Fixed(300, 100);
        let mut out = Broadcaster::new(Recorder::default());

        assert!(t.tick(10, &mut src, &mut out));
        assert!(!t.tick(4000, &mut src, &mut out));
        src.1 = 400;
        assert!(t.tick(5010, &mut src, &mut out));

        assert_eq!(out.notifier().0, ["swr~2.00", "swr~--"]);
    }

    #[test]
    fn interval_survives_wraparound() {
        let mut t = Telemetry::new(100);
        let mut src = Fixed(300, 100);
        let mut out = Broadcaster::new(Recorder::default());

        assert!(t.tick(u32::MAX - 10, &mut src, &mut out));
        assert!(!t.tick(50, &mut src, &mut out));
        assert!(t.tick(90, &mut src, &mut out));
    }
}
