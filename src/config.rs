// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator settings and their persistence.
//!
//! Every setter clamps into the range the command layer accepts, so a `Settings` value is always
//! safe to hand to the motion controller.

use heapless::LinearMap;

// Preference keys
pub const KEY_SCAN_SPEED: &str = "speedHigh";
pub const KEY_JOG_SPEED: &str = "speedLow";
pub const KEY_JOG_DURATION: &str = "jogDuration";
pub const KEY_PRESS_DURATION: &str = "pressDuration";
pub const KEY_REPEAT_INTERVAL: &str = "repeatInterval";

pub const SCAN_SPEED_RANGE: (u8, u8) = (50, 100);
pub const JOG_SPEED_MIN: u8 = 50;
pub const JOG_DURATION_RANGE: (u32, u32) = (50, 200);
pub const PRESS_DURATION_RANGE: (u32, u32) = (200, 500);
pub const REPEAT_INTERVAL_RANGE: (u32, u32) = (100, 300);

/// Key/value storage for persisted settings.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<i32>;
    fn put(&mut self, key: &'static str, value: i32);
    fn clear(&mut self);
}

/// RAM-backed store. Contents are lost on reset.
#[derive(Default)]
pub struct MemoryStore {
    entries: LinearMap<&'static str, i32, 8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(k, _)| **k == key)
            .map(|(_, v)| *v)
    }

    fn put(&mut self, key: &'static str, value: i32) {
        if self.entries.insert(key, value).is_err() {
            log::warn!("settings store full, dropping {}", key);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Operator-tunable motion and timing parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Motor speed for latching scans (%)
    scan_speed: u8,
    /// Motor speed for jogs (%), never above `scan_speed`
    jog_speed: u8,
    /// Jog run time (ms)
    jog_duration_ms: u32,
    /// Long-press threshold (ms)
    press_duration_ms: u32,
    /// Jog auto-repeat interval (ms)
    repeat_interval_ms: u32,

    /// Limit switch stable time (ms)
    pub debounce_ms: u32,
    /// SWR push interval (ms)
    pub telemetry_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_speed: 100,
            jog_speed: 50,
            jog_duration_ms: 100,
            press_duration_ms: 300,
            repeat_interval_ms: 200,
            debounce_ms: 50,
            telemetry_interval_ms: 5000,
        }
    }
}

impl Settings {
    /// Load from `store`, falling back to defaults for missing keys.
    pub fn restore<S: SettingsStore>(store: &S) -> Self {
        let d = Self::default();
        let mut s = d;
        s.set_scan_speed(store.get(KEY_SCAN_SPEED).unwrap_or(d.scan_speed.into()));
        s.set_jog_speed(store.get(KEY_JOG_SPEED).unwrap_or(d.jog_speed.into()));
        s.set_jog_duration_ms(store.get(KEY_JOG_DURATION).unwrap_or(d.jog_duration_ms as i32));
        s.set_press_duration_ms(
            store
                .get(KEY_PRESS_DURATION)
                .unwrap_or(d.press_duration_ms as i32),
        );
        s.set_repeat_interval_ms(
            store
                .get(KEY_REPEAT_INTERVAL)
                .unwrap_or(d.repeat_interval_ms as i32),
        );
        s
    }

    /// Write every persisted field to `store`.
    pub fn persist<S: SettingsStore>(&self, store: &mut S) {
        store.put(KEY_SCAN_SPEED, self.scan_speed.into());
        store.put(KEY_JOG_SPEED, self.jog_speed.into());
        store.put(KEY_JOG_DURATION, self.jog_duration_ms as i32);
        store.put(KEY_PRESS_DURATION, self.press_duration_ms as i32);
        store.put(KEY_REPEAT_INTERVAL, self.repeat_interval_ms as i32);
    }

    /// Clear `store` and return the defaults.
    pub fn factory_reset<S: SettingsStore>(store: &mut S) -> Self {
        store.clear();
        Self::restore(store)
    }

    #[inline]
    pub fn scan_speed(&self) -> u8 {
        self.scan_speed
    }

    #[inline]
    pub fn jog_speed(&self) -> u8 {
        self.jog_speed
    }

    #[inline]
    pub fn jog_duration_ms(&self) -> u32 {
        self.jog_duration_ms
    }

    #[inline]
    pub fn press_duration_ms(&self) -> u32 {
        self.press_duration_ms
    }

    #[inline]
    pub fn repeat_interval_ms(&self) -> u32 {
        self.repeat_interval_ms
    }

    /// Set the scan speed, returning the clamped value. Lowers jog speed if it would exceed it.
    pub fn set_scan_speed(&mut self, percent: i32) -> u8 {
        let (lo, hi) = SCAN_SPEED_RANGE;
        self.scan_speed = percent.clamp(lo.into(), hi.into()) as u8;
        if self.jog_speed > self.scan_speed {
            self.jog_speed = self.scan_speed;
        }
        self.scan_speed
    }

    /// Set the jog speed, clamped to [`JOG_SPEED_MIN`, scan speed].
    pub fn set_jog_speed(&mut self, percent: i32) -> u8 {
        self.jog_speed = percent.clamp(JOG_SPEED_MIN.into(), self.scan_speed.into()) as u8;
        self.jog_speed
    }

    pub fn set_jog_duration_ms(&mut self, ms: i32) -> u32 {
        self.jog_duration_ms = clamp_ms(ms, JOG_DURATION_RANGE);
        self.jog_duration_ms
    }

    pub fn set_press_duration_ms(&mut self, ms: i32) -> u32 {
        self.press_duration_ms = clamp_ms(ms, PRESS_DURATION_RANGE);
        self.press_duration_ms
    }

    pub fn set_repeat_interval_ms(&mut self, ms: i32) -> u32 {
        self.repeat_interval_ms = clamp_ms(ms, REPEAT_INTERVAL_RANGE);
        self.repeat_interval_ms
    }
}

fn clamp_ms(ms: i32, (lo, hi): (u32, u32)) -> u32 {
    ms.clamp(lo as i32, hi as i32) as u32
}
