// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-to-main-loop signalling.
//!
//! The limit switch EXTI handler only raises an [`EdgeFlag`]. The main loop takes it and runs a
//! control tick right away, so the limit logic itself never executes in interrupt context.

use core::sync::atomic::{AtomicBool, Ordering};

pub struct EdgeFlag(AtomicBool);

impl EdgeFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Called from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear the flag, returning whether it was raised.
    #[inline]
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for EdgeFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears() {
        static FLAG: EdgeFlag = EdgeFlag::new();
        assert!(!FLAG.take());
        FLAG.raise();
        FLAG.raise();
        assert!(FLAG.is_raised());
        assert!(FLAG.take());
        assert!(!FLAG.take());
    }
}
