// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Blocking ADC1 reads using direct PAC register access, and the SWR detector source built on it.
//!
//! Example:
//! ```ignore
//! let adc = Adc::adc1(dp.ADC1);
//! let mut coupler = CouplerAdc::new(adc, 14, 15);
//! let (fwd, rfl) = coupler.read();
//! ```

use stm32f7xx_hal::pac;

use crate::telemetry::SwrSource;

/// Longest sample time, 480 cycles
const SAMPLE_480: u32 = 0b111;

pub struct Adc<ADC> {
    adc: ADC,
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1: 12-bit, right-aligned, single software-triggered conversion.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        adc1.cr2.modify(|_, w| w.adon().clear_bit());
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });
        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Read a single channel (0..=18).
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;
        let ch = u32::from(channel & 0x1F);

        // Long sample time for the slow detector outputs
        if ch <= 9 {
            let shift = 3 * ch;
            adc.smpr2
                .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (SAMPLE_480 << shift)) });
        } else if ch <= 18 {
            let shift = 3 * (ch - 10);
            adc.smpr1
                .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (SAMPLE_480 << shift)) });
        }

        // Sequence length = 1 conversion
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(ch as u8) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits() as u16
    }
}

/// Forward and reflected coupler detectors on two ADC1 channels.
pub struct CouplerAdc {
    adc: Adc<pac::ADC1>,
    forward_channel: u8,
    reflected_channel: u8,
}

impl CouplerAdc {
    pub fn new(adc: Adc<pac::ADC1>, forward_channel: u8, reflected_channel: u8) -> Self {
        Self {
            adc,
            forward_channel,
            reflected_channel,
        }
    }
}

impl SwrSource for CouplerAdc {
    fn read(&mut self) -> (u16, u16) {
        let fwd = self.adc.read(self.forward_channel);
        let rfl = self.adc.read(self.reflected_channel);
        (fwd, rfl)
    }
}
