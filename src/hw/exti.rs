// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! EXTI wiring for the limit switch inputs (PE7, PE8) using direct PAC register access.
//!
//! Both lines interrupt on either edge through the shared `EXTI9_5` vector. The handler is
//! expected to call [`clear_pending`] and raise an [`EdgeFlag`](crate::signal::EdgeFlag), nothing
//! more.

use stm32f7xx_hal::pac;

const LIMIT_LINES: u32 = (1 << 7) | (1 << 8);

/// Port E selector in SYSCFG_EXTICRx
const PORT_E: u32 = 0b0100;

/// Route EXTI7/EXTI8 to port E, trigger on both edges, and unmask the vector.
pub fn enable_limit_interrupts() {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

    let syscfg = unsafe { &*pac::SYSCFG::ptr() };
    // EXTI7 is EXTICR2[15:12], EXTI8 is EXTICR3[3:0]
    syscfg
        .exticr2
        .modify(|r, w| unsafe { w.bits((r.bits() & !(0xF << 12)) | (PORT_E << 12)) });
    syscfg
        .exticr3
        .modify(|r, w| unsafe { w.bits((r.bits() & !0xF) | PORT_E) });

    let exti = unsafe { &*pac::EXTI::ptr() };
    exti.rtsr
        .modify(|r, w| unsafe { w.bits(r.bits() | LIMIT_LINES) });
    exti.ftsr
        .modify(|r, w| unsafe { w.bits(r.bits() | LIMIT_LINES) });
    clear_pending();
    exti.imr
        .modify(|r, w| unsafe { w.bits(r.bits() | LIMIT_LINES) });

    unsafe { cortex_m::peripheral::NVIC::unmask(pac::Interrupt::EXTI9_5) };
}

/// Acknowledge both limit lines. Pending bits are write-one-to-clear.
#[inline]
pub fn clear_pending() {
    let exti = unsafe { &*pac::EXTI::ptr() };
    exti.pr.write(|w| unsafe { w.bits(LIMIT_LINES) });
}
