// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use magloop::config::{MemoryStore, Settings};
use magloop::control::MotionController;
use magloop::drivers::HBridge;
use magloop::hw::{
    exti, ActiveLevel, Adc, BoardPins, CouplerAdc, LimitSwitch, MinStableTime, SerialLink,
    SerialLogger, Usart,
};
use magloop::protocol::{Inbound, OutboundQueue};
use magloop::signal::EdgeFlag;
use magloop::telemetry::Telemetry;

/// Periodic control tick (ms)
const TICK_MS: u32 = 10;
/// Outbound buffer for the client link (bytes)
const OUTBOUND_LEN: usize = 1024;

/// ADC1 channels of the coupler detectors (PC4, PC5)
const SWR_FORWARD_CHANNEL: u8 = 14;
const SWR_REFLECTED_CHANNEL: u8 = 15;

static MILLIS: AtomicU32 = AtomicU32::new(0);
static LIMIT_EDGE: EdgeFlag = EdgeFlag::new();
static LOGGER: SerialLogger = SerialLogger::new();

#[inline]
fn millis() -> u32 {
    MILLIS.load(Ordering::Relaxed)
}

fn serial_config() -> Config {
    Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART2 (DBG)
    let debug = Serial::new(
        dp.USART2,
        (pins.debug.tx, pins.debug.rx),
        &clocks,
        serial_config(),
    );
    LOGGER
        .install(Usart::new(debug), log::LevelFilter::Info)
        .unwrap();
    log::info!("magloop starting");

    // SysTick, 1 kHz
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(clocks.sysclk().raw() / 1000 - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    // Settings
    let store = MemoryStore::new();
    let settings = Settings::restore(&store);

    // H-bridge on TIM4 CH1/CH2
    let (in1, in2) = dp
        .TIM4
        .pwm_hz((pins.bridge.in1, pins.bridge.in2), 1.kHz(), &clocks)
        .split();
    let bridge = HBridge::new(in1, in2);

    // Limit switches
    let limit_up = LimitSwitch::new(
        pins.limits.up,
        ActiveLevel::High,
        MinStableTime::new(settings.debounce_ms),
    );
    let limit_down = LimitSwitch::new(
        pins.limits.down,
        ActiveLevel::High,
        MinStableTime::new(settings.debounce_ms),
    );
    exti::enable_limit_interrupts();

    // SWR coupler
    let _swr_pins = pins.swr;
    let mut coupler = CouplerAdc::new(
        Adc::adc1(dp.ADC1),
        SWR_FORWARD_CHANNEL,
        SWR_REFLECTED_CHANNEL,
    );
    let mut telemetry = Telemetry::new(settings.telemetry_interval_ms);

    // USART1 (client link)
    let link_serial = Serial::new(
        dp.USART1,
        (pins.link.tx, pins.link.rx),
        &clocks,
        serial_config(),
    );
    let mut link = SerialLink::new(link_serial);

    let outbound: OutboundQueue<OUTBOUND_LEN> = OutboundQueue::new();
    let mut ctl = MotionController::new(limit_up, limit_down, bridge, outbound, settings);

    ctl.tick(millis());
    ctl.announce_all();

    let mut next_tick = millis().wrapping_add(TICK_MS);

    loop {
        while let Some(inbound) = link.poll_inbound() {
            match inbound {
                Ok(Inbound::Button(request)) => {
                    ctl.handle(request, millis());
                }
                Ok(Inbound::Attach) => ctl.announce_all(),
                Ok(Inbound::Command(text)) => log::info!("command not supported: {}", text),
                Err(e) => log::warn!("dropped inbound message: {}", e),
            }
        }

        let now = millis();
        if LIMIT_EDGE.take() || (now.wrapping_sub(next_tick) as i32) >= 0 {
            ctl.tick(now);
            next_tick = now.wrapping_add(TICK_MS);
        }

        telemetry.tick(now, &mut coupler, ctl.broadcaster());
        link.flush_from(ctl.broadcaster().notifier());
    }
}

#[exception]
fn SysTick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}

#[interrupt]
fn EXTI9_5() {
    exti::clear_pending();
    LIMIT_EDGE.raise();
}
