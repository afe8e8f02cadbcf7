// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side fakes for the pins and transport the controller is wired to.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::v2::InputPin;
use embedded_hal::PwmPin;

use magloop::config::Settings;
use magloop::control::MotionController;
use magloop::drivers::HBridge;
use magloop::hw::{ActiveLevel, Immediate, LimitSwitch};
use magloop::protocol::Notifier;

/// Input pin whose level is set from the test.
#[derive(Clone, Default)]
pub struct SharedPin(pub Rc<Cell<bool>>);

impl SharedPin {
    pub fn set(&self, high: bool) {
        self.0.set(high);
    }
}

impl InputPin for SharedPin {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

pub const PWM_MAX: u16 = 255;

/// PWM channel that records every duty written to it.
#[derive(Clone, Default)]
pub struct ScopePwm(pub Rc<RefCell<Vec<u16>>>);

impl ScopePwm {
    pub fn duty(&self) -> Option<u16> {
        self.0.borrow().last().copied()
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().len()
    }
}

impl PwmPin for ScopePwm {
    type Duty = u16;

    fn disable(&mut self) {}

    fn enable(&mut self) {}

    fn get_duty(&self) -> u16 {
        self.duty().unwrap_or(0)
    }

    fn get_max_duty(&self) -> u16 {
        PWM_MAX
    }

    fn set_duty(&mut self, duty: u16) {
        self.0.borrow_mut().push(duty);
    }
}

/// Notifier that keeps every message.
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<String>>>);

impl Recorder {
    pub fn take(&self) -> Vec<String> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.borrow().iter().any(|m| m == message)
    }
}

impl Notifier for Recorder {
    fn notify(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

pub type Limit = LimitSwitch<SharedPin, Immediate>;
pub type Bridge = HBridge<ScopePwm, ScopePwm>;
pub type Controller = MotionController<Limit, Bridge, Recorder>;

/// Controller wired to fakes, with handles to poke the inputs and inspect the outputs.
pub struct Bench {
    pub up: SharedPin,
    pub down: SharedPin,
    pub in1: ScopePwm,
    pub in2: ScopePwm,
    pub out: Recorder,
    pub ctl: Controller,
}

impl Bench {
    pub fn new() -> Self {
        Self::with(false, false, Settings::default())
    }

    /// Start with the given raw limit levels already present.
    pub fn with(up_active: bool, down_active: bool, settings: Settings) -> Self {
        let up = SharedPin::default();
        let down = SharedPin::default();
        up.set(up_active);
        down.set(down_active);

        let in1 = ScopePwm::default();
        let in2 = ScopePwm::default();
        let out = Recorder::default();

        let ctl = MotionController::new(
            LimitSwitch::new(up.clone(), ActiveLevel::High, Immediate),
            LimitSwitch::new(down.clone(), ActiveLevel::High, Immediate),
            HBridge::new(in1.clone(), in2.clone()),
            out.clone(),
            settings,
        );

        Self {
            up,
            down,
            in1,
            in2,
            out,
            ctl,
        }
    }

    /// Current (IN1, IN2) duties.
    pub fn duties(&self) -> (u16, u16) {
        (
            self.in1.duty().unwrap_or(0),
            self.in2.duty().unwrap_or(0),
        )
    }

    pub fn braked(&self) -> bool {
        self.duties() == (PWM_MAX, PWM_MAX)
    }
}
