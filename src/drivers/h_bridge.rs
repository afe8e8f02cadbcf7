// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-input brushed DC H-bridge (DRV8871 class) driven with fast-stop inverted logic.
//!
//! Truth table used here (TI DRV8871 datasheet, section 7.3.1):
//!
//! | Motion | IN1            | IN2            |
//! | ------ | -------------- | -------------- |
//! | Stop   | full           | full           |
//! | Up     | full           | inverted PWM   |
//! | Down   | inverted PWM   | full           |
//!
//! Both inputs at full level short the motor terminals (brake). The PWM duty is inverted: 0%
//! speed keeps the pin at full level, 100% speed drives it to zero.

use embedded_hal::PwmPin;

/// Commanded motor motion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Motion {
    #[default]
    Stop,
    Up,
    Down,
}

impl Motion {
    /// Decode a raw direction code (0 = stop, 1 = up, 2 = down). Anything else is `Stop`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Motion::Up,
            2 => Motion::Down,
            _ => Motion::Stop,
        }
    }
}

/// Anything that can turn a direction and speed into motor output.
pub trait MotorDrive {
    /// `speed_percent` is clamped to [0, 100]. Ignored for [`Motion::Stop`].
    fn set_motion(&mut self, motion: Motion, speed_percent: i32);
}

/// H-bridge on two hardware PWM channels.
pub struct HBridge<Pwm1, Pwm2> {
    in1: Pwm1,
    in2: Pwm2,
    motion: Motion,
    speed: u8,
}

impl<Pwm1, Pwm2> HBridge<Pwm1, Pwm2>
where
    Pwm1: PwmPin<Duty = u16>,
    Pwm2: PwmPin<Duty = u16>,
{
    /// Take ownership of both channels and start braked.
    pub fn new(mut in1: Pwm1, mut in2: Pwm2) -> Self {
        in1.set_duty(in1.get_max_duty());
        in2.set_duty(in2.get_max_duty());
        in1.enable();
        in2.enable();

        Self {
            in1,
            in2,
            motion: Motion::Stop,
            speed: 0,
        }
    }

    /// Last commanded motion.
    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Last commanded speed in percent. Zero while stopped.
    #[inline]
    pub fn speed(&self) -> u8 {
        self.speed
    }
}

impl<Pwm1, Pwm2> MotorDrive for HBridge<Pwm1, Pwm2>
where
    Pwm1: PwmPin<Duty = u16>,
    Pwm2: PwmPin<Duty = u16>,
{
    fn set_motion(&mut self, motion: Motion, speed_percent: i32) {
        let speed = speed_percent.clamp(0, 100) as u8;

        let full1 = self.in1.get_max_duty();
        let full2 = self.in2.get_max_duty();

        match motion {
            Motion::Up => {
                self.in1.set_duty(full1);
                self.in2.set_duty(inverted_duty(full2, speed));
            }
            Motion::Down => {
                self.in1.set_duty(inverted_duty(full1, speed));
                self.in2.set_duty(full2);
            }
            Motion::Stop => {
                self.in1.set_duty(full1);
                self.in2.set_duty(full2);
            }
        }

        self.motion = motion;
        self.speed = if motion == Motion::Stop { 0 } else { speed };
    }
}

/// Duty for `speed` percent under inverted logic: 0% -> `max`, 100% -> 0.
#[inline]
fn inverted_duty(max: u16, speed: u8) -> u16 {
    let on = u32::from(max) * u32::from(speed) / 100;
    max - on as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePwm {
        duty: u16,
        max: u16,
        enabled: bool,
    }

    impl FakePwm {
        fn new(max: u16) -> Self {
            Self {
                duty: 0,
                max,
                enabled: false,
            }
        }
    }

    impl PwmPin for FakePwm {
        type Duty = u16;
        fn disable(&mut self) {
            self.enabled = false;
        }
        fn enable(&mut self) {
            self.enabled = true;
        }
        fn get_duty(&self) -> u16 {
            self.duty
        }
        fn get_max_duty(&self) -> u16 {
            self.max
        }
        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    fn bridge() -> HBridge<FakePwm, FakePwm> {
        HBridge::new(FakePwm::new(255), FakePwm::new(255))
    }

    fn duties(hb: &HBridge<FakePwm, FakePwm>) -> (u16, u16) {
        (hb.in1.get_duty(), hb.in2.get_duty())
    }

    #[test]
    fn starts_braked_and_enabled() {
        let hb = bridge();
        assert_eq!(duties(&hb), (255, 255));
        assert!(hb.in1.enabled && hb.in2.enabled);
        assert_eq!(hb.motion(), Motion::Stop);
    }

    #[test]
    fn up_inverts_in2() {
        let mut hb = bridge();
        hb.set_motion(Motion::Up, 100);
        assert_eq!(duties(&hb), (255, 0));
        hb.set_motion(Motion::Up, 0);
        assert_eq!(duties(&hb), (255, 255));
        hb.set_motion(Motion::Up, 50);
        assert_eq!(duties(&hb), (255, 128));
    }

    #[test]
    fn down_swaps_roles() {
        let mut hb = bridge();
        hb.set_motion(Motion::Down, 100);
        assert_eq!(duties(&hb), (0, 255));
        hb.set_motion(Motion::Down, 50);
        assert_eq!(duties(&hb), (128, 255));
    }

    #[test]
    fn stop_ignores_speed() {
        let mut hb = bridge();
        hb.set_motion(Motion::Up, 80);
        hb.set_motion(Motion::Stop, 80);
        assert_eq!(duties(&hb), (255, 255));
        assert_eq!(hb.speed(), 0);
    }

    #[test]
    fn speed_is_clamped() {
        let mut a = bridge();
        let mut b = bridge();

        a.set_motion(Motion::Down, 250);
        b.set_motion(Motion::Down, 100);
        assert_eq!(duties(&a), duties(&b));

        a.set_motion(Motion::Up, -40);
        b.set_motion(Motion::Up, 0);
        assert_eq!(duties(&a), duties(&b));
    }

    #[test]
    fn unknown_direction_code_stops() {
        assert_eq!(Motion::from_raw(1), Motion::Up);
        assert_eq!(Motion::from_raw(2), Motion::Down);
        assert_eq!(Motion::from_raw(7), Motion::Stop);

        let mut hb = bridge();
        hb.set_motion(Motion::Up, 100);
        hb.set_motion(Motion::from_raw(9), 100);
        assert_eq!(duties(&hb), (255, 255));
    }
}
