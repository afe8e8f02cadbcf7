// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! Two roles are provided:
//!
//! - [`SerialLink`] carries the client protocol. It never blocks: outbound bytes are drained from
//!   an [`OutboundQueue`] only while the transmitter has room, and inbound bytes are fed to a
//!   [`Parser`].
//! - [`Usart`] + [`SerialLogger`] print `log` records to a debug terminal with blocking writes.
//!
//! To access the debug terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::cell::RefCell;
use core::fmt::{self, Write};

use cortex_m::interrupt::{self, Mutex};
use heapless::String;
use nb::block;
use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::{Inbound, OutboundQueue, ParseError, Parser};

/// Client transport over a USART.
pub struct SerialLink<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
    parser: Parser,
}

impl<U: Instance> SerialLink<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self {
            tx,
            rx,
            parser: Parser::new(),
        }
    }

    /// Next decoded inbound message, if a full line has arrived.
    pub fn poll_inbound(&mut self) -> Option<Result<Inbound, ParseError>> {
        loop {
            let byte = match self.rx.read() {
                Ok(b) => b,
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(e)) => {
                    log::warn!("link rx error: {:?}", e);
                    return None;
                }
            };
            if let Some(result) = self.parser.push(byte) {
                return Some(result);
            }
        }
    }

    /// Move queued bytes to the transmitter until it would block.
    pub fn flush_from<const N: usize>(&mut self, queue: &mut OutboundQueue<N>) {
        while let Some(b) = queue.peek() {
            match self.tx.write(b) {
                Ok(()) => {
                    queue.pop();
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    log::warn!("link tx error");
                    break;
                }
            }
        }
    }
}

/// Blocking debug output.
pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Longest log line, excluding the CRLF terminator.
const LOG_LINE_LEN: usize = 128;

/// `log` backend on the debug USART. Output format: `[LEVEL] target: message\r\n`.
pub struct SerialLogger {
    out: Mutex<RefCell<Option<Usart<pac::USART2>>>>,
}

impl SerialLogger {
    pub const fn new() -> Self {
        Self {
            out: Mutex::new(RefCell::new(None)),
        }
    }

    /// Take ownership of `usart` and register as the global logger.
    pub fn install(
        &'static self,
        usart: Usart<pac::USART2>,
        level: log::LevelFilter,
    ) -> Result<(), log::SetLoggerError> {
        interrupt::free(|cs| self.out.borrow(cs).replace(Some(usart)));
        log::set_logger(self)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Overlong records are cut off at the buffer size.
        let mut line: String<LOG_LINE_LEN> = String::new();
        let _ = write!(
            line,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );

        // Blocking writes happen with interrupts enabled. A record logged from an interrupt while
        // the port is out is dropped.
        let Some(mut out) = interrupt::free(|cs| self.out.borrow(cs).borrow_mut().take()) else {
            return;
        };
        out.write_str(&line);
        out.write_str("\r\n");
        interrupt::free(|cs| self.out.borrow(cs).replace(Some(out)));
    }

    fn flush(&self) {
        let Some(mut out) = interrupt::free(|cs| self.out.borrow(cs).borrow_mut().take()) else {
            return;
        };
        out.flush();
        interrupt::free(|cs| self.out.borrow(cs).replace(Some(out)));
    }
}
