// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Message parser for the inbound text protocol.
//!
//! Bytes arrive one at a time from the transport. Complete lines are decoded into [`Inbound`]
//! values for the control loop to apply between ticks.

use core::fmt;

use heapless::{String, Vec};

use crate::control::{Actor, MotionRequest, Phase};
use crate::protocol::messages::*;

/// Longest accepted inbound line, excluding the terminator.
pub const MAX_LINE_LEN: usize = 96;

/// Decoded inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
    /// A UI button event.
    Button(MotionRequest),
    /// Text for the instrument command interpreter.
    Command(String<MAX_LINE_LEN>),
    /// A client attached and needs the full state snapshot.
    Attach,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Prefix is not one this firmware understands.
    UnknownPrefix,
    /// Button id missing or outside 0..=3.
    BadButton,
    /// Button phase is neither `pressed` nor `released`.
    BadPhase,
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded.
    Overflow,
    /// Line is not valid UTF-8.
    Encoding,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParseError::UnknownPrefix => "unknown message type",
            ParseError::BadButton => "invalid button id",
            ParseError::BadPhase => "invalid button action",
            ParseError::Overflow => "line too long",
            ParseError::Encoding => "invalid utf-8",
        };
        f.write_str(text)
    }
}

enum State {
    Collecting,
    /// Skipping the rest of an overlong line.
    Discarding,
}

pub struct Parser {
    state: State,
    line: Vec<u8, MAX_LINE_LEN>,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Collecting,
            line: Vec::new(),
        }
    }

    /// Process a single incoming byte. Returns `Some` once a complete line has been decoded.
    pub fn push(&mut self, byte: u8) -> Option<Result<Inbound, ParseError>> {
        match self.state {
            State::Discarding => {
                if byte == b'\n' {
                    self.state = State::Collecting;
                }
                None
            }
            State::Collecting => match byte {
                b'\n' => {
                    if self.line.is_empty() {
                        return None;
                    }
                    let result = match core::str::from_utf8(&self.line) {
                        Ok(text) => parse_line(text),
                        Err(_) => Err(ParseError::Encoding),
                    };
                    self.line.clear();
                    Some(result)
                }
                b'\r' => None,
                _ => {
                    if self.line.push(byte).is_err() {
                        self.line.clear();
                        self.state = State::Discarding;
                        return Some(Err(ParseError::Overflow));
                    }
                    None
                }
            },
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one complete line (without terminator).
pub fn parse_line(line: &str) -> Result<Inbound, ParseError> {
    let (prefix, rest) = line.split_once(SEPARATOR).unwrap_or((line, ""));

    match prefix {
        PREFIX_BUTTON => {
            let (id, action) = rest.split_once(SEPARATOR).ok_or(ParseError::BadButton)?;
            let actor = id
                .parse::<u8>()
                .ok()
                .and_then(Actor::from_index)
                .ok_or(ParseError::BadButton)?;
            let phase = match action {
                PHASE_PRESSED => Phase::Press,
                PHASE_RELEASED => Phase::Release,
                _ => return Err(ParseError::BadPhase),
            };
            Ok(Inbound::Button(MotionRequest { actor, phase }))
        }
        PREFIX_COMMAND => {
            let mut text = String::new();
            text.push_str(rest).map_err(|_| ParseError::Overflow)?;
            Ok(Inbound::Command(text))
        }
        PREFIX_SYSTEM if rest == SYSTEM_ATTACH => Ok(Inbound::Attach),
        _ => Err(ParseError::UnknownPrefix),
    }
}
