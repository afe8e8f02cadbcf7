// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod broadcast;
pub mod messages;
pub mod outbound;
pub mod parser;

pub use broadcast::{Broadcaster, Notifier};
pub use outbound::OutboundQueue;
pub use parser::{Inbound, ParseError, Parser};
