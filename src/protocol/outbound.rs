// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bounded, lossy byte queue between the broadcaster and a serial transport.
//!
//! Whole lines are accepted or dropped, never truncated, so the far end only ever sees complete
//! messages. The transport drains it a byte at a time whenever the UART can take more.

use heapless::Deque;

use crate::protocol::broadcast::Notifier;

pub struct OutboundQueue<const N: usize> {
    bytes: Deque<u8, N>,
    dropped: u32,
}

impl<const N: usize> OutboundQueue<N> {
    pub fn new() -> Self {
        Self {
            bytes: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue `line` followed by `\n`. Returns `false` if it did not fit and was dropped.
    pub fn push_line(&mut self, line: &str) -> bool {
        let needed = line.len() + 1;
        if self.bytes.capacity() - self.bytes.len() < needed {
            self.dropped = self.dropped.wrapping_add(1);
            return false;
        }
        for &b in line.as_bytes() {
            let _ = self.bytes.push_back(b);
        }
        let _ = self.bytes.push_back(b'\n');
        true
    }

    /// Next byte to put on the wire.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.front().copied()
    }

    /// Remove the byte returned by [`peek`](Self::peek) once the UART accepted it.
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of lines dropped because the queue was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for OutboundQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Notifier for OutboundQueue<N> {
    fn notify(&mut self, message: &str) {
        if !self.push_line(message) {
            log::warn!("outbound queue full, dropped {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<const N: usize>(q: &mut OutboundQueue<N>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(b) = q.pop() {
            out.push(b);
        }
        out
    }

    #[test]
    fn lines_are_newline_terminated() {
        let mut q: OutboundQueue<32> = OutboundQueue::new();
        assert!(q.push_line("led~0~Red"));
        assert_eq!(q.peek(), Some(b'l'));
        assert_eq!(drain(&mut q), b"led~0~Red\n");
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops_whole_line() {
        let mut q: OutboundQueue<12> = OutboundQueue::new();
        assert!(q.push_line("led~0~Red"));
        assert!(!q.push_line("led~1~Red"));
        assert_eq!(q.dropped(), 1);
        assert_eq!(drain(&mut q), b"led~0~Red\n");
    }
}
