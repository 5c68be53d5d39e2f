//! Tick-driven typewriter text reveal.
//!
//! Time accumulates from frame deltas and one character is revealed per
//! interval. Replacing the text drops any accumulated time, so a reveal never
//! leaks into the next line.

use std::time::Duration;

/// Default delay between revealed characters.
pub const DEFAULT_TYPING_INTERVAL: Duration = Duration::from_millis(26);

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Characters currently shown.
    revealed: usize,
    total: usize,
    pending: Duration,
    interval: Duration,
    stopped: bool,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_INTERVAL)
    }
}

impl Typewriter {
    pub fn new(interval: Duration) -> Self {
        Self {
            text: String::new(),
            revealed: 0,
            total: 0,
            pending: Duration::ZERO,
            interval,
            stopped: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start revealing `text` from the beginning, cancelling whatever was in flight.
    pub fn reset(&mut self, text: &str) {
        self.text = text.to_string();
        self.total = self.text.chars().count();
        self.revealed = 0;
        self.pending = Duration::ZERO;
    }

    /// Advance by `dt`. Returns true when more text became visible.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.stopped || !self.is_typing() {
            return false;
        }
        let before = self.revealed;
        if self.interval.is_zero() {
            self.revealed = self.total;
        } else {
            self.pending += dt;
            while self.pending >= self.interval && self.revealed < self.total {
                self.pending -= self.interval;
                self.revealed += 1;
            }
        }
        if !self.is_typing() {
            self.pending = Duration::ZERO;
        }
        self.revealed != before
    }

    /// Skip to the end of the current text.
    pub fn finish(&mut self) {
        self.revealed = self.total;
        self.pending = Duration::ZERO;
    }

    /// Freeze the display; later ticks change nothing.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending = Duration::ZERO;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True while characters remain hidden. Empty text is never typing.
    pub fn is_typing(&self) -> bool {
        self.revealed < self.total
    }

    /// The revealed prefix.
    pub fn displayed(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn reveals_one_char_per_interval() {
        let mut tw = Typewriter::new(ms(26));
        tw.reset("hello");
        assert_eq!(tw.displayed(), "");
        assert!(!tw.tick(ms(25)));
        assert!(tw.tick(ms(1)));
        assert_eq!(tw.displayed(), "h");
        tw.tick(ms(52));
        assert_eq!(tw.displayed(), "hel");
        assert!(tw.is_typing());
        tw.tick(ms(1000));
        assert_eq!(tw.displayed(), "hello");
        assert!(!tw.is_typing());
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        let mut tw = Typewriter::new(ms(10));
        tw.reset("I\u{2019}m \u{1F338}");
        tw.tick(ms(20));
        assert_eq!(tw.displayed(), "I\u{2019}");
        tw.tick(ms(30));
        assert_eq!(tw.displayed(), "I\u{2019}m \u{1F338}");
    }

    #[test]
    fn finish_skips_to_end() {
        let mut tw = Typewriter::default();
        tw.reset("a longer line of dialogue");
        tw.tick(ms(30));
        tw.finish();
        assert_eq!(tw.displayed(), tw.full_text());
        assert!(!tw.is_typing());
    }

    #[test]
    fn reset_cancels_pending_time() {
        let mut tw = Typewriter::new(ms(26));
        tw.reset("first");
        tw.tick(ms(20));
        tw.reset("second");
        // The 20 ms accumulated for "first" must not carry over.
        assert!(!tw.tick(ms(10)));
        assert_eq!(tw.displayed(), "");
        tw.tick(ms(16));
        assert_eq!(tw.displayed(), "s");
    }

    #[test]
    fn empty_text_is_finished_immediately() {
        let mut tw = Typewriter::default();
        tw.reset("");
        assert!(!tw.is_typing());
        assert!(!tw.tick(ms(100)));
        assert_eq!(tw.displayed(), "");
    }

    #[test]
    fn stop_freezes_display() {
        let mut tw = Typewriter::new(ms(26));
        tw.reset("frozen");
        tw.tick(ms(52));
        tw.stop();
        for _ in 0..100 {
            assert!(!tw.tick(ms(26)));
        }
        assert_eq!(tw.displayed(), "fr");
    }
}
