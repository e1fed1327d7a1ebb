//! Button input abstraction.
//!
//! The panel HAT carries four momentary keys. The controller consumes them
//! through [`InputProvider`], so tests can script presses; firmware feeds a
//! shared [`ButtonLatch`] from its key-scan task.

use core::convert::Infallible;
use core::sync::atomic::{AtomicU8, Ordering};

pub mod mock;

/// One of the four HAT keys, top to bottom.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ButtonEvent {
    Button1,
    Button2,
    Button3,
    Button4,
}

impl ButtonEvent {
    const fn code(self) -> u8 {
        match self {
            Self::Button1 => 1,
            Self::Button2 => 2,
            Self::Button3 => 3,
            Self::Button4 => 4,
        }
    }

    const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Button1),
            2 => Some(Self::Button2),
            3 => Some(Self::Button3),
            4 => Some(Self::Button4),
            _ => None,
        }
    }

    /// Label used on the acknowledgement screen.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Button1 => "Button 1",
            Self::Button2 => "Button 2",
            Self::Button3 => "Button 3",
            Self::Button4 => "Button 4",
        }
    }
}

/// Source of button presses for the controller.
pub trait InputProvider {
    type Error;

    /// Takes the pending press, if any. Consuming: a press is reported once.
    fn poll(&mut self) -> Result<Option<ButtonEvent>, Self::Error>;
}

/// Single-slot press latch shared between the key-scan task and the
/// controller loop.
///
/// Holds at most one press. A second press before the controller polls
/// overwrites the first (last write wins); there is no queueing, which
/// matches how fast a person can realistically work four keys against a
/// half-second tick.
pub struct ButtonLatch {
    slot: AtomicU8,
}

const EMPTY: u8 = 0;

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Records a press. Safe from any context, including ISRs.
    pub fn press(&self, event: ButtonEvent) {
        self.slot.store(event.code(), Ordering::Release);
    }

    /// Takes and clears the pending press.
    pub fn take(&self) -> Option<ButtonEvent> {
        ButtonEvent::from_code(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    /// Peeks without consuming.
    pub fn pending(&self) -> Option<ButtonEvent> {
        ButtonEvent::from_code(self.slot.load(Ordering::Acquire))
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for &ButtonLatch {
    type Error = Infallible;

    fn poll(&mut self) -> Result<Option<ButtonEvent>, Self::Error> {
        Ok(self.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_starts_empty() {
        let latch = ButtonLatch::new();
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn press_is_reported_exactly_once() {
        let latch = ButtonLatch::new();
        latch.press(ButtonEvent::Button3);

        assert_eq!(latch.take(), Some(ButtonEvent::Button3));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn later_press_overwrites_earlier() {
        let latch = ButtonLatch::new();
        latch.press(ButtonEvent::Button1);
        latch.press(ButtonEvent::Button4);

        assert_eq!(latch.take(), Some(ButtonEvent::Button4));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn pending_does_not_consume() {
        let latch = ButtonLatch::new();
        latch.press(ButtonEvent::Button2);

        assert_eq!(latch.pending(), Some(ButtonEvent::Button2));
        assert_eq!(latch.take(), Some(ButtonEvent::Button2));
    }

    #[test]
    fn latch_reference_is_an_input_provider() {
        let latch = ButtonLatch::new();
        latch.press(ButtonEvent::Button1);

        let mut provider = &latch;
        assert_eq!(provider.poll(), Ok(Some(ButtonEvent::Button1)));
        assert_eq!(provider.poll(), Ok(None));
    }
}
