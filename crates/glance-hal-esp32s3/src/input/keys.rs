use embedded_hal::digital::InputPin;

use glance_core::input::ButtonEvent;

#[derive(Debug, Clone, Copy)]
pub struct KeysConfig {
    active_low: bool,
    debounce_polls: u8,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            // The HAT wires every key to ground with an internal pull-up.
            active_low: true,
            debounce_polls: 3,
        }
    }
}

impl KeysConfig {
    pub const fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    pub const fn with_debounce_polls(mut self, debounce_polls: u8) -> Self {
        self.debounce_polls = debounce_polls;
        self
    }
}

#[derive(Debug)]
pub enum KeysError<E1, E2, E3, E4> {
    Key1(E1),
    Key2(E2),
    Key3(E3),
    Key4(E4),
}

type KeysResult<E1, E2, E3, E4, T> = Result<T, KeysError<E1, E2, E3, E4>>;

#[derive(Debug, Clone, Copy)]
struct DebouncedKey {
    raw: bool,
    stable: bool,
    stable_count: u8,
}

impl DebouncedKey {
    const fn new(pressed: bool) -> Self {
        Self {
            raw: pressed,
            stable: pressed,
            stable_count: 0,
        }
    }

    /// Folds one sample in; true on a debounced press edge.
    fn feed(&mut self, pressed: bool, debounce_polls: u8) -> bool {
        if pressed == self.raw {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.raw = pressed;
            self.stable_count = 0;
        }

        if self.stable_count >= debounce_polls.max(1) && self.stable != self.raw {
            self.stable = self.raw;
            return self.stable;
        }

        false
    }
}

/// The four momentary keys on the e-paper HAT, debounced by repeated polls.
#[derive(Debug)]
pub struct EpdHatKeys<K1, K2, K3, K4> {
    key1: K1,
    key2: K2,
    key3: K3,
    key4: K4,
    config: KeysConfig,
    states: [DebouncedKey; 4],
}

impl<K1, K2, K3, K4> EpdHatKeys<K1, K2, K3, K4>
where
    K1: InputPin,
    K2: InputPin,
    K3: InputPin,
    K4: InputPin,
{
    pub fn new(
        mut key1: K1,
        mut key2: K2,
        mut key3: K3,
        mut key4: K4,
        config: KeysConfig,
    ) -> KeysResult<K1::Error, K2::Error, K3::Error, K4::Error, Self> {
        let levels = [
            key1.is_high().map_err(KeysError::Key1)?,
            key2.is_high().map_err(KeysError::Key2)?,
            key3.is_high().map_err(KeysError::Key3)?,
            key4.is_high().map_err(KeysError::Key4)?,
        ];

        let states = [
            DebouncedKey::new(pressed_from_level(levels[0], config.active_low)),
            DebouncedKey::new(pressed_from_level(levels[1], config.active_low)),
            DebouncedKey::new(pressed_from_level(levels[2], config.active_low)),
            DebouncedKey::new(pressed_from_level(levels[3], config.active_low)),
        ];

        Ok(Self {
            key1,
            key2,
            key3,
            key4,
            config,
            states,
        })
    }

    /// Samples all four keys once. Returns the lowest-numbered key that
    /// completed a press edge on this poll.
    pub fn poll(
        &mut self,
    ) -> KeysResult<K1::Error, K2::Error, K3::Error, K4::Error, Option<ButtonEvent>> {
        let active_low = self.config.active_low;
        let debounce = self.config.debounce_polls;

        let levels = [
            self.key1.is_high().map_err(KeysError::Key1)?,
            self.key2.is_high().map_err(KeysError::Key2)?,
            self.key3.is_high().map_err(KeysError::Key3)?,
            self.key4.is_high().map_err(KeysError::Key4)?,
        ];

        let events = [
            ButtonEvent::Button1,
            ButtonEvent::Button2,
            ButtonEvent::Button3,
            ButtonEvent::Button4,
        ];

        let mut pressed = None;
        for (index, level) in levels.into_iter().enumerate() {
            let edge = self.states[index].feed(pressed_from_level(level, active_low), debounce);
            if edge && pressed.is_none() {
                pressed = Some(events[index]);
            }
        }

        Ok(pressed)
    }
}

const fn pressed_from_level(level_high: bool, active_low: bool) -> bool {
    if active_low { !level_high } else { level_high }
}
