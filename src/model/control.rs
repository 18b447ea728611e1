use crate::config::{GLOBAL_MIDI_CHANNEL, MIDI_VALUE_MAX, NAME_CHAR_MAX, NAME_CHAR_MIN, NAME_LEN};

/// Fixed-width, printable-ASCII control name.
///
/// Every byte stays in `[NAME_CHAR_MIN, NAME_CHAR_MAX]`, so the name is
/// always valid UTF-8 and always exactly [`NAME_LEN`] characters wide.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlName([u8; NAME_LEN]);

impl ControlName {
    /// All-spaces name.
    pub const fn blank() -> Self {
        Self([b' '; NAME_LEN])
    }

    /// Build a name from text: truncated to [`NAME_LEN`], padded with
    /// spaces, non-printable characters replaced by a space.
    pub fn new(text: &str) -> Self {
        let mut name = Self::blank();
        for (slot, c) in name.0.iter_mut().zip(text.chars()) {
            *slot = if c.is_ascii() && (NAME_CHAR_MIN..=NAME_CHAR_MAX).contains(&(c as u8)) {
                c as u8
            } else {
                b' '
            };
        }
        name
    }

    /// Character code at `pos`.
    ///
    /// # Panics
    /// If `pos >= NAME_LEN`.
    pub fn char_at(&self, pos: usize) -> u8 {
        self.0[pos]
    }

    /// Replace the character at `pos`, clamped into the printable range.
    ///
    /// # Panics
    /// If `pos >= NAME_LEN`.
    pub fn set_char(&mut self, pos: usize, code: u8) {
        self.0[pos] = code.clamp(NAME_CHAR_MIN, NAME_CHAR_MAX);
    }

    /// Raw character codes.
    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only bytes in 32..=127 are ever stored.
        core::str::from_utf8(&self.0).unwrap_or("?????")
    }
}

impl Default for ControlName {
    fn default() -> Self {
        Self::blank()
    }
}

impl core::fmt::Debug for ControlName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

/// Behaviour of a control button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonType {
    /// High while held, low on release.
    #[default]
    Push,
    /// Each press flips between low and high.
    Toggle,
}

/// A rotary encoder mapped to a MIDI CC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Encoder {
    pub name: ControlName,
    /// 0..=15, or [`GLOBAL_MIDI_CHANNEL`] to follow the viewed channel.
    pub midi_channel: u8,
    /// CC number, 0..=127.
    pub controller: u8,
    /// Lowest value sent, `<= max_value`.
    pub min_value: u8,
    /// Highest value sent, `<= 127`.
    pub max_value: u8,
    /// Runtime value, kept inside `[min_value, max_value]` by the model store.
    pub value: u8,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            name: ControlName::blank(),
            midi_channel: GLOBAL_MIDI_CHANNEL,
            controller: 0,
            min_value: 0,
            max_value: MIDI_VALUE_MAX,
            value: 0,
        }
    }
}

impl Encoder {
    /// Factory record for encoder `index` on `page`.
    pub fn factory(page: usize, index: usize) -> Self {
        Self {
            name: numbered_name(b'E', index),
            controller: factory_controller(page, index, 0),
            ..Self::default()
        }
    }

    /// Whether the configuration fields satisfy their range invariants.
    pub fn is_valid(&self) -> bool {
        self.midi_channel <= GLOBAL_MIDI_CHANNEL
            && self.controller <= MIDI_VALUE_MAX
            && self.min_value <= self.max_value
            && self.max_value <= MIDI_VALUE_MAX
    }
}

/// A control button mapped to a MIDI CC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pub name: ControlName,
    /// 0..=15, or [`GLOBAL_MIDI_CHANNEL`] to follow the viewed channel.
    pub midi_channel: u8,
    /// CC number, 0..=127.
    pub controller: u8,
    pub button_type: ButtonType,
    /// Value sent when off, `< value_high`.
    pub value_low: u8,
    /// Value sent when on, `<= 127`.
    pub value_high: u8,
    /// Runtime on/off state.
    pub on: bool,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            name: ControlName::blank(),
            midi_channel: GLOBAL_MIDI_CHANNEL,
            controller: 0,
            button_type: ButtonType::Push,
            value_low: 0,
            value_high: MIDI_VALUE_MAX,
            on: false,
        }
    }
}

impl Button {
    /// Factory record for button `index` on `page`.
    pub fn factory(page: usize, index: usize) -> Self {
        Self {
            name: numbered_name(b'B', index),
            controller: factory_controller(page, index, 6),
            ..Self::default()
        }
    }

    /// Value currently sent for this button.
    pub fn value(&self) -> u8 {
        if self.on {
            self.value_high
        } else {
            self.value_low
        }
    }

    /// Whether the configuration fields satisfy their range invariants.
    pub fn is_valid(&self) -> bool {
        self.midi_channel <= GLOBAL_MIDI_CHANNEL
            && self.controller <= MIDI_VALUE_MAX
            && self.value_low < self.value_high
            && self.value_high <= MIDI_VALUE_MAX
    }
}

/// "Enc 1" .. "Enc 6" / "But 1" .. "But 6".
fn numbered_name(kind: u8, index: usize) -> ControlName {
    let mut name = ControlName::new(if kind == b'E' { "Enc  " } else { "But  " });
    name.set_char(4, b'1' + (index % 10) as u8);
    name
}

/// Factory CC layout: 12 consecutive CCs per page starting at CC 20.
fn factory_controller(page: usize, index: usize, offset: usize) -> u8 {
    let cc = 20 + page * 12 + offset + index;
    cc.min(MIDI_VALUE_MAX as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_padded_and_truncated() {
        assert_eq!(ControlName::new("Cut").as_str(), "Cut  ");
        assert_eq!(ControlName::new("Resonance").as_str(), "Reson");
        assert_eq!(ControlName::new("").as_str(), "     ");
    }

    #[test]
    fn name_replaces_unprintable_chars() {
        assert_eq!(ControlName::new("a\tb\u{e9}c").as_str(), "a b c");
    }

    #[test]
    fn set_char_clamps_to_printable() {
        let mut name = ControlName::new("ABCDE");
        name.set_char(0, 5);
        assert_eq!(name.char_at(0), NAME_CHAR_MIN);
        name.set_char(4, 200);
        assert_eq!(name.char_at(4), NAME_CHAR_MAX);
        // DEL is still valid UTF-8.
        assert_eq!(name.as_str().len(), NAME_LEN);
    }

    #[test]
    fn factory_records_are_valid() {
        for page in 0..crate::config::PAGE_COUNT {
            for index in 0..crate::config::CONTROLS_PER_PAGE {
                assert!(Encoder::factory(page, index).is_valid());
                assert!(Button::factory(page, index).is_valid());
            }
        }
        assert_eq!(Encoder::factory(0, 2).name.as_str(), "Enc 3");
        assert_eq!(Button::factory(0, 0).name.as_str(), "But 1");
        assert_eq!(Encoder::factory(0, 0).controller, 20);
        assert_eq!(Button::factory(0, 0).controller, 26);
    }

    #[test]
    fn button_value_follows_state() {
        let mut button = Button {
            value_low: 10,
            value_high: 90,
            ..Button::default()
        };
        assert_eq!(button.value(), 10);
        button.on = true;
        assert_eq!(button.value(), 90);
    }

    #[test]
    fn invalid_ranges_are_detected() {
        let enc = Encoder {
            min_value: 50,
            max_value: 40,
            ..Encoder::default()
        };
        assert!(!enc.is_valid());

        let button = Button {
            value_low: 7,
            value_high: 7,
            ..Button::default()
        };
        assert!(!button.is_valid());
    }
}
