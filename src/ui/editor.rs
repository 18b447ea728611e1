//! Param editor - per-field edit rules for the control under edit.
//!
//! While an editor screen is up, the six encoders stop adjusting values
//! and each edits one attribute of the edited control instead:
//!
//! ```text
//!  a (0): move name cursor        d (3): change character at cursor
//!  b (1): MIDI channel (sign)     e (4): CC number
//!  c (2): min value / type        f (5): max value / high value
//! ```
//!
//! Every rule clamps on write and reports the single field that needs a
//! redraw, or `None` when the clamped value did not change.

use super::input_logic::{clamp_step, tick_sign};
use crate::config::{GLOBAL_MIDI_CHANNEL, MIDI_VALUE_MAX, NAME_CHAR_MAX, NAME_CHAR_MIN, NAME_CURSOR_MAX};
use crate::model::{Button, ButtonType, ControlName, Encoder};

/// One editable attribute, as laid out on the editor screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamField {
    Name,
    MidiChannel,
    Controller,
    MinValue,
    MaxValue,
    ButtonType,
    ValueHigh,
    ValueLow,
}

impl ParamField {
    /// Character row of the field on the editor screen.
    pub fn row(self) -> u16 {
        match self {
            ParamField::Name => 6,
            ParamField::MidiChannel => 8,
            ParamField::Controller => 9,
            ParamField::MinValue | ParamField::ButtonType => 11,
            ParamField::MaxValue | ParamField::ValueHigh => 12,
            ParamField::ValueLow => 13,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamField::Name => "Name    : ",
            ParamField::MidiChannel => "Midi ch : ",
            ParamField::Controller => "CC      : ",
            ParamField::MinValue => "Min     : ",
            ParamField::MaxValue => "Max     : ",
            ParamField::ButtonType => "Type    : ",
            ParamField::ValueHigh => "High    : ",
            ParamField::ValueLow => "Low     : ",
        }
    }

    /// Which input edits the field: encoder letters, `+/-` for the page buttons.
    pub fn hint(self) -> &'static str {
        match self {
            ParamField::Name => "a,d",
            ParamField::MidiChannel => "b",
            ParamField::Controller => "e",
            ParamField::MinValue | ParamField::ButtonType => "c",
            ParamField::MaxValue | ParamField::ValueHigh => "f",
            ParamField::ValueLow => "+/-",
        }
    }
}

/// Logical role of an encoder while an editor is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditKnob {
    Cursor,
    Channel,
    RangeLow,
    NameChar,
    Controller,
    RangeHigh,
}

impl EditKnob {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(EditKnob::Cursor),
            1 => Some(EditKnob::Channel),
            2 => Some(EditKnob::RangeLow),
            3 => Some(EditKnob::NameChar),
            4 => Some(EditKnob::Controller),
            5 => Some(EditKnob::RangeHigh),
            _ => None,
        }
    }
}

/// A control record the editor can work on.
///
/// Name, channel and CC edit the same way for encoders and buttons;
/// the two range knobs are specific to each kind.
pub trait EditableControl {
    fn name_mut(&mut self) -> &mut ControlName;
    fn channel_mut(&mut self) -> &mut u8;
    fn controller_mut(&mut self) -> &mut u8;
    fn edit_range_low(&mut self, ticks: i32) -> Option<ParamField>;
    fn edit_range_high(&mut self, ticks: i32) -> Option<ParamField>;
}

impl EditableControl for Encoder {
    fn name_mut(&mut self) -> &mut ControlName {
        &mut self.name
    }

    fn channel_mut(&mut self) -> &mut u8 {
        &mut self.midi_channel
    }

    fn controller_mut(&mut self) -> &mut u8 {
        &mut self.controller
    }

    fn edit_range_low(&mut self, ticks: i32) -> Option<ParamField> {
        let min = clamp_step(self.min_value, ticks, 0, self.max_value);
        replace(&mut self.min_value, min).then_some(ParamField::MinValue)
    }

    fn edit_range_high(&mut self, ticks: i32) -> Option<ParamField> {
        let max = clamp_step(self.max_value, ticks, self.min_value, MIDI_VALUE_MAX);
        replace(&mut self.max_value, max).then_some(ParamField::MaxValue)
    }
}

impl EditableControl for Button {
    fn name_mut(&mut self) -> &mut ControlName {
        &mut self.name
    }

    fn channel_mut(&mut self) -> &mut u8 {
        &mut self.midi_channel
    }

    fn controller_mut(&mut self) -> &mut u8 {
        &mut self.controller
    }

    fn edit_range_low(&mut self, ticks: i32) -> Option<ParamField> {
        let button_type = if ticks < 0 {
            ButtonType::Push
        } else {
            ButtonType::Toggle
        };
        replace(&mut self.button_type, button_type).then_some(ParamField::ButtonType)
    }

    fn edit_range_high(&mut self, ticks: i32) -> Option<ParamField> {
        let low_bound = self.value_low.saturating_add(1).min(MIDI_VALUE_MAX);
        let high = clamp_step(self.value_high, ticks, low_bound, MIDI_VALUE_MAX);
        replace(&mut self.value_high, high).then_some(ParamField::ValueHigh)
    }
}

/// Apply one encoder turn to the control under edit.
///
/// `index` is the physical encoder (0..=5); anything else is ignored.
pub fn apply_edit<C: EditableControl>(
    control: &mut C,
    cursor: &mut u8,
    index: usize,
    ticks: i32,
) -> Option<ParamField> {
    match EditKnob::from_index(index)? {
        EditKnob::Cursor => {
            let pos = clamp_step(*cursor, tick_sign(ticks), 0, NAME_CURSOR_MAX);
            replace(cursor, pos).then_some(ParamField::Name)
        }
        EditKnob::NameChar => {
            let pos = (*cursor).min(NAME_CURSOR_MAX) as usize;
            let name = control.name_mut();
            let code = clamp_step(name.char_at(pos), ticks, NAME_CHAR_MIN, NAME_CHAR_MAX);
            if code == name.char_at(pos) {
                return None;
            }
            name.set_char(pos, code);
            Some(ParamField::Name)
        }
        EditKnob::Channel => {
            let channel = control.channel_mut();
            let next = clamp_step(*channel, tick_sign(ticks), 0, GLOBAL_MIDI_CHANNEL);
            replace(channel, next).then_some(ParamField::MidiChannel)
        }
        EditKnob::Controller => {
            let cc = control.controller_mut();
            let next = clamp_step(*cc, ticks, 0, MIDI_VALUE_MAX);
            replace(cc, next).then_some(ParamField::Controller)
        }
        EditKnob::RangeLow => control.edit_range_low(ticks),
        EditKnob::RangeHigh => control.edit_range_high(ticks),
    }
}

/// Move a button's low value one step, kept below its high value.
///
/// Driven by the page buttons while the button editor is open.
pub fn step_value_low(button: &mut Button, delta: i32) -> Option<ParamField> {
    let high_bound = button.value_high.saturating_sub(1);
    let low = clamp_step(button.value_low, delta, 0, high_bound);
    replace(&mut button.value_low, low).then_some(ParamField::ValueLow)
}

/// Store `value` in `slot`; `true` if it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
