//! Fixed-width field formatter.
//!
//! Every value the menu redraws in place goes through a [`FieldFormat`]
//! so the printed run always covers the full field width. A value that
//! shrinks ("100" -> "99") then overwrites the stale trailing digit
//! instead of leaving it on screen.

use core::fmt::Write;

use heapless::String;

use crate::config::GLOBAL_MIDI_CHANNEL;

/// Longest field the formatter produces.
pub const FIELD_CAPACITY: usize = 16;

/// Formatted field text.
pub type FieldText = String<FIELD_CAPACITY>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Text first, padding after.
    Left,
    /// Padding first, text after.
    Right,
}

/// Width, alignment and pad character of one on-screen field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldFormat {
    pub width: usize,
    pub align: Align,
    pub pad: char,
}

impl FieldFormat {
    pub const fn left(width: usize) -> Self {
        Self {
            width,
            align: Align::Left,
            pad: ' ',
        }
    }

    pub const fn right(width: usize) -> Self {
        Self {
            width,
            align: Align::Right,
            pad: ' ',
        }
    }

    pub const fn with_pad(self, pad: char) -> Self {
        Self { pad, ..self }
    }

    /// Format a number. Numbers are never truncated; `width` is a minimum.
    pub fn number(&self, value: i32) -> FieldText {
        let mut digits: String<12> = String::new();
        // i32::MIN is 11 characters; always fits.
        let _ = write!(digits, "{}", value);
        self.pad_run(&digits, digits.len())
    }

    /// Format text, truncated to `width` characters.
    pub fn text(&self, text: &str) -> FieldText {
        let len = text.chars().count().min(self.width);
        let end = text.char_indices().nth(len).map_or(text.len(), |(i, _)| i);
        self.pad_run(&text[..end], len)
    }

    fn pad_run(&self, body: &str, body_chars: usize) -> FieldText {
        let width = self.width.min(FIELD_CAPACITY);
        let padding = width.saturating_sub(body_chars);
        let mut out = FieldText::new();
        if self.align == Align::Right {
            push_pad(&mut out, self.pad, padding);
        }
        for c in body.chars() {
            if out.push(c).is_err() {
                break;
            }
        }
        if self.align == Align::Left {
            push_pad(&mut out, self.pad, padding);
        }
        out
    }
}

fn push_pad(out: &mut FieldText, pad: char, count: usize) {
    for _ in 0..count {
        if out.push(pad).is_err() {
            break;
        }
    }
}

/// Live value under an encoder cell: right-aligned, 3 wide.
pub const ENCODER_VALUE: FieldFormat = FieldFormat::right(3);

/// Numeric editor fields (CC, min, max, high, low): left-aligned, 3 wide.
pub const PARAM_NUMBER: FieldFormat = FieldFormat::left(3);

/// Channel fields: left-aligned, 2 wide.
pub const CHANNEL: FieldFormat = FieldFormat::left(2);

/// Channel setting as shown to the user: 1-based, `--` when following
/// the global channel.
pub fn channel_field(channel: u8) -> FieldText {
    if channel >= GLOBAL_MIDI_CHANNEL {
        CHANNEL.text("--")
    } else {
        CHANNEL.number(channel as i32 + 1)
    }
}

/// Number of decimal digits in `value`.
pub fn digit_count(value: u8) -> usize {
    match value {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}
