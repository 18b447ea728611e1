use heapless::Deque;

use super::control::{Button, ButtonType, Encoder};
use super::ModelStore;
use crate::config::{CC_QUEUE_DEPTH, CONTROLS_PER_PAGE, GLOBAL_MIDI_CHANNEL, PAGE_COUNT};
use crate::error::Error;

/// Outgoing MIDI control change produced by a live adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CcMessage {
    /// Resolved channel, 0..=15.
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

/// One bank of controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Page {
    pub encoders: [Encoder; CONTROLS_PER_PAGE],
    pub buttons: [Button; CONTROLS_PER_PAGE],
}

impl Page {
    /// Factory layout for page `page`.
    pub fn factory(page: usize) -> Self {
        Self {
            encoders: core::array::from_fn(|i| Encoder::factory(page, i)),
            buttons: core::array::from_fn(|i| Button::factory(page, i)),
        }
    }
}

/// Fixed-size model store: [`PAGE_COUNT`] pages plus the queue of CC
/// messages waiting to be sent.
///
/// Live adjustments clamp encoder values into `[min_value, max_value]`
/// and queue a [`CcMessage`] for every value that actually changed.
/// Callers drain the queue with [`pop_cc`](Self::pop_cc).
pub struct ControllerState {
    pub pages: [Page; PAGE_COUNT],
    pending: Deque<CcMessage, CC_QUEUE_DEPTH>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerState {
    /// Create a store holding the factory layout.
    pub fn new() -> Self {
        Self {
            pages: core::array::from_fn(Page::factory),
            pending: Deque::new(),
        }
    }

    /// Restore every page to the factory layout and drop queued messages.
    pub fn reset_to_factory(&mut self) {
        *self = Self::new();
    }

    /// Replace a whole page, e.g. from a config loader.
    ///
    /// Records that break their range invariants are rejected with
    /// [`Error::Corrupt`] and leave the store untouched.
    pub fn set_page(&mut self, page: usize, data: Page) -> Result<(), Error> {
        if page >= PAGE_COUNT {
            return Err(Error::InvalidPage);
        }
        let valid = data.encoders.iter().all(Encoder::is_valid)
            && data.buttons.iter().all(Button::is_valid);
        if !valid {
            return Err(Error::Corrupt);
        }
        self.pages[page] = data;
        Ok(())
    }

    /// Replace one encoder record.
    pub fn set_encoder(&mut self, page: usize, index: usize, encoder: Encoder) -> Result<(), Error> {
        Self::locate(page, index)?;
        if !encoder.is_valid() {
            return Err(Error::Corrupt);
        }
        self.pages[page].encoders[index] = encoder;
        Ok(())
    }

    /// Replace one button record.
    pub fn set_button(&mut self, page: usize, index: usize, button: Button) -> Result<(), Error> {
        Self::locate(page, index)?;
        if !button.is_valid() {
            return Err(Error::Corrupt);
        }
        self.pages[page].buttons[index] = button;
        Ok(())
    }

    /// Next queued CC message, oldest first.
    pub fn pop_cc(&mut self) -> Option<CcMessage> {
        self.pending.pop_front()
    }

    /// Number of queued CC messages.
    pub fn pending_cc(&self) -> usize {
        self.pending.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn locate(page: usize, index: usize) -> Result<(), Error> {
        if page >= PAGE_COUNT {
            return Err(Error::InvalidPage);
        }
        if index >= CONTROLS_PER_PAGE {
            return Err(Error::InvalidControl);
        }
        Ok(())
    }

    fn check(page: usize, index: usize) {
        assert!(page < PAGE_COUNT, "page {} out of range", page);
        assert!(index < CONTROLS_PER_PAGE, "control {} out of range", index);
    }

    fn queue(&mut self, msg: CcMessage) {
        if self.pending.is_full() {
            #[cfg(feature = "defmt")]
            defmt::warn!("CC queue full - dropping oldest message");
            self.pending.pop_front();
        }
        // Cannot fail: a slot was freed above if needed.
        let _ = self.pending.push_back(msg);
    }

    fn queue_button(&mut self, page: usize, channel: u8, index: usize) {
        let button = self.pages[page].buttons[index];
        self.queue(CcMessage {
            channel: resolve_channel(button.midi_channel, channel),
            controller: button.controller,
            value: button.value(),
        });
    }
}

impl ModelStore for ControllerState {
    fn encoder(&self, page: usize, index: usize) -> &Encoder {
        Self::check(page, index);
        &self.pages[page].encoders[index]
    }

    fn encoder_mut(&mut self, page: usize, index: usize) -> &mut Encoder {
        Self::check(page, index);
        &mut self.pages[page].encoders[index]
    }

    fn button(&self, page: usize, index: usize) -> &Button {
        Self::check(page, index);
        &self.pages[page].buttons[index]
    }

    fn button_mut(&mut self, page: usize, index: usize) -> &mut Button {
        Self::check(page, index);
        &mut self.pages[page].buttons[index]
    }

    fn apply_encoder_delta(&mut self, page: usize, channel: u8, index: usize, ticks: i32) {
        let encoder = self.encoder_mut(page, index);
        let value = (encoder.value as i32)
            .saturating_add(ticks)
            .clamp(encoder.min_value as i32, encoder.max_value as i32) as u8;
        if value == encoder.value {
            return;
        }
        encoder.value = value;
        let msg = CcMessage {
            channel: resolve_channel(encoder.midi_channel, channel),
            controller: encoder.controller,
            value,
        };
        self.queue(msg);
    }

    fn apply_button_down(&mut self, page: usize, channel: u8, index: usize) -> bool {
        let button = self.button_mut(page, index);
        match button.button_type {
            ButtonType::Push => {
                if button.on {
                    return false;
                }
                button.on = true;
            }
            ButtonType::Toggle => button.on = !button.on,
        }
        self.queue_button(page, channel, index);
        true
    }

    fn apply_button_up(&mut self, page: usize, channel: u8, index: usize) -> bool {
        let button = self.button_mut(page, index);
        if button.button_type == ButtonType::Toggle || !button.on {
            return false;
        }
        button.on = false;
        self.queue_button(page, channel, index);
        true
    }
}

/// Map a control's channel setting to the channel actually sent on.
fn resolve_channel(control_channel: u8, global_channel: u8) -> u8 {
    if control_channel >= GLOBAL_MIDI_CHANNEL {
        global_channel
    } else {
        control_channel
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
