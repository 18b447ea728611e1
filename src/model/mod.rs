//! Encoder/button records and the model-store capability.
//!
//! The menu never owns control records. It reaches them through a
//! [`ModelStore`] by `(page, index)` and only holds the returned
//! reference for the duration of one input call.
//!
//! [`ControllerState`] is a fixed-size store with factory defaults and
//! live push/toggle semantics, used by hosts that have no model of their
//! own and by the test suite.

mod control;
mod state;

pub use control::{Button, ButtonType, ControlName, Encoder};
pub use state::{CcMessage, ControllerState, Page};

/// Model-store capability consumed by the menu controller.
///
/// `page` is always `< PAGE_COUNT` and `index` always
/// `< CONTROLS_PER_PAGE` when called by the controller. `channel` is the
/// viewed global channel (0..=15), used for controls set to follow it.
pub trait ModelStore {
    fn encoder(&self, page: usize, index: usize) -> &Encoder;

    fn encoder_mut(&mut self, page: usize, index: usize) -> &mut Encoder;

    fn button(&self, page: usize, index: usize) -> &Button;

    fn button_mut(&mut self, page: usize, index: usize) -> &mut Button;

    /// Live-adjust an encoder value by `ticks`.
    fn apply_encoder_delta(&mut self, page: usize, channel: u8, index: usize, ticks: i32);

    /// Press a control button. Returns `true` if the visible value changed.
    fn apply_button_down(&mut self, page: usize, channel: u8, index: usize) -> bool;

    /// Release a control button. Returns `true` if the visible value changed.
    fn apply_button_up(&mut self, page: usize, channel: u8, index: usize) -> bool;
}
