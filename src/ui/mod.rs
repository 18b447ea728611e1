//! Front-panel menu - display modes, refresh scheduling and input routing.
//!
//! The menu is driven from two call sources that the host serializes:
//! a periodic tick ([`MenuController::advance_refresh_step`]) painting
//! the screen one step at a time, and discrete input events (encoder
//! turns, button edges) that the controller interprets according to the
//! current [`DisplayMode`].
//!
//! ## Components
//!
//! - **format**: fixed-width field formatter
//! - **refresh**: per-mode step tables and the countdown scheduler
//! - **editor**: clamped per-field edit rules for the control under edit
//! - **render**: draw actions for steps and single-field redraws
//! - **controller**: the mode state machine owning [`UiState`]
//! - **graphics**: embedded-graphics surface adapter (feature `graphics`)
//! - **task**: embassy driver loop (feature `task`)

pub mod controller;
pub mod editor;
pub mod format;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod input_logic;
pub mod refresh;
pub mod render;
pub mod surface;
#[cfg(feature = "task")]
pub mod task;

#[cfg(test)]
mod tests;

pub use controller::MenuController;
pub use surface::{Color, DisplaySurface};

/// Screens the menu can be in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Six encoders and six buttons of the viewed page, live-adjustable.
    #[default]
    Main,
    /// Editor for one encoder's configuration.
    EditEncoder,
    /// Editor for one button's configuration.
    EditButton,
    /// Save confirmation.
    Save,
}

/// Transient UI state, owned by the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiState {
    pub mode: DisplayMode,
    /// Control under edit (0..=5). Meaningful only in the edit modes.
    pub edit_target: u8,
    /// Character position inside the edited name (0..=4).
    pub edit_cursor: u8,
    /// Viewed page (0..PAGE_COUNT).
    pub page: u8,
    /// Viewed global MIDI channel (0..=15).
    pub midi_channel: u8,
    /// `true` while the menu button is held.
    pub menu_latch: bool,
}

/// Physical buttons the menu reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// One of the six control buttons under the screen (0..=5).
    Control(u8),
    /// Held to reinterpret controls (open editors, change channel).
    Menu,
    /// Enters and confirms the save screen.
    Save,
    /// Next page / next channel / raise button low value.
    Next,
    /// Previous page / previous channel / lower button low value.
    Previous,
    /// Any other panel button. Only cancels the save screen.
    Other(u8),
}

/// Input event delivered by the host input dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    EncoderTurned { index: u8, ticks: i32 },
    ButtonDown(ButtonId),
    ButtonUp(ButtonId),
    ButtonPressed(ButtonId),
    ButtonLongPressed(ButtonId),
    TwoButtonsPressed(ButtonId, ButtonId),
    EncoderTurnedWhileButtonPressed { index: u8, ticks: i32, button: ButtonId },
}
