//! Front-panel menu for a hardware MIDI controller.
//!
//! The menu lets the user view and live-adjust six encoders and six
//! buttons per page, edit each control's name, MIDI channel, CC number
//! and value range in a dedicated editor screen, and persist the result
//! through a confirm/cancel save screen.
//!
//! Two pieces do the work:
//!
//! - a **step refresh scheduler** painting each screen one slice per host
//!   tick, so a full repaint never blocks real-time MIDI/audio work
//! - a **display-mode controller** (MAIN / EDIT_ENCODER / EDIT_BUTTON /
//!   SAVE) interpreting encoder and button input per mode
//!
//! Drawing, the control model and persistence are collaborators reached
//! through [`DisplaySurface`], [`ModelStore`] and [`ConfigStore`].
//!
//! The crate is `no_std` and host-testable: `cargo test` runs every
//! module against recording surfaces, no hardware needed.
//!
//! ## Features
//!
//! - `graphics` (default): [`ui::graphics::GraphicsSurface`] over any
//!   embedded-graphics `Rgb565` draw target
//! - `task`: embassy driver loop [`ui::task::menu_task`]
//! - `defmt`: defmt formatting and logging
//! - `embedded`: all of the above

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod model;
pub mod persist;
pub mod ui;

pub use config::MenuConfig;
pub use error::Error;
pub use model::{Button, ButtonType, CcMessage, ControlName, ControllerState, Encoder, ModelStore};
pub use persist::{ConfigStore, VolatileConfig};
pub use ui::{ButtonId, Color, DisplayMode, DisplaySurface, InputEvent, MenuController, UiState};
