//! Application-wide constants and runtime menu configuration.
//!
//! Control counts, clamp bounds, refresh step counts and panel geometry
//! live here so they can be tuned in one place. Timings that a host may
//! want to change without rebuilding the tables are carried by
//! [`MenuConfig`].

// Pages & controls

/// Number of controller pages (banks of six encoders and six buttons).
pub const PAGE_COUNT: usize = 8;

/// Encoders per page; also the number of control buttons per page.
pub const CONTROLS_PER_PAGE: usize = 6;

/// Fixed length of a control name, in characters.
pub const NAME_LEN: usize = 5;

/// Highest edit-cursor position inside a name.
pub const NAME_CURSOR_MAX: u8 = (NAME_LEN - 1) as u8;

/// Lowest character code accepted in a control name (space).
pub const NAME_CHAR_MIN: u8 = 32;

/// Highest character code accepted in a control name (DEL).
pub const NAME_CHAR_MAX: u8 = 127;

// MIDI

/// Sentinel channel meaning "follow the global MIDI channel".
pub const GLOBAL_MIDI_CHANNEL: u8 = 16;

/// Highest channel selectable as the viewed (global) channel.
pub const VIEW_CHANNEL_MAX: u8 = 15;

/// Highest CC number and CC value.
pub const MIDI_VALUE_MAX: u8 = 127;

/// Depth of the outgoing CC queue kept by the reference model store.
pub const CC_QUEUE_DEPTH: usize = 32;

// Refresh scheduler
//
// Starting countdown per display mode. The main screen needs one extra
// step for the title bar; edit and save screens repaint below it.

/// Steps of a full main-screen paint.
pub const MAIN_REFRESH_STEPS: u8 = 21;

/// Steps of the encoder editor paint.
pub const EDIT_ENCODER_REFRESH_STEPS: u8 = 20;

/// Steps of the button editor paint.
pub const EDIT_BUTTON_REFRESH_STEPS: u8 = 20;

/// Steps of the save-confirm paint.
pub const SAVE_REFRESH_STEPS: u8 = 20;

/// Default host tick period driving `advance_refresh_step` (ms).
pub const REFRESH_TICK_MS: u32 = 10;

/// Pause before the save-confirm screen starts painting (ms).
pub const SAVE_ENTER_DELAY_MS: u32 = 100;

/// How long the "Saved" banner stays up before the main screen returns (ms).
pub const SAVE_CONFIRM_HOLD_MS: u32 = 1500;

/// Depth of the input event queue used by the embassy driver loop.
pub const INPUT_QUEUE_DEPTH: usize = 8;

// Panel geometry (240x320 TFT, portrait)
//
//   big font cell     10 x 20  (names, labels, values)
//   small font cell    6 x 12  (cc / channel annotations, hints)

/// Panel width in pixels.
pub const SCREEN_WIDTH: u16 = 240;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u16 = 320;

/// Height of the title bar painted on the main screen.
pub const TITLE_BAR_HEIGHT: u16 = 21;

pub const BIG_CHAR_WIDTH: u16 = 10;
pub const BIG_CHAR_HEIGHT: u16 = 20;
pub const SMALL_CHAR_WIDTH: u16 = 6;
pub const SMALL_CHAR_HEIGHT: u16 = 12;

/// Left margin of the first control column.
pub const COLUMN_X_OFFSET: u16 = 16;

/// Distance between control columns, in big character cells.
pub const COLUMN_CELLS: u16 = 7;

/// Width of the boxed button value.
pub const BUTTON_BOX_WIDTH: u16 = 55;

/// Height of the boxed button value.
pub const BUTTON_BOX_HEIGHT: u16 = 22;

/// Title shown in the main screen header.
pub const DEFAULT_TITLE: &str = "Midi Controller";

/// Runtime configuration for the menu controller.
///
/// [`MenuConfig::default()`] reproduces the constants above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// Period of the host tick calling `advance_refresh_step` (ms). Must be non-zero.
    pub tick_period_ms: u32,
    /// Hold before the save screen paints (ms).
    pub save_enter_delay_ms: u32,
    /// Hold of the confirmation banner after a save (ms).
    pub save_confirm_hold_ms: u32,
    /// Main screen title.
    pub title: &'static str,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: REFRESH_TICK_MS,
            save_enter_delay_ms: SAVE_ENTER_DELAY_MS,
            save_confirm_hold_ms: SAVE_CONFIRM_HOLD_MS,
            title: DEFAULT_TITLE,
        }
    }
}

impl MenuConfig {
    /// Convert a delay to whole host ticks, rounding up.
    ///
    /// A zero delay is zero ticks; any other delay is at least one tick.
    pub fn ticks_for(&self, ms: u32) -> u16 {
        let period = self.tick_period_ms.max(1);
        let ticks = ms.div_ceil(period);
        ticks.min(u16::MAX as u32) as u16
    }

    /// Ticks held before the save screen paints.
    pub fn save_enter_ticks(&self) -> u16 {
        self.ticks_for(self.save_enter_delay_ms)
    }

    /// Ticks the save confirmation stays on screen.
    pub fn save_confirm_ticks(&self) -> u16 {
        self.ticks_for(self.save_confirm_hold_ms)
    }
}
