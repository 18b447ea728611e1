//! Step refresh scheduler.
//!
//! A full screen is far too slow to paint in one host tick, so each mode
//! owns an ordered table of [`RefreshStep`]s painted one per tick. The
//! table length is the mode's starting countdown; the step drawn on a
//! call is the one at position `len - countdown`, after which the
//! countdown drops by one. Trailing [`RefreshStep::Idle`] entries keep
//! the countdown length fixed while drawing nothing.
//!
//! The scheduler itself never draws. [`RefreshScheduler::advance`]
//! reports what the caller has to do with the panel.

use super::editor::ParamField;
use super::DisplayMode;

/// One slice of a staged repaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshStep {
    /// Clear the panel and draw the title bar.
    TitleBar,
    /// Encoder and button panels plus the channel/page readout.
    MainFrames,
    /// Name, CC, channel and value of one encoder (0..=5).
    EncoderCell(u8),
    /// Name, CC, channel and value box of one button (0..=5).
    ButtonCell(u8),
    /// Coloured editor frame.
    EditFrame,
    /// "Edit Encoder" / "Edit Button" heading.
    EditTitle,
    /// Hint, label and value of one editor row.
    EditField(ParamField),
    SaveFrame,
    SaveTitle,
    SaveHelp,
    /// Placeholder: consumes a tick, draws nothing.
    Idle,
}

use self::RefreshStep::{ButtonCell, EditField, EncoderCell, Idle};

const MAIN_STEPS: [RefreshStep; 21] = [
    RefreshStep::TitleBar,
    RefreshStep::MainFrames,
    EncoderCell(0),
    EncoderCell(1),
    EncoderCell(2),
    EncoderCell(3),
    EncoderCell(4),
    EncoderCell(5),
    ButtonCell(0),
    ButtonCell(1),
    ButtonCell(2),
    ButtonCell(3),
    ButtonCell(4),
    ButtonCell(5),
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
];

const EDIT_ENCODER_STEPS: [RefreshStep; 20] = [
    RefreshStep::EditFrame,
    RefreshStep::EditTitle,
    EditField(ParamField::Name),
    EditField(ParamField::MidiChannel),
    EditField(ParamField::Controller),
    EditField(ParamField::MinValue),
    EditField(ParamField::MaxValue),
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
];

const EDIT_BUTTON_STEPS: [RefreshStep; 20] = [
    RefreshStep::EditFrame,
    RefreshStep::EditTitle,
    EditField(ParamField::Name),
    EditField(ParamField::MidiChannel),
    EditField(ParamField::Controller),
    EditField(ParamField::ButtonType),
    EditField(ParamField::ValueHigh),
    EditField(ParamField::ValueLow),
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
];

const SAVE_STEPS: [RefreshStep; 20] = [
    RefreshStep::SaveFrame,
    RefreshStep::SaveTitle,
    RefreshStep::SaveHelp,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
    Idle,
];

// Table lengths are the starting countdowns.
const _: () = {
    use crate::config::{
        EDIT_BUTTON_REFRESH_STEPS, EDIT_ENCODER_REFRESH_STEPS, MAIN_REFRESH_STEPS,
        SAVE_REFRESH_STEPS,
    };
    assert!(MAIN_STEPS.len() == MAIN_REFRESH_STEPS as usize);
    assert!(EDIT_ENCODER_STEPS.len() == EDIT_ENCODER_REFRESH_STEPS as usize);
    assert!(EDIT_BUTTON_STEPS.len() == EDIT_BUTTON_REFRESH_STEPS as usize);
    assert!(SAVE_STEPS.len() == SAVE_REFRESH_STEPS as usize);
};

/// Ordered step table for `mode`.
pub fn steps_for(mode: DisplayMode) -> &'static [RefreshStep] {
    match mode {
        DisplayMode::Main => &MAIN_STEPS,
        DisplayMode::EditEncoder => &EDIT_ENCODER_STEPS,
        DisplayMode::EditButton => &EDIT_BUTTON_STEPS,
        DisplayMode::Save => &SAVE_STEPS,
    }
}

/// What the caller must do after one [`RefreshScheduler::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// Perform `step`. `settled` is set on the step that took the
    /// countdown to zero; continuous refresh resumes after it.
    Step { step: RefreshStep, settled: bool },
    /// A deferred transition is still waiting; nothing to draw.
    Held,
    /// Countdown already at zero: keep continuous refresh running.
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshScheduler {
    table: &'static [RefreshStep],
    countdown: u8,
    hold: u16,
}

impl RefreshScheduler {
    /// Scheduler with the MAIN table armed.
    pub fn new() -> Self {
        let mut scheduler = Self {
            table: &MAIN_STEPS,
            countdown: 0,
            hold: 0,
        };
        scheduler.reset_for_mode(DisplayMode::Main);
        scheduler
    }

    /// Restart the staged repaint from the top of `mode`'s table.
    ///
    /// Cancels any pending hold. The caller pauses continuous refresh.
    pub fn reset_for_mode(&mut self, mode: DisplayMode) {
        self.reset_for_mode_after(mode, 0);
    }

    /// Like [`reset_for_mode`](Self::reset_for_mode), but the first step
    /// waits `hold_ticks` calls to `advance` before it is drawn.
    pub fn reset_for_mode_after(&mut self, mode: DisplayMode, hold_ticks: u16) {
        self.table = steps_for(mode);
        self.countdown = self.table.len() as u8;
        self.hold = hold_ticks;
    }

    pub fn advance(&mut self) -> Advance {
        if self.hold > 0 {
            self.hold -= 1;
            return Advance::Held;
        }
        if self.countdown == 0 {
            return Advance::Settled;
        }
        let position = self.table.len() - self.countdown as usize;
        let step = self.table.get(position).copied().unwrap_or(RefreshStep::Idle);
        self.countdown -= 1;
        Advance::Step {
            step,
            settled: self.countdown == 0,
        }
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Remaining ticks of a deferred transition.
    pub fn hold_remaining(&self) -> u16 {
        self.hold
    }

    /// `true` once the repaint has completed and no hold is pending.
    pub fn is_settled(&self) -> bool {
        self.countdown == 0 && self.hold == 0
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}
