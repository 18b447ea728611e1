//! Display-mode controller.
//!
//! ```text
//!              menu held + encoder             menu
//!   ┌──────┐ ───────────────────▶ EDIT_ENCODER ─────┐
//!   │ MAIN │ ───────────────────▶ EDIT_BUTTON  ─────┤
//!   └──────┘  menu held + button                    │
//!     ▲  │                                          │
//!     │  │ save            save (persist)           │
//!     │  └────────▶ SAVE ──────────────────▶ MAIN ◀─┘
//!     └──────────── any other button
//! ```
//!
//! The controller owns the [`UiState`] and the [`RefreshScheduler`] and
//! borrows model records only for the length of one input call.

use super::editor::{self, ParamField};
use super::input_logic::{select_next, select_prev};
use super::refresh::{Advance, RefreshScheduler};
use super::render;
use super::surface::DisplaySurface;
use super::{ButtonId, DisplayMode, InputEvent, UiState};
use crate::config::{MenuConfig, CONTROLS_PER_PAGE, PAGE_COUNT, VIEW_CHANNEL_MAX};
use crate::model::ModelStore;
use crate::persist::ConfigStore;

/// Front-panel menu over a display surface `D`, a model store `M` and a
/// config store `C`.
///
/// Tick and input entry points must be called from one context; they
/// are never re-entered.
pub struct MenuController<D, M, C> {
    surface: D,
    model: M,
    store: C,
    config: MenuConfig,
    ui: UiState,
    refresh: RefreshScheduler,
    /// Pause refresh when the held repaint starts.
    pause_pending: bool,
}

impl<D, M, C> MenuController<D, M, C>
where
    D: DisplaySurface,
    M: ModelStore,
    C: ConfigStore<M>,
{
    /// Load the persisted configuration into `model` and arm the MAIN
    /// repaint.
    ///
    /// A failed load is logged and the model keeps whatever it held.
    pub fn new(surface: D, mut model: M, mut store: C, config: MenuConfig) -> Self {
        match store.load(&mut model) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("menu: configuration loaded");
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("menu: configuration load failed: {}, using defaults", _e);
            }
        }

        let mut controller = Self {
            surface,
            model,
            store,
            config,
            ui: UiState::default(),
            refresh: RefreshScheduler::new(),
            pause_pending: false,
        };
        controller.reset_refresh(DisplayMode::Main, 0);
        controller
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn refresh(&self) -> &RefreshScheduler {
        &self.refresh
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable model access for the host (e.g. draining CC messages).
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut C {
        &mut self.store
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Paint the next step of the active repaint. Call once per host tick.
    pub fn advance_refresh_step(&mut self) {
        match self.refresh.advance() {
            Advance::Held => {}
            Advance::Settled => self.surface.resume_refresh(),
            Advance::Step { step, settled } => {
                if self.pause_pending {
                    self.pause_pending = false;
                    self.surface.pause_refresh();
                }
                render::draw_step(&mut self.surface, &self.model, &self.ui, self.config.title, step);
                if settled {
                    self.surface.resume_refresh();
                }
            }
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Dispatch one input event to its entry point.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::EncoderTurned { index, ticks } => self.on_encoder_turned(index as usize, ticks),
            InputEvent::ButtonDown(id) => self.on_button_down(id),
            InputEvent::ButtonUp(id) => self.on_button_up(id),
            InputEvent::ButtonPressed(id) => self.on_button_pressed(id),
            InputEvent::ButtonLongPressed(id) => self.on_button_long_pressed(id),
            InputEvent::TwoButtonsPressed(a, b) => self.on_two_buttons_pressed(a, b),
            InputEvent::EncoderTurnedWhileButtonPressed { index, ticks, button } => {
                self.on_encoder_turned_while_button_pressed(index as usize, ticks, button)
            }
        }
    }

    pub fn on_encoder_turned(&mut self, index: usize, ticks: i32) {
        if !control_in_range(index) {
            return;
        }
        let page = self.ui.page as usize;
        let target = self.ui.edit_target as usize;

        match self.ui.mode {
            DisplayMode::Main if self.ui.menu_latch => {
                self.enter_editor(DisplayMode::EditEncoder, index);
            }
            DisplayMode::Main => {
                self.model
                    .apply_encoder_delta(page, self.ui.midi_channel, index, ticks);
                let encoder = self.model.encoder(page, index);
                render::draw_encoder_value(&mut self.surface, encoder, index);
            }
            DisplayMode::EditEncoder => {
                let encoder = self.model.encoder_mut(page, target);
                let changed = editor::apply_edit(encoder, &mut self.ui.edit_cursor, index, ticks);
                self.redraw_field(changed);
            }
            DisplayMode::EditButton => {
                let button = self.model.button_mut(page, target);
                let changed = editor::apply_edit(button, &mut self.ui.edit_cursor, index, ticks);
                self.redraw_field(changed);
            }
            DisplayMode::Save => {}
        }
    }

    pub fn on_button_down(&mut self, id: ButtonId) {
        match self.ui.mode {
            DisplayMode::Save => {
                if id == ButtonId::Save {
                    self.confirm_save();
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::info!("menu: save cancelled");
                    self.switch_mode(DisplayMode::Main, 0);
                }
            }
            DisplayMode::Main => self.main_button_down(id),
            DisplayMode::EditEncoder | DisplayMode::EditButton => self.editor_button_down(id),
        }
    }

    /// Button release. Only the main screen reacts to releases.
    pub fn on_button_up(&mut self, id: ButtonId) {
        if self.ui.mode != DisplayMode::Main {
            return;
        }
        match id {
            ButtonId::Control(index) => {
                let index = index as usize;
                if !control_in_range(index) {
                    return;
                }
                let page = self.ui.page as usize;
                if self.model.apply_button_up(page, self.ui.midi_channel, index) {
                    render::draw_button_value(&mut self.surface, self.model.button(page, index), index);
                }
            }
            ButtonId::Menu => self.ui.menu_latch = false,
            _ => {}
        }
    }

    // Reserved gestures: accepted, no effect.

    pub fn on_button_pressed(&mut self, _id: ButtonId) {}

    pub fn on_button_long_pressed(&mut self, _id: ButtonId) {}

    pub fn on_two_buttons_pressed(&mut self, _first: ButtonId, _second: ButtonId) {}

    pub fn on_encoder_turned_while_button_pressed(&mut self, _index: usize, _ticks: i32, _button: ButtonId) {}

    // ── Private helpers ──────────────────────────────────────────────

    fn main_button_down(&mut self, id: ButtonId) {
        let page = self.ui.page as usize;
        match id {
            ButtonId::Control(index) => {
                let index = index as usize;
                if !control_in_range(index) {
                    return;
                }
                if self.ui.menu_latch {
                    self.enter_editor(DisplayMode::EditButton, index);
                } else if self.model.apply_button_down(page, self.ui.midi_channel, index) {
                    render::draw_button_value(&mut self.surface, self.model.button(page, index), index);
                }
            }
            ButtonId::Menu => self.ui.menu_latch = true,
            ButtonId::Save => {
                let hold = self.config.save_enter_ticks();
                self.switch_mode(DisplayMode::Save, hold);
            }
            ButtonId::Next | ButtonId::Previous => self.navigate(id == ButtonId::Next),
            ButtonId::Other(_) => {}
        }
    }

    fn editor_button_down(&mut self, id: ButtonId) {
        if self.ui.mode == DisplayMode::EditButton {
            let delta = match id {
                ButtonId::Next => 1,
                ButtonId::Previous => -1,
                _ => 0,
            };
            if delta != 0 {
                let button = self
                    .model
                    .button_mut(self.ui.page as usize, self.ui.edit_target as usize);
                let changed = editor::step_value_low(button, delta);
                self.redraw_field(changed);
            }
        }
        if id == ButtonId::Menu {
            self.switch_mode(DisplayMode::Main, 0);
        }
    }

    /// Page navigation, or channel navigation while the menu is held.
    fn navigate(&mut self, forward: bool) {
        if self.ui.menu_latch {
            let channel = if forward {
                select_next(self.ui.midi_channel, VIEW_CHANNEL_MAX as usize + 1)
            } else {
                select_prev(self.ui.midi_channel)
            };
            if channel != self.ui.midi_channel {
                self.ui.midi_channel = channel;
                #[cfg(feature = "defmt")]
                defmt::debug!("menu: channel {}", channel + 1);
                render::draw_channel_readout(&mut self.surface, &self.ui);
            }
        } else {
            let page = if forward {
                select_next(self.ui.page, PAGE_COUNT)
            } else {
                select_prev(self.ui.page)
            };
            if page != self.ui.page {
                self.ui.page = page;
                #[cfg(feature = "defmt")]
                defmt::debug!("menu: page {}", page + 1);
                self.reset_refresh(DisplayMode::Main, 0);
            }
        }
    }

    fn enter_editor(&mut self, mode: DisplayMode, index: usize) {
        self.ui.edit_target = index as u8;
        self.ui.edit_cursor = 0;
        self.switch_mode(mode, 0);
    }

    /// Second save press: persist, show the outcome, then repaint MAIN
    /// once the banner has been up long enough.
    fn confirm_save(&mut self) {
        let result = self.store.save(&self.model);
        match result {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("menu: configuration saved");
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("menu: configuration save failed: {}", _e);
            }
        }
        render::draw_save_banner(&mut self.surface, result.is_ok());
        let hold = self.config.save_confirm_ticks();
        self.switch_mode(DisplayMode::Main, hold);
    }

    fn switch_mode(&mut self, mode: DisplayMode, hold_ticks: u16) {
        #[cfg(feature = "defmt")]
        defmt::info!("menu: {} -> {}", self.ui.mode, mode);
        self.ui.mode = mode;
        self.reset_refresh(mode, hold_ticks);
    }

    /// Restart the repaint for `mode`.
    ///
    /// Without a hold, continuous refresh stops right away. With one, the
    /// current picture stays live until the hold runs out.
    fn reset_refresh(&mut self, mode: DisplayMode, hold_ticks: u16) {
        self.refresh.reset_for_mode_after(mode, hold_ticks);
        if hold_ticks == 0 {
            self.pause_pending = false;
            self.surface.pause_refresh();
        } else {
            self.pause_pending = true;
            self.surface.resume_refresh();
        }
    }

    fn redraw_field(&mut self, field: Option<ParamField>) {
        if let Some(field) = field {
            render::draw_param_field(&mut self.surface, &self.model, &self.ui, field);
        }
    }
}

fn control_in_range(index: usize) -> bool {
    if index < CONTROLS_PER_PAGE {
        return true;
    }
    #[cfg(feature = "defmt")]
    defmt::warn!("menu: control index {} out of range", index);
    false
}
