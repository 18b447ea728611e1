//! Unit tests for the display-mode controller.
//!
//! The controller runs against a surface that records every call, the
//! reference [`ControllerState`] model and a store that counts loads and
//! saves.

use super::refresh::RefreshStep;
use super::*;
use crate::config::{MenuConfig, PAGE_COUNT};
use crate::error::Error;
use crate::model::{ButtonType, ControlName, ControllerState, ModelStore};
use crate::persist::ConfigStore;

// ═══════════════════════════════════════════════════════════════════════════
// Test doubles
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Clear,
    Fill(u16, u16, u16, u16, Color),
    Cursor(u16, u16),
    Pixel(u16, u16),
    Fg(Color),
    Bg(Color),
    Print(String),
    PrintSmall(String),
    Pause,
    Resume,
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
    paused: bool,
}

impl Recorder {
    fn take(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }

    fn printed(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Print(s) | Op::PrintSmall(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    fn draws(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, Op::Pause | Op::Resume))
            .count()
    }
}

impl DisplaySurface for Recorder {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn fill_area(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color) {
        self.ops.push(Op::Fill(x, y, width, height, color));
    }

    fn set_cursor(&mut self, col: u16, row: u16) {
        self.ops.push(Op::Cursor(col, row));
    }

    fn set_cursor_in_pixel(&mut self, x: u16, y: u16) {
        self.ops.push(Op::Pixel(x, y));
    }

    fn set_char_color(&mut self, color: Color) {
        self.ops.push(Op::Fg(color));
    }

    fn set_char_background_color(&mut self, color: Color) {
        self.ops.push(Op::Bg(color));
    }

    fn print(&mut self, text: &str) {
        self.ops.push(Op::Print(text.into()));
    }

    fn print_small(&mut self, text: &str) {
        self.ops.push(Op::PrintSmall(text.into()));
    }

    fn pause_refresh(&mut self) {
        self.paused = true;
        self.ops.push(Op::Pause);
    }

    fn resume_refresh(&mut self) {
        self.paused = false;
        self.ops.push(Op::Resume);
    }
}

#[derive(Default)]
struct CountingStore {
    loads: usize,
    saves: usize,
    fail_save: bool,
}

impl ConfigStore<ControllerState> for CountingStore {
    fn load(&mut self, _model: &mut ControllerState) -> Result<(), Error> {
        self.loads += 1;
        Ok(())
    }

    fn save(&mut self, _model: &ControllerState) -> Result<(), Error> {
        self.saves += 1;
        if self.fail_save {
            Err(Error::Storage)
        } else {
            Ok(())
        }
    }
}

type Menu = MenuController<Recorder, ControllerState, CountingStore>;

fn menu() -> Menu {
    MenuController::new(
        Recorder::default(),
        ControllerState::new(),
        CountingStore::default(),
        MenuConfig::default(),
    )
}

/// Menu with the initial MAIN repaint finished and the recorder emptied.
fn settled_menu() -> Menu {
    let mut menu = menu();
    settle(&mut menu);
    menu.surface_mut().take();
    menu
}

fn settle(menu: &mut Menu) {
    for _ in 0..400 {
        if menu.refresh().is_settled() {
            return;
        }
        menu.advance_refresh_step();
    }
    panic!("refresh never settled");
}

fn enter_encoder_editor(menu: &mut Menu, index: u8) {
    menu.on_button_down(ButtonId::Menu);
    menu.on_encoder_turned(index as usize, 1);
    settle(menu);
    menu.surface_mut().take();
}

fn enter_button_editor(menu: &mut Menu, index: u8) {
    menu.on_button_down(ButtonId::Menu);
    menu.on_button_down(ButtonId::Control(index));
    settle(menu);
    menu.surface_mut().take();
}

// ═══════════════════════════════════════════════════════════════════════════
// Start-up and refresh
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn new_loads_config_and_arms_main_repaint() {
    let menu = menu();
    assert_eq!(menu.store().loads, 1);
    assert_eq!(menu.store().saves, 0);
    assert_eq!(*menu.ui(), UiState::default());
    assert_eq!(menu.refresh().countdown(), 21);
    assert!(menu.surface().paused);
}

#[test]
fn main_repaint_takes_exactly_21_ticks() {
    let mut menu = menu();
    for _ in 0..20 {
        menu.advance_refresh_step();
        assert!(menu.surface().paused);
    }
    menu.advance_refresh_step();
    assert_eq!(menu.refresh().countdown(), 0);
    assert!(!menu.surface().paused);

    menu.surface_mut().take();
    menu.advance_refresh_step();
    assert_eq!(menu.surface_mut().take(), vec![Op::Resume]);
}

#[test]
fn main_repaint_shows_title_and_cells() {
    let mut menu = menu();
    settle(&mut menu);
    let printed = menu.surface().printed();
    assert!(printed.contains(&"Midi Controller"));
    assert!(printed.contains(&"Enc 1"));
    assert!(printed.contains(&"Enc 6"));
    assert!(printed.contains(&"But 6"));
    assert!(printed.contains(&"Midi Channel "));
    assert_eq!(menu.surface().ops.first(), Some(&Op::Pause));
}

#[test]
fn custom_title_is_used() {
    let config = MenuConfig {
        title: "PFM3",
        ..MenuConfig::default()
    };
    let mut menu = MenuController::new(
        Recorder::default(),
        ControllerState::new(),
        CountingStore::default(),
        config,
    );
    menu.advance_refresh_step();
    assert!(menu.surface().printed().contains(&"PFM3"));
}

// ═══════════════════════════════════════════════════════════════════════════
// MAIN mode
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn encoder_turn_adjusts_only_that_value() {
    let mut menu = settled_menu();
    menu.on_encoder_turned(2, 3);

    let model = menu.model();
    for i in 0..6 {
        let expected = if i == 2 { 3 } else { 0 };
        assert_eq!(model.encoder(0, i).value, expected);
    }
    let printed = menu.surface().printed();
    assert_eq!(printed, vec!["  3"]);
    assert!(menu.refresh().is_settled());
}

#[test]
fn encoder_turn_queues_cc_on_viewed_channel() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Menu);
    menu.on_button_down(ButtonId::Next);
    menu.on_button_up(ButtonId::Menu);
    menu.on_encoder_turned(0, 5);

    let msg = menu.model_mut().pop_cc().expect("cc queued");
    assert_eq!(msg.channel, 1);
    assert_eq!(msg.controller, 20);
    assert_eq!(msg.value, 5);
}

#[test]
fn push_button_redraws_only_on_change() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Control(0));
    assert!(menu.model().button(0, 0).on);
    assert!(menu.surface().printed().contains(&"127"));

    menu.surface_mut().take();
    menu.on_button_down(ButtonId::Control(0));
    assert_eq!(menu.surface().draws(), 0);

    menu.on_button_up(ButtonId::Control(0));
    assert!(!menu.model().button(0, 0).on);
    assert_eq!(menu.surface().printed(), vec!["0"]);
}

#[test]
fn toggle_button_ignores_release() {
    let mut menu = settled_menu();
    menu.model_mut().button_mut(0, 1).button_type = ButtonType::Toggle;
    menu.on_button_down(ButtonId::Control(1));
    menu.surface_mut().take();
    menu.on_button_up(ButtonId::Control(1));
    assert!(menu.model().button(0, 1).on);
    assert_eq!(menu.surface().draws(), 0);
}

#[test]
fn page_navigation_resets_refresh_within_bounds() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Previous);
    assert_eq!(menu.ui().page, 0);
    assert!(menu.refresh().is_settled());

    menu.on_button_down(ButtonId::Next);
    assert_eq!(menu.ui().page, 1);
    assert_eq!(menu.refresh().countdown(), 21);
    assert!(menu.surface().paused);

    for _ in 0..PAGE_COUNT + 3 {
        menu.on_button_down(ButtonId::Next);
    }
    assert_eq!(menu.ui().page as usize, PAGE_COUNT - 1);
}

#[test]
fn latched_navigation_changes_channel_without_reset() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Menu);
    assert!(menu.ui().menu_latch);

    menu.on_button_down(ButtonId::Next);
    assert_eq!(menu.ui().midi_channel, 1);
    assert_eq!(menu.ui().page, 0);
    assert!(menu.refresh().is_settled());
    assert!(menu.surface().printed().contains(&"2 "));

    for _ in 0..20 {
        menu.on_button_down(ButtonId::Next);
    }
    assert_eq!(menu.ui().midi_channel, 15);

    menu.surface_mut().take();
    menu.on_button_down(ButtonId::Next);
    assert_eq!(menu.surface().draws(), 0);

    menu.on_button_up(ButtonId::Menu);
    assert!(!menu.ui().menu_latch);
}

#[test]
fn out_of_range_controls_are_ignored() {
    let mut menu = settled_menu();
    let before = *menu.ui();
    menu.on_encoder_turned(6, 4);
    menu.on_button_down(ButtonId::Control(9));
    menu.on_button_up(ButtonId::Control(200));
    menu.on_button_down(ButtonId::Menu);
    menu.on_encoder_turned(17, 1);

    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert_eq!(menu.ui().page, before.page);
    assert_eq!(menu.model().pending_cc(), 0);
    assert_eq!(menu.surface().draws(), 0);
}

#[test]
fn reserved_hooks_do_nothing() {
    let mut menu = settled_menu();
    let before = *menu.ui();
    menu.on_button_pressed(ButtonId::Save);
    menu.on_button_long_pressed(ButtonId::Menu);
    menu.on_two_buttons_pressed(ButtonId::Next, ButtonId::Previous);
    menu.on_encoder_turned_while_button_pressed(0, 5, ButtonId::Control(0));
    menu.handle(InputEvent::ButtonLongPressed(ButtonId::Save));

    assert_eq!(*menu.ui(), before);
    assert!(menu.surface().ops.is_empty());
    assert_eq!(menu.model().pending_cc(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Editors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn latched_encoder_turn_opens_encoder_editor() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Menu);
    menu.on_encoder_turned(1, 1);

    assert_eq!(menu.ui().mode, DisplayMode::EditEncoder);
    assert_eq!(menu.ui().edit_target, 1);
    assert_eq!(menu.ui().edit_cursor, 0);
    assert_eq!(menu.refresh().countdown(), 20);
    assert_eq!(menu.model().encoder(0, 1).value, 0);

    for _ in 0..20 {
        menu.advance_refresh_step();
    }
    assert!(menu.refresh().is_settled());
    let printed = menu.surface().printed();
    assert!(printed.contains(&"Edit Encoder"));
    assert!(printed.contains(&"Enc 2"));
    assert!(printed.contains(&"Min     : "));
}

#[test]
fn latched_button_press_opens_button_editor() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Menu);
    menu.on_button_down(ButtonId::Control(4));

    assert_eq!(menu.ui().mode, DisplayMode::EditButton);
    assert_eq!(menu.ui().edit_target, 4);
    assert!(!menu.model().button(0, 4).on);
    settle(&mut menu);
    let printed = menu.surface().printed();
    assert!(printed.contains(&"Edit Button"));
    assert!(printed.contains(&"Push"));
    assert!(printed.contains(&"+/-"));
}

#[test]
fn editor_resets_cursor_on_entry() {
    let mut menu = settled_menu();
    enter_encoder_editor(&mut menu, 0);
    menu.on_encoder_turned(0, 1);
    menu.on_encoder_turned(0, 1);
    assert_eq!(menu.ui().edit_cursor, 2);

    menu.on_button_down(ButtonId::Menu);
    assert_eq!(menu.ui().mode, DisplayMode::Main);
    menu.on_encoder_turned(3, 1);
    assert_eq!(menu.ui().mode, DisplayMode::EditEncoder);
    assert_eq!(menu.ui().edit_cursor, 0);
}

#[test]
fn name_edit_redraws_name_field_only() {
    let mut menu = settled_menu();
    menu.model_mut().encoder_mut(0, 0).name = ControlName::new("ABCDE");
    enter_encoder_editor(&mut menu, 0);

    menu.on_encoder_turned(3, 1);
    assert_eq!(menu.model().encoder(0, 0).name.as_str(), "BBCDE");
    assert_eq!(menu.surface().printed(), vec!["BBCDE", "B"]);
    assert!(menu.refresh().is_settled());
}

#[test]
fn space_under_cursor_shows_underscore() {
    let mut menu = settled_menu();
    menu.model_mut().encoder_mut(0, 0).name = ControlName::new("A BCD");
    enter_encoder_editor(&mut menu, 0);
    menu.on_encoder_turned(0, 1);
    assert_eq!(menu.surface().printed(), vec!["A BCD", "_"]);
}

#[test]
fn clamped_edit_draws_nothing() {
    let mut menu = settled_menu();
    enter_encoder_editor(&mut menu, 2);
    menu.on_encoder_turned(0, -1);
    menu.on_encoder_turned(2, -5);
    assert_eq!(menu.surface().draws(), 0);
}

#[test]
fn channel_edit_shows_global_sentinel() {
    let mut menu = settled_menu();
    enter_button_editor(&mut menu, 0);
    menu.on_encoder_turned(1, -1);
    assert_eq!(menu.model().button(0, 0).midi_channel, 15);
    assert_eq!(menu.surface().printed(), vec!["16"]);

    menu.surface_mut().take();
    menu.on_encoder_turned(1, 1);
    assert_eq!(menu.surface().printed(), vec!["--"]);
}

#[test]
fn button_editor_nav_adjusts_low_value() {
    let mut menu = settled_menu();
    {
        let button = menu.model_mut().button_mut(0, 3);
        button.value_low = 5;
        button.value_high = 6;
    }
    enter_button_editor(&mut menu, 3);

    menu.on_button_down(ButtonId::Next);
    assert_eq!(menu.model().button(0, 3).value_low, 5);
    assert_eq!(menu.surface().draws(), 0);

    menu.on_button_down(ButtonId::Previous);
    assert_eq!(menu.model().button(0, 3).value_low, 4);
    assert_eq!(menu.surface().printed(), vec!["4  "]);
    assert_eq!(menu.ui().page, 0);
}

#[test]
fn encoder_editor_ignores_page_buttons() {
    let mut menu = settled_menu();
    enter_encoder_editor(&mut menu, 0);
    menu.on_button_down(ButtonId::Next);
    assert_eq!(menu.ui().page, 0);
    assert_eq!(menu.ui().mode, DisplayMode::EditEncoder);
    assert_eq!(menu.surface().draws(), 0);
}

#[test]
fn menu_press_leaves_editor_and_release_clears_latch() {
    let mut menu = settled_menu();
    enter_button_editor(&mut menu, 0);
    menu.on_button_up(ButtonId::Menu);
    assert!(menu.ui().menu_latch);

    menu.on_button_up(ButtonId::Control(0));
    menu.on_button_down(ButtonId::Menu);
    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert_eq!(menu.refresh().countdown(), 21);

    menu.on_button_up(ButtonId::Menu);
    assert!(!menu.ui().menu_latch);
}

#[test]
fn edits_apply_in_place() {
    let mut menu = settled_menu();
    enter_encoder_editor(&mut menu, 5);
    menu.on_encoder_turned(4, 7);
    menu.on_encoder_turned(5, -27);
    menu.on_button_down(ButtonId::Menu);

    let encoder = menu.model().encoder(0, 5);
    assert_eq!(encoder.controller, 20 + 5 + 7);
    assert_eq!(encoder.max_value, 100);
    assert_eq!(menu.store().saves, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Save flow
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn save_screen_is_held_before_painting() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Save);
    assert_eq!(menu.ui().mode, DisplayMode::Save);
    assert_eq!(menu.refresh().countdown(), 20);

    let hold = MenuConfig::default().save_enter_ticks();
    for _ in 0..hold {
        menu.advance_refresh_step();
        assert!(!menu.surface().paused);
    }
    assert_eq!(menu.surface().draws(), 0);

    menu.advance_refresh_step();
    assert!(menu.surface().paused);
    assert_eq!(menu.surface().ops.first(), Some(&Op::Resume));
    assert!(menu.surface().ops.contains(&Op::Fill(30, 50, 190, 240, Color::Red)));
}

#[test]
fn second_save_press_persists_once() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Save);
    settle(&mut menu);
    menu.on_button_down(ButtonId::Save);

    assert_eq!(menu.store().saves, 1);
    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert!(menu.surface().printed().contains(&"Saved"));
    assert_eq!(
        menu.refresh().hold_remaining(),
        MenuConfig::default().save_confirm_ticks()
    );
    assert_eq!(menu.refresh().countdown(), 21);
}

#[test]
fn banner_stays_until_hold_expires() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Save);
    settle(&mut menu);
    menu.on_button_down(ButtonId::Save);
    menu.surface_mut().take();

    for _ in 0..MenuConfig::default().save_confirm_ticks() {
        menu.advance_refresh_step();
    }
    assert!(menu.surface().ops.is_empty());

    menu.advance_refresh_step();
    let ops = menu.surface_mut().take();
    assert_eq!(ops.first(), Some(&Op::Pause));
    assert!(ops.contains(&Op::Clear));
}

#[test]
fn other_button_cancels_save() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Save);
    settle(&mut menu);
    menu.on_button_down(ButtonId::Other(3));

    assert_eq!(menu.store().saves, 0);
    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert_eq!(menu.refresh().hold_remaining(), 0);
    assert_eq!(menu.refresh().countdown(), 21);
    assert!(menu.surface().paused);
}

#[test]
fn cancel_during_entry_hold_drops_the_hold() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Save);
    menu.advance_refresh_step();
    menu.on_button_down(ButtonId::Menu);

    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert_eq!(menu.refresh().hold_remaining(), 0);
    assert!(menu.surface().paused);
    menu.surface_mut().take();
    menu.advance_refresh_step();
    assert_eq!(menu.surface().ops.first(), Some(&Op::Clear));
}

#[test]
fn failed_save_shows_failure_banner() {
    let mut menu = settled_menu();
    menu.store_mut().fail_save = true;
    menu.on_button_down(ButtonId::Save);
    settle(&mut menu);
    menu.on_button_down(ButtonId::Save);

    assert_eq!(menu.store().saves, 1);
    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert!(menu.surface().printed().contains(&"Failed"));
    assert!(!menu.surface().printed().contains(&"Saved"));
}

#[test]
fn save_screen_ignores_encoders_and_releases() {
    let mut menu = settled_menu();
    menu.on_button_down(ButtonId::Save);
    settle(&mut menu);
    menu.surface_mut().take();

    menu.on_encoder_turned(0, 5);
    menu.on_button_up(ButtonId::Control(0));
    menu.on_button_up(ButtonId::Save);
    assert_eq!(menu.ui().mode, DisplayMode::Save);
    assert_eq!(menu.model().encoder(0, 0).value, 0);
    assert!(menu.surface().ops.is_empty());
}

#[test]
fn handle_dispatches_events() {
    let mut menu = settled_menu();
    menu.handle(InputEvent::EncoderTurned { index: 0, ticks: 2 });
    assert_eq!(menu.model().encoder(0, 0).value, 2);

    menu.handle(InputEvent::ButtonDown(ButtonId::Menu));
    menu.handle(InputEvent::ButtonDown(ButtonId::Control(2)));
    assert_eq!(menu.ui().mode, DisplayMode::EditButton);

    menu.handle(InputEvent::ButtonDown(ButtonId::Menu));
    menu.handle(InputEvent::ButtonUp(ButtonId::Menu));
    assert_eq!(menu.ui().mode, DisplayMode::Main);
    assert!(!menu.ui().menu_latch);
}

#[test]
fn first_step_of_each_table() {
    assert_eq!(refresh::steps_for(DisplayMode::Main)[0], RefreshStep::TitleBar);
    assert_eq!(refresh::steps_for(DisplayMode::EditButton)[0], RefreshStep::EditFrame);
    assert_eq!(refresh::steps_for(DisplayMode::Save)[0], RefreshStep::SaveFrame);
}
