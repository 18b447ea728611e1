//! Draw actions: one function per refresh step plus the single-field
//! redraws used for live feedback.
//!
//! Nothing here keeps state. Every function reads what it needs from the
//! model and the [`UiState`] and leaves the character background black.

use super::editor::ParamField;
use super::format::{channel_field, digit_count, FieldFormat, ENCODER_VALUE, PARAM_NUMBER};
use super::refresh::RefreshStep;
use super::surface::{Color, DisplaySurface};
use super::{DisplayMode, UiState};
use crate::config::{
    BIG_CHAR_HEIGHT, BIG_CHAR_WIDTH, BUTTON_BOX_HEIGHT, BUTTON_BOX_WIDTH, COLUMN_CELLS,
    COLUMN_X_OFFSET, GLOBAL_MIDI_CHANNEL, SCREEN_HEIGHT, SCREEN_WIDTH, SMALL_CHAR_HEIGHT,
    TITLE_BAR_HEIGHT,
};
use crate::model::{Button, ButtonType, ControlName, Encoder, ModelStore};

/// Bare number, no padding.
const PLAIN: FieldFormat = FieldFormat::left(0);

/// Big-font column where editor values start.
const EDIT_VALUE_COL: u16 = 14;
const EDIT_LABEL_COL: u16 = 4;
const EDIT_HINT_X: u16 = 10;

const BODY_Y: u16 = TITLE_BAR_HEIGHT + 1;
const BODY_HEIGHT: u16 = SCREEN_HEIGHT - BODY_Y;

// ── Geometry ────────────────────────────────────────────────────────

/// Top-left pixel of an encoder cell (two rows of three).
pub fn encoder_origin(index: usize) -> (u16, u16) {
    cell_origin(index, 3)
}

/// Top-left pixel of a button cell.
pub fn button_origin(index: usize) -> (u16, u16) {
    cell_origin(index, 10)
}

fn cell_origin(index: usize, first_row: u16) -> (u16, u16) {
    let col = (index % 3) as u16;
    let row = (index / 3) as u16;
    let x = col * COLUMN_CELLS * BIG_CHAR_WIDTH + COLUMN_X_OFFSET;
    let y = (first_row + 3 * row) * BIG_CHAR_HEIGHT;
    (x, y)
}

// ── Refresh steps ───────────────────────────────────────────────────

/// Perform one refresh step. [`RefreshStep::Idle`] draws nothing.
pub fn draw_step<D, M>(surface: &mut D, model: &M, ui: &UiState, title: &str, step: RefreshStep)
where
    D: DisplaySurface,
    M: ModelStore + ?Sized,
{
    let page = ui.page as usize;
    match step {
        RefreshStep::TitleBar => draw_title_bar(surface, title),
        RefreshStep::MainFrames => draw_main_frames(surface, ui),
        RefreshStep::EncoderCell(i) => {
            draw_encoder_cell(surface, model.encoder(page, i as usize), i as usize)
        }
        RefreshStep::ButtonCell(i) => {
            draw_button_cell(surface, model.button(page, i as usize), i as usize)
        }
        RefreshStep::EditFrame => draw_edit_frame(surface, ui.mode),
        RefreshStep::EditTitle => draw_edit_title(surface, ui.mode),
        RefreshStep::EditField(field) => {
            draw_edit_row(surface, field);
            draw_param_field(surface, model, ui, field);
        }
        RefreshStep::SaveFrame => {
            surface.fill_area(30, 50, 190, 240, Color::Red);
            surface.fill_area(33, 53, 184, 234, Color::Black);
        }
        RefreshStep::SaveTitle => {
            surface.set_char_color(Color::Red);
            surface.set_cursor(9, 6);
            surface.print("Save");
        }
        RefreshStep::SaveHelp => {
            surface.set_char_color(Color::White);
            surface.set_cursor_in_pixel(50, 180);
            surface.print_small("'SAVE' again to save");
            surface.set_cursor_in_pixel(60, 210);
            surface.print_small("Any other button");
            surface.set_cursor_in_pixel(88, 220);
            surface.print_small("To Cancel");
        }
        RefreshStep::Idle => {}
    }
}

fn draw_title_bar<D: DisplaySurface>(surface: &mut D, title: &str) {
    surface.clear();
    surface.fill_area(0, 0, SCREEN_WIDTH, TITLE_BAR_HEIGHT, Color::DarkBlue);
    surface.set_cursor_in_pixel(8, 2);
    surface.set_char_color(Color::Yellow);
    surface.set_char_background_color(Color::DarkBlue);
    surface.print(title);
    surface.set_char_background_color(Color::Black);
}

fn draw_main_frames<D: DisplaySurface>(surface: &mut D, ui: &UiState) {
    surface.fill_area(0, BODY_Y, SCREEN_WIDTH, BODY_HEIGHT, Color::Black);
    for first_row in [3, 10] {
        let y = first_row * BIG_CHAR_HEIGHT - 10;
        surface.fill_area(0, y, SCREEN_WIDTH, 126, Color::DarkBlue);
        surface.fill_area(1, y + 1, SCREEN_WIDTH - 2, 124, Color::Black);
    }
    draw_channel_readout(surface, ui);
}

/// "Midi Channel n" and "page p" under the title bar.
pub fn draw_channel_readout<D: DisplaySurface>(surface: &mut D, ui: &UiState) {
    surface.set_char_color(Color::DarkGray);
    surface.set_cursor_in_pixel(10, 28);
    surface.print_small("Midi Channel ");
    surface.set_char_color(Color::White);
    surface.print_small(&FieldFormat::left(2).number(ui.midi_channel as i32 + 1));

    surface.set_char_color(Color::DarkGray);
    surface.set_cursor_in_pixel(178, 28);
    surface.print_small("page ");
    surface.set_char_color(Color::White);
    surface.print_small(&PLAIN.number(ui.page as i32 + 1));
}

// ── Main screen cells ───────────────────────────────────────────────

fn draw_cell_header<D: DisplaySurface>(
    surface: &mut D,
    (x, y): (u16, u16),
    name: &ControlName,
    controller: u8,
    channel: u8,
) {
    surface.set_char_color(Color::White);
    surface.set_cursor_in_pixel(x, y);
    surface.print(name.as_str());

    surface.set_char_color(Color::LightGray);
    surface.set_cursor_in_pixel(x + 2, y + BIG_CHAR_HEIGHT - 1);
    surface.print_small("cc");
    surface.print_small(&PLAIN.number(controller as i32));
    if channel != GLOBAL_MIDI_CHANNEL {
        surface.set_char_color(Color::Orange);
        surface.print_small(" ch");
        surface.print_small(&PLAIN.number(channel as i32 + 1));
    }
}

pub fn draw_encoder_cell<D: DisplaySurface>(surface: &mut D, encoder: &Encoder, index: usize) {
    let origin = encoder_origin(index);
    draw_cell_header(surface, origin, &encoder.name, encoder.controller, encoder.midi_channel);
    draw_encoder_value(surface, encoder, index);
}

/// Live value under an encoder cell.
pub fn draw_encoder_value<D: DisplaySurface>(surface: &mut D, encoder: &Encoder, index: usize) {
    let (x, y) = encoder_origin(index);
    surface.set_char_color(Color::Yellow);
    surface.set_cursor_in_pixel(x, y + BIG_CHAR_HEIGHT + SMALL_CHAR_HEIGHT);
    surface.print(&ENCODER_VALUE.number(encoder.value as i32));
}

pub fn draw_button_cell<D: DisplaySurface>(surface: &mut D, button: &Button, index: usize) {
    let origin = button_origin(index);
    draw_cell_header(surface, origin, &button.name, button.controller, button.midi_channel);
    draw_button_value(surface, button, index);
}

/// Value box under a button cell: filled green while on, outlined
/// otherwise (grey for push, green for toggle).
pub fn draw_button_value<D: DisplaySurface>(surface: &mut D, button: &Button, index: usize) {
    let (x, y) = button_origin(index);
    let y = y + BIG_CHAR_HEIGHT + SMALL_CHAR_HEIGHT;
    let (w, h) = (BUTTON_BOX_WIDTH, BUTTON_BOX_HEIGHT);

    if button.on {
        surface.fill_area(x, y, w, h, Color::Green);
        surface.set_char_background_color(Color::Green);
        surface.set_char_color(Color::Black);
    } else {
        let border = match button.button_type {
            ButtonType::Push => Color::DarkGray,
            ButtonType::Toggle => Color::Green,
        };
        surface.fill_area(x, y, w, h, border);
        surface.fill_area(x + 1, y + 1, w - 2, h - 2, Color::Black);
        surface.set_char_color(Color::Gray);
    }

    let value = button.value();
    let half_text = digit_count(value) as u16 * BIG_CHAR_WIDTH / 2 + 1;
    surface.set_cursor_in_pixel(x + w / 2 - half_text, y + 2);
    surface.print(&PLAIN.number(value as i32));
    surface.set_char_background_color(Color::Black);
}

// ── Editor screens ──────────────────────────────────────────────────

fn edit_frame_color(mode: DisplayMode) -> Color {
    match mode {
        DisplayMode::EditButton => Color::Orange,
        _ => Color::Red,
    }
}

fn draw_edit_frame<D: DisplaySurface>(surface: &mut D, mode: DisplayMode) {
    surface.fill_area(0, BODY_Y, SCREEN_WIDTH, BODY_HEIGHT, Color::Black);
    surface.fill_area(0, 50, SCREEN_WIDTH, 250, edit_frame_color(mode));
    surface.fill_area(2, 72, SCREEN_WIDTH - 4, 216, Color::Black);
}

fn draw_edit_title<D: DisplaySurface>(surface: &mut D, mode: DisplayMode) {
    let (x, text) = match mode {
        DisplayMode::EditButton => (59, "Edit Button"),
        _ => (54, "Edit Encoder"),
    };
    surface.set_char_background_color(edit_frame_color(mode));
    surface.set_char_color(Color::Black);
    surface.set_cursor_in_pixel(x, 52);
    surface.print(text);
    surface.set_char_background_color(Color::Black);
}

/// Hint and label of one editor row.
fn draw_edit_row<D: DisplaySurface>(surface: &mut D, field: ParamField) {
    surface.set_cursor_in_pixel(EDIT_HINT_X, field.row() * BIG_CHAR_HEIGHT + 3);
    surface.set_char_color(Color::Gray);
    surface.print_small(field.hint());
    surface.set_cursor(EDIT_LABEL_COL, field.row());
    surface.set_char_color(Color::White);
    surface.print(field.label());
}

/// Redraw the value of one editor field of the control under edit.
///
/// Fields that do not belong to the edited kind draw nothing.
pub fn draw_param_field<D, M>(surface: &mut D, model: &M, ui: &UiState, field: ParamField)
where
    D: DisplaySurface,
    M: ModelStore + ?Sized,
{
    let page = ui.page as usize;
    let target = ui.edit_target as usize;
    match ui.mode {
        DisplayMode::EditEncoder => {
            draw_encoder_param(surface, model.encoder(page, target), ui.edit_cursor, field)
        }
        DisplayMode::EditButton => {
            draw_button_param(surface, model.button(page, target), ui.edit_cursor, field)
        }
        DisplayMode::Main | DisplayMode::Save => {}
    }
}

pub fn draw_encoder_param<D: DisplaySurface>(
    surface: &mut D,
    encoder: &Encoder,
    cursor: u8,
    field: ParamField,
) {
    match field {
        ParamField::Name => draw_name_field(surface, &encoder.name, cursor),
        ParamField::MidiChannel => draw_value(surface, field, &channel_field(encoder.midi_channel)),
        ParamField::Controller => draw_number(surface, field, encoder.controller),
        ParamField::MinValue => draw_number(surface, field, encoder.min_value),
        ParamField::MaxValue => draw_number(surface, field, encoder.max_value),
        ParamField::ButtonType | ParamField::ValueHigh | ParamField::ValueLow => {}
    }
}

pub fn draw_button_param<D: DisplaySurface>(
    surface: &mut D,
    button: &Button,
    cursor: u8,
    field: ParamField,
) {
    match field {
        ParamField::Name => draw_name_field(surface, &button.name, cursor),
        ParamField::MidiChannel => draw_value(surface, field, &channel_field(button.midi_channel)),
        ParamField::Controller => draw_number(surface, field, button.controller),
        ParamField::ButtonType => {
            let text = match button.button_type {
                ButtonType::Push => "Push",
                ButtonType::Toggle => "Togl",
            };
            draw_value(surface, field, text);
        }
        ParamField::ValueHigh => draw_number(surface, field, button.value_high),
        ParamField::ValueLow => draw_number(surface, field, button.value_low),
        ParamField::MinValue | ParamField::MaxValue => {}
    }
}

/// Name in yellow with the character under the cursor in red; a space
/// under the cursor shows as `_`.
fn draw_name_field<D: DisplaySurface>(surface: &mut D, name: &ControlName, cursor: u8) {
    let row = ParamField::Name.row();
    draw_value(surface, ParamField::Name, name.as_str());

    let pos = cursor.min(crate::config::NAME_CURSOR_MAX);
    surface.set_cursor(EDIT_VALUE_COL + pos as u16, row);
    surface.set_char_color(Color::Red);
    match name.char_at(pos as usize) {
        b' ' => surface.print_char('_'),
        c => surface.print_char(c as char),
    }
}

fn draw_number<D: DisplaySurface>(surface: &mut D, field: ParamField, value: u8) {
    draw_value(surface, field, &PARAM_NUMBER.number(value as i32));
}

fn draw_value<D: DisplaySurface>(surface: &mut D, field: ParamField, text: &str) {
    surface.set_char_color(Color::Yellow);
    surface.set_cursor(EDIT_VALUE_COL, field.row());
    surface.print(text);
}

// ── Save confirmation ───────────────────────────────────────────────

/// Banner shown after the second save press.
pub fn draw_save_banner<D: DisplaySurface>(surface: &mut D, saved: bool) {
    surface.fill_area(30, 50, 190, 240, Color::Red);
    surface.set_char_background_color(Color::Red);
    surface.set_char_color(Color::Black);
    surface.set_cursor_in_pixel(94, 120);
    surface.print(if saved { "Saved" } else { "Failed" });
    surface.set_char_background_color(Color::Black);
}
