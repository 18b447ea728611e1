//! embedded-graphics adapter for the display capability.
//!
//! Draws into any `DrawTarget<Color = Rgb565>` (a frame buffer or a TFT
//! driver) with two monospace fonts: 10x20 for [`DisplaySurface::print`]
//! and 6x12 for [`DisplaySurface::print_small`]. Text cells are painted
//! with the current background colour so a reprinted field fully covers
//! what was there before.
//!
//! Pause/resume only flips a flag. The host checks
//! [`GraphicsSurface::is_refresh_paused`] before pushing a frame.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X12};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use super::surface::{Color, DisplaySurface};
use crate::config::{BIG_CHAR_HEIGHT, BIG_CHAR_WIDTH};
use crate::error::Error;

/// Panel colour for a palette entry.
pub fn rgb565(color: Color) -> Rgb565 {
    match color {
        Color::Black => Rgb565::BLACK,
        Color::White => Rgb565::WHITE,
        Color::Yellow => Rgb565::YELLOW,
        Color::Red => Rgb565::RED,
        Color::Orange => Rgb565::new(31, 41, 0),
        Color::Green => Rgb565::GREEN,
        Color::Gray => Rgb565::new(16, 32, 16),
        Color::LightGray => Rgb565::new(24, 48, 24),
        Color::DarkGray => Rgb565::new(8, 16, 8),
        Color::DarkBlue => Rgb565::new(0, 0, 12),
    }
}

pub struct GraphicsSurface<T> {
    target: T,
    cursor: Point,
    foreground: Rgb565,
    background: Rgb565,
    paused: bool,
    failed: bool,
}

impl<T> GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: T) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
            paused: false,
            failed: false,
        }
    }

    /// `true` while a staged repaint is in flight.
    pub fn is_refresh_paused(&self) -> bool {
        self.paused
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }

    /// Report and clear a draw failure since the last call.
    pub fn take_error(&mut self) -> Result<(), Error> {
        if core::mem::take(&mut self.failed) {
            Err(Error::Display)
        } else {
            Ok(())
        }
    }

    fn draw_text(&mut self, text: &str, font: &'static MonoFont<'static>) {
        let style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(self.foreground)
            .background_color(self.background)
            .build();
        match Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.target) {
            Ok(next) => self.cursor = next,
            Err(_) => self.failed = true,
        }
    }
}

impl<T> DisplaySurface for GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self) {
        if self.target.clear(Rgb565::BLACK).is_err() {
            self.failed = true;
        }
    }

    fn fill_area(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color) {
        let drawn = Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(rgb565(color)))
        .draw(&mut self.target);
        if drawn.is_err() {
            self.failed = true;
        }
    }

    fn set_cursor(&mut self, col: u16, row: u16) {
        self.cursor = Point::new(
            (col * BIG_CHAR_WIDTH) as i32,
            (row * BIG_CHAR_HEIGHT) as i32,
        );
    }

    fn set_cursor_in_pixel(&mut self, x: u16, y: u16) {
        self.cursor = Point::new(x as i32, y as i32);
    }

    fn set_char_color(&mut self, color: Color) {
        self.foreground = rgb565(color);
    }

    fn set_char_background_color(&mut self, color: Color) {
        self.background = rgb565(color);
    }

    fn print(&mut self, text: &str) {
        self.draw_text(text, &FONT_10X20);
    }

    fn print_small(&mut self, text: &str) {
        self.draw_text(text, &FONT_6X12);
    }

    fn pause_refresh(&mut self) {
        self.paused = true;
    }

    fn resume_refresh(&mut self) {
        self.paused = false;
    }
}
