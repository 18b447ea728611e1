//! Display-surface capability used by every draw action.
//!
//! Positions are in pixels except [`DisplaySurface::set_cursor`], which
//! addresses big-font character cells. Text is drawn in the current
//! character colours starting at the cursor; the cursor advances past
//! the printed text.

/// Panel palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Black,
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Gray,
    LightGray,
    DarkGray,
    DarkBlue,
}

pub trait DisplaySurface {
    /// Fill the whole panel with black.
    fn clear(&mut self);

    fn fill_area(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color);

    /// Move the text cursor to a big-font character cell.
    fn set_cursor(&mut self, col: u16, row: u16);

    fn set_cursor_in_pixel(&mut self, x: u16, y: u16);

    fn set_char_color(&mut self, color: Color);

    fn set_char_background_color(&mut self, color: Color);

    /// Print in the big font.
    fn print(&mut self, text: &str);

    /// Print in the small font.
    fn print_small(&mut self, text: &str);

    /// Stop pushing the frame buffer to the panel.
    fn pause_refresh(&mut self);

    /// Resume continuous panel refresh.
    fn resume_refresh(&mut self);

    fn print_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.print(c.encode_utf8(&mut buf));
    }
}
