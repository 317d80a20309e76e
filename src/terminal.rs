use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Back-buffered terminal with mouse capture
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate the back buffer after the terminal changed size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the buffer, painting every cell with `bg`
    pub fn clear(&mut self, bg: Option<Color>) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell { bg, ..Cell::default() };
            }
        }
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = cell;
        }
    }

    /// Set a string starting at position, keeping the background underneath
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            let bg = self.bg_at(x + i as i32, y);
            self.set(x + i as i32, y, Cell { ch, fg, bg, bold });
        }
    }

    /// Fill a horizontal run with a background color
    pub fn fill_row(&mut self, y: i32, bg: Option<Color>) {
        for x in 0..self.width as i32 {
            self.set(x, y, Cell { bg, ..Cell::default() });
        }
    }

    fn bg_at(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && y >= 0 {
            self.buffer
                .get(y as usize)
                .and_then(|row| row.get(x as usize))
                .and_then(|cell| cell.bg)
        } else {
            None
        }
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            // Only emit color changes between runs
            let mut fg = None;
            let mut bg = None;
            for cell in row {
                if cell.fg != fg {
                    match cell.fg {
                        Some(color) => queue!(out, SetForegroundColor(color))?,
                        None => queue!(out, SetForegroundColor(Color::Reset))?,
                    }
                    fg = cell.fg;
                }
                if cell.bg != bg {
                    match cell.bg {
                        Some(color) => queue!(out, SetBackgroundColor(color))?,
                        None => queue!(out, SetBackgroundColor(Color::Reset))?,
                    }
                    bg = cell.bg;
                }
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold), Print(cell.ch), SetAttribute(Attribute::NormalIntensity))?;
                } else {
                    queue!(out, Print(cell.ch))?;
                }
            }
            queue!(out, ResetColor)?;
        }

        out.flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for a key, mouse or resize event
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if poll(timeout)? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Helper to create RGB colors
pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}
