use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction: a cell back buffer flushed to the screen in one
/// pass. With `alternate_screen` the terminal is switched to raw mode
/// for an interactive session; without it the buffer is only ever
/// printed to stdout.
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Cell>,
    alternate_screen: bool,
}

/// A single cell in the back buffer
#[derive(Clone, Copy)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self {
            width,
            height,
            buffer: vec![Cell::default(); width as usize * height as usize],
            alternate_screen,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reset the back buffer to blanks
    pub fn clear(&mut self) {
        self.buffer.fill(Cell::default());
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))
    }

    /// Set a character at position; out-of-bounds writes are dropped
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize * self.width as usize + x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Flush the back buffer to the screen
    pub fn render(&self) -> io::Result<()> {
        let mut out = stdout();
        for y in 0..self.height {
            queue!(out, MoveTo(0, y))?;
            for x in 0..self.width {
                self.queue_cell(&mut out, x, y)?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }

    /// Write the back buffer to stdout as plain colored lines (print
    /// mode, no raw terminal involved)
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut out = stdout();
        for y in 0..self.height {
            for x in 0..self.width {
                self.queue_cell(&mut out, x, y)?;
            }
            queue!(out, Print('\n'))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }

    fn queue_cell(&self, out: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
        let cell = self.buffer[y as usize * self.width as usize + x as usize];

        if cell.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        match cell.fg {
            Some(color) => queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?,
            None => queue!(out, Print(cell.ch))?,
        }
        if cell.bold {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Helper to create RGB colors
pub fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}
