use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Active color scheme, switchable at runtime
#[derive(Clone, Copy)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self {
            scheme: default_scheme,
        }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('!') => self.scheme = 1, // Shift+1: fire
            KeyCode::Char('@') => self.scheme = 2, // Shift+2: ice
            KeyCode::Char('#') => self.scheme = 3, // Shift+3: gold
            KeyCode::Char('$') => self.scheme = 4, // Shift+4: green
            KeyCode::Char(')') => self.scheme = 0, // Shift+0: mono
            _ => return false,
        }
        true
    }

    /// Mono mode lets the renderer's own segment color through
    pub fn is_mono(&self) -> bool {
        self.scheme == 0
    }
}

/// Get color from scheme based on intensity (0=muted, 1=line art,
/// 2=highlighted text, 3=selection border)
pub fn scheme_color(scheme: u8, intensity: u8) -> Color {
    match scheme {
        1 => match intensity {
            // Red/Yellow (fire)
            0 => Color::DarkRed,
            1 => Color::Red,
            2 => Color::DarkYellow,
            _ => Color::Yellow,
        },
        2 => match intensity {
            // Blue/Cyan (ice)
            0 => Color::DarkBlue,
            1 => Color::Blue,
            2 => Color::Cyan,
            _ => Color::AnsiValue(14), // Bright cyan
        },
        3 => match intensity {
            // Yellow/Gold (gold)
            0 => Color::DarkYellow,
            1 => Color::Yellow,
            2 => Color::Yellow,
            _ => Color::AnsiValue(11), // Bright yellow
        },
        4 => match intensity {
            // Green (matrix)
            0 => Color::DarkGreen,
            1 => Color::Green,
            2 => Color::Green,
            _ => Color::AnsiValue(10), // Bright green
        },
        _ => match intensity {
            // Default: White/Grey (mono)
            0 => Color::DarkGrey,
            1 => Color::Grey,
            2 => Color::White,
            _ => Color::White,
        },
    }
}
