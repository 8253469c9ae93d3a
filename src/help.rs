use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, stdout, Write};

/// Show a modal help overlay drawn straight over the current frame; the
/// back buffer is left untouched and restored on close.
/// Returns true if the user requested quit (q/Esc) while the overlay is open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    draw_overlay(width, height, help_text)?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore previous frame from the back buffer.
    term.render()?;
    Ok(false)
}

fn draw_overlay(width: u16, height: u16, help_text: &str) -> io::Result<()> {
    let lines: Vec<&str> = help_text.lines().collect();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = inner + 4;
    let box_height = lines.len() + 2;

    let start_x = ((width as usize).saturating_sub(box_width) / 2) as u16;
    let start_y = ((height as usize).saturating_sub(box_height) / 2) as u16;

    let mut out = stdout();
    queue!(
        out,
        SetForegroundColor(Color::White),
        MoveTo(start_x, start_y),
        Print(format!("┌{}┐", "─".repeat(box_width - 2)))
    )?;

    for (i, line) in lines.iter().enumerate() {
        let pad = inner - line.chars().count();
        queue!(
            out,
            MoveTo(start_x, start_y + 1 + i as u16),
            Print(format!("│ {}{} │", line, " ".repeat(pad)))
        )?;
    }

    queue!(
        out,
        MoveTo(start_x, start_y + box_height as u16 - 1),
        Print(format!("└{}┘", "─".repeat(box_width - 2))),
        ResetColor
    )?;
    out.flush()
}
