use crate::terminal::{Cell, Terminal};
use crossterm::style::Color;

pub const SANDBOX_HELP: &str = "\
LIFE SANDBOX
─────────────────────────────
 Space    Play/pause
 . / n    Single step
 + / -    Speed up/down
 c        Clear grid
 r        Random fill
 Ctrl+S   Save
 Ctrl+L   Load
 Ctrl+Z   Undo
 Ctrl+Y   Redo
 p / P    Next/previous pattern
 o        Rotate pattern
 f        Flip pattern
 Esc      Cancel pattern
 e        Toggle draw/erase
 t        Cycle theme
 Arrows   Pan view
 [ / ]    Zoom out/in
 Mouse    Click to draw or place
─────────────────────────────
 q        Quit
 ?        Close help";

/// Top-left corner and size of a box holding `lines`, centered in the area.
fn layout(width: u16, height: u16, lines: &[&str]) -> (usize, usize, usize, usize) {
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2;
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    (start_x, start_y, box_width, box_height)
}

/// Render a centered help box into the back buffer.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str, border: Color, text: Color, bg: Color) {
    if help_text.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let lines: Vec<&str> = help_text.lines().collect();
    let (start_x, start_y, box_width, box_height) = layout(width, height, &lines);
    let inner = box_width - 4;

    let put = |term: &mut Terminal, x: usize, y: usize, ch: char, fg: Color| {
        term.set(x as i32, y as i32, Cell { ch, fg: Some(fg), bg: Some(bg), bold: false });
    };

    let bottom_y = start_y + box_height - 1;
    for x in 1..box_width - 1 {
        put(term, start_x + x, start_y, '─', border);
        put(term, start_x + x, bottom_y, '─', border);
    }
    put(term, start_x, start_y, '┌', border);
    put(term, start_x + box_width - 1, start_y, '┐', border);
    put(term, start_x, bottom_y, '└', border);
    put(term, start_x + box_width - 1, bottom_y, '┘', border);

    for (i, line) in lines.iter().enumerate() {
        let y = start_y + 1 + i;
        put(term, start_x, y, '│', border);
        let padded = format!(" {:<inner$} ", line);
        for (j, ch) in padded.chars().enumerate() {
            put(term, start_x + 1 + j, y, ch, text);
        }
        put(term, start_x + box_width - 1, y, '│', border);
    }
}
